use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{DirectoryError, Result};
use crate::types::ProfessionalRow;

use super::ProfessionalSource;

/// Rows held in memory.
///
/// Clones share the same rows, so a test can swap the data (or make the
/// source fail) after handing a clone to a consumer.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    state: Arc<Mutex<StaticState>>,
}

#[derive(Debug, Default)]
struct StaticState {
    rows: Vec<ProfessionalRow>,
    failure: Option<String>,
    delay: Option<Duration>,
    fetches: usize,
}

impl StaticSource {
    pub fn new(rows: Vec<ProfessionalRow>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StaticState {
                rows,
                ..StaticState::default()
            })),
        }
    }

    /// Replaces the rows returned by later fetches.
    pub fn set_rows(&self, rows: Vec<ProfessionalRow>) {
        if let Ok(mut state) = self.state.lock() {
            state.rows = rows;
        }
    }

    /// Makes later fetches fail with the given message, or succeed again with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        if let Ok(mut state) = self.state.lock() {
            state.failure = message.map(str::to_string);
        }
    }

    /// Makes later fetches wait before answering, like a slow backend.
    pub fn set_delay(&self, delay: Option<Duration>) {
        if let Ok(mut state) = self.state.lock() {
            state.delay = delay;
        }
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.state.lock().map(|state| state.fetches).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StaticState>> {
        self.state
            .lock()
            .map_err(|_| DirectoryError::Fetch("static source lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProfessionalSource for StaticSource {
    fn label(&self) -> String {
        "memory".to_string()
    }

    async fn fetch_all(&self) -> Result<Vec<ProfessionalRow>> {
        let delay = {
            let mut state = self.lock()?;
            state.fetches += 1;
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.lock()?;
        match &state.failure {
            Some(message) => Err(DirectoryError::Fetch(message.clone())),
            None => Ok(state.rows.clone()),
        }
    }
}
