use std::time::Duration;

use async_trait::async_trait;

use crate::error::{DirectoryError, Result};
use crate::types::ProfessionalRow;

use super::ProfessionalSource;

/// Table holding professional rows.
pub const DEFAULT_TABLE: &str = "majstori";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Longest response body excerpt kept in an error message.
const ERROR_BODY_CHARS: usize = 200;

/// Connection settings for a PostgREST-style table endpoint.
#[derive(Debug, Clone)]
pub struct RestSourceConfig {
    pub base_url: String,
    /// Sent both as the `apikey` header and as a bearer token.
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RestSourceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetches the whole professional table with `GET /rest/v1/{table}?select=*`.
#[derive(Debug, Clone)]
pub struct RestSource {
    client: reqwest::Client,
    config: RestSourceConfig,
}

impl RestSource {
    pub fn new(config: RestSourceConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(DirectoryError::InvalidInput(
                "backend base url is empty".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::Fetch(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Full request URL for the configured table.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*",
            self.config.base_url.trim().trim_end_matches('/'),
            self.config.table
        )
    }
}

#[async_trait]
impl ProfessionalSource for RestSource {
    fn label(&self) -> String {
        format!("rest:{}", self.config.table)
    }

    async fn fetch_all(&self) -> Result<Vec<ProfessionalRow>> {
        let url = self.endpoint();
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DirectoryError::Fetch(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::Fetch(format!("failed to read response body: {e}")))?;
        if !status.is_success() {
            let excerpt: String = body.chars().take(ERROR_BODY_CHARS).collect();
            return Err(DirectoryError::Fetch(format!(
                "backend returned {status}: {excerpt}"
            )));
        }

        let rows: Vec<ProfessionalRow> = serde_json::from_str(&body)?;
        log::debug!("fetched {} rows from table {}", rows.len(), self.config.table);
        Ok(rows)
    }
}
