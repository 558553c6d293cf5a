//! Snapshot cache in front of the record source.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use directory::{CategoryTaxonomy, DirectoryEngine, DirectoryError, SharedSource, Snapshot};

const SNAPSHOT_KEY: &str = "snapshot";

/// Serves directory engines built from a cached snapshot.
///
/// A snapshot is reused until its TTL expires or it is invalidated. Concurrent
/// requests for a missing snapshot share one load. Failed loads are never
/// cached, so the next request retries the source.
#[derive(Clone)]
pub struct Catalog {
    source: SharedSource,
    taxonomy: Arc<CategoryTaxonomy>,
    cache: Option<Cache<&'static str, Arc<Snapshot>>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .cache
            .as_ref()
            .is_some_and(|cache| cache.contains_key(&SNAPSHOT_KEY));
        f.debug_struct("Catalog")
            .field("source", &self.source.label())
            .field("cached", &cached)
            .finish()
    }
}

impl Catalog {
    /// A zero TTL disables caching.
    pub fn new(source: SharedSource, taxonomy: CategoryTaxonomy, ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });
        Self {
            source,
            taxonomy: Arc::new(taxonomy),
            cache,
        }
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    pub fn source_label(&self) -> String {
        self.source.label()
    }

    /// The cached snapshot, without loading.
    pub async fn cached(&self) -> Option<Arc<Snapshot>> {
        match &self.cache {
            Some(cache) => cache.get(&SNAPSHOT_KEY).await,
            None => None,
        }
    }

    /// Returns the cached snapshot or loads a fresh one.
    pub async fn snapshot(&self) -> directory::Result<Arc<Snapshot>> {
        let Some(cache) = &self.cache else {
            return self.load().await;
        };
        cache
            .try_get_with(SNAPSHOT_KEY, self.load())
            .await
            .map_err(|shared| {
                Arc::try_unwrap(shared)
                    .unwrap_or_else(|shared| DirectoryError::Fetch(shared.to_string()))
            })
    }

    async fn load(&self) -> directory::Result<Arc<Snapshot>> {
        match Snapshot::load(self.source.as_ref()).await {
            Ok(snapshot) => Ok(Arc::new(snapshot)),
            Err(error) => {
                tracing::warn!("snapshot load from {} failed: {error}", self.source.label());
                Err(error)
            }
        }
    }

    /// Drops the cached snapshot and loads a fresh one.
    pub async fn refresh(&self) -> directory::Result<Arc<Snapshot>> {
        self.invalidate().await;
        self.snapshot().await
    }

    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&SNAPSHOT_KEY).await;
        }
    }

    /// An engine over the current snapshot.
    pub async fn engine(&self) -> directory::Result<DirectoryEngine> {
        let snapshot = self.snapshot().await?;
        Ok(DirectoryEngine::new(snapshot, self.taxonomy.clone()))
    }
}
