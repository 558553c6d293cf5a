//! Service configuration.
//!
//! Settings come from an optional JSON file (`popravci.json`) and are then
//! overridden by environment variables. The backend variables fall back to
//! the names the web frontend uses.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use directory::source::{RestSourceConfig, DEFAULT_TABLE};
use directory::{CategoryTaxonomy, JsonFileSource, RestSource, SharedSource};

use crate::error::{ServiceError, ServiceResult};

pub const CONFIG_FILENAME: &str = "popravci.json";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:4850";

pub const ENV_BIND: &str = "POPRAVCI_BIND";
pub const ENV_BACKEND_URL: &str = "POPRAVCI_BACKEND_URL";
pub const ENV_BACKEND_KEY: &str = "POPRAVCI_BACKEND_KEY";
pub const ENV_SNAPSHOT_FILE: &str = "POPRAVCI_SNAPSHOT_FILE";
pub const ENV_CACHE_TTL_SECS: &str = "POPRAVCI_CACHE_TTL_SECS";
const ENV_BACKEND_URL_FALLBACK: &str = "NEXT_PUBLIC_SUPABASE_URL";
const ENV_BACKEND_KEY_FALLBACK: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub backend: BackendConfig,
    pub snapshot: SnapshotConfig,
    /// JSON taxonomy replacing the built-in one.
    pub taxonomy_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Read records from this JSON file instead of the backend.
    pub file: Option<PathBuf>,
    /// How long a loaded snapshot is reused; 0 reloads on every request.
    pub cache_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            backend: BackendConfig::default(),
            snapshot: SnapshotConfig::default(),
            taxonomy_file: None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: 15,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            file: None,
            cache_ttl_secs: 60,
        }
    }
}

impl ServiceConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.snapshot.cache_ttl_secs)
    }

    /// Builds the record source: a snapshot file wins over the backend.
    pub fn build_source(&self) -> ServiceResult<SharedSource> {
        if let Some(file) = &self.snapshot.file {
            return Ok(Arc::new(JsonFileSource::new(file)));
        }
        let base_url = self
            .backend
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                ServiceError::InvalidConfig(format!(
                    "no record source: set snapshot.file, backend.base_url or {ENV_BACKEND_URL}"
                ))
            })?;
        let config = RestSourceConfig {
            base_url: base_url.to_string(),
            api_key: self.backend.api_key.clone().unwrap_or_default(),
            table: self.backend.table.clone(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
        };
        Ok(Arc::new(RestSource::new(config)?))
    }

    /// Loads the configured taxonomy, or the built-in one.
    pub fn load_taxonomy(&self) -> ServiceResult<CategoryTaxonomy> {
        match &self.taxonomy_file {
            Some(path) => Ok(CategoryTaxonomy::load(path)?),
            None => Ok(CategoryTaxonomy::popravci()),
        }
    }
}

/// Reads the config file, or returns defaults when it does not exist.
pub fn load_config(path: &Path) -> ServiceResult<ServiceConfig> {
    if !path.exists() {
        return Ok(ServiceConfig::default());
    }
    let data = std::fs::read_to_string(path).map_err(|error| {
        ServiceError::InvalidConfig(format!(
            "failed to read config {}: {error}",
            path.display()
        ))
    })?;
    serde_json::from_str(&data).map_err(|error| {
        ServiceError::InvalidConfig(format!(
            "failed to parse config {}: {error}",
            path.display()
        ))
    })
}

/// Applies environment overrides read through `lookup`.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: ServiceConfig, lookup: F) -> ServiceResult<ServiceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(bind) = read(ENV_BIND) {
        config.bind_address = bind;
    }
    if let Some(url) = read(ENV_BACKEND_URL).or_else(|| read(ENV_BACKEND_URL_FALLBACK)) {
        config.backend.base_url = Some(url);
    }
    if let Some(key) = read(ENV_BACKEND_KEY).or_else(|| read(ENV_BACKEND_KEY_FALLBACK)) {
        config.backend.api_key = Some(key);
    }
    if let Some(file) = read(ENV_SNAPSHOT_FILE) {
        config.snapshot.file = Some(PathBuf::from(file));
    }
    if let Some(ttl) = read(ENV_CACHE_TTL_SECS) {
        config.snapshot.cache_ttl_secs = ttl.trim().parse().map_err(|_| {
            ServiceError::InvalidConfig(format!("{ENV_CACHE_TTL_SECS} must be a number, got {ttl:?}"))
        })?;
    }
    Ok(config)
}

/// Loads the config file and applies the process environment.
pub fn load_from_env(path: &Path) -> ServiceResult<ServiceConfig> {
    apply_env_overrides(load_config(path)?, |name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = load_config(&dir.path().join(CONFIG_FILENAME)).expect("load");
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.backend.table, "majstori");
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"{ "bind_address": "0.0.0.0:8080", "snapshot": { "cache_ttl_secs": 5 } }"#,
        )
        .expect("write config");
        let config = load_config(&path).expect("load");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.snapshot.cache_ttl_secs, 5);
        assert_eq!(config.backend.timeout_secs, 15);
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "{ not json").expect("write config");
        let err = load_config(&path).expect_err("expected error");
        match err {
            ServiceError::InvalidConfig(msg) => assert!(msg.contains("failed to parse")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn env_overrides_win_and_fall_back_to_frontend_names() {
        let config = apply_env_overrides(
            ServiceConfig::default(),
            env(&[
                (ENV_BIND, "0.0.0.0:9000"),
                ("NEXT_PUBLIC_SUPABASE_URL", "https://db.example.com"),
                ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "anon"),
                (ENV_BACKEND_KEY, "service"),
                (ENV_CACHE_TTL_SECS, "0"),
            ]),
        )
        .expect("overrides");
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.backend.base_url.as_deref(), Some("https://db.example.com"));
        assert_eq!(config.backend.api_key.as_deref(), Some("service"));
        assert_eq!(config.snapshot.cache_ttl_secs, 0);
    }

    #[test]
    fn invalid_ttl_is_rejected() {
        let err = apply_env_overrides(ServiceConfig::default(), env(&[(ENV_CACHE_TTL_SECS, "soon")]))
            .expect_err("expected error");
        assert!(matches!(err, ServiceError::InvalidConfig(_)));
    }

    #[test]
    fn source_requires_file_or_backend() {
        let err = ServiceConfig::default().build_source().err().expect("expected error");
        assert!(matches!(err, ServiceError::InvalidConfig(_)));

        let mut config = ServiceConfig::default();
        config.backend.base_url = Some("https://db.example.com".to_string());
        let source = config.build_source().expect("rest source");
        assert_eq!(source.label(), "rest:majstori");

        config.snapshot.file = Some(PathBuf::from("majstori.json"));
        let source = config.build_source().expect("file source");
        assert_eq!(source.label(), "file:majstori.json");
    }

    #[test]
    fn taxonomy_file_replaces_builtin() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("taxonomy.json");
        std::fs::write(
            &path,
            r#"[{ "id": "1", "name": "1. Vrt", "subcategories": [{ "id": "1.1", "name": "Košnja" }] }]"#,
        )
        .expect("write taxonomy");

        let config = ServiceConfig {
            taxonomy_file: Some(path),
            ..ServiceConfig::default()
        };
        let taxonomy = config.load_taxonomy().expect("taxonomy");
        assert_eq!(taxonomy.top_level_names(), vec!["Vrt"]);
        assert_eq!(
            ServiceConfig::default().load_taxonomy().expect("builtin").categories().len(),
            10
        );
    }
}
