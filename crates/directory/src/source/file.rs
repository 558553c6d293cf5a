use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{DirectoryError, Result};
use crate::types::ProfessionalRow;

use super::ProfessionalSource;

/// Reads rows from a JSON file holding an array of row objects.
///
/// The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfessionalSource for JsonFileSource {
    fn label(&self) -> String {
        format!("file:{}", self.path().display())
    }

    async fn fetch_all(&self) -> Result<Vec<ProfessionalRow>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(DirectoryError::FileNotFound(self.path.clone()));
            }
            Err(error) => return Err(error.into()),
        };
        let rows: Vec<ProfessionalRow> = serde_json::from_str(&raw)?;
        log::debug!("read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_rows_from_json_array() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("majstori.json");
        fs::write(
            &path,
            r#"[
                {"id": "1", "name": "Ivan", "categories": ["Vodoinstalacije"]},
                {"id": 2, "name": null}
            ]"#,
        )
        .expect("write fixture");

        let source = JsonFileSource::new(&path);
        let rows = source.fetch_all().await.expect("fetch");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id.as_deref(), Some("2"));
        assert!(source.label().starts_with("file:"));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = TempDir::new().expect("tempdir");
        let source = JsonFileSource::new(dir.path().join("absent.json"));
        let error = source.fetch_all().await.expect_err("should fail");
        assert!(matches!(error, DirectoryError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_a_serialization_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"id\": 1").expect("write fixture");
        let error = JsonFileSource::new(&path)
            .fetch_all()
            .await
            .expect_err("should fail");
        assert!(matches!(error, DirectoryError::Serialization(_)));
    }
}
