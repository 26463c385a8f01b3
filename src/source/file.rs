//! Local file source.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{SourceError, TextSource};

/// Reads the speech text from a file on every [`load`](TextSource::load).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextSource for FileSource {
    async fn load(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_existing_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("speech.txt");
        std::fs::write(&path, "We gather here. We stay!").unwrap();

        let text = FileSource::new(&path).load().await.unwrap();
        assert_eq!(text, "We gather here. We stay!");
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("absent.txt");

        match FileSource::new(&path).load().await {
            Err(SourceError::Io { path: p, .. }) => assert!(p.ends_with("absent.txt")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
