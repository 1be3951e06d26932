//! Page source backed by a saved HTML file

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{PageSource, Result};

/// Reads the feed page from disk
#[derive(Debug, Clone)]
pub struct FilePageSource {
    path: PathBuf,
    ready_marker: Option<String>,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ready_marker: None,
        }
    }

    /// Warn when the saved page does not contain `marker`
    pub fn with_ready_marker(mut self, marker: impl Into<String>) -> Self {
        self.ready_marker = Some(marker.into());
        self
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn fetch_rendered_page(&self) -> Result<String> {
        let markup = tokio::fs::read_to_string(&self.path).await?;
        debug!(path = %self.path.display(), bytes = markup.len(), "Read page from file");

        if let Some(marker) = &self.ready_marker {
            if !markup.contains(marker.as_str()) {
                warn!(path = %self.path.display(), marker = %marker, "Saved page has no feed items");
            }
        }

        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"<div class="feed-item"></div>"#).unwrap();

        let source = FilePageSource::new(file.path()).with_ready_marker("feed-item");
        let markup = source.fetch_rendered_page().await.unwrap();
        assert!(markup.contains("feed-item"));
    }

    #[tokio::test]
    async fn test_missing_marker_still_returns_page() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<html></html>").unwrap();

        let source = FilePageSource::new(file.path()).with_ready_marker("feed-item");
        assert_eq!(source.fetch_rendered_page().await.unwrap(), "<html></html>");
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FilePageSource::new(dir.path().join("absent.html"));
        assert!(matches!(
            source.fetch_rendered_page().await,
            Err(crate::Error::Io(_))
        ));
    }
}
