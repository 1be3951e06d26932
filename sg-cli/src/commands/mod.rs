//! CLI command implementations

pub mod mission;
pub mod sections;

pub use mission::MissionArgs;
pub use sections::SectionsArgs;

use std::path::PathBuf;

use sg_core::Config;
use sg_fetch::{FilePageSource, HttpPageSource, PageSource};

/// Pick the page source: a saved file when given, the live site otherwise
pub fn page_source(file: Option<&PathBuf>, config: &Config) -> anyhow::Result<Box<dyn PageSource>> {
    match file {
        Some(path) => Ok(Box::new(
            FilePageSource::new(path).with_ready_marker(config.fetch.ready_marker.clone()),
        )),
        None => Ok(Box::new(HttpPageSource::from_config(config)?)),
    }
}

/// Fetch the page; a failed fetch is treated as an empty document
pub async fn load_page(source: &dyn PageSource) -> String {
    match source.fetch_rendered_page().await {
        Ok(markup) => markup,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load page");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_fetch::StaticPageSource;

    #[tokio::test]
    async fn test_load_page_passes_markup_through() {
        let source = StaticPageSource::new("<html></html>");
        assert_eq!(load_page(&source).await, "<html></html>");
    }

    #[tokio::test]
    async fn test_failed_fetch_is_empty_document() {
        let source = FilePageSource::new("/nonexistent/sg/page.html");
        assert_eq!(load_page(&source).await, "");
    }

    #[test]
    fn test_page_source_rejects_bad_url() {
        let config = Config::default().with_cli_overrides(Some("not a url".to_string()), None);
        assert!(page_source(None, &config).is_err());
        assert!(page_source(Some(&PathBuf::from("page.html")), &config).is_ok());
    }
}
