//! The page source seam

use async_trait::async_trait;

use crate::Result;

/// Provides a fully rendered feed page
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page markup.
    ///
    /// Implementations wait until the feed is present or their timeout
    /// elapses. A page that never became ready is returned as-is, possibly
    /// empty, rather than as an error.
    async fn fetch_rendered_page(&self) -> Result<String>;
}

/// Source returning fixed markup
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    markup: String,
}

impl StaticPageSource {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn fetch_rendered_page(&self) -> Result<String> {
        Ok(self.markup.clone())
    }
}
