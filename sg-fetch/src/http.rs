//! Page source that polls the site over HTTP

use std::time::Duration;

use async_trait::async_trait;
use sg_core::{Config, FetchConfig};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::{Error, PageSource, Result};

/// Loads the feed page, re-polling until the feed marker shows up
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
    poll_interval: Duration,
    ready_marker: String,
}

impl HttpPageSource {
    pub fn new(url: Url, config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            timeout: config.timeout,
            poll_interval: config.poll_interval,
            ready_marker: config.ready_marker.clone(),
        })
    }

    /// Build a source for the configured site
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.site_url()?, &config.fetch)
    }

    async fn fetch_once(&self) -> Result<String> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    fn is_ready(&self, markup: &str) -> bool {
        markup.contains(self.ready_marker.as_str())
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_rendered_page(&self) -> Result<String> {
        info!(url = %self.url, "Loading page");
        let deadline = Instant::now() + self.timeout;
        let mut last = String::new();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, self.fetch_once()).await {
                Ok(Ok(markup)) if self.is_ready(&markup) => {
                    info!(attempt, bytes = markup.len(), "Page loaded");
                    return Ok(markup);
                }
                Ok(Ok(markup)) => {
                    debug!(attempt, "Feed not rendered yet");
                    last = markup;
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => break,
            }

            if Instant::now() + self.poll_interval >= deadline {
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        warn!(
            url = %self.url,
            timeout = ?self.timeout,
            attempts = attempt,
            "Timed out waiting for feed items, using last page"
        );
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `pages[n]` for the n-th request, repeating the last page
    async fn serve(status: u16, pages: Vec<&'static str>) -> (Url, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let body = pages[n.min(pages.len() - 1)];
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        (url, hits)
    }

    fn fetch_config(timeout_ms: u64) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(20),
            ..FetchConfig::default()
        }
    }

    #[tokio::test]
    async fn test_returns_once_feed_present() {
        let (url, hits) = serve(
            200,
            vec!["<html>loading</html>", r#"<div class="feed-item"></div>"#],
        )
        .await;
        let source = HttpPageSource::new(url, &fetch_config(5_000)).unwrap();

        let markup = source.fetch_rendered_page().await.unwrap();
        assert!(markup.contains("feed-item"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_returns_last_page() {
        let (url, _) = serve(200, vec!["<html>still loading</html>"]).await;
        let source = HttpPageSource::new(url, &fetch_config(200)).unwrap();

        let markup = source.fetch_rendered_page().await.unwrap();
        assert_eq!(markup, "<html>still loading</html>");
    }

    #[tokio::test]
    async fn test_error_status() {
        let (url, _) = serve(503, vec!["down"]).await;
        let source = HttpPageSource::new(url, &fetch_config(1_000)).unwrap();

        let err = source.fetch_rendered_page().await.unwrap_err();
        assert!(matches!(err, Error::Status(503)));
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let mut config = Config::default();
        config.site.url = "::not a url".to_string();
        assert!(matches!(
            HttpPageSource::from_config(&config),
            Err(Error::Core(_))
        ));
    }
}
