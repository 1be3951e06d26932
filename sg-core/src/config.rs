//! Configuration management for the announcement parser
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (SG_*)
//! 3. Config file (~/.config/sg/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Site the announcements are read from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the site
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://sg.zone/".to_string(),
        }
    }
}

/// CSS selectors for each structural marker of the feed
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub feed_item: String,
    pub section_header_title: String,
    pub tabs_container: String,
    pub tab_button: String,
    pub content_container: String,
    pub mission_block: String,
    pub mission_desc_item: String,
    pub preview_spoiler: String,
    pub desktop_tab_name: String,
    pub map: String,
    pub time: String,
    pub users: String,
    pub equipment: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            feed_item: ".feed-item".to_string(),
            section_header_title: ".section-header-title".to_string(),
            tabs_container: ".row.tabs".to_string(),
            tab_button: ".btn-tab".to_string(),
            content_container: ".feed-ann-content".to_string(),
            mission_block: ".feed-padding".to_string(),
            mission_desc_item: ".mission-desc-item".to_string(),
            preview_spoiler: ".preview-spoiler-body".to_string(),
            desktop_tab_name: ".desktop-item".to_string(),
            map: ".sg-map".to_string(),
            time: ".sg-clock, .sg-cloud".to_string(),
            users: ".sg-users".to_string(),
            equipment: ".sg-car".to_string(),
        }
    }
}

/// Settings consumed by the extraction engine
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Header prefixes that mark a feed item as an announcement
    pub allowed_titles: Vec<String>,

    /// Only the first N feed items are inspected
    pub feed_item_limit: usize,

    /// Elements nested deeper than this are rejected
    pub max_depth: usize,

    /// Class of duplicated mobile-only markup
    pub mobile_item_class: String,

    /// Text prefix of an unclassed server label element
    pub server_label_prefix: String,

    /// Class suffix identifying a side
    pub side_suffix: String,

    pub selectors: SelectorConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            allowed_titles: vec![
                "Анонс игр".to_string(),
                "СЕРЬЕЗНЫЕ МЕЙСЫ".to_string(),
                "Games announcement".to_string(),
            ],
            feed_item_limit: 10,
            max_depth: 512,
            mobile_item_class: "mobile-item".to_string(),
            server_label_prefix: "Server".to_string(),
            side_suffix: "-side".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// One side-key pattern and the glyph shown for it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlyphRule {
    pub pattern: String,
    pub glyph: String,
}

impl GlyphRule {
    fn new(pattern: &str, glyph: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            glyph: glyph.to_string(),
        }
    }
}

/// Ordered side-key to glyph lookup table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SideGlyphs {
    /// Rules are checked in order, first substring match wins
    pub rules: Vec<GlyphRule>,

    /// Glyph for sides no rule matches
    pub side_default: String,

    /// Glyph for equipment no rule matches
    pub equipment_default: String,
}

impl Default for SideGlyphs {
    fn default() -> Self {
        Self {
            rules: vec![
                GlyphRule::new("red", "🔴"),
                GlyphRule::new("blue", "🔵"),
                GlyphRule::new("yellow", "🟡"),
                GlyphRule::new("green", "🟢"),
            ],
            side_default: "⚪".to_string(),
            equipment_default: "📦".to_string(),
        }
    }
}

impl SideGlyphs {
    /// Look up the glyph for a side key, case-insensitively
    pub fn lookup<'a>(&'a self, side: &str, default: &'a str) -> &'a str {
        let side = side.to_lowercase();
        self.rules
            .iter()
            .find(|rule| side.contains(&rule.pattern.to_lowercase()))
            .map(|rule| rule.glyph.as_str())
            .unwrap_or(default)
    }

    pub fn side(&self, side: &str) -> &str {
        self.lookup(side, &self.side_default)
    }

    pub fn equipment(&self, side: &str) -> &str {
        self.lookup(side, &self.equipment_default)
    }
}

/// Page fetching settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Give up waiting for the feed after this long
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Delay between polls while the feed is not yet present
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Text whose presence means the feed has been rendered
    pub ready_marker: String,

    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(500),
            ready_marker: "feed-item".to_string(),
            user_agent: format!("sg/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub extract: ExtractConfig,
    pub glyphs: SideGlyphs,
    pub fetch: FetchConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/sg/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sg").join("config.toml"))
    }

    /// Parsed site URL
    pub fn site_url(&self) -> Result<Url> {
        Url::parse(&self.site.url)
            .map_err(|e| Error::Config(format!("Invalid site url {}: {}", self.site.url, e)))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - SG_URL: Site URL
    /// - SG_FEED_LIMIT: Number of feed items to inspect
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("SG_URL") {
            self.site.url = url;
        }

        if let Ok(limit) = std::env::var("SG_FEED_LIMIT") {
            match limit.trim().parse() {
                Ok(limit) => self.extract.feed_item_limit = limit,
                Err(_) => tracing::warn!(value = %limit, "Ignoring invalid SG_FEED_LIMIT"),
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, url: Option<String>, feed_limit: Option<usize>) -> Self {
        if let Some(url) = url {
            self.site.url = url;
        }

        if let Some(limit) = feed_limit {
            self.extract.feed_item_limit = limit;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        path: Option<&Path>,
        url: Option<String>,
        feed_limit: Option<usize>,
    ) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        Ok(base
            .with_env_overrides()
            .with_cli_overrides(url, feed_limit))
    }
}
