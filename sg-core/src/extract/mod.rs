//! Extraction of announcement sections from a rendered feed page
//!
//! The feed has no stable schema, so every unit of work (feed item, mission
//! pair, block element) is parsed on its own. A unit that fails is logged and
//! left out; its siblings are still extracted.

mod block;
mod selectors;
mod text;

use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ExtractConfig;
use crate::model::{Mission, Section, UNKNOWN_MISSION};
use crate::Result;

use block::BlockParser;
pub use selectors::Role;
use selectors::Selectors;
use text::stripped_text;

/// Why a single unit of the document was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A marker the unit cannot do without is absent
    #[error("missing {0}")]
    MissingElement(&'static str),

    /// A marker is present but holds no text
    #[error("empty {0}")]
    EmptyText(&'static str),

    /// The unit is nested beyond the configured depth limit
    #[error("element nested {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Extracts [`Section`]s from feed markup.
///
/// Holds only compiled selectors and configuration, so one instance can be
/// shared across threads.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractConfig,
    selectors: Selectors,
}

impl Extractor {
    /// Compile the configured selectors
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new(&config.selectors)?,
            config: config.clone(),
        })
    }

    /// Extract every announcement section in document order.
    ///
    /// Never fails; an empty or unrelated document yields an empty list.
    pub fn extract_sections(&self, markup: &str) -> Vec<Section> {
        let document = Html::parse_document(markup);
        let mut sections = Vec::new();

        let feed_items = document
            .select(&self.selectors.feed_item)
            .take(self.config.feed_item_limit);

        for (feed_index, feed) in feed_items.enumerate() {
            let title = match self.section_title(feed) {
                Ok(title) => title,
                Err(e) => {
                    debug!(feed_index, reason = %e, "Skipping feed item");
                    continue;
                }
            };

            if !self.is_allowed(&title) {
                continue;
            }

            let missions = self.missions(feed, feed_index);
            debug!(feed_index, title = %title, missions = missions.len(), "Parsed section");
            sections.push(Section { title, missions });
        }

        info!(sections = sections.len(), "Extraction finished");
        sections
    }

    /// The first announcement section, if any
    pub fn latest(&self, markup: &str) -> Option<Section> {
        self.extract_sections(markup).into_iter().next()
    }

    fn section_title(&self, feed: ElementRef<'_>) -> std::result::Result<String, ExtractError> {
        let header = feed
            .select(&self.selectors.section_header_title)
            .next()
            .ok_or(ExtractError::MissingElement("section header"))?;
        let title = stripped_text(header);
        if title.is_empty() {
            return Err(ExtractError::EmptyText("section header"));
        }
        Ok(title)
    }

    fn is_allowed(&self, title: &str) -> bool {
        self.config
            .allowed_titles
            .iter()
            .any(|allowed| title.starts_with(allowed.as_str()))
    }

    /// Pair tab labels with content blocks by position.
    ///
    /// Pairing stops at the shorter list; surplus tabs or blocks are dropped.
    fn missions(&self, feed: ElementRef<'_>, feed_index: usize) -> Vec<Mission> {
        let tabs = self.tabs(feed);
        let blocks = self.content_blocks(feed);

        if tabs.len() != blocks.len() {
            debug!(
                feed_index,
                tabs = tabs.len(),
                blocks = blocks.len(),
                "Tab and block counts differ, extra entries dropped"
            );
        }

        let parser = BlockParser::new(&self.selectors, &self.config);
        let mut missions = Vec::new();
        for (mission_index, (tab, block)) in tabs.into_iter().zip(blocks).enumerate() {
            match self.mission(&parser, tab, block) {
                Ok(mission) => missions.push(mission),
                Err(e) => warn!(feed_index, mission_index, error = %e, "Skipping mission"),
            }
        }
        missions
    }

    fn mission(
        &self,
        parser: &BlockParser<'_>,
        tab: ElementRef<'_>,
        block: ElementRef<'_>,
    ) -> std::result::Result<Mission, ExtractError> {
        let name = tab
            .select(&self.selectors.desktop_tab_name)
            .next()
            .map(stripped_text)
            .unwrap_or_else(|| UNKNOWN_MISSION.to_string());
        let info = parser.parse(block)?;
        Ok(Mission { name, info })
    }

    fn tabs<'a>(&self, feed: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let scope = feed
            .select(&self.selectors.tabs_container)
            .next()
            .unwrap_or(feed);
        scope.select(&self.selectors.tab_button).collect()
    }

    /// Content blocks that hold mission details; decorative blocks are dropped
    fn content_blocks<'a>(&self, feed: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let scope = feed
            .select(&self.selectors.content_container)
            .next()
            .unwrap_or(feed);
        scope
            .select(&self.selectors.mission_block)
            .filter(|block| {
                block.select(&self.selectors.mission_desc_item).next().is_some()
                    || block.select(&self.selectors.preview_spoiler).next().is_some()
            })
            .collect()
    }
}
