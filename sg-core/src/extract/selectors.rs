//! Compiled selectors and the role classification table

use scraper::{ElementRef, Selector};

use crate::config::SelectorConfig;
use crate::{Error, Result};

fn compile(name: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector {
        name,
        reason: e.to_string(),
    })
}

/// Role a content element plays inside a mission block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Map,
    Time,
    Roster,
    Equipment,
}

/// Ordered `(role, selector)` pairs; the first role whose selector matches a
/// descendant of the element wins.
#[derive(Debug)]
pub struct RoleTable {
    rules: Vec<(Role, Selector)>,
}

impl RoleTable {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            rules: vec![
                (Role::Map, compile("map", &config.map)?),
                (Role::Time, compile("time", &config.time)?),
                (Role::Roster, compile("users", &config.users)?),
                (Role::Equipment, compile("equipment", &config.equipment)?),
            ],
        })
    }

    pub fn classify(&self, element: ElementRef<'_>) -> Option<Role> {
        self.rules
            .iter()
            .find(|(_, selector)| element.select(selector).next().is_some())
            .map(|(role, _)| *role)
    }
}

/// Structural selectors compiled once per [`super::Extractor`]
#[derive(Debug)]
pub struct Selectors {
    pub feed_item: Selector,
    pub section_header_title: Selector,
    pub tabs_container: Selector,
    pub tab_button: Selector,
    pub content_container: Selector,
    pub mission_block: Selector,
    pub mission_desc_item: Selector,
    pub preview_spoiler: Selector,
    pub desktop_tab_name: Selector,
    pub link: Selector,
    pub roles: RoleTable,
}

impl Selectors {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            feed_item: compile("feed_item", &config.feed_item)?,
            section_header_title: compile("section_header_title", &config.section_header_title)?,
            tabs_container: compile("tabs_container", &config.tabs_container)?,
            tab_button: compile("tab_button", &config.tab_button)?,
            content_container: compile("content_container", &config.content_container)?,
            mission_block: compile("mission_block", &config.mission_block)?,
            mission_desc_item: compile("mission_desc_item", &config.mission_desc_item)?,
            preview_spoiler: compile("preview_spoiler", &config.preview_spoiler)?,
            desktop_tab_name: compile("desktop_tab_name", &config.desktop_tab_name)?,
            link: compile("link", "a[href]")?,
            roles: RoleTable::new(config)?,
        })
    }
}
