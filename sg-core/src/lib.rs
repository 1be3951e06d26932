//! SG Core - announcement extraction for the Solid Games feed
//!
//! This crate turns a rendered feed page into structured mission records
//! and renders those records for display.

pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod navigation;
pub mod report;

pub use config::{Config, ExtractConfig, FetchConfig, GlyphRule, SelectorConfig, SideGlyphs};
pub use error::{Error, Result};
pub use extract::{ExtractError, Extractor};
pub use format::{escape_html, format_mission};
pub use model::{Description, Mission, MissionInfo, Section, ServerBlock, SideMap};
pub use navigation::{select_mission, NavigationError, MISSION_LABELS};
pub use report::render_report;
