//! Mission navigation for chat front-ends
//!
//! Front-ends show one mission at a time with a fixed row of buttons. Every
//! index coming back from a button is validated here before anything is
//! rendered.

use thiserror::Error;

use crate::config::SideGlyphs;
use crate::format::format_mission;
use crate::model::{Mission, Section};

/// Button labels, mapped to mission indices 0..=3
pub const MISSION_LABELS: [&str; 4] = ["I", "II", "III", "IV"];

/// Prefix of the callback payload carried by a mission button
pub const CALLBACK_PREFIX: &str = "mission:";

pub const NO_ANNOUNCEMENT_TEXT: &str = "Анонс не найден.";
pub const NO_MISSIONS_TEXT: &str = "В анонсе нет миссий.";
pub const UNAVAILABLE_TEXT: &str = "Миссия недоступна";
pub const INVALID_BUTTON_TEXT: &str = "Неверная кнопка";
pub const SITE_LINK_LABEL: &str = "Посмотреть на сайте";

/// A rejected navigation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The requested mission does not exist in the announcement
    #[error("mission {index} unavailable, announcement has {available}")]
    Unavailable { index: usize, available: usize },

    /// The announcement has no missions at all
    #[error("announcement has no missions")]
    NoMissions,

    /// The button payload could not be decoded
    #[error("invalid button payload: {0}")]
    InvalidPayload(String),
}

impl NavigationError {
    /// Short text to show the user
    pub fn user_message(&self) -> &'static str {
        match self {
            NavigationError::Unavailable { .. } => UNAVAILABLE_TEXT,
            NavigationError::NoMissions => NO_MISSIONS_TEXT,
            NavigationError::InvalidPayload(_) => INVALID_BUTTON_TEXT,
        }
    }
}

/// Button payload for a mission index
pub fn callback_data(index: usize) -> String {
    format!("{}{}", CALLBACK_PREFIX, index)
}

/// Decode a button payload back into a mission index
pub fn parse_callback(data: &str) -> Result<usize, NavigationError> {
    data.strip_prefix(CALLBACK_PREFIX)
        .and_then(|index| index.parse().ok())
        .ok_or_else(|| NavigationError::InvalidPayload(data.to_string()))
}

/// `(label, payload)` for each navigation button
pub fn buttons() -> Vec<(&'static str, String)> {
    MISSION_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| (*label, callback_data(index)))
        .collect()
}

/// Look up a mission, rejecting indices outside the announcement
pub fn select_mission(section: &Section, index: usize) -> Result<&Mission, NavigationError> {
    if section.missions.is_empty() {
        return Err(NavigationError::NoMissions);
    }
    section
        .missions
        .get(index)
        .ok_or(NavigationError::Unavailable {
            index,
            available: section.missions.len(),
        })
}

/// Validate the index, then render the mission under the section title
pub fn render_selected(
    section: &Section,
    index: usize,
    glyphs: &SideGlyphs,
) -> Result<String, NavigationError> {
    select_mission(section, index)?;
    Ok(format_mission(
        &section.missions,
        index,
        Some(&section.title),
        glyphs,
    ))
}
