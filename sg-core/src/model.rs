//! Records produced by the extraction engine
//!
//! Everything here is rebuilt from the document on every parse and never
//! mutated once handed to a caller.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;
use url::Url;

/// Name given to a mission whose tab carries no label
pub const UNKNOWN_MISSION: &str = "Unknown";

/// Name of the server created for sides that precede any server label
pub const DEFAULT_SERVER: &str = "default";

/// One announcement feed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub missions: Vec<Mission>,
}

/// A mission tab and its parsed content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mission {
    pub name: String,
    pub info: MissionInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissionInfo {
    pub map: Option<String>,
    pub time: Option<String>,
    pub description: Option<Description>,
    pub servers: Vec<ServerBlock>,

    /// Flattened view over all servers, see [`MissionInfo::flatten_equipment`]
    pub equipment: Option<SideMap>,
}

impl MissionInfo {
    /// Compute the flattened equipment view.
    ///
    /// Servers are visited in order; each server's equipment entries go in
    /// first, then its side entries. An existing key is never replaced.
    pub fn flatten_equipment(&self) -> Option<SideMap> {
        let mut flat = SideMap::new();
        for server in &self.servers {
            for (key, value) in server.equipment.iter() {
                flat.insert_if_absent(key, value);
            }
            for (key, value) in server.sides.iter() {
                flat.insert_if_absent(key, value);
            }
        }
        (!flat.is_empty()).then_some(flat)
    }
}

/// Free text and links from a mission's spoiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub text: String,
    pub links: Vec<String>,
}

impl Description {
    /// Resolve links against the site URL, dropping any that do not parse
    pub fn resolved_links(&self, base: &Url) -> Vec<Url> {
        self.links
            .iter()
            .filter_map(|href| match base.join(href) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(href = %href, error = %e, "Skipping unresolvable description link");
                    None
                }
            })
            .collect()
    }
}

/// Sides and equipment listed under one server label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerBlock {
    pub name: String,
    pub sides: SideMap,
    pub equipment: SideMap,
}

impl ServerBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sides: SideMap::new(),
            equipment: SideMap::new(),
        }
    }
}

/// Insertion-ordered map from side key to text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideMap {
    entries: Vec<(String, String)>,
}

impl SideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert only when the key is not present yet
    pub fn insert_if_absent(&mut self, key: &str, value: &str) {
        if !self.contains_key(key) {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    /// Merge another map into this one, later values winning
    pub fn extend(&mut self, other: SideMap) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SideMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SideMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for SideMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
