use std::collections::BTreeMap;

use crate::foundation::error::{GridError, GridResult};
use crate::layout::grid::LayoutSettings;

/// Named layout-settings presets, consumed and produced wholesale.
///
/// The book is an opaque `name -> LayoutSettings` mapping; where the JSON
/// ends up (browser storage, a config file, a database row) is the caller's
/// concern, not this crate's.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PresetBook {
    presets: BTreeMap<String, LayoutSettings>,
}

impl PresetBook {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `settings` under `name`, replacing any existing preset.
    pub fn save(&mut self, name: impl Into<String>, settings: LayoutSettings) {
        self.presets.insert(name.into(), settings);
    }

    /// Look up a preset by name.
    pub fn load(&self, name: &str) -> Option<&LayoutSettings> {
        self.presets.get(name)
    }

    /// Remove a preset; returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.presets.remove(name).is_some()
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Number of stored presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the book holds no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Serialize the whole book to JSON.
    pub fn to_json(&self) -> GridResult<String> {
        serde_json::to_string(self).map_err(|e| GridError::serde(e.to_string()))
    }

    /// Deserialize a whole book from JSON.
    pub fn from_json(json: &str) -> GridResult<Self> {
        serde_json::from_str(json).map_err(|e| GridError::serde(e.to_string()))
    }
}
