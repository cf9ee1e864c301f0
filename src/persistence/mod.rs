//! Layout state persistence.
//!
//! The engine persists one JSON blob — custom layouts, user settings and
//! the current layout id — through a minimal string key-value store
//! contract. The host supplies the store (browser local storage, a
//! settings file, anything with get/set); [`MemoryStore`] covers tests
//! and headless embedding.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{LayoutDefinition, LayoutId};

/// Key-value persistence contract supplied by the host.
pub trait PersistenceStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// User preferences persisted alongside the layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Whether layout switches animate at all; when false every switch
    /// takes the immediate-apply path.
    #[serde(default = "default_animations_enabled")]
    pub animations_enabled: bool,
    /// User override for the default transition duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration_ms: Option<u64>,
}

fn default_animations_enabled() -> bool {
    true
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            default_duration_ms: None,
        }
    }
}

/// The persisted blob: everything needed to restore a workspace's layout
/// state at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Every custom layout the user has created or imported.
    #[serde(default)]
    pub custom_layouts: Vec<LayoutDefinition>,
    /// User preferences.
    #[serde(default)]
    pub settings: LayoutSettings,
    /// The layout that was active when state was last saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_layout_id: Option<LayoutId>,
    /// When the blob was written.
    pub timestamp: DateTime<Utc>,
}

impl PersistedState {
    /// Build a blob stamped with the current time.
    pub fn new(
        custom_layouts: Vec<LayoutDefinition>,
        settings: LayoutSettings,
        current_layout_id: Option<LayoutId>,
    ) -> Self {
        Self {
            custom_layouts,
            settings,
            current_layout_id,
            timestamp: Utc::now(),
        }
    }

    /// Load and parse the blob stored under `key`.
    ///
    /// A missing entry is a normal first run. A present-but-unparseable
    /// entry is logged and treated as absent rather than failing startup;
    /// the store is left untouched so nothing is destroyed before the
    /// next successful save.
    pub fn load(store: &dyn PersistenceStore, key: &str) -> Option<PersistedState> {
        let raw = store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(key, %err, "discarding unparseable layout state blob");
                None
            }
        }
    }

    /// Serialize and write the blob under `key`.
    pub fn save(&self, store: &mut dyn PersistenceStore, key: &str) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(key, &json),
            // Serialization of plain data cannot realistically fail, but
            // a persistence hiccup must never take the controller down.
            Err(err) => tracing::error!(key, %err, "failed to serialize layout state blob"),
        }
    }
}
