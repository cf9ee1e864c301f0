//! Export/import snapshots: a versioned JSON envelope around one layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{LayoutDefinition, LayoutError};

/// Envelope version written by export and required by import.
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// A single layout packaged for transfer between installations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// The layout being transferred, deep-copied at export time.
    pub layout: LayoutDefinition,
    /// Envelope format version.
    pub version: String,
    /// When the snapshot was exported.
    pub exported: DateTime<Utc>,
}

impl LayoutSnapshot {
    /// Wrap a deep copy of `layout` in a fresh envelope.
    pub fn new(layout: &LayoutDefinition) -> Self {
        Self {
            layout: layout.clone(),
            version: SNAPSHOT_VERSION.to_string(),
            exported: Utc::now(),
        }
    }

    /// Parse a snapshot from JSON.
    ///
    /// Structural problems (missing fields, wrong types) surface as
    /// [`LayoutError::MalformedSnapshot`]; the version field is checked
    /// separately at import time.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(json).map_err(|e| LayoutError::malformed(e.to_string()))
    }

    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        serde_json::to_string_pretty(self).map_err(|e| LayoutError::malformed(e.to_string()))
    }

    /// Whether the envelope version is one this build understands.
    pub fn version_supported(&self) -> bool {
        self.version == SNAPSHOT_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::builtins::built_in_layouts;

    #[test]
    fn snapshot_round_trips_through_json() {
        let layout = built_in_layouts().remove(0);
        let snapshot = LayoutSnapshot::new(&layout);
        let json = snapshot.to_json().unwrap();
        let back = LayoutSnapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn missing_layout_field_is_malformed() {
        let err = LayoutSnapshot::from_json(r#"{"version": "1.0.0"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedSnapshot { .. }));
    }

    #[test]
    fn garbage_input_is_malformed() {
        let err = LayoutSnapshot::from_json("not json at all").unwrap_err();
        assert!(matches!(err, LayoutError::MalformedSnapshot { .. }));
    }

    #[test]
    fn future_version_is_not_supported() {
        let layout = built_in_layouts().remove(0);
        let mut snapshot = LayoutSnapshot::new(&layout);
        snapshot.version = "2.0.0".to_string();
        assert!(!snapshot.version_supported());
    }
}
