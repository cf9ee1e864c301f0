//! Layout definitions: named pane arrangements with breakpoint overrides.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::identifiers::{ComponentKey, LayoutId};
use crate::model::placement::{ComponentPlacement, PlacementOverride};
use crate::responsive::Breakpoint;

/// Provenance of a layout, controlling mutability.
///
/// Built-in and template layouts are immutable: edits always happen on a
/// duplicate, and deletion is rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Shipped with the product, registered once at startup.
    BuiltIn,
    /// User-created; the only kind that may be edited or deleted.
    Custom,
    /// Seed structure for creating new custom layouts.
    Template,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::BuiltIn => f.write_str("built-in"),
            LayoutKind::Custom => f.write_str("custom"),
            LayoutKind::Template => f.write_str("template"),
        }
    }
}

/// Creation/modification bookkeeping for a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    /// When the layout was first created.
    pub created: DateTime<Utc>,
    /// When the layout was last edited.
    pub modified: DateTime<Utc>,
    /// Who created the layout, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl LayoutMetadata {
    /// Fresh metadata stamped with the current time.
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created: now,
            modified: now,
            author: None,
        }
    }
}

/// Per-breakpoint override map: component key to partial placement.
pub type OverrideSet = BTreeMap<ComponentKey, PlacementOverride>;

/// A named arrangement of panes with optional per-breakpoint overrides.
///
/// The definition is the canonical *base*: resolution for a breakpoint
/// always re-derives from it (never from a previously resolved copy), so
/// resolution stays structurally idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Registry-wide unique identifier.
    pub id: LayoutId,
    /// Human-readable name shown in pickers.
    pub name: String,
    /// Provenance/mutability class.
    pub kind: LayoutKind,
    /// Base placement for every pane in the layout.
    pub components: BTreeMap<ComponentKey, ComponentPlacement>,
    /// Partial overrides keyed by breakpoint.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<Breakpoint, OverrideSet>,
    /// Creation/modification bookkeeping.
    pub metadata: LayoutMetadata,
}

impl LayoutDefinition {
    /// Build a layout with no overrides and fresh metadata.
    pub fn new(
        id: LayoutId,
        name: impl Into<String>,
        kind: LayoutKind,
        components: BTreeMap<ComponentKey, ComponentPlacement>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            components,
            overrides: BTreeMap::new(),
            metadata: LayoutMetadata::now(),
        }
    }

    /// Builder: attach an override set for `breakpoint`.
    pub fn with_overrides(mut self, breakpoint: Breakpoint, set: OverrideSet) -> Self {
        self.overrides.insert(breakpoint, set);
        self
    }

    /// Look up the base placement for a component key.
    pub fn component(&self, key: &ComponentKey) -> Option<&ComponentPlacement> {
        self.components.get(key)
    }

    /// Stamp the modification time.
    pub fn touch_modified(&mut self) {
        self.metadata.modified = Utc::now();
    }

    /// Explicit structural copy under a new identity.
    ///
    /// Copies every placement and override field-by-field (no
    /// serialize-then-parse round trip), assigns the new id, appends
    /// `suffix` to the name, forces the kind to [`LayoutKind::Custom`] and
    /// stamps fresh metadata.
    pub fn derived(&self, new_id: LayoutId, suffix: &str) -> LayoutDefinition {
        LayoutDefinition {
            id: new_id,
            name: format!("{} {suffix}", self.name),
            kind: LayoutKind::Custom,
            components: self.components.clone(),
            overrides: self.overrides.clone(),
            metadata: LayoutMetadata::now(),
        }
    }

    /// Structural copy named "... (Copy)" for the duplicate operation.
    pub fn duplicated(&self, new_id: LayoutId) -> LayoutDefinition {
        self.derived(new_id, "(Copy)")
    }

    /// Structural copy named "... (Imported)" for the import operation.
    pub fn imported(&self, new_id: LayoutId) -> LayoutDefinition {
        self.derived(new_id, "(Imported)")
    }
}
