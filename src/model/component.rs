//! Component catalog: per pane-type size and behavior constraints.
//!
//! The catalog is consulted by the validation engine (minimum sizes,
//! touch-target checks) and by layout authoring UIs (defaults, capability
//! flags). It is pure data; nothing here touches a rendering surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::identifiers::ComponentKey;

/// A width/height pair in percent-of-viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    /// Width in percent of viewport width.
    pub w: f64,
    /// Height in percent of viewport height.
    pub h: f64,
}

impl SizeSpec {
    /// Shorthand constructor.
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Preferred shape of a pane type, used by authoring UIs as a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectTag {
    /// No preferred aspect ratio.
    Free,
    /// Wide panes (video-like, 16:9-ish).
    Wide,
    /// Tall panes (chat columns, participant lists).
    Tall,
}

/// Size and behavior constraints for one pane type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTypeSpec {
    /// Size a freshly added pane of this type takes.
    pub default_size: SizeSpec,
    /// Smallest size validation accepts for a visible pane.
    pub min_size: SizeSpec,
    /// Largest size authoring UIs offer.
    pub max_size: SizeSpec,
    /// Preferred shape hint.
    pub aspect: AspectTag,
    /// Whether this pane type supports user resizing.
    pub resizable: bool,
    /// Whether this pane type can collapse to a title bar.
    pub collapsible: bool,
    /// Whether the pane is a touch interaction target (stricter minimum
    /// dimensions under the accessibility rule).
    pub touch_target: bool,
}

/// Catalog of pane types keyed by component key.
#[derive(Debug, Clone)]
pub struct ComponentCatalog {
    specs: BTreeMap<String, ComponentTypeSpec>,
}

impl ComponentCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            specs: BTreeMap::new(),
        }
    }

    /// Register (or replace) the spec for a pane type.
    pub fn register(&mut self, key: impl Into<String>, spec: ComponentTypeSpec) {
        self.specs.insert(key.into(), spec);
    }

    /// Look up the spec for a component key.
    ///
    /// Unknown keys return `None`; validation treats them as
    /// unconstrained rather than erroring.
    pub fn spec_for(&self, key: &ComponentKey) -> Option<&ComponentTypeSpec> {
        self.specs.get(key.as_str())
    }

    /// Number of registered pane types.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for ComponentCatalog {
    /// The product's built-in pane types.
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.register(
            "stream",
            ComponentTypeSpec {
                default_size: SizeSpec::new(75.0, 80.0),
                min_size: SizeSpec::new(20.0, 20.0),
                max_size: SizeSpec::new(100.0, 100.0),
                aspect: AspectTag::Wide,
                resizable: true,
                collapsible: false,
                touch_target: false,
            },
        );
        catalog.register(
            "chat",
            ComponentTypeSpec {
                default_size: SizeSpec::new(25.0, 100.0),
                min_size: SizeSpec::new(10.0, 15.0),
                max_size: SizeSpec::new(50.0, 100.0),
                aspect: AspectTag::Tall,
                resizable: true,
                collapsible: true,
                touch_target: false,
            },
        );
        catalog.register(
            "controls",
            ComponentTypeSpec {
                default_size: SizeSpec::new(75.0, 15.0),
                min_size: SizeSpec::new(10.0, 4.0),
                max_size: SizeSpec::new(100.0, 25.0),
                aspect: AspectTag::Free,
                resizable: false,
                collapsible: false,
                touch_target: true,
            },
        );
        catalog.register(
            "participants",
            ComponentTypeSpec {
                default_size: SizeSpec::new(25.0, 40.0),
                min_size: SizeSpec::new(10.0, 10.0),
                max_size: SizeSpec::new(40.0, 100.0),
                aspect: AspectTag::Tall,
                resizable: true,
                collapsible: true,
                touch_target: false,
            },
        );
        catalog.register(
            "notifications",
            ComponentTypeSpec {
                default_size: SizeSpec::new(25.0, 10.0),
                min_size: SizeSpec::new(10.0, 5.0),
                max_size: SizeSpec::new(40.0, 30.0),
                aspect: AspectTag::Free,
                resizable: false,
                collapsible: true,
                touch_target: true,
            },
        );
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_core_panes() {
        let catalog = ComponentCatalog::default();
        for key in ["stream", "chat", "controls", "participants", "notifications"] {
            let key = ComponentKey::new(key).unwrap();
            assert!(catalog.spec_for(&key).is_some(), "missing spec for {key}");
        }
    }

    #[test]
    fn unknown_key_is_unconstrained() {
        let catalog = ComponentCatalog::default();
        let key = ComponentKey::new("scoreboard").unwrap();
        assert!(catalog.spec_for(&key).is_none());
    }

    #[test]
    fn controls_are_touch_targets() {
        let catalog = ComponentCatalog::default();
        let key = ComponentKey::new("controls").unwrap();
        assert!(catalog.spec_for(&key).unwrap().touch_target);
    }

    #[test]
    fn register_replaces_existing_spec() {
        let mut catalog = ComponentCatalog::default();
        let before = catalog.len();
        catalog.register(
            "chat",
            ComponentTypeSpec {
                default_size: SizeSpec::new(30.0, 100.0),
                min_size: SizeSpec::new(5.0, 5.0),
                max_size: SizeSpec::new(60.0, 100.0),
                aspect: AspectTag::Tall,
                resizable: true,
                collapsible: false,
                touch_target: false,
            },
        );
        assert_eq!(catalog.len(), before);
        let key = ComponentKey::new("chat").unwrap();
        assert_eq!(catalog.spec_for(&key).unwrap().min_size.w, 5.0);
    }
}
