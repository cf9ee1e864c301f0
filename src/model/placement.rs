//! Component placements and breakpoint overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::geometry::Rect;

/// Concrete placement of one pane within a layout.
///
/// A placement is pure data: the rectangle, stacking order, visibility and
/// behavior flags, plus a type-specific property bag that the engine
/// carries but never interprets (e.g., a chat pane's font scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPlacement {
    /// Normalized rectangle in percent-of-viewport units.
    pub rect: Rect,
    /// Stacking order; higher values render above lower ones.
    #[serde(default)]
    pub z_index: i32,
    /// Whether the pane is shown at all in this layout.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Whether the user may resize the pane.
    #[serde(default)]
    pub resizable: bool,
    /// Whether the user may drag the pane.
    #[serde(default)]
    pub movable: bool,
    /// Type-specific properties, opaque to the engine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, serde_json::Value>,
}

fn default_visible() -> bool {
    true
}

impl ComponentPlacement {
    /// A visible, static placement at `rect` with default flags.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            z_index: 0,
            visible: true,
            resizable: false,
            movable: false,
            props: BTreeMap::new(),
        }
    }

    /// Builder: set visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Builder: set stacking order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builder: mark the pane user-resizable.
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Builder: mark the pane user-movable.
    pub fn movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    /// Shallow-merge an override into this placement.
    ///
    /// Fields present on the override win; unspecified fields retain the
    /// base values. The property bag is replaced wholesale when present
    /// (shallow merge, matching how overrides are authored).
    pub fn merged(&self, ov: &PlacementOverride) -> ComponentPlacement {
        ComponentPlacement {
            rect: ov.rect.unwrap_or(self.rect),
            z_index: ov.z_index.unwrap_or(self.z_index),
            visible: ov.visible.unwrap_or(self.visible),
            resizable: ov.resizable.unwrap_or(self.resizable),
            movable: ov.movable.unwrap_or(self.movable),
            props: ov.props.clone().unwrap_or_else(|| self.props.clone()),
        }
    }
}

/// Partial placement used as a per-breakpoint override.
///
/// Every field is optional; only set fields replace the base placement's
/// values during resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementOverride {
    /// Replacement rectangle, if overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    /// Replacement stacking order, if overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Replacement visibility, if overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Replacement resizable flag, if overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    /// Replacement movable flag, if overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movable: Option<bool>,
    /// Replacement property bag, if overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<BTreeMap<String, serde_json::Value>>,
}

impl PlacementOverride {
    /// Override only the rectangle.
    pub fn rect(rect: Rect) -> Self {
        Self {
            rect: Some(rect),
            ..Self::default()
        }
    }

    /// Override only the visibility flag.
    pub fn hidden() -> Self {
        Self {
            visible: Some(false),
            ..Self::default()
        }
    }

    /// Builder: also override visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_with_empty_override_is_identity() {
        let base = ComponentPlacement::new(Rect::new(0.0, 0.0, 50.0, 50.0))
            .z_index(3)
            .resizable(true);
        let merged = base.merged(&PlacementOverride::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn override_fields_win() {
        let base = ComponentPlacement::new(Rect::new(0.0, 0.0, 50.0, 50.0)).z_index(1);
        let ov = PlacementOverride::rect(Rect::new(0.0, 0.0, 100.0, 40.0)).with_visible(false);
        let merged = base.merged(&ov);
        assert!(merged.rect.approx_eq(&Rect::new(0.0, 0.0, 100.0, 40.0)));
        assert!(!merged.visible);
        // Unspecified fields keep base values.
        assert_eq!(merged.z_index, 1);
        assert!(!merged.resizable);
    }

    #[test]
    fn override_props_replace_base_bag() {
        let mut base = ComponentPlacement::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        base.props
            .insert("fontScale".into(), serde_json::json!(1.25));
        let mut bag = BTreeMap::new();
        bag.insert("compact".into(), serde_json::json!(true));
        let ov = PlacementOverride {
            props: Some(bag),
            ..PlacementOverride::default()
        };
        let merged = base.merged(&ov);
        assert!(merged.props.contains_key("compact"));
        assert!(!merged.props.contains_key("fontScale"));
    }

    #[test]
    fn placement_deserializes_with_defaults() {
        let json = r#"{"rect": {"x": 0.0, "y": 0.0, "w": 25.0, "h": 100.0}}"#;
        let placement: ComponentPlacement = serde_json::from_str(json).unwrap();
        assert!(placement.visible);
        assert_eq!(placement.z_index, 0);
        assert!(placement.props.is_empty());
    }
}
