//! Breakpoint classification and responsive resolution.
//!
//! Resolution always starts from the canonical base [`LayoutDefinition`]
//! and shallow-merges the override set for the requested breakpoint, so
//! resolving a resolved layout again is structurally a no-op: the base is
//! immutable and overrides are never chained.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ComponentKey, ComponentPlacement, LayoutDefinition, LayoutId};

/// Named viewport-size bucket selecting which overrides apply.
///
/// Ordered smallest to largest so it can key a `BTreeMap` and sort
/// override sets deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Narrow viewports (phones).
    Mobile,
    /// Mid-size viewports (tablets, split windows).
    Tablet,
    /// Everything wider.
    Desktop,
}

impl Breakpoint {
    /// Classify a viewport width against fixed thresholds.
    pub fn classify(width: u32, thresholds: &BreakpointThresholds) -> Breakpoint {
        if width <= thresholds.mobile_max {
            Breakpoint::Mobile
        } else if width <= thresholds.tablet_max {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }
}

/// Width thresholds for the fallback classifier, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointThresholds {
    /// Widths at or below this are mobile.
    pub mobile_max: u32,
    /// Widths at or below this (and above `mobile_max`) are tablet.
    pub tablet_max: u32,
}

impl Default for BreakpointThresholds {
    fn default() -> Self {
        Self {
            mobile_max: 768,
            tablet_max: 1024,
        }
    }
}

/// External viewport classifier.
///
/// The host environment owns viewport tracking; the engine only consumes
/// the resulting bucket. [`WidthThresholdClassifier`] is the fallback when
/// the host supplies nothing.
pub trait BreakpointClassifier {
    /// Map a viewport width in pixels to a breakpoint bucket.
    fn classify(&self, width: u32) -> Breakpoint;
}

/// Fallback classifier using fixed width thresholds.
#[derive(Debug, Clone, Default)]
pub struct WidthThresholdClassifier {
    thresholds: BreakpointThresholds,
}

impl WidthThresholdClassifier {
    /// Classifier with explicit thresholds.
    pub fn new(thresholds: BreakpointThresholds) -> Self {
        Self { thresholds }
    }
}

impl BreakpointClassifier for WidthThresholdClassifier {
    fn classify(&self, width: u32) -> Breakpoint {
        Breakpoint::classify(width, &self.thresholds)
    }
}

/// A layout after breakpoint overrides have been merged in.
///
/// Exactly one concrete placement per component key; this is what the
/// planner diffs and the animator applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLayout {
    /// Id of the definition this was resolved from.
    pub layout_id: LayoutId,
    /// Breakpoint the overrides were taken from.
    pub breakpoint: Breakpoint,
    /// Concrete placement for every pane.
    pub components: BTreeMap<ComponentKey, ComponentPlacement>,
}

impl ResolvedLayout {
    /// Look up the concrete placement for a component key.
    pub fn component(&self, key: &ComponentKey) -> Option<&ComponentPlacement> {
        self.components.get(key)
    }

    /// Whether `key` names a visible pane in this layout.
    pub fn is_visible(&self, key: &ComponentKey) -> bool {
        self.components.get(key).is_some_and(|p| p.visible)
    }

    /// Rebuild a definition whose base placements are the resolved ones.
    ///
    /// Validation rules check definitions, but gating decisions must see
    /// the placements a viewer would actually get: an override can push a
    /// pane below its minimum even when the base layout is fine. The
    /// returned definition carries `source`'s identity, metadata and
    /// override table with the merged placements substituted in.
    pub fn as_definition(&self, source: &LayoutDefinition) -> LayoutDefinition {
        let mut definition = source.clone();
        definition.components = self.components.clone();
        definition
    }
}

/// Merge a layout's base placements with its overrides for `breakpoint`.
///
/// Override fields win; unspecified fields retain base values. When no
/// override set is registered for the breakpoint, the base placements are
/// returned unchanged. Override entries for keys the base layout does not
/// contain are ignored.
pub fn resolve(layout: &LayoutDefinition, breakpoint: Breakpoint) -> ResolvedLayout {
    let mut components = layout.components.clone();
    if let Some(set) = layout.overrides.get(&breakpoint) {
        for (key, ov) in set {
            if let Some(base) = layout.components.get(key) {
                components.insert(key.clone(), base.merged(ov));
            }
        }
    }
    ResolvedLayout {
        layout_id: layout.id.clone(),
        breakpoint,
        components,
    }
}
