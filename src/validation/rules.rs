//! Canonical validation rules.
//!
//! Thresholds live here as module constants so the rule bodies read as
//! the documented policy: overlap above 10% of the smaller pane warns,
//! sub-minimum panes error, touch targets under 5% of viewport warn, and
//! layouts with no responsive story warn.

use crate::model::{ComponentCatalog, LayoutDefinition, VIEWPORT_EXTENT};
use crate::validation::{RuleOutcome, Severity, ValidationIssue, ValidationRule};

/// Visible pane pairs overlapping more than this ratio are flagged.
pub const OVERLAP_WARN_RATIO: f64 = 0.10;

/// Touch targets narrower or shorter than this percent of viewport warn.
pub const TOUCH_TARGET_MIN_PERCENT: f64 = 5.0;

/// Panes smaller than this in *both* dimensions are flagged as unusable
/// by the responsive rule.
pub const RESPONSIVE_MIN_PERCENT: f64 = 10.0;

/// The canonical rule set, in evaluation order.
pub fn default_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new("no-overlap", no_overlap),
        ValidationRule::new("min-size", min_size),
        ValidationRule::new("accessibility", accessibility),
        ValidationRule::new("responsive", responsive),
    ]
}

/// Warning: visible pane pairs whose overlap ratio exceeds
/// [`OVERLAP_WARN_RATIO`].
fn no_overlap(layout: &LayoutDefinition, _catalog: &ComponentCatalog) -> RuleOutcome {
    let visible: Vec<_> = layout
        .components
        .iter()
        .filter(|(_, p)| p.visible)
        .collect();
    let mut issues = Vec::new();
    for (i, (key_a, a)) in visible.iter().enumerate() {
        for (key_b, b) in visible.iter().skip(i + 1) {
            let ratio = a.rect.overlap_ratio(&b.rect);
            if ratio > OVERLAP_WARN_RATIO {
                issues.push(ValidationIssue::component(
                    "no-overlap",
                    Severity::Warning,
                    key_a,
                    format!(
                        "'{key_a}' overlaps '{key_b}' by {:.0}% of the smaller pane",
                        ratio * 100.0
                    ),
                ));
            }
        }
    }
    RuleOutcome::from_issues(issues)
}

/// Error: a visible pane smaller than its catalog minimum.
///
/// Panes with no catalog entry are unconstrained.
fn min_size(layout: &LayoutDefinition, catalog: &ComponentCatalog) -> RuleOutcome {
    let mut issues = Vec::new();
    for (key, placement) in &layout.components {
        if !placement.visible {
            continue;
        }
        let Some(spec) = catalog.spec_for(key) else {
            continue;
        };
        if placement.rect.w < spec.min_size.w || placement.rect.h < spec.min_size.h {
            issues.push(ValidationIssue::component(
                "min-size",
                Severity::Error,
                key,
                format!(
                    "'{key}' is {:.1}x{:.1}%, below its minimum of {:.1}x{:.1}%",
                    placement.rect.w, placement.rect.h, spec.min_size.w, spec.min_size.h
                ),
            ));
        }
    }
    RuleOutcome::from_issues(issues)
}

/// Warning: missing visible controls pane, or touch targets below
/// [`TOUCH_TARGET_MIN_PERCENT`] in either dimension.
fn accessibility(layout: &LayoutDefinition, catalog: &ComponentCatalog) -> RuleOutcome {
    let mut issues = Vec::new();

    let has_controls = layout
        .components
        .iter()
        .any(|(key, p)| key.as_str() == "controls" && p.visible);
    if !has_controls {
        issues.push(ValidationIssue::layout(
            "accessibility",
            Severity::Warning,
            "no visible 'controls' pane; playback controls are unreachable",
        ));
    }

    for (key, placement) in &layout.components {
        if !placement.visible {
            continue;
        }
        let is_touch_target = catalog.spec_for(key).is_some_and(|s| s.touch_target);
        if is_touch_target
            && (placement.rect.w < TOUCH_TARGET_MIN_PERCENT
                || placement.rect.h < TOUCH_TARGET_MIN_PERCENT)
        {
            issues.push(ValidationIssue::component(
                "accessibility",
                Severity::Warning,
                key,
                format!(
                    "touch target '{key}' is {:.1}x{:.1}%, below the {TOUCH_TARGET_MIN_PERCENT}% touch minimum",
                    placement.rect.w, placement.rect.h
                ),
            ));
        }
    }

    RuleOutcome::from_issues(issues)
}

/// Warning: no responsive overrides at all, panes escaping the viewport
/// (visible or not), or visible panes under [`RESPONSIVE_MIN_PERCENT`]
/// in both dimensions.
fn responsive(layout: &LayoutDefinition, _catalog: &ComponentCatalog) -> RuleOutcome {
    let mut issues = Vec::new();

    if layout.overrides.is_empty() {
        issues.push(ValidationIssue::layout(
            "responsive",
            Severity::Warning,
            "layout defines no responsive overrides; small viewports will reuse the base placements",
        ));
    }

    for (key, placement) in &layout.components {
        // The bounds check covers hidden panes too: a corrupt rect should
        // surface before the pane is toggled visible.
        if !placement.rect.within_viewport() {
            issues.push(ValidationIssue::component(
                "responsive",
                Severity::Warning,
                key,
                format!(
                    "'{key}' extends past the viewport (x+w={:.1}, y+h={:.1}, max {VIEWPORT_EXTENT})",
                    placement.rect.x + placement.rect.w,
                    placement.rect.y + placement.rect.h
                ),
            ));
        }
        if !placement.visible {
            continue;
        }
        if placement.rect.w < RESPONSIVE_MIN_PERCENT && placement.rect.h < RESPONSIVE_MIN_PERCENT {
            issues.push(ValidationIssue::component(
                "responsive",
                Severity::Warning,
                key,
                format!(
                    "'{key}' shrinks below {RESPONSIVE_MIN_PERCENT}% in both dimensions and will be unusable"
                ),
            ));
        }
    }

    RuleOutcome::from_issues(issues)
}
