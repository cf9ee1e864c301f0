//! Transition planning: diff two resolved layouts into an operation plan.
//!
//! The planner walks the union of component keys present in either layout
//! and classifies each key:
//!
//! - absent-or-invisible before, visible after: **fade in** at the target
//!   rectangle;
//! - visible before, absent-or-invisible after: **fade out** from the
//!   previous rectangle;
//! - visible on both sides with a differing rectangle: **move** carrying
//!   both rectangles; identical rectangles emit nothing.
//!
//! Planning is a pure function; the plan is inspectable data that is
//! discarded once its animation settles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{ComponentKey, Rect};
use crate::responsive::ResolvedLayout;

/// A pane disappearing during the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeOut {
    /// The pane being faded out.
    pub key: ComponentKey,
    /// Its rectangle in the previous layout.
    pub from: Rect,
}

/// A pane appearing during the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeIn {
    /// The pane being faded in.
    pub key: ComponentKey,
    /// Its rectangle in the next layout.
    pub to: Rect,
}

/// A pane sliding between two rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// The pane being moved.
    pub key: ComponentKey,
    /// Its rectangle in the previous layout.
    pub from: Rect,
    /// Its rectangle in the next layout.
    pub to: Rect,
}

/// The diff between two resolved layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionPlan {
    /// Panes disappearing in phase 1.
    pub fade_out: Vec<FadeOut>,
    /// Panes appearing in phase 2.
    pub fade_in: Vec<FadeIn>,
    /// Panes sliding in phase 2.
    pub moves: Vec<Move>,
}

impl TransitionPlan {
    /// Whether the plan contains no operations at all.
    pub fn is_empty(&self) -> bool {
        self.fade_out.is_empty() && self.fade_in.is_empty() && self.moves.is_empty()
    }

    /// Total operation count, for logging and stats.
    pub fn len(&self) -> usize {
        self.fade_out.len() + self.fade_in.len() + self.moves.len()
    }
}

/// Diff `prev` against `next` into a [`TransitionPlan`].
///
/// `prev` is `None` on first activation: every visible pane in `next`
/// fades in.
pub fn plan(prev: Option<&ResolvedLayout>, next: &ResolvedLayout) -> TransitionPlan {
    let mut keys: BTreeSet<&ComponentKey> = next.components.keys().collect();
    if let Some(prev) = prev {
        keys.extend(prev.components.keys());
    }

    let mut plan = TransitionPlan::default();
    for key in keys {
        let before = prev.and_then(|p| p.component(key)).filter(|p| p.visible);
        let after = next.component(key).filter(|p| p.visible);
        match (before, after) {
            (None, Some(after)) => plan.fade_in.push(FadeIn {
                key: key.clone(),
                to: after.rect,
            }),
            (Some(before), None) => plan.fade_out.push(FadeOut {
                key: key.clone(),
                from: before.rect,
            }),
            (Some(before), Some(after)) => {
                if !before.rect.approx_eq(&after.rect) {
                    plan.moves.push(Move {
                        key: key.clone(),
                        from: before.rect,
                        to: after.rect,
                    });
                }
            }
            (None, None) => {}
        }
    }
    plan
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod planner_tests;
