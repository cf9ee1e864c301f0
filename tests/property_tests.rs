//! Property-based tests for geometry, resolution and planning invariants.
//!
//! Tests validate:
//! 1. Identifier constructors reject empty strings
//! 2. Overlap ratio stays in [0,1] and is symmetric
//! 3. Breakpoint resolution is idempotent
//! 4. Planning a layout against itself yields an empty plan

use std::collections::BTreeMap;

use paneflow::model::{
    ComponentKey, ComponentPlacement, LayoutDefinition, LayoutId, LayoutKind, OverrideSet,
    PlacementOverride, Rect,
};
use paneflow::responsive::{resolve, Breakpoint};
use paneflow::transition::plan;
use proptest::prelude::*;

// ===== Strategies =====

fn arb_rect() -> impl Strategy<Value = Rect> {
    (
        0.0f64..100.0,
        0.0f64..100.0,
        0.0f64..100.0,
        0.0f64..100.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn arb_breakpoint() -> impl Strategy<Value = Breakpoint> {
    prop_oneof![
        Just(Breakpoint::Mobile),
        Just(Breakpoint::Tablet),
        Just(Breakpoint::Desktop),
    ]
}

fn arb_layout() -> impl Strategy<Value = LayoutDefinition> {
    let keys = prop::sample::subsequence(
        vec!["stream", "chat", "controls", "participants", "notifications"],
        1..=5,
    );
    (keys, prop::collection::vec(arb_rect(), 5), any::<u8>()).prop_map(|(keys, rects, seed)| {
        let mut components = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            let placement = ComponentPlacement::new(rects[i]).visible(seed.wrapping_add(i as u8) % 4 != 0);
            components.insert(ComponentKey::new(*key).unwrap(), placement);
        }
        let mut layout = LayoutDefinition::new(
            LayoutId::new("generated").unwrap(),
            "Generated",
            LayoutKind::Custom,
            components,
        );
        // Half the generated layouts carry a mobile override for their
        // first component.
        if seed % 2 == 0 {
            let key = ComponentKey::new(*keys.first().unwrap()).unwrap();
            let mut set = OverrideSet::new();
            set.insert(key, PlacementOverride::rect(rects[4]));
            layout = layout.with_overrides(Breakpoint::Mobile, set);
        }
        layout
    })
}

// ===== Property 1: Identifier constructors =====

proptest! {
    #[test]
    fn layout_id_rejects_empty_and_accepts_non_empty(s in any::<String>()) {
        if s.is_empty() {
            prop_assert!(LayoutId::new(&s).is_err(), "Empty string should be rejected");
        } else {
            prop_assert!(LayoutId::new(&s).is_ok(), "Non-empty string should be accepted");
        }
    }

    #[test]
    fn component_key_rejects_empty_and_accepts_non_empty(s in any::<String>()) {
        if s.is_empty() {
            prop_assert!(ComponentKey::new(&s).is_err(), "Empty string should be rejected");
        } else {
            prop_assert!(ComponentKey::new(&s).is_ok(), "Non-empty string should be accepted");
        }
    }
}

// ===== Property 2: Overlap ratio =====

proptest! {
    #[test]
    fn overlap_ratio_is_bounded(a in arb_rect(), b in arb_rect()) {
        let ratio = a.overlap_ratio(&b);
        prop_assert!((0.0..=1.0).contains(&ratio), "ratio out of range: {ratio}");
    }

    #[test]
    fn overlap_ratio_is_symmetric(a in arb_rect(), b in arb_rect()) {
        let forward = a.overlap_ratio(&b);
        let backward = b.overlap_ratio(&a);
        prop_assert!((forward - backward).abs() < 1e-9,
            "asymmetric overlap: {forward} vs {backward}");
    }

    #[test]
    fn rect_fully_overlaps_itself_when_nondegenerate(a in arb_rect()) {
        if a.area() > 0.0 {
            prop_assert!((a.overlap_ratio(&a) - 1.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(a.overlap_ratio(&a), 0.0);
        }
    }
}

// ===== Property 3: Resolution idempotence =====

proptest! {
    #[test]
    fn resolution_is_idempotent(layout in arb_layout(), breakpoint in arb_breakpoint()) {
        let once = resolve(&layout, breakpoint);
        // Re-wrap the resolved components as an override-free definition;
        // resolving again must change nothing.
        let rewrapped = LayoutDefinition::new(
            layout.id.clone(),
            layout.name.clone(),
            layout.kind,
            once.components.clone(),
        );
        let twice = resolve(&rewrapped, breakpoint);
        prop_assert_eq!(once.components, twice.components);
    }

    #[test]
    fn resolution_never_invents_components(layout in arb_layout(), breakpoint in arb_breakpoint()) {
        let resolved = resolve(&layout, breakpoint);
        prop_assert_eq!(resolved.components.len(), layout.components.len());
        for key in resolved.components.keys() {
            prop_assert!(layout.components.contains_key(key));
        }
    }
}

// ===== Property 4: Self-plan is empty =====

proptest! {
    #[test]
    fn planning_a_layout_against_itself_is_empty(
        layout in arb_layout(),
        breakpoint in arb_breakpoint(),
    ) {
        let resolved = resolve(&layout, breakpoint);
        let plan = plan(Some(&resolved), &resolved);
        prop_assert!(plan.is_empty(), "self-plan produced {} ops", plan.len());
    }
}
