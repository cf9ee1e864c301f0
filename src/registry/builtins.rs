//! Built-in layout catalog, registered once at startup.
//!
//! Every built-in carries mobile (and where useful, tablet) overrides so
//! the shipped layouts degrade sensibly on small viewports without any
//! user configuration.

use std::collections::BTreeMap;

use crate::model::{
    ComponentKey, ComponentPlacement, LayoutDefinition, LayoutId, LayoutKind, OverrideSet,
    PlacementOverride, Rect,
};
use crate::responsive::Breakpoint;

/// Id of the fallback layout the controller reverts to.
pub const DEFAULT_LAYOUT_ID: &str = "default";

/// Id of the blank template seeding new custom layouts.
pub const BLANK_TEMPLATE_ID: &str = "custom-blank";

/// The id of [`DEFAULT_LAYOUT_ID`] as a typed [`LayoutId`].
pub fn default_layout_id() -> LayoutId {
    id(DEFAULT_LAYOUT_ID)
}

fn key(raw: &str) -> ComponentKey {
    ComponentKey::new(raw).expect("built-in component keys are non-empty literals")
}

fn id(raw: &str) -> LayoutId {
    LayoutId::new(raw).expect("built-in layout ids are non-empty literals")
}

fn components(
    entries: Vec<(&str, ComponentPlacement)>,
) -> BTreeMap<ComponentKey, ComponentPlacement> {
    entries.into_iter().map(|(k, p)| (key(k), p)).collect()
}

fn overrides(entries: Vec<(&str, PlacementOverride)>) -> OverrideSet {
    entries.into_iter().map(|(k, o)| (key(k), o)).collect()
}

/// The shipped layouts plus the blank template, in picker order.
pub fn built_in_layouts() -> Vec<LayoutDefinition> {
    vec![default_layout(), spotlight(), grid(), theater(), blank_template()]
}

/// Stream left, chat column right, controls under the stream.
fn default_layout() -> LayoutDefinition {
    LayoutDefinition::new(
        id(DEFAULT_LAYOUT_ID),
        "Default",
        LayoutKind::BuiltIn,
        components(vec![
            (
                "stream",
                ComponentPlacement::new(Rect::new(0.0, 0.0, 75.0, 80.0))
                    .z_index(1)
                    .resizable(true),
            ),
            (
                "chat",
                ComponentPlacement::new(Rect::new(75.0, 0.0, 25.0, 100.0)).resizable(true),
            ),
            (
                "controls",
                ComponentPlacement::new(Rect::new(0.0, 80.0, 75.0, 20.0)).z_index(2),
            ),
        ]),
    )
    .with_overrides(
        Breakpoint::Mobile,
        overrides(vec![
            ("stream", PlacementOverride::rect(Rect::new(0.0, 0.0, 100.0, 45.0))),
            ("chat", PlacementOverride::rect(Rect::new(0.0, 45.0, 100.0, 40.0))),
            ("controls", PlacementOverride::rect(Rect::new(0.0, 85.0, 100.0, 15.0))),
        ]),
    )
    .with_overrides(
        Breakpoint::Tablet,
        overrides(vec![
            ("stream", PlacementOverride::rect(Rect::new(0.0, 0.0, 70.0, 80.0))),
            ("chat", PlacementOverride::rect(Rect::new(70.0, 0.0, 30.0, 100.0))),
            ("controls", PlacementOverride::rect(Rect::new(0.0, 80.0, 70.0, 20.0))),
        ]),
    )
}

/// Full-width stream with the chat column hidden entirely.
fn spotlight() -> LayoutDefinition {
    LayoutDefinition::new(
        id("spotlight"),
        "Spotlight",
        LayoutKind::BuiltIn,
        components(vec![
            (
                "stream",
                ComponentPlacement::new(Rect::new(0.0, 0.0, 100.0, 85.0)).z_index(1),
            ),
            (
                "chat",
                ComponentPlacement::new(Rect::new(75.0, 0.0, 25.0, 100.0)).visible(false),
            ),
            (
                "controls",
                ComponentPlacement::new(Rect::new(0.0, 85.0, 100.0, 15.0)).z_index(2),
            ),
        ]),
    )
    .with_overrides(
        Breakpoint::Mobile,
        overrides(vec![
            ("stream", PlacementOverride::rect(Rect::new(0.0, 0.0, 100.0, 88.0))),
            ("controls", PlacementOverride::rect(Rect::new(0.0, 88.0, 100.0, 12.0))),
        ]),
    )
}

/// Stream and participants stacked left, chat column right.
fn grid() -> LayoutDefinition {
    LayoutDefinition::new(
        id("grid"),
        "Grid",
        LayoutKind::BuiltIn,
        components(vec![
            (
                "stream",
                ComponentPlacement::new(Rect::new(0.0, 0.0, 75.0, 50.0))
                    .z_index(1)
                    .resizable(true),
            ),
            (
                "participants",
                ComponentPlacement::new(Rect::new(0.0, 50.0, 75.0, 30.0)).resizable(true),
            ),
            (
                "chat",
                ComponentPlacement::new(Rect::new(75.0, 0.0, 25.0, 100.0)).resizable(true),
            ),
            (
                "controls",
                ComponentPlacement::new(Rect::new(0.0, 80.0, 75.0, 20.0)).z_index(2),
            ),
        ]),
    )
    .with_overrides(
        Breakpoint::Mobile,
        overrides(vec![
            ("stream", PlacementOverride::rect(Rect::new(0.0, 0.0, 100.0, 35.0))),
            ("participants", PlacementOverride::rect(Rect::new(0.0, 35.0, 100.0, 25.0))),
            ("chat", PlacementOverride::rect(Rect::new(0.0, 60.0, 100.0, 25.0))),
            ("controls", PlacementOverride::rect(Rect::new(0.0, 85.0, 100.0, 15.0))),
        ]),
    )
}

/// Near-fullscreen stream with a slim control strip; chat hidden.
fn theater() -> LayoutDefinition {
    LayoutDefinition::new(
        id("theater"),
        "Theater",
        LayoutKind::BuiltIn,
        components(vec![
            (
                "stream",
                ComponentPlacement::new(Rect::new(0.0, 0.0, 100.0, 92.0)).z_index(1),
            ),
            (
                "chat",
                ComponentPlacement::new(Rect::new(75.0, 0.0, 25.0, 100.0)).visible(false),
            ),
            (
                "controls",
                ComponentPlacement::new(Rect::new(0.0, 92.0, 100.0, 8.0)).z_index(2),
            ),
        ]),
    )
    .with_overrides(
        Breakpoint::Mobile,
        overrides(vec![
            ("stream", PlacementOverride::rect(Rect::new(0.0, 0.0, 100.0, 90.0))),
            ("controls", PlacementOverride::rect(Rect::new(0.0, 90.0, 100.0, 10.0))),
        ]),
    )
}

/// Template seeding new custom layouts.
fn blank_template() -> LayoutDefinition {
    LayoutDefinition::new(
        id(BLANK_TEMPLATE_ID),
        "Blank",
        LayoutKind::Template,
        components(vec![
            (
                "stream",
                ComponentPlacement::new(Rect::new(0.0, 0.0, 75.0, 80.0))
                    .resizable(true)
                    .movable(true),
            ),
            (
                "chat",
                ComponentPlacement::new(Rect::new(75.0, 0.0, 25.0, 100.0))
                    .resizable(true)
                    .movable(true),
            ),
            (
                "controls",
                ComponentPlacement::new(Rect::new(0.0, 80.0, 75.0, 20.0)).movable(true),
            ),
        ]),
    )
    .with_overrides(
        Breakpoint::Mobile,
        overrides(vec![
            ("stream", PlacementOverride::rect(Rect::new(0.0, 0.0, 100.0, 45.0))),
            ("chat", PlacementOverride::rect(Rect::new(0.0, 45.0, 100.0, 40.0))),
            ("controls", PlacementOverride::rect(Rect::new(0.0, 85.0, 100.0, 15.0))),
        ]),
    )
}
