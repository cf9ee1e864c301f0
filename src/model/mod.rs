//! Domain model: identifiers, geometry, placements, layouts, catalogs.
//!
//! Everything in this module is pure data with structural operations;
//! no rendering, persistence, or scheduling concerns live here.

pub mod component;
pub mod error;
pub mod geometry;
pub mod identifiers;
pub mod layout;
pub mod placement;

pub use component::{AspectTag, ComponentCatalog, ComponentTypeSpec, SizeSpec};
pub use error::LayoutError;
pub use geometry::{channel_lerp, Rect, RECT_EPSILON, VIEWPORT_EXTENT};
pub use identifiers::{ComponentKey, InvalidComponentKey, InvalidLayoutId, LayoutId};
pub use layout::{LayoutDefinition, LayoutKind, LayoutMetadata, OverrideSet};
pub use placement::{ComponentPlacement, PlacementOverride};
