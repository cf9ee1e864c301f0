//! Renderable surface abstraction.
//!
//! The engine never touches a real rendering tree. The host environment
//! maps component keys to renderable handles through a
//! [`SurfaceResolver`]; a key with no surface is tolerated and silently
//! skipped for that phase. [`MemorySurfaces`] is a complete in-memory
//! implementation for headless embedding and tests.

use std::collections::BTreeMap;

use crate::model::{ComponentKey, Rect};

/// One renderable handle the animator can drive.
pub trait Surface {
    /// Apply a rectangle in percent-of-viewport units.
    fn set_rect(&mut self, rect: Rect);
    /// Apply an opacity in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f64);
}

/// Maps component keys to renderable surfaces.
///
/// Ownership of the mapping lies with the host; returning `None` for a
/// key is not an error.
pub trait SurfaceResolver {
    /// The surface for `key`, if one currently exists.
    fn surface(&mut self, key: &ComponentKey) -> Option<&mut dyn Surface>;
}

/// Recorded state of one in-memory surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    /// Last applied rectangle.
    pub rect: Rect,
    /// Last applied opacity.
    pub opacity: f64,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            opacity: 1.0,
        }
    }
}

impl Surface for SurfaceState {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }
}

/// In-memory surface set keyed by component key.
///
/// Surfaces must be registered explicitly; unregistered keys resolve to
/// `None` exactly like a pane with no DOM node behind it.
#[derive(Debug, Default)]
pub struct MemorySurfaces {
    surfaces: BTreeMap<ComponentKey, SurfaceState>,
}

impl MemorySurfaces {
    /// An empty surface set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface for `key` with default state.
    pub fn register(&mut self, key: ComponentKey) {
        self.surfaces.entry(key).or_default();
    }

    /// Read back the recorded state for `key`.
    pub fn state(&self, key: &ComponentKey) -> Option<&SurfaceState> {
        self.surfaces.get(key)
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surfaces are registered.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl SurfaceResolver for MemorySurfaces {
    fn surface(&mut self, key: &ComponentKey) -> Option<&mut dyn Surface> {
        self.surfaces
            .get_mut(key)
            .map(|s| s as &mut dyn Surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_key_resolves_to_none() {
        let mut surfaces = MemorySurfaces::new();
        assert!(surfaces
            .surface(&ComponentKey::new("chat").unwrap())
            .is_none());
    }

    #[test]
    fn registered_surface_records_applied_state() {
        let mut surfaces = MemorySurfaces::new();
        let key = ComponentKey::new("stream").unwrap();
        surfaces.register(key.clone());
        let s = surfaces.surface(&key).unwrap();
        s.set_rect(Rect::new(0.0, 0.0, 75.0, 100.0));
        s.set_opacity(0.5);
        let state = surfaces.state(&key).unwrap();
        assert!(state.rect.approx_eq(&Rect::new(0.0, 0.0, 75.0, 100.0)));
        assert_eq!(state.opacity, 0.5);
    }

    #[test]
    fn register_is_idempotent() {
        let mut surfaces = MemorySurfaces::new();
        let key = ComponentKey::new("chat").unwrap();
        surfaces.register(key.clone());
        surfaces
            .surface(&key)
            .unwrap()
            .set_opacity(0.25);
        surfaces.register(key.clone());
        assert_eq!(surfaces.state(&key).unwrap().opacity, 0.25);
        assert_eq!(surfaces.len(), 1);
    }
}
