//! Layout registry: ordered storage and lifecycle for layout definitions.
//!
//! The registry owns every known layout. Built-ins and the blank template
//! are registered once at startup and are immutable: edits redirect to an
//! implicit duplicate, deletes are rejected. Custom layouts are minted
//! with sequential `custom-<n>` ids and are the only entries that may be
//! edited or removed.
//!
//! Every mutation either completes in full or leaves the registry
//! untouched; there are no partially-applied edits or imports.

use crate::model::{
    ComponentCatalog, ComponentPlacement, LayoutDefinition, LayoutError, LayoutId, LayoutKind,
    Rect,
};
use crate::validation::ValidationEngine;

pub mod builtins;
mod snapshot;

pub use snapshot::{LayoutSnapshot, SNAPSHOT_VERSION};

/// Ordered collection of every known layout.
///
/// Iteration order is registration order: built-ins first (picker order),
/// then customs in creation order. `next_layout` cycling relies on this
/// ordering being stable.
#[derive(Debug)]
pub struct LayoutRegistry {
    layouts: Vec<LayoutDefinition>,
    next_custom: u64,
}

impl LayoutRegistry {
    /// A registry with no layouts at all. Mostly useful in tests; production
    /// startup goes through [`LayoutRegistry::with_built_ins`].
    pub fn empty() -> Self {
        Self {
            layouts: Vec::new(),
            next_custom: 1,
        }
    }

    /// A registry seeded with the shipped layouts and the blank template.
    pub fn with_built_ins() -> Self {
        let mut registry = Self::empty();
        for layout in builtins::built_in_layouts() {
            registry.seed(layout);
        }
        registry
    }

    /// Register a startup layout, skipping duplicates.
    ///
    /// Startup seeding is the one place duplicate ids can legitimately
    /// occur (a plugin re-registering a shipped layout), and the first
    /// registration wins.
    pub fn seed(&mut self, layout: LayoutDefinition) {
        if self.contains(&layout.id) {
            tracing::warn!(id = %layout.id, "duplicate layout registration skipped");
            return;
        }
        self.layouts.push(layout);
    }

    /// Look up a layout by id.
    pub fn get(&self, id: &LayoutId) -> Option<&LayoutDefinition> {
        self.layouts.iter().find(|l| &l.id == id)
    }

    /// Whether a layout with `id` exists.
    pub fn contains(&self, id: &LayoutId) -> bool {
        self.get(id).is_some()
    }

    /// Every layout, in registration order.
    pub fn all(&self) -> &[LayoutDefinition] {
        &self.layouts
    }

    /// Every layout id, in registration order.
    pub fn ids(&self) -> Vec<LayoutId> {
        self.layouts.iter().map(|l| l.id.clone()).collect()
    }

    /// Number of stored layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether the registry holds no layouts.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Number of user-created layouts.
    pub fn custom_count(&self) -> usize {
        self.layouts
            .iter()
            .filter(|l| l.kind == LayoutKind::Custom)
            .count()
    }

    /// Only the user-created layouts, in creation order.
    pub fn customs(&self) -> Vec<&LayoutDefinition> {
        self.layouts
            .iter()
            .filter(|l| l.kind == LayoutKind::Custom)
            .collect()
    }

    /// Mint the next unused `custom-<n>` id.
    ///
    /// The counter only moves forward, so ids are never reused within a
    /// session even after deletes. Collisions with ids restored from a
    /// persisted session are skipped.
    fn mint_custom_id(&mut self) -> LayoutId {
        loop {
            let candidate = format!("custom-{}", self.next_custom);
            self.next_custom += 1;
            if let Ok(id) = LayoutId::new(&candidate) {
                if !self.contains(&id) {
                    return id;
                }
            }
        }
    }

    /// Create a new custom layout, optionally seeded from a template.
    ///
    /// With a `template` id the new layout copies that layout's structure;
    /// without one (or when the id is unknown) it starts from a minimal
    /// stream-plus-controls arrangement. Returns the new layout's id.
    pub fn create(&mut self, template: Option<&LayoutId>) -> LayoutId {
        let new_id = self.mint_custom_id();
        let layout = match template.and_then(|id| self.get(id)) {
            Some(seed) => {
                let mut layout = seed.derived(new_id.clone(), "");
                layout.name = format!("New Layout ({})", seed.name);
                layout
            }
            None => {
                if template.is_some() {
                    tracing::warn!("unknown template id, creating from minimal default");
                }
                minimal_layout(new_id.clone())
            }
        };
        tracing::info!(id = %layout.id, name = %layout.name, "custom layout created");
        self.layouts.push(layout);
        new_id
    }

    /// Duplicate any layout into a new custom named "... (Copy)".
    pub fn duplicate(&mut self, id: &LayoutId) -> Result<LayoutId, LayoutError> {
        let source = self.get(id).ok_or_else(|| LayoutError::not_found(id))?;
        let new_id = {
            let copy_template = source.clone();
            let new_id = self.mint_custom_id();
            self.layouts.push(copy_template.duplicated(new_id.clone()));
            new_id
        };
        tracing::info!(source = %id, copy = %new_id, "layout duplicated");
        Ok(new_id)
    }

    /// Edit a layout in place, redirecting immutable layouts to a copy.
    ///
    /// Custom layouts are mutated directly and keep their id. Built-ins
    /// and templates are never touched: the edit lands on a fresh
    /// duplicate instead, and the duplicate's id is returned so callers
    /// always know which layout now carries the change.
    pub fn update<F>(&mut self, id: &LayoutId, edit: F) -> Result<LayoutId, LayoutError>
    where
        F: FnOnce(&mut LayoutDefinition),
    {
        let kind = self
            .get(id)
            .map(|l| l.kind)
            .ok_or_else(|| LayoutError::not_found(id))?;
        let target = if kind == LayoutKind::Custom {
            id.clone()
        } else {
            let copy = self.duplicate(id)?;
            tracing::debug!(source = %id, copy = %copy, "edit redirected to duplicate");
            copy
        };
        let layout = self
            .layouts
            .iter_mut()
            .find(|l| l.id == target)
            .ok_or_else(|| LayoutError::not_found(&target))?;
        edit(layout);
        layout.touch_modified();
        Ok(target)
    }

    /// Delete a custom layout.
    ///
    /// Built-ins and templates are immutable and deletion is rejected
    /// with [`LayoutError::ImmutableLayout`].
    pub fn delete(&mut self, id: &LayoutId) -> Result<(), LayoutError> {
        let position = self
            .layouts
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| LayoutError::not_found(id))?;
        let kind = self.layouts[position].kind;
        if kind != LayoutKind::Custom {
            return Err(LayoutError::ImmutableLayout {
                id: id.clone(),
                kind,
            });
        }
        self.layouts.remove(position);
        tracing::info!(id = %id, "custom layout deleted");
        Ok(())
    }

    /// Package a layout for transfer.
    pub fn export(&self, id: &LayoutId) -> Result<LayoutSnapshot, LayoutError> {
        self.get(id)
            .map(LayoutSnapshot::new)
            .ok_or_else(|| LayoutError::not_found(id))
    }

    /// Import a snapshot as a new custom layout.
    ///
    /// The payload is validated before anything is stored: an unsupported
    /// envelope version is malformed, and error-severity validation issues
    /// reject the import with the registry untouched. On success the
    /// layout gets a freshly minted id (never the id embedded in the
    /// snapshot, which may already exist here) and a "(Imported)" name
    /// suffix.
    pub fn import(
        &mut self,
        snapshot: &LayoutSnapshot,
        engine: &ValidationEngine,
        catalog: &ComponentCatalog,
    ) -> Result<LayoutId, LayoutError> {
        if !snapshot.version_supported() {
            return Err(LayoutError::malformed(format!(
                "unsupported snapshot version '{}' (expected '{SNAPSHOT_VERSION}')",
                snapshot.version
            )));
        }
        let report = engine.validate(&snapshot.layout, catalog);
        if report.has_errors {
            tracing::warn!(
                source = %snapshot.layout.id,
                errors = report.errors().len(),
                "import rejected by validation"
            );
            return Err(LayoutError::Validation {
                issues: report.errors(),
            });
        }
        let new_id = self.mint_custom_id();
        self.layouts.push(snapshot.layout.imported(new_id.clone()));
        tracing::info!(id = %new_id, "layout imported");
        Ok(new_id)
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::with_built_ins()
    }
}

/// Minimal seed for `create` without a template: stream plus controls.
fn minimal_layout(id: LayoutId) -> LayoutDefinition {
    let mut components = std::collections::BTreeMap::new();
    components.insert(
        crate::model::ComponentKey::new("stream").expect("non-empty literal"),
        ComponentPlacement::new(Rect::new(0.0, 0.0, 100.0, 80.0))
            .resizable(true)
            .movable(true),
    );
    components.insert(
        crate::model::ComponentKey::new("controls").expect("non-empty literal"),
        ComponentPlacement::new(Rect::new(0.0, 80.0, 100.0, 20.0)).movable(true),
    );
    LayoutDefinition::new(id, "New Layout", LayoutKind::Custom, components)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
