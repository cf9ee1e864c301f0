//! Layout controller: the single owner of runtime layout state.
//!
//! The controller orchestrates every other part of the engine: it holds
//! the registry, catalog and validation engine, tracks the active layout
//! and its resolved form, drives transitions through the animator, keeps
//! the back-history and the switch queue, and persists session state
//! after every mutation.
//!
//! All collaborators are injected behind traits: the tick clock, the
//! surface set, the persistence store and the outbound sinks. The
//! controller spawns nothing and owns no timers; hosts call
//! [`LayoutController::tick`] from their frame loop.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::config::EngineConfig;
use crate::model::{ComponentCatalog, LayoutDefinition, LayoutError, LayoutId, LayoutKind};
use crate::persistence::{LayoutSettings, PersistedState, PersistenceStore};
use crate::registry::{builtins, LayoutRegistry, LayoutSnapshot};
use crate::responsive::{
    resolve, Breakpoint, BreakpointClassifier, ResolvedLayout, WidthThresholdClassifier,
};
use crate::transition::{
    apply_resolved, plan, SurfaceResolver, TickClock, TransitionAnimator,
};
use crate::validation::{ValidationEngine, ValidationReport};

mod sinks;

pub use sinks::{ContextSink, LayoutChange, MemoryContext, MemoryNotifications, NotificationSink};

/// Viewport width assumed until the host reports a real one.
const INITIAL_VIEWPORT_WIDTH: u32 = 1280;

/// How a switch should be performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchOptions {
    /// Apply the target immediately instead of animating.
    pub skip_animation: bool,
    /// Total transition duration, overriding settings and config.
    pub duration: Option<Duration>,
}

impl SwitchOptions {
    /// Animated switch with the configured duration.
    pub fn animated() -> Self {
        Self::default()
    }

    /// Immediate snap to the target layout.
    pub fn instant() -> Self {
        Self {
            skip_animation: true,
            duration: None,
        }
    }

    /// Builder: animate over a specific duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Aggregate counters for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutStats {
    /// Number of shipped layouts.
    pub built_in: usize,
    /// Number of user-created layouts.
    pub custom: usize,
    /// Id of the active layout, if any.
    pub current: Option<LayoutId>,
    /// How many entries the back-history holds.
    pub history_depth: usize,
    /// Whether a transition is currently playing.
    pub in_flight: bool,
}

#[derive(Debug)]
struct PendingSwitch {
    id: LayoutId,
    options: SwitchOptions,
}

/// Orchestrates layout switching, transitions, history and persistence.
///
/// Generic over the surface resolver so hosts plug in their renderer
/// adapter directly and tests use
/// [`MemorySurfaces`](crate::transition::MemorySurfaces).
pub struct LayoutController<S: SurfaceResolver> {
    registry: LayoutRegistry,
    catalog: ComponentCatalog,
    engine: ValidationEngine,
    classifier: Box<dyn BreakpointClassifier>,
    clock: Arc<dyn TickClock>,
    surfaces: S,
    store: Box<dyn PersistenceStore>,
    notifications: Vec<Box<dyn NotificationSink>>,
    context: Vec<Box<dyn ContextSink>>,
    settings: LayoutSettings,
    persistence_key: String,
    history_capacity: usize,
    default_duration: Duration,
    viewport_width: u32,
    breakpoint: Breakpoint,
    current_id: Option<LayoutId>,
    current_resolved: Option<ResolvedLayout>,
    history: VecDeque<LayoutId>,
    queue: VecDeque<PendingSwitch>,
    active: Option<TransitionAnimator>,
}

impl<S: SurfaceResolver> LayoutController<S> {
    /// Build a controller and restore the persisted session.
    ///
    /// Persisted custom layouts that fail validation with errors are
    /// skipped with a warning; an unknown persisted current id falls back
    /// to the default built-in. The starting layout is applied as an
    /// immediate snap, never animated.
    pub fn new(
        config: &EngineConfig,
        surfaces: S,
        store: Box<dyn PersistenceStore>,
        clock: Arc<dyn TickClock>,
    ) -> Self {
        let mut registry = LayoutRegistry::with_built_ins();
        let catalog = ComponentCatalog::default();
        let engine = ValidationEngine::with_default_rules();

        let classifier = Box::new(WidthThresholdClassifier::new(config.thresholds()));
        let breakpoint = classifier.classify(INITIAL_VIEWPORT_WIDTH);

        let mut settings = LayoutSettings::default();
        let mut restored_current = None;
        if let Some(state) = PersistedState::load(store.as_ref(), &config.persistence_key) {
            for layout in state.custom_layouts {
                let resolved = resolve(&layout, breakpoint);
                let report = engine.validate(&resolved.as_definition(&layout), &catalog);
                if report.has_errors {
                    tracing::warn!(
                        id = %layout.id,
                        errors = report.errors().len(),
                        "skipping persisted layout that fails validation"
                    );
                    continue;
                }
                registry.seed(layout);
            }
            settings = state.settings;
            restored_current = state.current_layout_id;
        }

        let mut controller = Self {
            registry,
            catalog,
            engine,
            classifier,
            clock,
            surfaces,
            store,
            notifications: Vec::new(),
            context: Vec::new(),
            settings,
            persistence_key: config.persistence_key.clone(),
            history_capacity: config.history_capacity,
            default_duration: config.duration(),
            viewport_width: INITIAL_VIEWPORT_WIDTH,
            breakpoint,
            current_id: None,
            current_resolved: None,
            history: VecDeque::new(),
            queue: VecDeque::new(),
            active: None,
        };

        let start = restored_current
            .filter(|id| controller.registry.contains(id))
            .unwrap_or_else(builtins::default_layout_id);
        controller.start_switch(&start, SwitchOptions::instant(), false);
        controller
    }

    /// Register a sink receiving [`LayoutChange`] events.
    pub fn add_notification_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.notifications.push(sink);
    }

    /// Register a sink receiving `("layout", id)` context updates.
    pub fn add_context_sink(&mut self, sink: Box<dyn ContextSink>) {
        self.context.push(sink);
    }

    /// Replace the breakpoint classifier.
    pub fn set_classifier(&mut self, classifier: Box<dyn BreakpointClassifier>) {
        self.classifier = classifier;
        self.set_viewport_width(self.viewport_width);
    }

    /// Switch to the layout with `id`.
    ///
    /// Returns `false` when the id is unknown or the target fails
    /// validation with errors; state and history are left unchanged. When
    /// a transition is already playing the request is queued (FIFO, no
    /// cancellation) and `true` is returned; the queued switch starts
    /// only after the in-flight transition commits. Switching to the
    /// already-active layout while idle is a no-op returning `true`.
    pub fn set_layout(&mut self, id: &LayoutId, options: SwitchOptions) -> bool {
        if !self.registry.contains(id) {
            tracing::warn!(%id, "switch rejected: unknown layout");
            return false;
        }
        if self.active.is_some() {
            tracing::debug!(%id, queued = self.queue.len() + 1, "switch queued behind transition");
            self.queue.push_back(PendingSwitch {
                id: id.clone(),
                options,
            });
            return true;
        }
        if self.current_id.as_ref() == Some(id) {
            tracing::debug!(%id, "switch to already-active layout ignored");
            return true;
        }
        self.start_switch(id, options, true)
    }

    /// Pop the back-history and switch to its most recent entry.
    ///
    /// Returns `None` (and changes nothing) when the history is empty or
    /// a transition is in flight. The popped entry is *not* pushed back
    /// on success, and the current layout is not re-recorded: this is a
    /// back navigation, not a forward switch. A stale entry whose layout
    /// no longer validates is discarded.
    ///
    /// Deliberately asymmetric with [`LayoutController::next_layout`],
    /// which cycles the registry order instead of walking history.
    pub fn previous_layout(&mut self) -> Option<LayoutId> {
        if self.active.is_some() {
            tracing::debug!("previous_layout ignored while a transition is in flight");
            return None;
        }
        let prev = self.history.pop_back()?;
        if self.start_switch(&prev, SwitchOptions::animated(), false) {
            Some(prev)
        } else {
            tracing::warn!(%prev, "discarding stale history entry");
            None
        }
    }

    /// Cycle forward to the next layout in registry order.
    ///
    /// Walks the combined built-in and custom list (templates excluded),
    /// wrapping at the end. Returns `None` when there is nothing to cycle
    /// to or the switch was rejected.
    pub fn next_layout(&mut self) -> Option<LayoutId> {
        let ids: Vec<LayoutId> = self
            .registry
            .all()
            .iter()
            .filter(|l| l.kind != LayoutKind::Template)
            .map(|l| l.id.clone())
            .collect();
        if ids.is_empty() {
            return None;
        }
        let target = match self
            .current_id
            .as_ref()
            .and_then(|c| ids.iter().position(|i| i == c))
        {
            Some(i) => ids[(i + 1) % ids.len()].clone(),
            None => ids[0].clone(),
        };
        if self.current_id.as_ref() == Some(&target) {
            return None;
        }
        if self.set_layout(&target, SwitchOptions::animated()) {
            Some(target)
        } else {
            None
        }
    }

    /// Advance the in-flight transition to the clock's current reading.
    ///
    /// Returns `true` when a transition committed during this call. On
    /// commit the next queued switch (if any) starts immediately, so its
    /// first phase begins no earlier than this tick.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let Some(mut animator) = self.active.take() else {
            return false;
        };
        if animator.advance(now, &mut self.surfaces) {
            self.current_resolved = Some(animator.into_target());
            // Drain queued switches until one goes in flight: instant (or
            // rejected) entries complete synchronously and must not
            // strand the requests behind them.
            while self.active.is_none() {
                let Some(pending) = self.queue.pop_front() else {
                    break;
                };
                if self.current_id.as_ref() == Some(&pending.id) {
                    tracing::debug!(id = %pending.id, "dropping queued switch to already-active layout");
                    continue;
                }
                self.start_switch(&pending.id, pending.options, true);
            }
            true
        } else {
            self.active = Some(animator);
            false
        }
    }

    /// Report the viewport width in pixels.
    ///
    /// Re-classifies the breakpoint; when it changes while idle, the
    /// current layout is re-resolved and snapped into place. A change
    /// arriving mid-transition only affects subsequent resolutions; the
    /// in-flight plan keeps its original target.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
        let breakpoint = self.classifier.classify(width);
        if breakpoint == self.breakpoint {
            return;
        }
        tracing::debug!(width, ?breakpoint, "viewport breakpoint changed");
        self.breakpoint = breakpoint;
        if self.active.is_some() {
            return;
        }
        let next = self
            .current_id
            .as_ref()
            .and_then(|id| self.registry.get(id))
            .map(|layout| resolve(layout, breakpoint));
        if let Some(next) = next {
            apply_resolved(&next, &mut self.surfaces);
            self.current_resolved = Some(next);
        }
    }

    /// Aggregate counters for status displays.
    pub fn get_layout_stats(&self) -> LayoutStats {
        LayoutStats {
            built_in: self
                .registry
                .all()
                .iter()
                .filter(|l| l.kind == LayoutKind::BuiltIn)
                .count(),
            custom: self.registry.custom_count(),
            current: self.current_id.clone(),
            history_depth: self.history.len(),
            in_flight: self.active.is_some(),
        }
    }

    /// Look up a layout definition by id.
    pub fn get_layout(&self, id: &LayoutId) -> Option<&LayoutDefinition> {
        self.registry.get(id)
    }

    /// Every known layout, in registration order.
    pub fn get_all_layouts(&self) -> &[LayoutDefinition] {
        self.registry.all()
    }

    /// Create a new custom layout, optionally seeded from a template.
    pub fn create_new_layout(&mut self, template: Option<&LayoutId>) -> LayoutId {
        let id = self.registry.create(template);
        self.persist();
        id
    }

    /// Duplicate any layout into a new custom copy.
    pub fn duplicate_layout(&mut self, id: &LayoutId) -> Result<LayoutId, LayoutError> {
        let copy = self.registry.duplicate(id)?;
        self.persist();
        Ok(copy)
    }

    /// Edit a layout, redirecting built-ins to an implicit duplicate.
    ///
    /// Returns the id that now carries the edit. Editing the active
    /// layout re-resolves and snaps it into place.
    pub fn update_layout<F>(&mut self, id: &LayoutId, edit: F) -> Result<LayoutId, LayoutError>
    where
        F: FnOnce(&mut LayoutDefinition),
    {
        let target = self.registry.update(id, edit)?;
        if self.active.is_none() && self.current_id.as_ref() == Some(&target) {
            let next = self
                .registry
                .get(&target)
                .map(|layout| resolve(layout, self.breakpoint));
            if let Some(next) = next {
                apply_resolved(&next, &mut self.surfaces);
                self.current_resolved = Some(next);
            }
        }
        self.persist();
        Ok(target)
    }

    /// Delete a custom layout.
    ///
    /// Deleting the active layout first falls back to the default
    /// built-in with an immediate snap, then removes the layout. The
    /// deleted id is purged from history and queue. Built-ins and
    /// templates are rejected with [`LayoutError::ImmutableLayout`].
    pub fn delete_layout(&mut self, id: &LayoutId) -> Result<(), LayoutError> {
        let kind = self
            .registry
            .get(id)
            .map(|l| l.kind)
            .ok_or_else(|| LayoutError::not_found(id))?;
        if kind == LayoutKind::Custom && self.current_id.as_ref() == Some(id) {
            self.set_layout(&builtins::default_layout_id(), SwitchOptions::instant());
        }
        self.registry.delete(id)?;
        self.history.retain(|h| h != id);
        self.queue.retain(|p| &p.id != id);
        self.persist();
        Ok(())
    }

    /// Run the validation engine against a stored layout.
    pub fn validate_layout(&self, id: &LayoutId) -> Result<ValidationReport, LayoutError> {
        let layout = self.registry.get(id).ok_or_else(|| LayoutError::not_found(id))?;
        Ok(self.engine.validate(layout, &self.catalog))
    }

    /// Package a layout for transfer.
    pub fn export_layout(&self, id: &LayoutId) -> Result<LayoutSnapshot, LayoutError> {
        self.registry.export(id)
    }

    /// Import a snapshot as a new custom layout.
    pub fn import_layout(&mut self, snapshot: &LayoutSnapshot) -> Result<LayoutId, LayoutError> {
        let id = self.registry.import(snapshot, &self.engine, &self.catalog)?;
        self.persist();
        Ok(id)
    }

    /// Current user settings.
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Enable or disable transition animations globally.
    ///
    /// With animations disabled, every switch takes the snap path.
    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.settings.animations_enabled = enabled;
        self.persist();
    }

    /// Set or clear the user's duration preference in milliseconds.
    pub fn set_default_duration_ms(&mut self, ms: Option<u64>) {
        self.settings.default_duration_ms = ms;
        self.persist();
    }

    /// Id of the active layout, if any.
    pub fn current_layout_id(&self) -> Option<&LayoutId> {
        self.current_id.as_ref()
    }

    /// The active layout resolved for the current breakpoint.
    ///
    /// During a transition this is still the *previous* layout; it moves
    /// to the target only when the transition commits.
    pub fn current_resolved(&self) -> Option<&ResolvedLayout> {
        self.current_resolved.as_ref()
    }

    /// The breakpoint the controller currently resolves for.
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Whether a transition is currently playing.
    pub fn in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// The injected surface set.
    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    /// The injected persistence store.
    pub fn store(&self) -> &dyn PersistenceStore {
        self.store.as_ref()
    }

    /// Resolve, validate and apply a switch while the controller is idle.
    ///
    /// `record_history` is false for back navigation and the startup
    /// restore. On rejection nothing is mutated.
    fn start_switch(&mut self, id: &LayoutId, options: SwitchOptions, record_history: bool) -> bool {
        let (next, name) = {
            let Some(layout) = self.registry.get(id) else {
                tracing::warn!(%id, "switch rejected: unknown layout");
                return false;
            };
            // Gate on the resolved form: a breakpoint override can break a
            // layout whose base placements pass.
            let next = resolve(layout, self.breakpoint);
            let report = self.engine.validate(&next.as_definition(layout), &self.catalog);
            if report.has_errors {
                tracing::warn!(
                    %id,
                    breakpoint = ?self.breakpoint,
                    errors = report.errors().len(),
                    "switch rejected by validation"
                );
                return false;
            }
            (next, layout.name.clone())
        };

        let previous = self.current_id.clone();
        if record_history {
            if let Some(prev) = previous.clone() {
                self.push_history(prev);
            }
        }

        let plan = plan(self.current_resolved.as_ref(), &next);
        let animate =
            !options.skip_animation && self.settings.animations_enabled && !plan.is_empty();
        if animate {
            let duration = options
                .duration
                .or(self.settings.default_duration_ms.map(Duration::from_millis))
                .unwrap_or(self.default_duration);
            tracing::debug!(%id, ops = plan.len(), ?duration, "transition started");
            self.active = Some(TransitionAnimator::new(plan, next, duration, self.clock.now()));
        } else {
            apply_resolved(&next, &mut self.surfaces);
            self.current_resolved = Some(next);
        }

        self.current_id = Some(id.clone());
        self.persist();
        self.emit_change(previous, name, id.clone());
        true
    }

    fn push_history(&mut self, id: LayoutId) {
        self.history.push_back(id);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
    }

    fn emit_change(&mut self, previous: Option<LayoutId>, name: String, id: LayoutId) {
        tracing::info!(layout = %id, from = ?previous.as_ref().map(|p| p.as_str()), "layout switch accepted");
        let change = LayoutChange {
            previous_layout: previous,
            new_layout: name,
            layout_id: id.clone(),
            timestamp: Utc::now(),
        };
        for sink in &mut self.notifications {
            sink.notify(&change);
        }
        for sink in &mut self.context {
            sink.set("layout", id.as_str());
        }
    }

    fn persist(&mut self) {
        let customs: Vec<LayoutDefinition> =
            self.registry.customs().into_iter().cloned().collect();
        let state = PersistedState::new(customs, self.settings.clone(), self.current_id.clone());
        state.save(self.store.as_mut(), &self.persistence_key);
    }
}

impl<S: SurfaceResolver + std::fmt::Debug> std::fmt::Debug for LayoutController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutController")
            .field("current", &self.current_id)
            .field("breakpoint", &self.breakpoint)
            .field("history_depth", &self.history.len())
            .field("queued", &self.queue.len())
            .field("in_flight", &self.active.is_some())
            .field("surfaces", &self.surfaces)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
