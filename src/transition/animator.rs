//! Transition playback: a three-phase state machine over a plan.
//!
//! Phases are strict synchronization barriers; ordering *within* a phase
//! is unspecified:
//!
//! 1. **Fade out**: every fade-out entry goes to opacity 0 over half the
//!    total duration. Nothing else starts until the whole batch settles.
//! 2. **Active**: moves interpolate their rectangles over the full
//!    duration while fade-ins are placed at their target rectangle at
//!    opacity 0 and fade to full over half the duration. Both sub-batches
//!    start together.
//! 3. **Snap**: once every phase-2 operation settles, the exact target
//!    layout is force-applied to every surface, eliminating residual
//!    interpolation error, and the animator reports done.
//!
//! The animator is advanced by explicit [`TransitionAnimator::advance`]
//! calls carrying a [`TickClock`](crate::transition::TickClock) reading;
//! it owns no timer and spawns nothing. A key with no surface is silently
//! skipped for that phase.

use std::time::Duration;

use crate::model::{channel_lerp, Rect};
use crate::responsive::ResolvedLayout;
use crate::transition::easing::{ease_in_out_cubic, progress};
use crate::transition::planner::TransitionPlan;
use crate::transition::surface::SurfaceResolver;

/// Default total transition duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FadeOut,
    Active { placed: bool },
    Done,
}

/// Executes one [`TransitionPlan`] against a surface set.
#[derive(Debug)]
pub struct TransitionAnimator {
    plan: TransitionPlan,
    target: ResolvedLayout,
    duration: Duration,
    phase: Phase,
    phase_started: Duration,
}

impl TransitionAnimator {
    /// Start playback of `plan` toward `target` at clock reading `now`.
    pub fn new(
        plan: TransitionPlan,
        target: ResolvedLayout,
        duration: Duration,
        now: Duration,
    ) -> Self {
        Self {
            plan,
            target,
            duration,
            phase: Phase::FadeOut,
            phase_started: now,
        }
    }

    /// The resolved layout this transition lands on.
    pub fn target(&self) -> &ResolvedLayout {
        &self.target
    }

    /// Consume the animator, yielding its target layout.
    pub fn into_target(self) -> ResolvedLayout {
        self.target
    }

    /// The plan being executed.
    pub fn plan(&self) -> &TransitionPlan {
        &self.plan
    }

    /// Whether phase 3 has committed.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advance playback to clock reading `now`.
    ///
    /// Returns `true` once the snap has been applied. Multiple phase
    /// boundaries may be crossed in one call when `now` jumps far ahead.
    pub fn advance(&mut self, now: Duration, surfaces: &mut dyn SurfaceResolver) -> bool {
        loop {
            let elapsed = now.saturating_sub(self.phase_started);
            match self.phase {
                Phase::FadeOut => {
                    let dur = batch_duration(!self.plan.fade_out.is_empty(), self.duration / 2);
                    let t = ease_in_out_cubic(progress(elapsed, dur));
                    for op in &self.plan.fade_out {
                        if let Some(surface) = surfaces.surface(&op.key) {
                            surface.set_opacity(channel_lerp(1.0, 0.0, t));
                        }
                    }
                    if progress(elapsed, dur) < 1.0 {
                        return false;
                    }
                    // Barrier crossed: phase 2 starts at the instant the
                    // fade-out batch settled, not at this tick.
                    self.phase = Phase::Active { placed: false };
                    self.phase_started += dur;
                }
                Phase::Active { placed } => {
                    if !placed {
                        // Fade-ins appear at their target rectangle,
                        // fully transparent, before fading up.
                        for op in &self.plan.fade_in {
                            if let Some(surface) = surfaces.surface(&op.key) {
                                surface.set_rect(op.to);
                                surface.set_opacity(0.0);
                            }
                        }
                        self.phase = Phase::Active { placed: true };
                    }

                    let move_dur = batch_duration(!self.plan.moves.is_empty(), self.duration);
                    let fade_dur =
                        batch_duration(!self.plan.fade_in.is_empty(), self.duration / 2);
                    let move_t = progress(elapsed, move_dur);
                    let fade_t = progress(elapsed, fade_dur);

                    for op in &self.plan.moves {
                        if let Some(surface) = surfaces.surface(&op.key) {
                            surface.set_rect(Rect::lerp(
                                &op.from,
                                &op.to,
                                ease_in_out_cubic(move_t),
                            ));
                        }
                    }
                    for op in &self.plan.fade_in {
                        if let Some(surface) = surfaces.surface(&op.key) {
                            surface.set_opacity(channel_lerp(
                                0.0,
                                1.0,
                                ease_in_out_cubic(fade_t),
                            ));
                        }
                    }

                    if move_t < 1.0 || fade_t < 1.0 {
                        return false;
                    }
                    // All phase-2 work settled: snap and commit.
                    apply_resolved(&self.target, surfaces);
                    self.phase = Phase::Done;
                    tracing::debug!(
                        layout = %self.target.layout_id,
                        ops = self.plan.len(),
                        "transition settled"
                    );
                }
                Phase::Done => return true,
            }
        }
    }
}

/// Force-apply a resolved layout to every available surface.
///
/// Used for the phase-3 snap and for animation-skipping switches: every
/// pane gets its exact target rectangle, visible panes get full opacity,
/// hidden panes get zero.
pub fn apply_resolved(layout: &ResolvedLayout, surfaces: &mut dyn SurfaceResolver) {
    for (key, placement) in &layout.components {
        if let Some(surface) = surfaces.surface(key) {
            surface.set_rect(placement.rect);
            surface.set_opacity(if placement.visible { 1.0 } else { 0.0 });
        }
    }
}

fn batch_duration(non_empty: bool, duration: Duration) -> Duration {
    if non_empty {
        duration
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
#[path = "animator_tests.rs"]
mod animator_tests;
