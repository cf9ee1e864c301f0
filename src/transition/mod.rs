//! Transition planning and playback.
//!
//! [`plan`] diffs two resolved layouts into a [`TransitionPlan`];
//! [`TransitionAnimator`] executes one plan against a
//! [`SurfaceResolver`] under an injectable [`TickClock`]. Only the
//! layout controller constructs animators; everything here is free of
//! shared state.

pub mod animator;
pub mod easing;
pub mod planner;
pub mod scheduler;
pub mod surface;

pub use animator::{apply_resolved, TransitionAnimator, DEFAULT_DURATION};
pub use easing::{ease_in_out_cubic, progress};
pub use planner::{plan, FadeIn, FadeOut, Move, TransitionPlan};
pub use scheduler::{ManualClock, SystemClock, TickClock};
pub use surface::{MemorySurfaces, Surface, SurfaceResolver, SurfaceState};
