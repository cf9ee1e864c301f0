//! Injectable tick source for animation playback.
//!
//! The animator never talks to a frame clock directly: it is advanced by
//! whoever pumps [`LayoutController::tick`](crate::controller::LayoutController::tick),
//! and it reads time from a [`TickClock`]. Production wires a
//! [`SystemClock`]; tests drive a [`ManualClock`] deterministically
//! without any rendering surface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source for animation progress.
pub trait TickClock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

impl<T: TickClock + ?Sized> TickClock for Arc<T> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Real clock backed by [`Instant`].
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock with its origin at construction time.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock advanced explicitly by tests.
///
/// Stores microseconds in an atomic so a test can hold an `Arc` clone and
/// advance time while the controller owns the other handle.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    /// A clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.micros
            .fetch_add(duration_to_micros(delta), Ordering::SeqCst);
    }

    /// Jump time to an absolute value.
    pub fn set(&self, now: Duration) {
        self.micros.store(duration_to_micros(now), Ordering::SeqCst);
    }
}

impl TickClock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

fn duration_to_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
