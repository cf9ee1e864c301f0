//! Progress and easing curves for transition playback.

use std::time::Duration;

/// Linear progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// A zero-length duration is complete immediately.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Cubic ease-in-out: `4t^3` below the midpoint, `1 - ((-2t+2)^3)/2` above.
///
/// Input is expected in `[0, 1]`; the output stays in `[0, 1]` with
/// `e(0) = 0`, `e(0.5) = 0.5`, `e(1) = 1`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(3)) / 2.0
    }
}
