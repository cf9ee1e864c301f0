//! Normalized rectangle geometry.
//!
//! All placement math works in percent-of-viewport units: the viewport is
//! the square `[0, 100] x [0, 100]` regardless of the real surface behind
//! it. Rectangles are *expected* to stay inside the viewport but are never
//! force-clamped; out-of-bounds placements are reported by the validation
//! engine instead of being silently corrected.

use serde::{Deserialize, Serialize};

/// Extent of the normalized viewport along each axis, in percent.
pub const VIEWPORT_EXTENT: f64 = 100.0;

/// Comparison tolerance for percent-unit rectangles.
///
/// Interpolation snaps can leave sub-epsilon float noise behind; two rects
/// within this tolerance are treated as the same placement so a re-plan
/// never emits a spurious move.
pub const RECT_EPSILON: f64 = 1e-6;

/// A rectangle in percent-of-viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge, percent of viewport width.
    pub x: f64,
    /// Top edge, percent of viewport height.
    pub y: f64,
    /// Width, percent of viewport width.
    pub w: f64,
    /// Height, percent of viewport height.
    pub h: f64,
}

impl Rect {
    /// Build a rectangle, sanitizing each channel.
    ///
    /// Non-finite channels (NaN, infinities from a bad property bag)
    /// default to 0 rather than poisoning later interpolation.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: sanitize(x),
            y: sanitize(y),
            w: sanitize(w),
            h: sanitize(h),
        }
    }

    /// Area in (percent)^2 units. Degenerate rects report 0.
    pub fn area(&self) -> f64 {
        if self.w <= 0.0 || self.h <= 0.0 {
            0.0
        } else {
            self.w * self.h
        }
    }

    /// Area of the intersection with `other`, 0 when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.w).min(other.x + other.w);
        let bottom = (self.y + self.h).min(other.y + other.h);
        if right <= left || bottom <= top {
            0.0
        } else {
            (right - left) * (bottom - top)
        }
    }

    /// Overlap ratio against `other`: intersection area divided by the
    /// smaller of the two areas.
    ///
    /// The result is in `[0, 1]` and symmetric in argument order. Pairs
    /// where either rect is degenerate report 0.
    pub fn overlap_ratio(&self, other: &Rect) -> f64 {
        let min_area = self.area().min(other.area());
        if min_area <= 0.0 {
            return 0.0;
        }
        (self.intersection_area(other) / min_area).clamp(0.0, 1.0)
    }

    /// Whether the rectangle lies fully inside the normalized viewport.
    pub fn within_viewport(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.w <= VIEWPORT_EXTENT + RECT_EPSILON
            && self.y + self.h <= VIEWPORT_EXTENT + RECT_EPSILON
    }

    /// Channel-wise equality within [`RECT_EPSILON`].
    pub fn approx_eq(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() <= RECT_EPSILON
            && (self.y - other.y).abs() <= RECT_EPSILON
            && (self.w - other.w).abs() <= RECT_EPSILON
            && (self.h - other.h).abs() <= RECT_EPSILON
    }

    /// Channel-wise linear interpolation at eased progress `t`.
    ///
    /// `t` is expected to already be eased and clamped; both endpoints
    /// share percent units so no conversion is involved.
    pub fn lerp(from: &Rect, to: &Rect, t: f64) -> Rect {
        Rect {
            x: channel_lerp(from.x, to.x, t),
            y: channel_lerp(from.y, to.y, t),
            w: channel_lerp(from.w, to.w, t),
            h: channel_lerp(from.h, to.h, t),
        }
    }
}

/// Interpolate one numeric channel as `start + (end - start) * t`.
///
/// Non-finite endpoints default to 0 and never abort the batch.
pub fn channel_lerp(start: f64, end: f64, t: f64) -> f64 {
    let start = sanitize(start);
    let end = sanitize(end);
    start + (end - start) * t
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_rects_have_zero_overlap() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(50.0, 50.0, 50.0, 50.0);
        assert_eq!(a.overlap_ratio(&b), 0.0);
    }

    #[test]
    fn contained_rect_has_full_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(25.0, 25.0, 10.0, 10.0);
        assert!((outer.overlap_ratio(&inner) - 1.0).abs() < 1e-12);
        assert!((inner.overlap_ratio(&outer) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn partial_overlap_ratio_uses_smaller_area() {
        // 10x10 rect, half covered by a much larger one.
        let small = Rect::new(0.0, 0.0, 10.0, 10.0);
        let large = Rect::new(5.0, 0.0, 80.0, 80.0);
        assert!((small.overlap_ratio(&large) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_rect_reports_zero_overlap() {
        let flat = Rect::new(0.0, 0.0, 0.0, 40.0);
        let full = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(flat.overlap_ratio(&full), 0.0);
    }

    #[test]
    fn out_of_bounds_rect_is_reported_not_clamped() {
        let rect = Rect::new(80.0, 0.0, 30.0, 50.0);
        assert!(!rect.within_viewport());
        // The rect keeps its raw values.
        assert_eq!(rect.x + rect.w, 110.0);
    }

    #[test]
    fn non_finite_channels_default_to_zero() {
        let rect = Rect::new(f64::NAN, f64::INFINITY, 50.0, f64::NEG_INFINITY);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.w, 50.0);
        assert_eq!(rect.h, 0.0);
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let from = Rect::new(0.0, 0.0, 50.0, 50.0);
        let to = Rect::new(25.0, 10.0, 75.0, 90.0);
        assert!(Rect::lerp(&from, &to, 0.0).approx_eq(&from));
        assert!(Rect::lerp(&from, &to, 1.0).approx_eq(&to));
    }

    #[test]
    fn lerp_midpoint_is_halfway() {
        let from = Rect::new(0.0, 0.0, 40.0, 20.0);
        let to = Rect::new(10.0, 30.0, 60.0, 40.0);
        let mid = Rect::lerp(&from, &to, 0.5);
        assert!(mid.approx_eq(&Rect::new(5.0, 15.0, 50.0, 30.0)));
    }

    #[test]
    fn channel_lerp_sanitizes_non_finite_endpoints() {
        assert_eq!(channel_lerp(f64::NAN, 50.0, 0.0), 0.0);
        assert_eq!(channel_lerp(0.0, f64::INFINITY, 1.0), 0.0);
    }
}
