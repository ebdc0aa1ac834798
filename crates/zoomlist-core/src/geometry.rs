#![forbid(unsafe_code)]

//! Geometric primitives and the pan/zoom clamp math.
//!
//! Content is drawn as `translate(t) ∘ scale(s)`, so a content point `p`
//! lands on screen at `t + s * p`. With the content as large as the view,
//! the right/bottom edge sits at `t + s * size`; keeping it at or beyond the
//! view edge gives the lower translate bound `size - s * size`.
//!
//! # Invariants
//!
//! 1. [`clamp_translate`] is the identity whenever `scale <= 1`.
//! 2. For `scale > 1`, the clamp output lies in `[max.x, 0] × [max.y, 0]`.
//! 3. [`clamp_translate`] is idempotent.
//! 4. [`pivot_from_translate`] never returns NaN or infinity.

use serde::{Deserialize, Serialize};

/// A point (or offset) in view pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Vector from `other` to `self`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, other: Point) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }

    /// Squared euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Point) -> f32 {
        let (dx, dy) = self.delta_from(other);
        dx * dx + dy * dy
    }

    /// Whether both components are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Size of the view in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// An empty (unmeasured) size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the size has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Most negative translate allowed at `scale` for a view of `view` size.
///
/// Both components are `<= 0` for `scale > 1`. Below `scale == 1` they turn
/// positive, but [`clamp_translate`] does not consult them in that range.
#[inline]
#[must_use]
pub fn max_offsets(view: Size, scale: f32) -> Point {
    Point::new(
        view.width - view.width * scale,
        view.height - view.height * scale,
    )
}

/// Clamp a candidate translate into the valid range for `scale`.
///
/// At or below unit scale the content cannot be panned, so the translate is
/// returned unchanged. Above it, each axis is clamped to `[max, 0]`: positive
/// values snap to 0 and values below the max offset snap to it.
#[must_use]
pub fn clamp_translate(translate: Point, scale: f32, max: Point) -> Point {
    if scale <= 1.0 {
        return translate;
    }
    Point::new(clamp_axis(translate.x, max.x), clamp_axis(translate.y, max.y))
}

#[inline]
fn clamp_axis(value: f32, max: f32) -> f32 {
    if value > 0.0 {
        0.0
    } else if value < max {
        max
    } else {
        value
    }
}

/// Fixed point of the current transform: the screen point `p` with
/// `t + s * p == p`.
///
/// Zooming about this point back to unit scale removes the translate. At
/// `scale == 1` the division is degenerate; any non-finite component is
/// replaced with 0.
#[must_use]
pub fn pivot_from_translate(translate: Point, scale: f32) -> Point {
    let denom = scale - 1.0;
    Point::new(
        finite_or_zero(-translate.x / denom),
        finite_or_zero(-translate.y / denom),
    )
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
