#![forbid(unsafe_code)]

//! The single mutable owner of scale, translate and pointer tracking.
//!
//! Every mutation goes through a method here so the bounds below can be
//! checked locally.
//!
//! # Invariants
//!
//! 1. Outside an animation, `min_scale <= scale <= max_scale`.
//! 2. Outside an animation, `max_offset == max_offsets(view_size, scale)`.
//!    While animating it holds the target scale's bounds.
//! 3. A pan never leaves `translate` outside `[max_offset, 0]` when
//!    `scale > 1`.
//! 4. Pan is suppressed while scaling or animating.
//! 5. Only the owning view sets the animating flag or writes animation
//!    frames.

use zoomlist_core::animation::ZoomValues;
use zoomlist_core::geometry::{Point, Size, clamp_translate, max_offsets, pivot_from_translate};

/// Pan/zoom transform plus single-finger pointer tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    scale: f32,
    translate: Point,
    scale_center: Point,
    active_pointer: Option<u32>,
    last_touch: Option<Point>,
    is_scaling: bool,
    is_animating: bool,
    zoom_enabled: bool,
    view_size: Size,
    max_offset: Point,
}

impl TransformState {
    /// Unmeasured state at `scale` with no translate.
    #[must_use]
    pub fn new(scale: f32, zoom_enabled: bool) -> Self {
        Self {
            scale,
            translate: Point::ZERO,
            scale_center: Point::ZERO,
            active_pointer: None,
            last_touch: None,
            is_scaling: false,
            is_animating: false,
            zoom_enabled,
            view_size: Size::ZERO,
            max_offset: Point::ZERO,
        }
    }

    // --- Accessors ------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    #[must_use]
    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Pivot for the next programmatic zoom.
    #[inline]
    #[must_use]
    pub fn scale_center(&self) -> Point {
        self.scale_center
    }

    #[inline]
    #[must_use]
    pub fn active_pointer(&self) -> Option<u32> {
        self.active_pointer
    }

    /// Last position of the active pointer, `None` when unknown.
    #[inline]
    #[must_use]
    pub fn last_touch(&self) -> Option<Point> {
        self.last_touch
    }

    #[inline]
    #[must_use]
    pub fn is_scaling(&self) -> bool {
        self.is_scaling
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    #[inline]
    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    #[inline]
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> Point {
        self.max_offset
    }

    /// Current scale and translate as an animatable triple.
    #[inline]
    #[must_use]
    pub fn values(&self) -> ZoomValues {
        ZoomValues::new(self.scale, self.translate)
    }

    /// Whether single-finger pan is currently allowed to move content.
    #[inline]
    #[must_use]
    pub fn can_pan(&self) -> bool {
        !self.is_scaling && !self.is_animating && self.scale > 1.0
    }

    // --- Flags ----------------------------------------------------------

    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        self.zoom_enabled = enabled;
    }

    pub fn set_scaling(&mut self, scaling: bool) {
        self.is_scaling = scaling;
    }

    pub(crate) fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }

    /// Leave the animating state, finished or cancelled, and resync the pan
    /// bounds to the scale the transform actually stopped at.
    pub(crate) fn finish_animation(&mut self) {
        self.is_animating = false;
        self.max_offset = max_offsets(self.view_size, self.scale);
    }

    pub fn set_scale_center(&mut self, center: Point) {
        self.scale_center = center;
    }

    /// Forget the active pointer and any in-flight pinch.
    pub fn reset_tracking(&mut self) {
        self.active_pointer = None;
        self.last_touch = None;
        self.is_scaling = false;
    }

    // --- Bounds ---------------------------------------------------------

    /// Store a new view size and recompute max offsets at the current scale.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
        self.max_offset = max_offsets(size, self.scale);
    }

    // --- Pointer tracking -----------------------------------------------

    /// Start tracking `id` at `pos` (first pointer down).
    pub fn begin_pointer(&mut self, id: u32, pos: Point) {
        self.active_pointer = Some(id);
        self.last_touch = Some(pos);
    }

    /// Hand pan tracking to another pointer without a jump.
    pub fn reassign_pointer(&mut self, id: u32, pos: Point) {
        self.active_pointer = Some(id);
        self.last_touch = Some(pos);
    }

    /// Follow the active pointer to `pos`, panning if allowed.
    ///
    /// The pan delta is measured from the last known touch and the result is
    /// clamped. `last_touch` is updated whether or not a pan happened.
    /// Returns `true` if the translate moved.
    pub fn track_move(&mut self, pos: Point) -> bool {
        let mut panned = false;
        if self.can_pan()
            && let Some(last) = self.last_touch
        {
            let (dx, dy) = pos.delta_from(last);
            let before = self.translate;
            self.translate = clamp_translate(
                self.translate.offset(dx, dy),
                self.scale,
                self.max_offset,
            );
            panned = self.translate != before;
        }
        self.last_touch = Some(pos);
        panned
    }

    // --- Zoom -----------------------------------------------------------

    /// Apply one pinch step.
    ///
    /// The new scale is clamped to `[min_scale, max_scale]` and max offsets
    /// are recomputed at it. The translate shifts by `focus * (old - new)` so
    /// the focus stays put on screen; it is not clamped mid-pinch.
    pub fn apply_pinch(&mut self, factor: f32, focus: Point, min_scale: f32, max_scale: f32) {
        let old = self.scale;
        let new = (old * factor).clamp(min_scale, max_scale);
        self.max_offset = max_offsets(self.view_size, new);
        let delta = old - new;
        self.translate = self.translate.offset(focus.x * delta, focus.y * delta);
        self.scale_center = focus;
        self.scale = new;
    }

    /// Screen point currently fixed under the transform.
    #[inline]
    #[must_use]
    pub fn pivot(&self) -> Point {
        pivot_from_translate(self.translate, self.scale)
    }

    /// Compute the endpoints of an animated zoom from `start` to `end`
    /// about the current scale center.
    ///
    /// Max offsets are recomputed at `end`. The end translate is clamped
    /// against them, but the unit-scale gate of the clamp is evaluated at the
    /// current scale, not at `end`.
    pub fn plan_zoom(&mut self, start: f32, end: f32) -> (ZoomValues, ZoomValues) {
        self.max_offset = max_offsets(self.view_size, end);
        let shift = end - start;
        let raw = Point::new(
            self.translate.x - shift * self.scale_center.x,
            self.translate.y - shift * self.scale_center.y,
        );
        let end_translate = clamp_translate(raw, self.scale, self.max_offset);
        (
            ZoomValues::new(start, self.translate),
            ZoomValues::new(end, end_translate),
        )
    }

    /// Write an animation frame into the transform.
    pub(crate) fn apply_values(&mut self, values: ZoomValues) {
        self.scale = values.scale;
        self.translate = values.translate;
    }

    /// Reset the translate if the state is at rest, then return the
    /// transform to draw with.
    ///
    /// A positive translate component or a scale sitting at `min_scale`
    /// forces the translate back to the origin.
    pub fn normalize_for_draw(&mut self, min_scale: f32) -> (Point, f32) {
        if self.translate.x > 0.0 || self.translate.y > 0.0 || self.scale == min_scale {
            self.translate = Point::ZERO;
        }
        (self.translate, self.scale)
    }

    /// Serializable view of the transform.
    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            scale: self.scale,
            translate_x: self.translate.x,
            translate_y: self.translate.y,
            is_scaling: self.is_scaling,
            is_animating: self.is_animating,
            zoom_enabled: self.zoom_enabled,
        }
    }
}

/// Point-in-time copy of the transform for logging and trace output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformSnapshot {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub is_scaling: bool,
    pub is_animating: bool,
    pub zoom_enabled: bool,
}
