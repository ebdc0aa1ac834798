#![forbid(unsafe_code)]

//! Gesture strategies: what a pinch or a double tap does to the transform.
//!
//! The raw detectors in `zoomlist-core` decide *that* a gesture happened.
//! A [`ScaleGestureListener`] and a [`DoubleTapListener`] decide what it
//! means. [`PinchZoom`] and [`DoubleTapZoom`] are the stock behaviors; both
//! can be swapped through [`ZoomListView::with_listeners`].
//!
//! Listeners only reach the transform through a [`ZoomContext`], which also
//! owns the rule that a zoom request made while another zoom animates is
//! dropped.
//!
//! [`ZoomListView::with_listeners`]: crate::ZoomListView::with_listeners

use tracing::{debug, trace};
use web_time::Instant;
use zoomlist_core::animation::ZoomAnimator;
use zoomlist_core::config::ZoomConfig;
use zoomlist_core::geometry::Point;

use crate::transform::TransformState;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Mutable view of the widget handed to gesture listeners.
pub struct ZoomContext<'a> {
    state: &'a mut TransformState,
    animator: &'a mut ZoomAnimator,
    config: &'a ZoomConfig,
    now: Instant,
    redraw: &'a mut bool,
}

impl<'a> ZoomContext<'a> {
    pub(crate) fn new(
        state: &'a mut TransformState,
        animator: &'a mut ZoomAnimator,
        config: &'a ZoomConfig,
        now: Instant,
        redraw: &'a mut bool,
    ) -> Self {
        Self {
            state,
            animator,
            config,
            now,
            redraw,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &TransformState {
        self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut TransformState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        self.config
    }

    /// Time of the event being handled.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Ask for a redraw once the current event is done.
    #[inline]
    pub fn request_redraw(&mut self) {
        *self.redraw = true;
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Animate from `start` to `end` scale about the current scale center.
    ///
    /// Dropped (returns `false`, nothing changes) if a zoom is already
    /// animating.
    pub fn start_zoom(&mut self, start: f32, end: f32) -> bool {
        if self.animator.is_running() {
            debug!(
                target: "zoomlist::zoom",
                start,
                end,
                "zoom request dropped, animation in flight"
            );
            return false;
        }
        let (from, to) = self.state.plan_zoom(start, end);
        let started = self.animator.start(
            from,
            to,
            self.config.animation_duration_value(),
            self.config.easing,
            self.now,
        );
        if started {
            self.state.set_animating(true);
            self.request_redraw();
            let center = self.state.scale_center();
            debug!(
                target: "zoomlist::zoom",
                start,
                end,
                center_x = center.x,
                center_y = center.y,
                end_tx = to.translate.x,
                end_ty = to.translate.y,
                "zoom animation started"
            );
        }
        started
    }

    /// Stop a running zoom where it is. Pan bounds follow the scale it
    /// stopped at.
    pub fn cancel_zoom(&mut self) -> bool {
        let cancelled = self.animator.cancel();
        if cancelled {
            self.state.finish_animation();
            debug!(target: "zoomlist::zoom", scale = self.state.scale(), "zoom animation cancelled");
        }
        cancelled
    }
}

// ---------------------------------------------------------------------------
// Strategy traits
// ---------------------------------------------------------------------------

/// Reaction to pinch gestures.
pub trait ScaleGestureListener {
    /// A pinch started. Return `true` to accept it.
    fn on_scale_begin(&mut self, ctx: &mut ZoomContext<'_>, focus: Point, span: f32) -> bool;

    /// The span changed by `factor` around `focus`. Return `true` if consumed.
    fn on_scale(&mut self, ctx: &mut ZoomContext<'_>, factor: f32, focus: Point) -> bool;

    /// The pinch ended.
    fn on_scale_end(&mut self, ctx: &mut ZoomContext<'_>, focus: Point);
}

/// Reaction to taps.
pub trait DoubleTapListener {
    /// A double tap landed at `pos`. Return `true` if consumed.
    fn on_double_tap(&mut self, ctx: &mut ZoomContext<'_>, pos: Point) -> bool;

    /// A single tap was confirmed at `pos`. Return `true` if consumed.
    fn on_single_tap_confirmed(&mut self, _ctx: &mut ZoomContext<'_>, _pos: Point) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Stock behaviors
// ---------------------------------------------------------------------------

/// Pinch to scale about the fingers, snapping back if released at or below
/// the default scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinchZoom;

impl ScaleGestureListener for PinchZoom {
    fn on_scale_begin(&mut self, ctx: &mut ZoomContext<'_>, _focus: Point, _span: f32) -> bool {
        ctx.state_mut().set_scaling(true);
        true
    }

    fn on_scale(&mut self, ctx: &mut ZoomContext<'_>, factor: f32, focus: Point) -> bool {
        let (min, max) = (ctx.config().min_scale, ctx.config().max_scale);
        ctx.state_mut().apply_pinch(factor, focus, min, max);
        ctx.request_redraw();
        trace!(
            target: "zoomlist::pinch",
            factor,
            scale = ctx.state().scale(),
            focus_x = focus.x,
            focus_y = focus.y,
            "pinch step"
        );
        true
    }

    fn on_scale_end(&mut self, ctx: &mut ZoomContext<'_>, _focus: Point) {
        let scale = ctx.state().scale();
        let default = ctx.config().default_scale;
        if scale <= default {
            let pivot = ctx.state().pivot();
            ctx.state_mut().set_scale_center(pivot);
            ctx.start_zoom(scale, default);
        }
        ctx.state_mut().set_scaling(false);
    }
}

/// Double tap toggles between the default scale and the max scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleTapZoom;

impl DoubleTapListener for DoubleTapZoom {
    fn on_double_tap(&mut self, ctx: &mut ZoomContext<'_>, pos: Point) -> bool {
        let scale = ctx.state().scale();
        let default = ctx.config().default_scale;
        if scale == default {
            ctx.state_mut().set_scale_center(pos);
            let max = ctx.config().max_scale;
            return ctx.start_zoom(scale, max);
        }
        let center = if scale == 1.0 { pos } else { ctx.state().pivot() };
        ctx.state_mut().set_scale_center(center);
        ctx.start_zoom(scale, default)
    }
}
