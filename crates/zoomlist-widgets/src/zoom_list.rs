#![forbid(unsafe_code)]

//! Zoomable list view: touch dispatch, animation ticks and the draw-time
//! transform.
//!
//! [`ZoomListView`] wraps a [`ScrollHost`] and sits in front of its touch
//! handling and its content draw.
//!
//! # Event flow
//!
//! ```text
//! on_touch_event ─► ScaleDetector ─► ScaleGestureListener ─┐
//!                ─► DoubleTapDetector ─► DoubleTapListener ─┤─► TransformState
//!                ─► pointer tracking / pan ─────────────────┘
//!                ─► host.on_touch_event
//! tick           ─► ZoomAnimator ─► TransformState
//! draw           ─► save, translate, scale, host.dispatch_draw, restore
//! ```
//!
//! Recognizer callbacks run before pan logic within one event. Redraw
//! requests raised while handling one event or tick are flushed as a single
//! [`ScrollHost::invalidate`].
//!
//! # Failure Modes
//!
//! - A move whose tracked pointer id is missing falls back to the primary
//!   pointer; if no previous touch is known the pan is skipped.
//! - Events with no pointers only reach the detectors and the host.

use tracing::debug;
use web_time::Instant;
use zoomlist_core::animation::ZoomAnimator;
use zoomlist_core::config::{ConfigError, ZoomConfig};
use zoomlist_core::event::{TouchEvent, TouchPhase};
use zoomlist_core::geometry::Size;
use zoomlist_core::gesture::{DoubleTapDetector, ScaleDetector, ScaleGesture, TapGesture};

use crate::host::{Canvas, ScrollHost};
use crate::listeners::{
    DoubleTapListener, DoubleTapZoom, PinchZoom, ScaleGestureListener, ZoomContext,
};
use crate::transform::TransformState;

/// Pinch-zoom and pan controller wrapping a scrollable list.
pub struct ZoomListView<H, S = PinchZoom, T = DoubleTapZoom> {
    host: H,
    config: ZoomConfig,
    state: TransformState,
    animator: ZoomAnimator,
    scale_detector: ScaleDetector,
    tap_detector: DoubleTapDetector,
    scale_listener: S,
    tap_listener: T,
}

impl<H: ScrollHost> ZoomListView<H> {
    /// Wrap `host` with the stock pinch and double-tap behaviors.
    pub fn new(host: H, config: ZoomConfig) -> Result<Self, ConfigError> {
        Self::with_listeners(host, config, PinchZoom, DoubleTapZoom)
    }
}

impl<H, S, T> ZoomListView<H, S, T>
where
    H: ScrollHost,
    S: ScaleGestureListener,
    T: DoubleTapListener,
{
    /// Wrap `host` with custom gesture strategies.
    pub fn with_listeners(
        host: H,
        config: ZoomConfig,
        scale_listener: S,
        tap_listener: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            host,
            state: TransformState::new(config.default_scale, config.zoom_enabled),
            animator: ZoomAnimator::new(),
            scale_detector: ScaleDetector::new(&config.gesture),
            tap_detector: DoubleTapDetector::new(&config.gesture),
            config,
            scale_listener,
            tap_listener,
        })
    }

    // --- Accessors ------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn animator(&self) -> &ZoomAnimator {
        &self.animator
    }

    #[inline]
    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.state.is_zoom_enabled()
    }

    /// Consume the view, returning the wrapped host.
    pub fn into_host(self) -> H {
        self.host
    }

    // --- Host notifications ---------------------------------------------

    /// Turn gesture interception on or off.
    ///
    /// No-op if unchanged. Disabling while `scale != 1` animates back to
    /// unit scale about the point currently fixed under the transform. A zoom
    /// already in flight is cancelled first, so the snap back always runs.
    pub fn set_zoom_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled == self.state.is_zoom_enabled() {
            return;
        }
        self.state.set_zoom_enabled(enabled);
        self.state.reset_tracking();
        self.scale_detector.reset();
        self.tap_detector.reset();
        debug!(target: "zoomlist::view", enabled, scale = self.state.scale(), "zoom toggled");

        if !enabled && (self.state.scale() != 1.0 || self.animator.is_running()) {
            let mut redraw = false;
            {
                let mut ctx = ZoomContext::new(
                    &mut self.state,
                    &mut self.animator,
                    &self.config,
                    now,
                    &mut redraw,
                );
                ctx.cancel_zoom();
                let scale = ctx.state().scale();
                if scale != 1.0 {
                    let pivot = ctx.state().pivot();
                    ctx.state_mut().set_scale_center(pivot);
                    ctx.start_zoom(scale, 1.0);
                }
            }
            if redraw {
                self.host.invalidate();
            }
        }
    }

    /// The view was resized.
    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        self.state.set_view_size(Size::new(width, height));
        debug!(target: "zoomlist::view", width, height, "view resized");
    }

    /// The view was detached; stop ticking.
    pub fn on_detached(&mut self) {
        if self.animator.cancel() {
            self.state.finish_animation();
            debug!(target: "zoomlist::view", "zoom animation cancelled on detach");
        }
    }

    // --- Input ----------------------------------------------------------

    /// Handle one touch event.
    ///
    /// Returns `true` if the host or any gesture listener consumed it.
    pub fn on_touch_event(&mut self, event: &TouchEvent, now: Instant) -> bool {
        if !self.state.is_zoom_enabled() {
            return self.host.on_touch_event(event);
        }

        let scale_gestures = self.scale_detector.process(event);
        let tap_gestures = self.tap_detector.process(event, now);

        let mut redraw = false;
        let mut consumed = false;
        {
            let mut ctx = ZoomContext::new(
                &mut self.state,
                &mut self.animator,
                &self.config,
                now,
                &mut redraw,
            );
            for gesture in scale_gestures {
                consumed |= match gesture {
                    ScaleGesture::Begin { focus, span } => {
                        self.scale_listener.on_scale_begin(&mut ctx, focus, span)
                    }
                    // The animator owns the transform until it finishes.
                    ScaleGesture::Scale { .. } if ctx.is_animating() => false,
                    ScaleGesture::Scale { factor, focus } => {
                        self.scale_listener.on_scale(&mut ctx, factor, focus)
                    }
                    ScaleGesture::End { focus } => {
                        self.scale_listener.on_scale_end(&mut ctx, focus);
                        true
                    }
                };
            }
            for gesture in tap_gestures {
                consumed |= dispatch_tap(&mut self.tap_listener, &mut ctx, gesture);
            }
        }

        redraw |= self.track_pointers(event);

        let handled = self.host.on_touch_event(event);
        if redraw {
            self.host.invalidate();
        }
        handled || consumed
    }

    /// Single-finger pan and pointer-id bookkeeping. Returns whether a
    /// redraw is needed.
    fn track_pointers(&mut self, event: &TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Down => {
                if let Some(p) = event.primary() {
                    self.state.begin_pointer(p.id, p.position());
                }
                false
            }
            TouchPhase::Move => {
                let tracked = self
                    .state
                    .active_pointer()
                    .and_then(|id| event.find_pointer_index(id))
                    .and_then(|index| event.pointer(index));
                let Some(pointer) = tracked.or_else(|| event.primary()) else {
                    return false;
                };
                self.state.track_move(pointer.position());
                true
            }
            TouchPhase::PointerUp => {
                let Some(lifted) = event.action_pointer() else {
                    return false;
                };
                if self.state.active_pointer() == Some(lifted.id) {
                    let next = if event.action_index == 0 { 1 } else { 0 };
                    if let Some(p) = event.pointer(next) {
                        self.state.reassign_pointer(p.id, p.position());
                        debug!(
                            target: "zoomlist::view",
                            from = lifted.id,
                            to = p.id,
                            "active pointer reassigned"
                        );
                    }
                }
                false
            }
            TouchPhase::PointerDown | TouchPhase::Up | TouchPhase::Cancel => false,
        }
    }

    // --- Frame ----------------------------------------------------------

    /// Advance animations and pending tap confirmations to `now`.
    ///
    /// Returns `true` while the host should keep calling `tick`.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut redraw = false;

        let pending_tap = self.tap_detector.check_single_tap(now);
        if let Some(gesture) = pending_tap
            && self.state.is_zoom_enabled()
        {
            let mut ctx = ZoomContext::new(
                &mut self.state,
                &mut self.animator,
                &self.config,
                now,
                &mut redraw,
            );
            dispatch_tap(&mut self.tap_listener, &mut ctx, gesture);
        }

        if let Some(frame) = self.animator.tick(now) {
            self.state.apply_values(frame.values);
            if frame.finished {
                self.state.finish_animation();
            }
            redraw = true;
        }

        if redraw {
            self.host.invalidate();
        }
        self.animator.is_running() || self.tap_detector.has_pending_tap()
    }

    // --- Draw -----------------------------------------------------------

    /// Draw the host content through the current transform.
    ///
    /// An at-rest state (positive translate, or scale at `min_scale`) is
    /// normalized to a zero translate first.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let (translate, scale) = self.state.normalize_for_draw(self.config.min_scale);
        canvas.save();
        canvas.translate(translate.x, translate.y);
        canvas.scale(scale, scale);
        self.host.dispatch_draw(canvas);
        canvas.restore();
    }
}

fn dispatch_tap<T: DoubleTapListener>(
    listener: &mut T,
    ctx: &mut ZoomContext<'_>,
    gesture: TapGesture,
) -> bool {
    match gesture {
        TapGesture::DoubleTap { pos } => listener.on_double_tap(ctx, pos),
        TapGesture::SingleTapConfirmed { pos } => listener.on_single_tap_confirmed(ctx, pos),
    }
}

impl<H, S, T> std::fmt::Debug for ZoomListView<H, S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomListView")
            .field("state", &self.state)
            .field("animator", &self.animator.phase())
            .finish_non_exhaustive()
    }
}
