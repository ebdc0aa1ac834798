#![forbid(unsafe_code)]

//! Raw gesture detection over [`TouchEvent`] streams.
//!
//! Two independent detectors read the same stream and never talk to each
//! other:
//!
//! - [`ScaleDetector`] turns two-or-more-finger movement into
//!   `Begin` / `Scale` / `End` pinch events.
//! - [`DoubleTapDetector`] turns down/up pairs into `DoubleTap` and
//!   `SingleTapConfirmed`.
//!
//! Both are pure state machines: time is passed in, nothing is scheduled.
//!
//! # Invariants
//!
//! 1. Every `ScaleGesture::Begin` is followed by exactly one `End` before the
//!    next `Begin`.
//! 2. `Scale` is only emitted between `Begin` and `End`, and its factor is
//!    finite and positive.
//! 3. A tap that becomes half of a double tap is never also confirmed as a
//!    single tap.
//! 4. After `reset()`, both detectors are idle.
//!
//! # Failure Modes
//!
//! - Events with no pointers are ignored apart from ending an active pinch.
//! - A span that collapses to zero mid-pinch reports a factor of 1.

use web_time::Instant;

use crate::config::GestureConfig;
use crate::event::{TouchEvent, TouchPhase};
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Scale detection
// ---------------------------------------------------------------------------

/// Pinch events emitted by [`ScaleDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleGesture {
    /// A pinch started.
    Begin { focus: Point, span: f32 },
    /// The span changed by `factor` relative to the previous step.
    Scale { factor: f32, focus: Point },
    /// The pinch ended.
    End { focus: Point },
}

/// Detects pinch scaling from multi-pointer movement.
///
/// The focus is the centroid of the pointers in contact. The span is the
/// diagonal of the box spanned by twice the mean absolute deviation on each
/// axis, so it behaves like the finger distance for two pointers and stays
/// stable for more.
#[derive(Debug, Clone)]
pub struct ScaleDetector {
    span_slop: f32,
    min_span: f32,
    in_progress: bool,
    initial_span: f32,
    prev_span: f32,
    focus: Point,
}

impl ScaleDetector {
    /// Create a detector using the pinch thresholds from `config`.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            span_slop: config.span_slop,
            min_span: config.min_span,
            in_progress: false,
            initial_span: 0.0,
            prev_span: 0.0,
            focus: Point::ZERO,
        }
    }

    /// Whether a pinch is currently running.
    #[inline]
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Last computed focus point.
    #[inline]
    #[must_use]
    pub fn focus(&self) -> Point {
        self.focus
    }

    /// Drop all state without emitting `End`.
    pub fn reset(&mut self) {
        self.in_progress = false;
        self.initial_span = 0.0;
        self.prev_span = 0.0;
    }

    /// Feed one event, returning the pinch events it produced.
    pub fn process(&mut self, event: &TouchEvent) -> Vec<ScaleGesture> {
        let mut out = Vec::with_capacity(2);
        let phase = event.phase;

        if phase == TouchPhase::Down || phase.ends_stream() {
            if self.in_progress {
                out.push(ScaleGesture::End { focus: self.focus });
                self.in_progress = false;
                self.initial_span = 0.0;
            }
            if phase.ends_stream() {
                return out;
            }
        }

        let Some((focus, span, count)) = focus_and_span(event) else {
            return out;
        };
        self.focus = focus;

        let config_changed = phase == TouchPhase::Down || phase.changes_pointer_set();
        let was_in_progress = self.in_progress;

        if self.in_progress && (config_changed || span < self.min_span) {
            out.push(ScaleGesture::End { focus });
            self.in_progress = false;
            self.initial_span = span;
        }
        if config_changed {
            self.initial_span = span;
            self.prev_span = span;
        }

        if !self.in_progress
            && count >= 2
            && span >= self.min_span
            && (was_in_progress || (span - self.initial_span).abs() > self.span_slop)
        {
            self.prev_span = span;
            self.in_progress = true;
            out.push(ScaleGesture::Begin { focus, span });
            return out;
        }

        if phase == TouchPhase::Move {
            if self.in_progress {
                let factor = if self.prev_span > 0.0 && span > 0.0 {
                    span / self.prev_span
                } else {
                    1.0
                };
                out.push(ScaleGesture::Scale { factor, focus });
            }
            self.prev_span = span;
        }

        out
    }
}

/// Centroid, span and count of the pointers still in contact.
fn focus_and_span(event: &TouchEvent) -> Option<(Point, f32, usize)> {
    let mut count = 0usize;
    let (mut sum_x, mut sum_y) = (0.0f32, 0.0f32);
    for p in event.remaining_pointers() {
        sum_x += p.x;
        sum_y += p.y;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = count as f32;
    let focus = Point::new(sum_x / n, sum_y / n);

    let (mut dev_x, mut dev_y) = (0.0f32, 0.0f32);
    for p in event.remaining_pointers() {
        dev_x += (p.x - focus.x).abs();
        dev_y += (p.y - focus.y).abs();
    }
    let span_x = 2.0 * dev_x / n;
    let span_y = 2.0 * dev_y / n;
    Some((focus, span_x.hypot(span_y), count))
}

// ---------------------------------------------------------------------------
// Tap detection
// ---------------------------------------------------------------------------

/// Tap events emitted by [`DoubleTapDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapGesture {
    /// Second down of a double tap. `pos` is where the first tap went down.
    DoubleTap { pos: Point },
    /// A single tap that was not followed by a second one in time.
    SingleTapConfirmed { pos: Point },
}

#[derive(Debug, Clone, Copy)]
struct PressState {
    pos: Point,
    in_tap_region: bool,
}

#[derive(Debug, Clone, Copy)]
struct CompletedTap {
    down_pos: Point,
    up_at: Instant,
}

/// Detects double taps and confirms single taps.
///
/// The double tap fires on the second `Down`, not on its `Up`, so the zoom
/// can start while the finger is still on the glass.
#[derive(Debug, Clone)]
pub struct DoubleTapDetector {
    config: GestureConfig,
    press: Option<PressState>,
    last_tap: Option<CompletedTap>,
    is_double_tapping: bool,
}

impl DoubleTapDetector {
    /// Create a detector using the tap thresholds from `config`.
    #[must_use]
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            config: config.clone(),
            press: None,
            last_tap: None,
            is_double_tapping: false,
        }
    }

    /// Whether the current press is the second half of a double tap.
    #[inline]
    #[must_use]
    pub fn is_double_tapping(&self) -> bool {
        self.is_double_tapping
    }

    /// Whether a completed tap is waiting for its double-tap window to close.
    #[inline]
    #[must_use]
    pub fn has_pending_tap(&self) -> bool {
        self.last_tap.is_some()
    }

    /// Drop all state without emitting anything.
    pub fn reset(&mut self) {
        self.press = None;
        self.last_tap = None;
        self.is_double_tapping = false;
    }

    /// Feed one event, returning the tap events it produced.
    pub fn process(&mut self, event: &TouchEvent, now: Instant) -> Vec<TapGesture> {
        let mut out = Vec::with_capacity(2);
        match event.phase {
            TouchPhase::Down => {
                let Some(pos) = event.primary().map(|p| p.position()) else {
                    return out;
                };
                if let Some(tap) = self.last_tap.take() {
                    if self.is_double_tap(&tap, pos, now) {
                        self.is_double_tapping = true;
                        out.push(TapGesture::DoubleTap { pos: tap.down_pos });
                    } else {
                        out.push(TapGesture::SingleTapConfirmed { pos: tap.down_pos });
                    }
                }
                self.press = Some(PressState {
                    pos,
                    in_tap_region: true,
                });
            }
            TouchPhase::PointerDown => {
                // A second finger turns the press into something other than a tap.
                self.last_tap = None;
                self.is_double_tapping = false;
                if let Some(press) = self.press.as_mut() {
                    press.in_tap_region = false;
                }
            }
            TouchPhase::Move => {
                let slop_sq = self.config.touch_slop * self.config.touch_slop;
                if let (Some(press), Some(p)) = (self.press.as_mut(), event.primary())
                    && press.pos.distance_squared(p.position()) > slop_sq
                {
                    press.in_tap_region = false;
                }
            }
            TouchPhase::Up => {
                if let Some(press) = self.press.take()
                    && press.in_tap_region
                    && !self.is_double_tapping
                {
                    self.last_tap = Some(CompletedTap {
                        down_pos: press.pos,
                        up_at: now,
                    });
                }
                self.is_double_tapping = false;
            }
            TouchPhase::Cancel => self.reset(),
            TouchPhase::PointerUp => {}
        }
        out
    }

    /// Confirm a pending single tap whose double-tap window has elapsed.
    ///
    /// Call periodically (e.g. on each frame tick).
    pub fn check_single_tap(&mut self, now: Instant) -> Option<TapGesture> {
        let tap = self.last_tap?;
        if now.saturating_duration_since(tap.up_at) <= self.config.double_tap_timeout() {
            return None;
        }
        self.last_tap = None;
        Some(TapGesture::SingleTapConfirmed { pos: tap.down_pos })
    }

    fn is_double_tap(&self, first: &CompletedTap, second_down: Point, now: Instant) -> bool {
        let gap = now.saturating_duration_since(first.up_at);
        if gap > self.config.double_tap_timeout() || gap < self.config.double_tap_min_time() {
            return false;
        }
        let slop = self.config.double_tap_slop;
        first.down_pos.distance_squared(second_down) < slop * slop
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::event::TouchPoint;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn two(phase: TouchPhase, action_index: usize, a: (f32, f32), b: (f32, f32)) -> TouchEvent {
        TouchEvent::new(
            phase,
            action_index,
            vec![TouchPoint::new(0, a.0, a.1), TouchPoint::new(1, b.0, b.1)],
        )
    }

    fn pinch_open(d: &mut ScaleDetector) -> Vec<ScaleGesture> {
        let mut all = Vec::new();
        all.extend(d.process(&TouchEvent::down(0, 400.0, 500.0)));
        all.extend(d.process(&two(TouchPhase::PointerDown, 1, (400.0, 500.0), (600.0, 500.0))));
        all.extend(d.process(&two(TouchPhase::Move, 0, (350.0, 500.0), (650.0, 500.0))));
        all
    }

    // --- Scale ----------------------------------------------------------

    #[test]
    fn single_pointer_never_scales() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        assert!(d.process(&TouchEvent::down(0, 10.0, 10.0)).is_empty());
        assert!(d.process(&TouchEvent::move_to(0, 300.0, 300.0)).is_empty());
        assert!(d.process(&TouchEvent::up(0, 300.0, 300.0)).is_empty());
        assert!(!d.is_in_progress());
    }

    #[test]
    fn begins_after_span_slop() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        let events = pinch_open(&mut d);
        assert_eq!(
            events,
            vec![ScaleGesture::Begin {
                focus: Point::new(500.0, 500.0),
                span: 300.0
            }]
        );
        assert!(d.is_in_progress());
    }

    #[test]
    fn small_span_change_does_not_begin() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        d.process(&TouchEvent::down(0, 400.0, 500.0));
        d.process(&two(TouchPhase::PointerDown, 1, (400.0, 500.0), (600.0, 500.0)));
        let out = d.process(&two(TouchPhase::Move, 0, (395.0, 500.0), (605.0, 500.0)));
        assert!(out.is_empty());
        assert!(!d.is_in_progress());
    }

    #[test]
    fn move_in_progress_reports_ratio() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        pinch_open(&mut d);
        let out = d.process(&two(TouchPhase::Move, 0, (200.0, 500.0), (800.0, 500.0)));
        assert_eq!(
            out,
            vec![ScaleGesture::Scale {
                factor: 2.0,
                focus: Point::new(500.0, 500.0)
            }]
        );
    }

    #[test]
    fn pointer_up_ends_pinch() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        pinch_open(&mut d);
        let out = d.process(&two(TouchPhase::PointerUp, 1, (350.0, 500.0), (650.0, 500.0)));
        assert_eq!(
            out,
            vec![ScaleGesture::End {
                focus: Point::new(350.0, 500.0)
            }]
        );
        assert!(!d.is_in_progress());
    }

    #[test]
    fn pointer_set_change_restarts_immediately() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        pinch_open(&mut d);
        let three = TouchEvent::new(
            TouchPhase::PointerDown,
            2,
            vec![
                TouchPoint::new(0, 350.0, 500.0),
                TouchPoint::new(1, 650.0, 500.0),
                TouchPoint::new(2, 500.0, 800.0),
            ],
        );
        let out = d.process(&three);
        assert_eq!(out.len(), 2);
        assert!(matches!(out[0], ScaleGesture::End { .. }));
        assert!(matches!(out[1], ScaleGesture::Begin { .. }));
        assert!(d.is_in_progress());
    }

    #[test]
    fn cancel_ends_and_up_after_end_is_silent() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        pinch_open(&mut d);
        let out = d.process(&TouchEvent::cancel());
        assert!(matches!(out.as_slice(), [ScaleGesture::End { .. }]));
        assert!(d.process(&TouchEvent::up(0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn reset_is_silent() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        pinch_open(&mut d);
        d.reset();
        assert!(!d.is_in_progress());
        assert!(d.process(&TouchEvent::up(0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn collapsed_span_reports_unit_factor() {
        let mut d = ScaleDetector::new(&GestureConfig::default());
        pinch_open(&mut d);
        let out = d.process(&two(TouchPhase::Move, 0, (500.0, 500.0), (500.0, 500.0)));
        assert_eq!(
            out,
            vec![ScaleGesture::Scale {
                factor: 1.0,
                focus: Point::new(500.0, 500.0)
            }]
        );
    }

    #[test]
    fn min_span_blocks_begin() {
        let config = GestureConfig {
            min_span: 1000.0,
            ..GestureConfig::default()
        };
        let mut d = ScaleDetector::new(&config);
        assert!(pinch_open(&mut d).is_empty());
    }

    // --- Taps -----------------------------------------------------------

    fn tap(d: &mut DoubleTapDetector, x: f32, y: f32, at: Instant) -> Vec<TapGesture> {
        let mut out = d.process(&TouchEvent::down(0, x, y), at);
        out.extend(d.process(&TouchEvent::up(0, x, y), at + ms(50)));
        out
    }

    #[test]
    fn double_tap_fires_on_second_down() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        assert!(tap(&mut d, 200.0, 300.0, t0).is_empty());
        let out = d.process(&TouchEvent::down(0, 205.0, 302.0), t0 + ms(150));
        assert_eq!(
            out,
            vec![TapGesture::DoubleTap {
                pos: Point::new(200.0, 300.0)
            }]
        );
        assert!(d.is_double_tapping());
        // The second up neither confirms a single tap nor arms a third.
        assert!(d.process(&TouchEvent::up(0, 205.0, 302.0), t0 + ms(200)).is_empty());
        assert!(d.check_single_tap(t0 + ms(2000)).is_none());
    }

    #[test]
    fn slow_second_tap_confirms_first() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        tap(&mut d, 200.0, 300.0, t0);
        let out = d.process(&TouchEvent::down(0, 200.0, 300.0), t0 + ms(500));
        assert_eq!(
            out,
            vec![TapGesture::SingleTapConfirmed {
                pos: Point::new(200.0, 300.0)
            }]
        );
    }

    #[test]
    fn bounce_is_not_a_double_tap() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        tap(&mut d, 200.0, 300.0, t0);
        // Up was at t0+50; 20ms later is under the 40ms floor.
        let out = d.process(&TouchEvent::down(0, 200.0, 300.0), t0 + ms(70));
        assert!(matches!(out.as_slice(), [TapGesture::SingleTapConfirmed { .. }]));
    }

    #[test]
    fn far_second_tap_is_not_double() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        tap(&mut d, 0.0, 0.0, t0);
        let out = d.process(&TouchEvent::down(0, 300.0, 0.0), t0 + ms(150));
        assert!(matches!(out.as_slice(), [TapGesture::SingleTapConfirmed { .. }]));
    }

    #[test]
    fn check_single_tap_after_timeout() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        tap(&mut d, 10.0, 10.0, t0);
        assert!(d.has_pending_tap());
        assert!(d.check_single_tap(t0 + ms(200)).is_none());
        assert_eq!(
            d.check_single_tap(t0 + ms(400)),
            Some(TapGesture::SingleTapConfirmed {
                pos: Point::new(10.0, 10.0)
            })
        );
        assert!(d.check_single_tap(t0 + ms(500)).is_none());
    }

    #[test]
    fn drag_is_not_a_tap() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        d.process(&TouchEvent::down(0, 0.0, 0.0), t0);
        d.process(&TouchEvent::move_to(0, 40.0, 0.0), t0 + ms(10));
        d.process(&TouchEvent::up(0, 40.0, 0.0), t0 + ms(20));
        assert!(d.process(&TouchEvent::down(0, 0.0, 0.0), t0 + ms(100)).is_empty());
        assert!(d.check_single_tap(t0 + ms(1000)).is_none());
    }

    #[test]
    fn second_finger_cancels_tap() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        d.process(&TouchEvent::down(0, 0.0, 0.0), t0);
        d.process(&two(TouchPhase::PointerDown, 1, (0.0, 0.0), (50.0, 0.0)), t0);
        d.process(&two(TouchPhase::PointerUp, 1, (0.0, 0.0), (50.0, 0.0)), t0);
        d.process(&TouchEvent::up(0, 0.0, 0.0), t0 + ms(10));
        assert!(d.process(&TouchEvent::down(0, 0.0, 0.0), t0 + ms(100)).is_empty());
    }

    #[test]
    fn cancel_clears_pending_tap() {
        let mut d = DoubleTapDetector::new(&GestureConfig::default());
        let t0 = Instant::now();
        tap(&mut d, 0.0, 0.0, t0);
        d.process(&TouchEvent::cancel(), t0 + ms(60));
        assert!(d.check_single_tap(t0 + ms(1000)).is_none());
    }
}
