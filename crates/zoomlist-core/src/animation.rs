#![forbid(unsafe_code)]

//! Animated zoom transitions.
//!
//! A [`ZoomAnimator`] interpolates a [`ZoomValues`] triple (scale and
//! translate) from a start to an end over a fixed duration, shaped by an
//! [`Easing`] curve. The host drives it from its own frame scheduling by
//! calling [`ZoomAnimator::tick`] with the current time.
//!
//! # State Machine
//!
//! `Idle → Running → { Completed, Cancelled }`, and any terminal state can
//! start again. Starting while `Running` is rejected: the request is dropped,
//! not queued, and the running animation is left untouched.
//!
//! # Invariants
//!
//! 1. At most one animation is live.
//! 2. Every easing curve maps `[0, 1]` monotonically onto `[0, 1]` with fixed
//!    endpoints, so interpolated values stay between start and end.
//! 3. The final tick reports exactly the end values.
//!
//! # Failure Modes
//!
//! - Zero duration: the first tick completes with the end values.
//! - `now` earlier than the start time: treated as elapsed zero.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Progress curve for animated zooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic deceleration, `1 - (1 - t)^2`.
    #[default]
    Decelerate,
    /// Cubic deceleration, `1 - (1 - t)^3`.
    EaseOutCubic,
    /// Cubic S-curve.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` to eased progress. Input is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Self::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// The animated triple: scale and translate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomValues {
    pub scale: f32,
    pub translate: Point,
}

impl ZoomValues {
    #[must_use]
    pub const fn new(scale: f32, translate: Point) -> Self {
        Self { scale, translate }
    }

    /// Linear interpolation toward `to` at eased progress `p`.
    ///
    /// `p == 1` returns `to` exactly.
    #[must_use]
    pub fn lerp(self, to: ZoomValues, p: f32) -> ZoomValues {
        if p >= 1.0 {
            return to;
        }
        let mix = |a: f32, b: f32| a + (b - a) * p;
        ZoomValues {
            scale: mix(self.scale, to.scale),
            translate: Point::new(
                mix(self.translate.x, to.translate.x),
                mix(self.translate.y, to.translate.y),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// ZoomAnimation
// ---------------------------------------------------------------------------

/// One animated transition. Owned by the [`ZoomAnimator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomAnimation {
    pub start: ZoomValues,
    pub end: ZoomValues,
    pub started_at: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl ZoomAnimation {
    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn fraction_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Interpolated values at `now`.
    #[must_use]
    pub fn values_at(&self, now: Instant) -> ZoomValues {
        let p = self.easing.apply(self.fraction_at(now));
        self.start.lerp(self.end, p)
    }
}

// ---------------------------------------------------------------------------
// ZoomAnimator
// ---------------------------------------------------------------------------

/// Lifecycle of the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorPhase {
    /// Nothing has run yet.
    #[default]
    Idle,
    /// An animation is live.
    Running,
    /// The last animation reached its end.
    Completed,
    /// The last animation was stopped early.
    Cancelled,
}

/// Output of one [`ZoomAnimator::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Values to apply for this frame.
    pub values: ZoomValues,
    /// Linear (un-eased) progress.
    pub fraction: f32,
    /// Whether this frame completed the animation.
    pub finished: bool,
}

/// Single-slot zoom animation driver.
#[derive(Debug, Clone, Default)]
pub struct ZoomAnimator {
    phase: AnimatorPhase,
    current: Option<ZoomAnimation>,
}

impl ZoomAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == AnimatorPhase::Running
    }

    /// The live animation, if any.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&ZoomAnimation> {
        self.current.as_ref()
    }

    /// Start animating `from → to`.
    ///
    /// Returns `false` (and changes nothing) if an animation is already
    /// running.
    pub fn start(
        &mut self,
        from: ZoomValues,
        to: ZoomValues,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) -> bool {
        if self.is_running() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "zoomlist::animation",
                from = from.scale,
                to = to.scale,
                "zoom animation request dropped, one is already running"
            );
            return false;
        }
        self.current = Some(ZoomAnimation {
            start: from,
            end: to,
            started_at: now,
            duration,
            easing,
        });
        self.phase = AnimatorPhase::Running;
        true
    }

    /// Advance to `now`.
    ///
    /// Returns `None` when nothing is running. The frame that reaches the end
    /// carries the exact end values and moves the phase to `Completed`.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationFrame> {
        if !self.is_running() {
            return None;
        }
        let anim = self.current.as_ref()?;
        let fraction = anim.fraction_at(now);
        let values = anim.values_at(now);
        let finished = fraction >= 1.0;
        if finished {
            self.current = None;
            self.phase = AnimatorPhase::Completed;
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "zoomlist::animation", scale = values.scale, "zoom animation completed");
        }
        Some(AnimationFrame {
            values,
            fraction,
            finished,
        })
    }

    /// Stop the running animation where it is.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.current = None;
        self.phase = AnimatorPhase::Cancelled;
        true
    }
}
