#![forbid(unsafe_code)]

//! Core: geometry, touch events, gesture detection and zoom animation.
//!
//! # Role in zoomlist
//! `zoomlist-core` holds everything that does not need to know about a host
//! view. It owns the pan/zoom clamp math, the normalized multi-touch event
//! model, configuration, the two raw gesture detectors and the zoom animator.
//!
//! # Primary responsibilities
//! - **Geometry**: max offsets, translate clamping, pivot recovery.
//! - **TouchEvent**: serde-friendly multi-pointer events for input and replay.
//! - **ScaleDetector / DoubleTapDetector**: pure state machines over touch streams.
//! - **ZoomAnimator**: single-slot eased interpolation of scale and translate.
//!
//! # How it fits in the system
//! `zoomlist-widgets` owns the mutable transform state and wires these pieces
//! to a host scroll view. Everything here takes time as a parameter, so the
//! same code runs under a real frame clock and in deterministic replays.

pub mod animation;
pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;

pub use animation::{AnimationFrame, AnimatorPhase, Easing, ZoomAnimation, ZoomAnimator, ZoomValues};
pub use config::{ConfigError, GestureConfig, ZoomConfig};
pub use event::{TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{Point, Size, clamp_translate, max_offsets, pivot_from_translate};
pub use gesture::{DoubleTapDetector, ScaleDetector, ScaleGesture, TapGesture};
