#![forbid(unsafe_code)]

//! Zoom and gesture configuration.
//!
//! [`ZoomConfig`] is immutable once a widget is built from it. Every field has
//! a default, so partial TOML/JSON documents only override what they name.
//!
//! ```toml
//! min_scale = 0.5
//! max_scale = 3.0
//! animation_duration_ms = 250
//! easing = "decelerate"
//!
//! [gesture]
//! double_tap_timeout_ms = 250
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::Easing;

/// Errors from validating or loading a [`ZoomConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min_scale must be finite and positive, got {0}")]
    InvalidMinScale(f32),

    #[error("max_scale ({max}) must be finite and not below min_scale ({min})")]
    InvertedScaleRange { min: f32, max: f32 },

    #[error("default_scale ({default}) must lie within [{min}, {max}]")]
    DefaultScaleOutOfRange { default: f32, min: f32, max: f32 },

    #[error("gesture.{field} must be finite and non-negative, got {value}")]
    InvalidGestureValue { field: &'static str, value: f32 },

    #[cfg(feature = "config-file")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config-file")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-file")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Gesture thresholds
// ---------------------------------------------------------------------------

/// Thresholds for the raw gesture detectors, in view pixels / milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Movement past which a press is no longer a tap (default: 8).
    pub touch_slop: f32,
    /// Max distance between the two downs of a double tap (default: 100).
    pub double_tap_slop: f32,
    /// Max gap between first up and second down (default: 300ms).
    pub double_tap_timeout_ms: u64,
    /// Gaps shorter than this are treated as contact bounce (default: 40ms).
    pub double_tap_min_time_ms: u64,
    /// Span change required before a pinch begins (default: 16).
    pub span_slop: f32,
    /// Smallest span that can drive a pinch (default: 0).
    pub min_span: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            double_tap_timeout_ms: 300,
            double_tap_min_time_ms: 40,
            span_slop: 16.0,
            min_span: 0.0,
        }
    }
}

impl GestureConfig {
    #[inline]
    #[must_use]
    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.double_tap_timeout_ms)
    }

    #[inline]
    #[must_use]
    pub fn double_tap_min_time(&self) -> Duration {
        Duration::from_millis(self.double_tap_min_time_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("touch_slop", self.touch_slop),
            ("double_tap_slop", self.double_tap_slop),
            ("span_slop", self.span_slop),
            ("min_span", self.min_span),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidGestureValue { field, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ZoomConfig
// ---------------------------------------------------------------------------

/// Scale bounds and animation settings for a zoomable list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Smallest scale a pinch can reach (default: 0.5).
    pub min_scale: f32,
    /// Largest scale a pinch or double tap can reach (default: 2.0).
    pub max_scale: f32,
    /// Rest scale that snap-back and double-tap-out return to (default: 1.0).
    pub default_scale: f32,
    /// Duration of animated zooms (default: 300ms).
    pub animation_duration_ms: u64,
    /// Curve for animated zooms (default: decelerate).
    pub easing: Easing,
    /// Whether gesture interception starts enabled (default: false).
    pub zoom_enabled: bool,
    /// Raw detector thresholds.
    pub gesture: GestureConfig,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 2.0,
            default_scale: 1.0,
            animation_duration_ms: 300,
            easing: Easing::Decelerate,
            zoom_enabled: false,
            gesture: GestureConfig::default(),
        }
    }
}

impl ZoomConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale bounds.
    #[must_use]
    pub fn scale_range(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Set the rest scale.
    #[must_use]
    pub fn default_scale(mut self, scale: f32) -> Self {
        self.default_scale = scale;
        self
    }

    /// Set the animated zoom duration.
    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the animation curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set whether zoom starts enabled.
    #[must_use]
    pub fn zoom_enabled(mut self, enabled: bool) -> Self {
        self.zoom_enabled = enabled;
        self
    }

    /// Replace the gesture thresholds.
    #[must_use]
    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Animated zoom duration as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn animation_duration_value(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Check that the scale bounds are ordered and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(ConfigError::InvalidMinScale(self.min_scale));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if !(self.min_scale..=self.max_scale).contains(&self.default_scale) {
            return Err(ConfigError::DefaultScaleOutOfRange {
                default: self.default_scale,
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        self.gesture.validate()
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_widget() {
        let c = ZoomConfig::default();
        assert_eq!(c.min_scale, 0.5);
        assert_eq!(c.max_scale, 2.0);
        assert_eq!(c.default_scale, 1.0);
        assert_eq!(c.animation_duration_ms, 300);
        assert_eq!(c.easing, Easing::Decelerate);
        assert!(!c.zoom_enabled);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_min_scale() {
        let c = ZoomConfig::new().scale_range(0.0, 2.0);
        assert!(matches!(c.validate(), Err(ConfigError::InvalidMinScale(_))));
    }

    #[test]
    fn rejects_inverted_range() {
        let c = ZoomConfig::new().scale_range(2.0, 1.0);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvertedScaleRange { .. })
        ));
    }

    #[test]
    fn rejects_nan_max() {
        let c = ZoomConfig::new().scale_range(0.5, f32::NAN);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_default_outside_range() {
        let c = ZoomConfig::new().default_scale(3.0);
        let err = c.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "default_scale (3) must lie within [0.5, 2]"
        );
    }

    #[test]
    fn rejects_negative_slop() {
        let gesture = GestureConfig {
            touch_slop: -1.0,
            ..GestureConfig::default()
        };
        let c = ZoomConfig::new().gesture(gesture);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidGestureValue {
                field: "touch_slop",
                ..
            })
        ));
    }

    #[test]
    fn builder_sets_duration() {
        let c = ZoomConfig::new().animation_duration(Duration::from_millis(120));
        assert_eq!(c.animation_duration_ms, 120);
        assert_eq!(c.animation_duration_value(), Duration::from_millis(120));
    }

    #[test]
    fn partial_json_preserves_defaults() {
        let c: ZoomConfig = serde_json::from_str(r#"{"max_scale": 4.0}"#).unwrap();
        assert_eq!(c.max_scale, 4.0);
        assert_eq!(c.min_scale, 0.5);
        assert_eq!(c.gesture, GestureConfig::default());
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_round_trip_with_nested_gesture() {
        let c = ZoomConfig::from_toml_str(
            "max_scale = 3.0\neasing = \"linear\"\n[gesture]\ndouble_tap_timeout_ms = 250\n",
        )
        .unwrap();
        assert_eq!(c.max_scale, 3.0);
        assert_eq!(c.easing, Easing::Linear);
        assert_eq!(c.gesture.double_tap_timeout_ms, 250);
        assert_eq!(c.gesture.touch_slop, 8.0);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_validation_runs() {
        let err = ZoomConfig::from_toml_str("min_scale = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedScaleRange { .. }));
    }
}
