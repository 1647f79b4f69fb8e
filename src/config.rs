use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "GLOBE_CONFIG";

/// Tunables for the spinning globe.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Yaw change per millisecond of spin; the sign picks the direction
    pub spin_speed: f64,
    /// Pitch (φ) in degrees
    pub vertical_tilt: f64,
    /// Roll (γ) in degrees, fixed for the life of the view
    pub horizontal_tilt: f64,
    /// Degrees subtracted from the spin yaw
    pub yaw_offset: f64,
    /// Markers farther than this (radians) from the view center are hidden
    pub occlusion_threshold: f64,
    /// Allowed zoom factor range (min, max) relative to the base scale
    pub zoom_range: (f64, f64),
    /// Base scale = min(width, height) / scale_divisor
    pub scale_divisor: f64,
    /// Marker dot radius in pixels
    pub marker_radius: f64,
    /// Pointer distance in pixels that still counts as hovering a marker
    pub hover_radius: f64,
    /// Zoom factor multiplier per scroll notch
    pub wheel_step: f64,
    /// A wheel zoom gesture ends after this many idle milliseconds
    pub wheel_idle_ms: f64,
    /// Simplification tolerance (degrees) for deriving coarse land outlines
    pub coarse_tolerance_deg: f64,
    /// Maximum great-circle step (degrees) between path vertices
    pub resample_step_deg: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            spin_speed: -0.005,
            vertical_tilt: -15.0,
            horizontal_tilt: 0.0,
            yaw_offset: 240.0,
            occlusion_threshold: 1.45,
            zoom_range: (1.0, 70.0),
            scale_divisor: 2.1,
            marker_radius: 3.0,
            hover_radius: 4.0,
            wheel_step: 1.25,
            wheel_idle_ms: 150.0,
            coarse_tolerance_deg: 1.0,
            resample_step_deg: 2.0,
        }
    }
}

impl GlobeConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        // simd-json parses in place
        let mut buf = bytes.to_vec();
        let config: Self = simd_json::serde::from_slice(&mut buf)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Load from the file named by `GLOBE_CONFIG`, or fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spin_speed.is_finite() {
            return Err(invalid("spin_speed", "must be finite"));
        }
        for (field, value) in [
            ("vertical_tilt", self.vertical_tilt),
            ("horizontal_tilt", self.horizontal_tilt),
            ("yaw_offset", self.yaw_offset),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        if !(self.occlusion_threshold > 0.0 && self.occlusion_threshold < FRAC_PI_2) {
            return Err(invalid(
                "occlusion_threshold",
                format!("{} is outside (0, π/2)", self.occlusion_threshold),
            ));
        }
        let (min, max) = self.zoom_range;
        if !(min > 0.0 && min <= max && max.is_finite()) {
            return Err(invalid("zoom_range", format!("[{min}, {max}] must satisfy 0 < min <= max")));
        }
        for (field, value) in [
            ("scale_divisor", self.scale_divisor),
            ("wheel_step", self.wheel_step),
            ("resample_step_deg", self.resample_step_deg),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(invalid(field, "must be positive"));
            }
        }
        for (field, value) in [
            ("marker_radius", self.marker_radius),
            ("hover_radius", self.hover_radius),
            ("wheel_idle_ms", self.wheel_idle_ms),
            ("coarse_tolerance_deg", self.coarse_tolerance_deg),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(field, "must be non-negative"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        GlobeConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GlobeConfig::from_json(br#"{"spin_speed": 0.01, "occlusion_threshold": 1.57}"#).unwrap();
        assert_eq!(config.spin_speed, 0.01);
        assert_eq!(config.occlusion_threshold, 1.57);
        assert_eq!(config.zoom_range, (1.0, 70.0));
        assert_eq!(config.vertical_tilt, -15.0);
    }

    #[test]
    fn test_rejects_hemisphere_threshold() {
        let err = GlobeConfig::from_json(br#"{"occlusion_threshold": 1.6}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "occlusion_threshold", .. }));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = GlobeConfig::from_json(br#"{"zoom_range": [10.0, 2.0]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom_range", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(GlobeConfig::from_json(b"{not json"), Err(ConfigError::Parse(_))));
    }
}
