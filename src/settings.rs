//! Game settings and tuning
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::mesh::TorusParams;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Ticks per second
    pub tick_rate_hz: u32,
    /// Maximum ticks run for one rendered frame
    pub max_substeps: u32,

    // === Airplane ===
    /// Launch velocity (units/second)
    pub default_velocity: f32,
    /// Launch heading (degrees)
    pub launch_heading: f32,
    /// Heading change for turn buttons (degrees)
    pub turn_step: f32,
    /// Heading change for pinch gestures (degrees)
    pub gesture_turn_step: f32,

    // === Placement ===
    /// Added to the tracked position when placing objects
    pub placement_offset: Vec3,
    /// Head pose sampling interval (milliseconds)
    pub tracking_interval_ms: u64,

    // === Rings ===
    pub ring: TorusParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            max_substeps: MAX_SUBSTEPS,

            default_velocity: DEFAULT_VELOCITY,
            launch_heading: LAUNCH_HEADING,
            turn_step: TURN_STEP,
            gesture_turn_step: GESTURE_TURN_STEP,

            placement_offset: Vec3::from_array(PLACEMENT_OFFSET),
            tracking_interval_ms: TRACKING_INTERVAL_MS,

            ring: TorusParams::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_hz == 0 {
            return Err(Error::invalid("tick_rate_hz", "must be greater than 0"));
        }
        if self.tracking_interval_ms == 0 {
            return Err(Error::invalid("tracking_interval_ms", "must be greater than 0"));
        }
        if !self.default_velocity.is_finite() || self.default_velocity < 0.0 {
            return Err(Error::invalid(
                "default_velocity",
                format!("must be finite and >= 0, got {}", self.default_velocity),
            ));
        }
        for (name, value) in [
            ("launch_heading", self.launch_heading),
            ("turn_step", self.turn_step),
            ("gesture_turn_step", self.gesture_turn_step),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid(name, format!("must be finite, got {value}")));
            }
        }
        if !self.placement_offset.is_finite() {
            return Err(Error::invalid("placement_offset", "must be finite"));
        }
        self.ring.validate()
    }

    /// Fixed timestep in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz as f32
    }

    /// Fixed timestep as a wall-clock interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64)
    }

    pub fn tracking_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_rate_hz, 60);
        assert!((settings.sim_dt() - SIM_DT).abs() < 1e-9);
        assert_eq!(settings.tracking_interval(), Duration::from_millis(100));
        assert_eq!(settings.placement_offset, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(settings.ring.segments, 128);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "default_velocity": 0.5, "ring": { "segments": 16, "tube_segments": 8, "radius": 0.3, "tube_radius": 0.02 } }"#).unwrap();
        assert_eq!(settings.default_velocity, 0.5);
        assert_eq!(settings.ring.segments, 16);
        assert_eq!(settings.tick_rate_hz, 60);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.turn_step = 45.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "tick_rate_hz": 0 }"#),
            Err(Error::InvalidParameter { name: "tick_rate_hz", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "ring": { "segments": 2, "tube_segments": 8, "radius": 0.3, "tube_radius": 0.02 } }"#),
            Err(Error::InvalidParameter { name: "segments", .. })
        ));
        assert!(matches!(Settings::from_json("{ not json"), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_bad_velocity_and_angles() {
        let mut settings = Settings::default();
        settings.default_velocity = -0.1;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidParameter { name: "default_velocity", .. })
        ));
        settings.default_velocity = f32::NAN;
        assert!(settings.validate().is_err());
        settings.default_velocity = f32::INFINITY;
        assert!(settings.validate().is_err());

        // Zero velocity is a valid (stationary) launch
        settings.default_velocity = 0.0;
        assert!(settings.validate().is_ok());

        settings.gesture_turn_step = f32::NAN;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidParameter { name: "gesture_turn_step", .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Settings::load("/nonexistent/ring-flight/settings.json"),
            Err(Error::Io(_))
        ));
    }
}
