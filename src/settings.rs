//! Effect settings and preferences
//!
//! Persisted in LocalStorage on the web; every field falls back to its
//! default so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Bouncing ball tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Initial speed per axis (pixels/frame)
    pub speed: f32,
    pub restitution: f32,
    pub color: Color,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
            restitution: RESTITUTION,
            color: Color::rgb(0.39, 0.4, 0.95),
        }
    }
}

/// Falling boxes tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSettings {
    /// Edge length of spawned boxes
    pub size: f32,
    pub gravity: f32,
    pub restitution: f32,
    /// Horizontal damping while resting on the floor
    pub friction: f32,
    /// Oldest box is evicted once this many exist
    pub max_boxes: usize,
    /// Maximum launch speed per axis for click-spawned boxes
    pub spawn_speed: f32,
    /// Boxes dropped in when the effect starts
    pub initial_boxes: usize,
}

impl Default for BoxSettings {
    fn default() -> Self {
        Self {
            size: BOX_SIZE,
            gravity: GRAVITY,
            restitution: RESTITUTION,
            friction: GROUND_FRICTION,
            max_boxes: MAX_BOXES,
            spawn_speed: BOX_SPAWN_SPEED,
            initial_boxes: 3,
        }
    }
}

/// Pulsing circle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseSettings {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radius change per frame
    pub speed: f32,
    pub color: Color,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            min_radius: PULSE_MIN_RADIUS,
            max_radius: PULSE_MAX_RADIUS,
            speed: PULSE_SPEED,
            color: Color::rgb(0.93, 0.28, 0.6),
        }
    }
}

/// Starfield tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub count: usize,
    /// Depth travelled per frame
    pub speed: f32,
    pub focal_length: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            speed: STAR_SPEED,
            focal_length: STAR_FOCAL,
        }
    }
}

/// Typewriter timings in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterSettings {
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Time the full phrase stays on screen
    pub hold_ms: u32,
    /// Time the empty line stays on screen before the next phrase
    pub pause_ms: u32,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            pause_ms: 500,
        }
    }
}

/// All effect settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ball: BallSettings,
    pub boxes: BoxSettings,
    pub pulse: PulseSettings,
    pub starfield: StarfieldSettings,
    pub typewriter: TypewriterSettings,

    // === Accessibility ===
    /// Reduced motion (slower effects, sparser starfield)
    pub reduced_motion: bool,
}

impl Settings {
    /// Parse and validate a settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would break the bounce invariants or the
    /// in-bounds guarantee
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("ball.restitution", self.ball.restitution),
            ("boxes.restitution", self.boxes.restitution),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "in [0, 1)",
                    value,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.boxes.friction) {
            return Err(ConfigError::OutOfRange {
                field: "boxes.friction",
                expected: "in [0, 1]",
                value: self.boxes.friction,
            });
        }
        for (field, value) in [
            ("ball.radius", self.ball.radius),
            ("boxes.size", self.boxes.size),
            ("starfield.speed", self.starfield.speed),
            ("starfield.focal_length", self.starfield.focal_length),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "finite and positive",
                    value,
                });
            }
        }
        for (field, value) in [
            ("ball.speed", self.ball.speed),
            ("boxes.gravity", self.boxes.gravity),
            ("boxes.spawn_speed", self.boxes.spawn_speed),
            ("pulse.speed", self.pulse.speed),
            ("pulse.max_radius", self.pulse.max_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "finite and non-negative",
                    value,
                });
            }
        }
        let min_radius = self.pulse.min_radius;
        if !min_radius.is_finite() || min_radius < 0.0 || min_radius > self.pulse.max_radius {
            return Err(ConfigError::OutOfRange {
                field: "pulse.min_radius",
                expected: "between 0 and pulse.max_radius",
                value: self.pulse.min_radius,
            });
        }
        Ok(())
    }

    /// Motion multiplier (respects reduced_motion)
    pub fn motion_scale(&self) -> f32 {
        if self.reduced_motion { 0.5 } else { 1.0 }
    }

    /// Effective star count (respects reduced_motion)
    pub fn effective_star_count(&self) -> usize {
        if self.reduced_motion {
            self.starfield.count / 4
        } else {
            self.starfield.count
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "folio_fx_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {:?}", e),
            },
            None => log::warn!("LocalStorage unavailable, settings not saved"),
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"ball": {"radius": 12.0}, "reduced_motion": true}"#)
            .expect("valid settings");
        assert_eq!(settings.ball.radius, 12.0);
        assert_eq!(settings.ball.restitution, RESTITUTION);
        assert_eq!(settings.boxes.max_boxes, MAX_BOXES);
        assert!(settings.reduced_motion);
        assert_eq!(settings.effective_star_count(), STAR_COUNT / 4);
    }

    #[test]
    fn test_restitution_must_damp() {
        let err = Settings::from_json(r#"{"boxes": {"restitution": 1.2}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "boxes.restitution",
                ..
            }
        ));
    }

    fn rejected_field(json: &str) -> &'static str {
        match Settings::from_json(json) {
            Err(ConfigError::OutOfRange { field, .. }) => field,
            other => panic!("expected OutOfRange for {json}, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        assert_eq!(
            rejected_field(r#"{"starfield": {"focal_length": 0.0}}"#),
            "starfield.focal_length"
        );
        assert_eq!(
            rejected_field(r#"{"starfield": {"focal_length": -256.0}}"#),
            "starfield.focal_length"
        );
        assert_eq!(rejected_field(r#"{"starfield": {"speed": 0.0}}"#), "starfield.speed");
        assert_eq!(rejected_field(r#"{"boxes": {"size": -40.0}}"#), "boxes.size");
        assert_eq!(rejected_field(r#"{"ball": {"radius": 0.0}}"#), "ball.radius");
    }

    #[test]
    fn test_rejects_overflowing_and_negative_speeds() {
        // 1e39 overflows f32 to infinity
        assert_eq!(
            rejected_field(r#"{"boxes": {"spawn_speed": 1e39}}"#),
            "boxes.spawn_speed"
        );
        assert_eq!(rejected_field(r#"{"boxes": {"size": 1e39}}"#), "boxes.size");
        assert_eq!(rejected_field(r#"{"boxes": {"gravity": -0.4}}"#), "boxes.gravity");
        assert_eq!(rejected_field(r#"{"ball": {"speed": -4.0}}"#), "ball.speed");
        assert_eq!(rejected_field(r#"{"pulse": {"speed": -1.0}}"#), "pulse.speed");
    }

    #[test]
    fn test_zero_speeds_allowed() {
        let settings = Settings::from_json(r#"{"boxes": {"spawn_speed": 0.0, "gravity": 0.0}}"#)
            .expect("still effects are valid");
        assert_eq!(settings.boxes.spawn_speed, 0.0);
    }

    #[test]
    fn test_json_survives_storage_round_trip() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        settings.starfield.focal_length = 128.0;
        let restored = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert!(restored.reduced_motion);
        assert_eq!(restored.starfield.focal_length, 128.0);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
        assert_eq!(Settings::default().motion_scale(), 1.0);
    }
}
