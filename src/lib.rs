//! Folio FX - canvas effects and content pipeline for a portfolio site
//!
//! Core modules:
//! - `sim`: Per-frame effect simulations (ball, boxes, pulse, starfield, typewriter)
//! - `platform`: Drawing surface abstraction, frame driver, browser bindings
//! - `content`: Front-matter extraction and post/project listings
//! - `markup`: Code block metadata transform (file name, highlighted lines)
//! - `settings`: Data-driven effect tuning

pub mod content;
pub mod markup;
pub mod platform;
pub mod settings;
pub mod sim;

pub use content::{ContentEntry, ContentError, ContentRecord, list_records, load_entry};
pub use markup::{CodeMeta, HighlightLines};
pub use settings::Settings;

/// Effect defaults shared by the simulations
pub mod consts {
    /// Velocity multiplier applied on every bounce
    pub const RESTITUTION: f32 = 0.9;
    /// Horizontal velocity multiplier applied while a box rests on the floor
    pub const GROUND_FRICTION: f32 = 0.98;
    /// Downward acceleration for the boxes effect (pixels/frame²)
    pub const GRAVITY: f32 = 0.4;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_SPEED: f32 = 4.0;

    /// Box defaults
    pub const BOX_SIZE: f32 = 40.0;
    pub const MAX_BOXES: usize = 64;
    /// Maximum launch speed for click-spawned boxes (per axis)
    pub const BOX_SPAWN_SPEED: f32 = 6.0;

    /// Pulse defaults
    pub const PULSE_MIN_RADIUS: f32 = 10.0;
    pub const PULSE_MAX_RADIUS: f32 = 80.0;
    pub const PULSE_SPEED: f32 = 0.8;

    /// Starfield defaults
    pub const STAR_COUNT: usize = 400;
    pub const STAR_SPEED: f32 = 4.0;
    /// Depth at which stars spawn
    pub const STAR_FAR: f32 = 1000.0;
    /// Depth at which stars are recycled
    pub const STAR_NEAR: f32 = 1.0;
    /// Projection focal length in pixels
    pub const STAR_FOCAL: f32 = 256.0;
}

/// Clamp an entity's extent into `[0, limit]` on one axis and reflect its
/// velocity with damping when it touched a wall.
///
/// `pos` is the low edge and `extent` the entity's size along the axis.
/// Returns true when a bounce happened.
#[inline]
pub fn reflect_axis(pos: &mut f32, vel: &mut f32, extent: f32, limit: f32, restitution: f32) -> bool {
    let max = (limit - extent).max(0.0);
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = vel.abs() * restitution;
        true
    } else if *pos > max {
        *pos = max;
        *vel = -vel.abs() * restitution;
        true
    } else {
        false
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Install the panic hook and console logger once the module loads
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Folio FX loaded");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_axis_low_wall() {
        let mut pos = -3.0;
        let mut vel = -10.0;
        assert!(reflect_axis(&mut pos, &mut vel, 5.0, 100.0, 0.5));
        assert_eq!(pos, 0.0);
        assert!((vel - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_reflect_axis_high_wall() {
        let mut pos = 98.0;
        let mut vel = 4.0;
        assert!(reflect_axis(&mut pos, &mut vel, 5.0, 100.0, 0.5));
        assert_eq!(pos, 95.0);
        assert!((vel + 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_reflect_axis_inside() {
        let mut pos = 50.0;
        let mut vel = 4.0;
        assert!(!reflect_axis(&mut pos, &mut vel, 5.0, 100.0, 0.5));
        assert_eq!(pos, 50.0);
        assert_eq!(vel, 4.0);
    }

    #[test]
    fn test_reflect_axis_entity_larger_than_canvas() {
        let mut pos = 10.0;
        let mut vel = 1.0;
        reflect_axis(&mut pos, &mut vel, 200.0, 100.0, 0.9);
        assert_eq!(pos, 0.0);
    }
}
