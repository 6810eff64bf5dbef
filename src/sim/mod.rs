//! Effect simulations
//!
//! Each effect owns its entities and advances them by a fixed per-frame
//! increment. No effect shares state with another, and none depends on the
//! browser: drawing goes through [`Surface`].

pub mod ball;
pub mod boxes;
pub mod pulse;
pub mod starfield;
pub mod typewriter;

use glam::Vec2;

use crate::platform::Surface;

pub use ball::BouncingBall;
pub use boxes::{FallingBox, GravityBoxes};
pub use pulse::PulsingCircle;
pub use starfield::{Star, Starfield};
pub use typewriter::{Typewriter, TypewriterPhase};

/// A self-contained canvas effect
pub trait Animation {
    /// Advance one frame and resolve collisions against `bounds` (width, height)
    fn step(&mut self, bounds: Vec2);

    /// Draw the current state; the surface has already been cleared
    fn draw(&self, surface: &mut dyn Surface);

    /// Pointer click at canvas coordinates. Most effects ignore it.
    fn on_click(&mut self, _pos: Vec2) {}

    /// Whether the effect wants pointer clicks routed to it
    fn accepts_clicks(&self) -> bool {
        false
    }
}

/// Kinetic energy of a unit-mass body
#[inline]
pub fn kinetic_energy(vel: Vec2) -> f32 {
    0.5 * vel.length_squared()
}
