//! Perspective starfield
//!
//! Stars live in a view-space box in front of the camera and drift toward
//! it. Screen position is `center + xy * focal / z`, so near stars move
//! faster and render bigger and brighter than far ones.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::Animation;
use crate::consts::{STAR_FAR, STAR_NEAR};
use crate::platform::{Color, Surface};
use crate::settings::StarfieldSettings;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Star {
    /// View-space position; z is depth
    pub pos: Vec3,
    /// Projected canvas position from the last step
    pub screen: Vec2,
}

impl Star {
    /// Closeness in 0 (far plane) to 1 (camera)
    pub fn nearness(&self) -> f32 {
        (1.0 - self.pos.z / STAR_FAR).clamp(0.0, 1.0)
    }

    pub fn radius(&self) -> f32 {
        0.3 + 2.2 * self.nearness()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
    pub count: usize,
    /// Depth travelled per frame
    pub speed: f32,
    pub focal_length: f32,
    /// Stars recycled so far
    pub respawns: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl Starfield {
    pub fn new(settings: &StarfieldSettings, count: usize, motion_scale: f32, seed: u64) -> Self {
        Self {
            stars: Vec::with_capacity(count),
            count,
            speed: settings.speed * motion_scale,
            focal_length: settings.focal_length,
            respawns: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    fn project(&self, pos: Vec3, bounds: Vec2) -> Vec2 {
        bounds / 2.0 + Vec2::new(pos.x, pos.y) * (self.focal_length / pos.z)
    }

    /// Random view-space position whose projection at depth `z` is on screen
    fn random_star(&mut self, z: f32, bounds: Vec2) -> Vec3 {
        let spread = bounds / 2.0 * (z / self.focal_length);
        let x = if spread.x > 0.0 {
            self.rng.random_range(-spread.x..=spread.x)
        } else {
            0.0
        };
        let y = if spread.y > 0.0 {
            self.rng.random_range(-spread.y..=spread.y)
        } else {
            0.0
        };
        Vec3::new(x, y, z)
    }

    fn populate(&mut self, bounds: Vec2) {
        while self.stars.len() < self.count {
            let z = self.rng.random_range(STAR_NEAR..=STAR_FAR);
            let pos = self.random_star(z, bounds);
            let screen = self.project(pos, bounds);
            self.stars.push(Star { pos, screen });
        }
    }

    fn in_bounds(screen: Vec2, bounds: Vec2) -> bool {
        screen.x >= 0.0 && screen.y >= 0.0 && screen.x <= bounds.x && screen.y <= bounds.y
    }
}

impl Animation for Starfield {
    fn step(&mut self, bounds: Vec2) {
        self.populate(bounds);

        for i in 0..self.stars.len() {
            let mut pos = self.stars[i].pos;
            pos.z -= self.speed;

            let mut screen = if pos.z > STAR_NEAR {
                self.project(pos, bounds)
            } else {
                Vec2::NEG_ONE
            };

            // Passed the camera or drifted off screen: recycle at the far plane
            if !Self::in_bounds(screen, bounds) {
                pos = self.random_star(STAR_FAR, bounds);
                screen = self.project(pos, bounds).clamp(Vec2::ZERO, bounds);
                self.respawns += 1;
            }

            self.stars[i] = Star { pos, screen };
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let white = Color::rgb(1.0, 1.0, 1.0);
        for star in &self.stars {
            let alpha = 0.2 + 0.8 * star.nearness();
            surface.fill_circle(star.screen, star.radius(), white.with_alpha(alpha));
        }
    }
}
