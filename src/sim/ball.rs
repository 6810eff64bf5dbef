//! Bouncing ball

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Animation;
use crate::consts::*;
use crate::platform::{Color, Surface};
use crate::reflect_axis;
use crate::settings::BallSettings;

/// A single ball bouncing off the canvas edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouncingBall {
    /// Center
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub restitution: f32,
    pub color: Color,
    /// Wall contacts so far
    pub bounces: u32,
}

impl BouncingBall {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        let defaults = BallSettings::default();
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            restitution: defaults.restitution,
            color: defaults.color,
            bounces: 0,
        }
    }

    /// Ball centered in `bounds`, heading down-right
    pub fn from_settings(settings: &BallSettings, bounds: Vec2, motion_scale: f32) -> Self {
        let speed = settings.speed * motion_scale;
        Self {
            pos: bounds / 2.0,
            vel: Vec2::splat(speed),
            radius: settings.radius,
            restitution: settings.restitution,
            color: settings.color,
            bounces: 0,
        }
    }
}

impl Animation for BouncingBall {
    fn step(&mut self, bounds: Vec2) {
        self.pos += self.vel;

        // Resolve against the ball's bounding square
        let r = Vec2::splat(self.radius);
        let diameter = self.radius * 2.0;
        let mut edge = self.pos - r;
        let hit_x = reflect_axis(&mut edge.x, &mut self.vel.x, diameter, bounds.x, self.restitution);
        let hit_y = reflect_axis(&mut edge.y, &mut self.vel.y, diameter, bounds.y, self.restitution);
        self.pos = edge + r;

        if hit_x || hit_y {
            self.bounces += 1;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, self.color);
    }
}
