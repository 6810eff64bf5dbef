//! Falling boxes with gravity, floor friction and box/box collisions
//!
//! Clicking the canvas drops a new box at the pointer with a random launch
//! velocity.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::Animation;
use crate::platform::{Color, Surface};
use crate::reflect_axis;
use crate::settings::BoxSettings;

/// Slack used when deciding a box rests on the floor
const FLOOR_EPSILON: f32 = 0.5;

/// A single axis-aligned box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingBox {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Color,
}

impl FallingBox {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, color: Color) -> Self {
        Self {
            pos,
            size,
            vel,
            color,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Overlap extent with another box, None when they don't intersect
    pub fn overlap(&self, other: &FallingBox) -> Option<Vec2> {
        let overlap = self.max().min(other.max()) - self.pos.max(other.pos);
        if overlap.x > 0.0 && overlap.y > 0.0 {
            Some(overlap)
        } else {
            None
        }
    }
}

/// The boxes effect
#[derive(Debug, Clone, Serialize)]
pub struct GravityBoxes {
    pub boxes: Vec<FallingBox>,
    pub settings: BoxSettings,
    /// Canvas size seen on the last step, used to clamp click spawns
    pub bounds: Vec2,
    #[serde(skip)]
    rng: Pcg32,
}

impl GravityBoxes {
    pub fn new(settings: BoxSettings, seed: u64) -> Self {
        Self {
            boxes: Vec::new(),
            settings,
            bounds: Vec2::ZERO,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Effect with the configured number of boxes dropped across the top
    pub fn with_initial_boxes(settings: BoxSettings, bounds: Vec2, seed: u64) -> Self {
        let mut fx = Self::new(settings, seed);
        fx.bounds = bounds;
        let count = fx.settings.initial_boxes;
        for i in 0..count {
            let x = bounds.x * (i as f32 + 1.0) / (count as f32 + 1.0);
            fx.spawn(Vec2::new(x, fx.settings.size));
        }
        fx
    }

    /// Append a box centered at `at` with a random launch velocity.
    /// The oldest box is evicted when the cap is reached.
    pub fn spawn(&mut self, at: Vec2) {
        let size = Vec2::splat(self.settings.size);
        let mut pos = at - size / 2.0;
        if self.bounds != Vec2::ZERO {
            pos = pos.clamp(Vec2::ZERO, (self.bounds - size).max(Vec2::ZERO));
        }

        let speed = self.settings.spawn_speed;
        let vel = if speed > 0.0 {
            Vec2::new(
                self.rng.random_range(-speed..=speed),
                self.rng.random_range(-speed..=0.0),
            )
        } else {
            Vec2::ZERO
        };
        let hue = self.rng.random_range(0.0..360.0);
        let color = Color::from_hsl(hue, 0.7, 0.6);

        if self.settings.max_boxes > 0 && self.boxes.len() >= self.settings.max_boxes {
            let excess = self.boxes.len() + 1 - self.settings.max_boxes;
            self.boxes.drain(..excess);
        }
        self.boxes.push(FallingBox::new(pos, size, vel, color));
        log::debug!("Spawned box at ({:.0}, {:.0}), {} total", pos.x, pos.y, self.boxes.len());
    }

    /// Push overlapping pairs apart along the axis of least penetration
    /// and exchange their velocities on that axis with damping.
    fn resolve_pairs(&mut self) {
        let restitution = self.settings.restitution;
        let n = self.boxes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.boxes.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                let Some(overlap) = a.overlap(b) else {
                    continue;
                };

                let delta = b.center() - a.center();
                if overlap.x < overlap.y {
                    let dir = if delta.x >= 0.0 { 1.0 } else { -1.0 };
                    a.pos.x -= dir * overlap.x / 2.0;
                    b.pos.x += dir * overlap.x / 2.0;
                    // Only exchange when approaching
                    if (b.vel.x - a.vel.x) * dir < 0.0 {
                        let (va, vb) = (a.vel.x, b.vel.x);
                        a.vel.x = vb * restitution;
                        b.vel.x = va * restitution;
                    }
                } else {
                    let dir = if delta.y >= 0.0 { 1.0 } else { -1.0 };
                    a.pos.y -= dir * overlap.y / 2.0;
                    b.pos.y += dir * overlap.y / 2.0;
                    if (b.vel.y - a.vel.y) * dir < 0.0 {
                        let (va, vb) = (a.vel.y, b.vel.y);
                        a.vel.y = vb * restitution;
                        b.vel.y = va * restitution;
                    }
                }
            }
        }
    }
}

impl Animation for GravityBoxes {
    fn step(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        let gravity = self.settings.gravity;

        for b in &mut self.boxes {
            b.vel.y += gravity;
            b.pos += b.vel;
        }

        self.resolve_pairs();

        // Walls last so every box ends the frame inside the canvas
        let restitution = self.settings.restitution;
        let friction = self.settings.friction;
        for b in &mut self.boxes {
            reflect_axis(&mut b.pos.x, &mut b.vel.x, b.size.x, bounds.x, restitution);
            reflect_axis(&mut b.pos.y, &mut b.vel.y, b.size.y, bounds.y, restitution);

            let on_floor = b.pos.y + b.size.y >= bounds.y - FLOOR_EPSILON;
            if on_floor {
                b.vel.x *= friction;
                // Settle instead of micro-bouncing under gravity
                if b.vel.y.abs() < gravity * 2.0 {
                    b.vel.y = 0.0;
                }
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for b in &self.boxes {
            surface.fill_rect(b.pos, b.size, b.color);
        }
    }

    fn on_click(&mut self, pos: Vec2) {
        self.spawn(pos);
    }

    fn accepts_clicks(&self) -> bool {
        true
    }
}
