//! Pulsing circle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Animation;
use crate::platform::{Color, Surface};
use crate::settings::PulseSettings;

/// A centered circle breathing between a minimum and maximum radius
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulsingCircle {
    pub center: Vec2,
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Radius change per frame
    pub speed: f32,
    pub growing: bool,
    pub color: Color,
}

impl PulsingCircle {
    pub fn new(settings: &PulseSettings, motion_scale: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            radius: settings.min_radius,
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
            speed: settings.speed * motion_scale,
            growing: true,
            color: settings.color,
        }
    }

    /// Largest radius that fits the canvas
    fn limit(&self, bounds: Vec2) -> f32 {
        self.max_radius.min(bounds.min_element() / 2.0).max(0.0)
    }

    /// Opacity fades as the circle expands
    pub fn alpha(&self) -> f32 {
        let span = self.max_radius - self.min_radius;
        if span <= 0.0 {
            return 1.0;
        }
        let t = ((self.radius - self.min_radius) / span).clamp(0.0, 1.0);
        1.0 - 0.7 * t
    }
}

impl Animation for PulsingCircle {
    fn step(&mut self, bounds: Vec2) {
        self.center = bounds / 2.0;
        let max = self.limit(bounds);
        let min = self.min_radius.min(max);

        if self.growing {
            self.radius += self.speed;
            if self.radius >= max {
                self.radius = max;
                self.growing = false;
            }
        } else {
            self.radius -= self.speed;
            if self.radius <= min {
                self.radius = min;
                self.growing = true;
            }
        }
        self.radius = self.radius.clamp(min, max);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.center, self.radius, self.color.with_alpha(self.alpha()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pulse(min: f32, max: f32, speed: f32) -> PulsingCircle {
        PulsingCircle::new(
            &PulseSettings {
                min_radius: min,
                max_radius: max,
                speed,
                ..Default::default()
            },
            1.0,
        )
    }

    #[test]
    fn test_grows_then_shrinks() {
        let mut circle = pulse(10.0, 20.0, 4.0);
        let bounds = Vec2::new(200.0, 200.0);
        let radii: Vec<f32> = (0..8)
            .map(|_| {
                circle.step(bounds);
                circle.radius
            })
            .collect();
        assert_eq!(radii, vec![14.0, 18.0, 20.0, 16.0, 12.0, 10.0, 14.0, 18.0]);
        assert_eq!(circle.center, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_max_radius_fits_canvas() {
        let mut circle = pulse(5.0, 500.0, 50.0);
        let bounds = Vec2::new(300.0, 120.0);
        for _ in 0..20 {
            circle.step(bounds);
            assert!(circle.radius <= 60.0);
        }
    }

    #[test]
    fn test_alpha_fades_with_radius() {
        let mut circle = pulse(10.0, 20.0, 1.0);
        let small = circle.alpha();
        circle.radius = 20.0;
        assert!(circle.alpha() < small);
        assert!((circle.alpha() - 0.3).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_circle_inside_canvas(
            w in 1.0f32..1000.0,
            h in 1.0f32..1000.0,
            speed in 0.1f32..30.0,
            frames in 1usize..200,
        ) {
            let mut circle = pulse(10.0, 80.0, speed);
            let bounds = Vec2::new(w, h);
            for _ in 0..frames {
                circle.step(bounds);
                prop_assert!(circle.center.x - circle.radius >= -1e-3);
                prop_assert!(circle.center.x + circle.radius <= w + 1e-3);
                prop_assert!(circle.center.y - circle.radius >= -1e-3);
                prop_assert!(circle.center.y + circle.radius <= h + 1e-3);
            }
        }
    }
}
