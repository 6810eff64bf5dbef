//! Per-frame driver shared by the browser loop and headless runs

use std::cell::Cell;
use std::rc::Rc;

use super::surface::Surface;
use crate::sim::Animation;

/// Cancellation flag shared between a running loop and its handle
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// State advanced and the surface was redrawn; schedule the next frame
    Drawn,
    /// Surface unavailable; nothing touched, schedule the next frame
    Skipped,
    /// Loop was cancelled; do not schedule again
    Stopped,
}

impl FrameOutcome {
    pub fn reschedule(self) -> bool {
        !matches!(self, FrameOutcome::Stopped)
    }
}

/// Advance, resolve bounds, clear and redraw one frame
pub fn run_frame<A, S>(animation: &mut A, surface: &mut S, token: &CancelToken) -> FrameOutcome
where
    A: Animation + ?Sized,
    S: Surface,
{
    if token.is_cancelled() {
        return FrameOutcome::Stopped;
    }
    if !surface.is_available() {
        return FrameOutcome::Skipped;
    }

    animation.step(surface.size());
    surface.clear();
    animation.draw(surface);
    FrameOutcome::Drawn
}

/// Run `frames` frames back to back (headless simulation)
pub fn run_frames<A, S>(animation: &mut A, surface: &mut S, frames: u32) -> u32
where
    A: Animation + ?Sized,
    S: Surface,
{
    let token = CancelToken::new();
    let mut drawn = 0;
    for _ in 0..frames {
        if run_frame(animation, surface, &token) == FrameOutcome::Drawn {
            drawn += 1;
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::surface::{DrawCommand, RecordingSurface};
    use crate::sim::BouncingBall;
    use glam::Vec2;

    #[test]
    fn test_frame_draws_and_reschedules() {
        let mut ball = BouncingBall::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 1.0));
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let token = CancelToken::new();

        let outcome = run_frame(&mut ball, &mut surface, &token);
        assert_eq!(outcome, FrameOutcome::Drawn);
        assert!(outcome.reschedule());
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert_eq!(surface.commands.len(), 2);
        assert_eq!(ball.pos, Vec2::new(52.0, 51.0));
    }

    #[test]
    fn test_cancelled_loop_stops_without_stepping() {
        let mut ball = BouncingBall::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 1.0));
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let token = CancelToken::new();
        let handle_side = token.clone();
        handle_side.cancel();

        let outcome = run_frame(&mut ball, &mut surface, &token);
        assert_eq!(outcome, FrameOutcome::Stopped);
        assert!(!outcome.reschedule());
        assert_eq!(ball.pos, Vec2::new(50.0, 50.0));
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_unavailable_surface_skips_frame() {
        let mut ball = BouncingBall::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 1.0));
        let mut surface = RecordingSurface::new(200.0, 100.0);
        surface.available = false;

        let outcome = run_frame(&mut ball, &mut surface, &CancelToken::new());
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert!(outcome.reschedule());
        assert_eq!(ball.pos, Vec2::new(50.0, 50.0));
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn test_run_frames_counts_drawn() {
        let mut ball = BouncingBall::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 1.0));
        let mut surface = RecordingSurface::new(200.0, 100.0);
        assert_eq!(run_frames(&mut ball, &mut surface, 10), 10);
    }
}
