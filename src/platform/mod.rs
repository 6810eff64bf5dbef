//! Platform abstraction layer
//!
//! - `surface`: drawing target trait, colors, headless recorder
//! - `frame`: per-frame driver with explicit cancellation
//! - `web`: Canvas 2D surface, `requestAnimationFrame` loop and exports (WASM only)

pub mod frame;
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame::{CancelToken, FrameOutcome, run_frame, run_frames};
pub use surface::{Color, DrawCommand, RecordingSurface, Surface};
