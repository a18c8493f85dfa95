//! Platform layer
//!
//! Native-only glue between winit and the simulation:
//! - Frame timing (delta time, target frame rate, FPS readout)
//! - The OS window as a [`WindowPlacement`](crate::sim::WindowPlacement)

pub mod time;
pub mod window;

pub use time::{FpsCounter, FrameClock, FramePacer};
pub use window::OsWindow;
