//! Bounce Shake - a bouncing sprite with camera and window shake
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, pixel-perfect wall hits, shake effects)
//! - `renderer`: wgpu rendering pipeline and draw list
//! - `platform`: winit glue (frame timing, OS window placement)
//! - `assets`: Sprite image loading
//! - `settings`: Runtime configuration

pub mod app;
pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, ShakeParams};

use glam::Vec2;
use rand::Rng;

/// Demo configuration constants
pub mod consts {
    /// Default window dimensions
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 450;
    pub const WINDOW_TITLE: &str = "Sneakernet Studio - Hello World";
    pub const TARGET_FPS: u32 = 240;

    /// Moving entity (red ball)
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_START: (f32, f32) = (400.0, 225.0);
    pub const BALL_VELOCITY: (f32, f32) = (100.0, 50.0);

    /// Sprite launch speed ranges (pixels/s, inclusive)
    pub const SPRITE_SPEED_X: (i32, i32) = (200, 250);
    pub const SPRITE_SPEED_Y: (i32, i32) = (10, 100);

    /// Shake fired on every sprite bounce
    pub const CAMERA_SHAKE_INTENSITY: f32 = 35.0;
    pub const CAMERA_SHAKE_DURATION: f32 = 0.45;
    pub const WINDOW_SHAKE_INTENSITY: f32 = 25.0;
    pub const WINDOW_SHAKE_DURATION: f32 = 0.4;

    pub const SPRITE_PATH: &str = "assets/textures/VWSBrain.png";
    pub const MESSAGE: &str = "VAPORWARE SOFTWORKS\npresents\nSNEAKERNET STUDIO";
    pub const MESSAGE_FONT_SIZE: u32 = 30;
    pub const FPS_POSITION: (i32, i32) = (10, 10);
    pub const FPS_FONT_SIZE: u32 = 20;

    /// Resolution of `random_float` (number of steps across the range)
    pub const RANDOM_FLOAT_STEPS: i32 = 10_000;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation between two vectors
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Elastic ease-out: overshoots past 1.0 and settles back.
///
/// Exact at both ends (`0 -> 0`, `1 -> 1`). Peaks at roughly 1.373 near t = 0.135.
#[inline]
pub fn ease_out_elastic(t: f32) -> f32 {
    const C4: f32 = (2.0 * std::f32::consts::PI) / 3.0;
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

/// Quadratic curve over the remaining fraction `t`: `(1 - t)^2`
#[inline]
pub fn ease_out_quad_remaining(t: f32) -> f32 {
    (1.0 - t) * (1.0 - t)
}

/// Uniform float in `[min, max]`, quantized to `RANDOM_FLOAT_STEPS` steps
pub fn random_float<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    let steps = consts::RANDOM_FLOAT_STEPS;
    let k = rng.random_range(0..=steps);
    min + (k as f32 / steps as f32) * (max - min)
}
