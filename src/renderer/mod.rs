//! wgpu rendering module
//!
//! Frames are recorded into a [`DrawList`] and drawn by [`RenderState`] as
//! textured triangles in screen-pixel coordinates.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use draw::{Batch, DrawList, TextureSlot};
pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};

use crate::consts::{FPS_FONT_SIZE, FPS_POSITION};
use crate::settings::Settings;
use crate::sim::Scene;

/// Record one frame: background, then everything else under the camera shake
pub fn compose_frame(draw: &mut DrawList, scene: &Scene, settings: &Settings, fps: u32) {
    draw.clear_background(colors::RAYWHITE);

    let mut camera = scene.camera_shake.begin(draw);

    camera.circle(scene.ball.position, scene.ball.radius(), colors::RED);
    camera.sprite(scene.sprite.draw_position(), scene.sprite.image().size());
    camera.text_centered_multi(&settings.message, settings.font_size, colors::LIGHTGRAY);
    if settings.show_fps {
        camera.fps(FPS_POSITION.0, FPS_POSITION.1, fps, FPS_FONT_SIZE);
    }

    camera.end();
}
