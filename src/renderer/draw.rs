//! Per-frame draw list
//!
//! Draw calls are recorded as CPU-side vertex batches in screen pixels and
//! uploaded by [`RenderState::render`](super::RenderState::render). While a
//! camera scope is open every recorded vertex is translated by its offset.

use glam::{IVec2, UVec2, Vec2};

use super::shapes::{circle, circle_segments, textured_quad};
use super::text::{layout_centered_lines, text_vertices};
use super::vertex::{Vertex, colors};
use crate::sim::CameraTarget;

/// Texture a batch samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    /// 1x1 white texel, for untextured shapes and text
    Solid,
    /// The bouncing sprite's image
    Sprite,
}

/// Consecutive vertices sharing one texture
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub slot: TextureSlot,
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone)]
pub struct DrawList {
    screen: UVec2,
    clear_color: [f32; 4],
    batches: Vec<Batch>,
    translation: Vec2,
}

impl DrawList {
    pub fn new(screen: UVec2) -> Self {
        Self {
            screen,
            clear_color: colors::RAYWHITE,
            batches: Vec::new(),
            translation: Vec2::ZERO,
        }
    }

    /// Drop last frame's draws and track the current screen size
    pub fn begin_frame(&mut self, screen: UVec2) {
        self.screen = screen;
        self.batches.clear();
        self.translation = Vec2::ZERO;
    }

    pub fn clear_background(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let vertices = circle(center, radius, color, circle_segments(radius));
        self.push(TextureSlot::Solid, vertices);
    }

    /// Sprite texture at integer pixel coordinates, untinted
    pub fn sprite(&mut self, position: IVec2, size: UVec2) {
        let quad = textured_quad(position.as_vec2(), size.as_vec2(), colors::WHITE);
        self.push(TextureSlot::Sprite, quad);
    }

    /// Single line of text with its top-left corner at `(x, y)`
    pub fn text(&mut self, text: &str, x: i32, y: i32, font_size: u32, color: [f32; 4]) {
        let origin = Vec2::new(x as f32, y as f32);
        self.push(TextureSlot::Solid, text_vertices(text, origin, font_size, color));
    }

    /// Multi-line text centered on the screen
    pub fn text_centered_multi(&mut self, text: &str, font_size: u32, color: [f32; 4]) {
        for line in layout_centered_lines(text, font_size, self.screen) {
            self.text(line.text, line.x, line.y, font_size, color);
        }
    }

    /// "<n> FPS" readout
    pub fn fps(&mut self, x: i32, y: i32, fps: u32, font_size: u32) {
        self.text(&format!("{fps} FPS"), x, y, font_size, colors::LIME);
    }

    pub fn screen(&self) -> UVec2 {
        self.screen
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    fn push(&mut self, slot: TextureSlot, vertices: impl IntoIterator<Item = Vertex>) {
        let offset = self.translation;
        let mut translated = vertices
            .into_iter()
            .map(|mut v| {
                v.position[0] += offset.x;
                v.position[1] += offset.y;
                v
            })
            .peekable();
        if translated.peek().is_none() {
            return;
        }

        match self.batches.last_mut() {
            Some(batch) if batch.slot == slot => batch.vertices.extend(translated),
            _ => self.batches.push(Batch {
                slot,
                vertices: translated.collect(),
            }),
        }
    }
}

impl CameraTarget for DrawList {
    fn begin_mode_2d(&mut self, offset: Vec2) {
        self.translation = offset;
    }

    fn end_mode_2d(&mut self) {
        self.translation = Vec2::ZERO;
    }
}
