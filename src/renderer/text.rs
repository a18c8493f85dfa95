//! Built-in bitmap font and text layout
//!
//! Glyphs are 5x7 cells stored one row per byte (bit 4 = leftmost column).
//! A font size of `n` pixels maps to a cell scale of `n / 8`, so a line is
//! `n` pixels tall including one blank row of leading. Lowercase letters
//! render with the uppercase glyphs.

use glam::{UVec2, Vec2};

use super::shapes::rect;
use super::vertex::Vertex;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Glyph width plus one column of spacing
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Glyph height plus one row of leading
const LINE_CELLS: u32 = GLYPH_HEIGHT + 1;

const UNKNOWN: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

/// Bitmap rows for `c`; unsupported characters get a hollow box
pub fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        ' ' => [0x00; 7],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        _ => UNKNOWN,
    }
}

/// Size of one glyph cell in pixels
pub fn cell_size(font_size: u32) -> f32 {
    font_size as f32 / LINE_CELLS as f32
}

/// Width in pixels of a single line (no trailing spacing)
pub fn measure_text(text: &str, font_size: u32) -> i32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    let cells = chars * GLYPH_ADVANCE - 1;
    (cells as f32 * cell_size(font_size)) as i32
}

/// One positioned line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub x: i32,
    pub y: i32,
}

/// Lay out `text` split on `\n`, centered as a block on the screen.
///
/// The block is as wide as its widest line; each line is centered within the
/// block, and lines are `font_size` pixels apart.
pub fn layout_centered_lines(text: &str, font_size: u32, screen: UVec2) -> Vec<TextLine<'_>> {
    let lines: Vec<&str> = text.split('\n').collect();
    let size = font_size as i32;

    let max_width = lines
        .iter()
        .map(|line| measure_text(line, font_size))
        .max()
        .unwrap_or(0);
    let total_height = lines.len() as i32 * size;
    let start_x = (screen.x as i32 - max_width) / 2;
    let start_y = (screen.y as i32 - total_height) / 2;

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| TextLine {
            text: line,
            x: start_x + (max_width - measure_text(line, font_size)) / 2,
            y: start_y + i as i32 * size,
        })
        .collect()
}

/// Solid quads for every lit glyph cell of a single line
pub fn text_vertices(text: &str, origin: Vec2, font_size: u32, color: [f32; 4]) -> Vec<Vertex> {
    let cell = cell_size(font_size);
    let mut vertices = Vec::new();

    for (i, c) in text.chars().enumerate() {
        let glyph_x = origin.x + (i as u32 * GLYPH_ADVANCE) as f32 * cell;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let min = Vec2::new(glyph_x + col as f32 * cell, origin.y + row as f32 * cell);
                vertices.extend(rect(min, Vec2::splat(cell), color));
            }
        }
    }

    vertices
}
