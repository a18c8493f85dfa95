//! The bouncing sprite and its pixel buffer
//!
//! Wall hits are pixel-perfect: only opaque pixels of the sprite image count.
//! The buffer is scanned row-major from the top-left every frame and the first
//! opaque pixel found past a screen edge decides which axis bounces.

use glam::{IVec2, UVec2, Vec2};

/// Axis whose velocity component was reversed by a wall hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    X,
    Y,
}

/// Error building a sprite image from raw pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBufferSizeMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl std::fmt::Display for PixelBufferSizeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pixel buffer holds {} bytes, expected {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for PixelBufferSizeMismatch {}

/// RGBA8 pixel buffer, top-left origin, never mutated after load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl SpriteImage {
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<Self, PixelBufferSizeMismatch> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(PixelBufferSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Raw RGBA bytes (row-major) for texture upload
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Color at `(x, y)`, `None` outside the image
    pub fn color(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Whether the pixel at `(x, y)` has non-zero alpha
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.color(x, y).is_some_and(|c| c[3] > 0)
    }

    /// Local coordinates of every opaque pixel, row-major from the top-left
    pub fn opaque_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.rgba
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| px[3] > 0)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}

/// A sprite that flies around and bounces off the screen edges
#[derive(Debug, Clone)]
pub struct BouncingSprite {
    pub position: Vec2,
    pub velocity: Vec2,
    image: SpriteImage,
}

impl BouncingSprite {
    /// Sprite at rest at the origin
    pub fn new(image: SpriteImage) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            image,
        }
    }

    pub fn image(&self) -> &SpriteImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Integer-truncated draw position
    pub fn draw_position(&self) -> IVec2 {
        IVec2::new(self.position.x as i32, self.position.y as i32)
    }

    /// Move, then reverse at most one velocity axis if an opaque pixel touches
    /// a screen edge. Edges are `0` and `screen - 1` on each axis, inclusive.
    pub fn update(&mut self, dt: f32, screen: UVec2) -> Option<BounceAxis> {
        self.position += self.velocity * dt;

        let max_x = screen.x as f32 - 1.0;
        let max_y = screen.y as f32 - 1.0;

        for (x, y) in self.image.opaque_pixels() {
            let world = self.position + Vec2::new(x as f32, y as f32);

            if world.x <= 0.0 || world.x >= max_x {
                self.velocity.x = -self.velocity.x;
                return Some(BounceAxis::X);
            }
            if world.y <= 0.0 || world.y >= max_y {
                self.velocity.y = -self.velocity.y;
                return Some(BounceAxis::Y);
            }
        }

        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const SCREEN: UVec2 = UVec2::new(800, 450);

    /// Image with the given local pixels fully opaque, the rest transparent
    pub(crate) fn image_with_opaque(width: u32, height: u32, opaque: &[(u32, u32)]) -> SpriteImage {
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        for &(x, y) in opaque {
            let idx = ((y * width + x) * 4) as usize;
            rgba[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
        SpriteImage::from_rgba(width, height, rgba).expect("valid buffer")
    }

    fn sprite_at(image: SpriteImage, position: Vec2, velocity: Vec2) -> BouncingSprite {
        let mut sprite = BouncingSprite::new(image);
        sprite.position = position;
        sprite.velocity = velocity;
        sprite
    }

    #[test]
    fn test_from_rgba_rejects_wrong_length() {
        let err = SpriteImage::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(err.expected, 16);
        assert_eq!(err.actual, 15);
    }

    #[test]
    fn test_opaque_pixels_row_major() {
        let image = image_with_opaque(3, 3, &[(2, 0), (0, 1), (1, 2), (0, 0)]);
        let pixels: Vec<_> = image.opaque_pixels().collect();
        assert_eq!(pixels, vec![(0, 0), (2, 0), (0, 1), (1, 2)]);
        assert!(image.is_opaque(2, 0));
        assert!(!image.is_opaque(1, 1));
        assert!(!image.is_opaque(5, 5));
    }

    #[test]
    fn test_left_edge_flips_x() {
        let image = image_with_opaque(1, 1, &[(0, 0)]);
        let mut sprite = sprite_at(image, Vec2::new(0.0, 100.0), Vec2::new(-50.0, 0.0));

        let hit = sprite.update(0.01, SCREEN);
        assert_eq!(hit, Some(BounceAxis::X));
        assert_eq!(sprite.velocity, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_right_edge_is_screen_minus_one() {
        let image = image_with_opaque(1, 1, &[(0, 0)]);
        let mut sprite = sprite_at(image.clone(), Vec2::new(798.0, 100.0), Vec2::ZERO);
        assert_eq!(sprite.update(0.0, SCREEN), None);

        let mut sprite = sprite_at(image, Vec2::new(799.0, 100.0), Vec2::new(30.0, 5.0));
        assert_eq!(sprite.update(0.0, SCREEN), Some(BounceAxis::X));
        assert_eq!(sprite.velocity, Vec2::new(-30.0, 5.0));
    }

    #[test]
    fn test_bottom_edge_flips_y() {
        let image = image_with_opaque(1, 1, &[(0, 0)]);
        let mut sprite = sprite_at(image, Vec2::new(300.0, 448.0), Vec2::new(10.0, 100.0));

        assert_eq!(sprite.update(0.01, SCREEN), Some(BounceAxis::Y));
        assert_eq!(sprite.velocity, Vec2::new(10.0, -100.0));
    }

    #[test]
    fn test_transparent_pixels_ignored() {
        // Opaque pixel sits 10px inside a fully transparent 20x20 box
        let image = image_with_opaque(20, 20, &[(10, 10)]);
        let mut sprite = sprite_at(image, Vec2::new(-5.0, -5.0), Vec2::new(-1.0, -1.0));

        assert_eq!(sprite.update(0.0, SCREEN), None);
        assert_eq!(sprite.velocity, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_fully_transparent_never_bounces() {
        let image = image_with_opaque(4, 4, &[]);
        let mut sprite = sprite_at(
            image,
            Vec2::new(-100.0, -100.0),
            Vec2::new(-10.0, -10.0),
        );
        assert_eq!(sprite.update(1.0, SCREEN), None);
        assert_eq!(sprite.position, Vec2::new(-110.0, -110.0));
    }

    #[test]
    fn test_corner_resolves_one_axis_by_scan_order() {
        // Top-left corner: both axes are past the edge, X is checked first
        let image = image_with_opaque(1, 1, &[(0, 0)]);
        let mut sprite = sprite_at(image, Vec2::new(0.0, 0.0), Vec2::new(-20.0, -20.0));

        assert_eq!(sprite.update(0.1, SCREEN), Some(BounceAxis::X));
        assert_eq!(sprite.velocity, Vec2::new(20.0, -20.0));
    }

    #[test]
    fn test_first_opaque_pixel_decides() {
        // Row 0 pixel is past the top edge; row 1 pixel is past the left edge.
        // Row-major scan reaches the top-edge pixel first, so Y bounces.
        let image = image_with_opaque(10, 2, &[(9, 0), (0, 1)]);
        let mut sprite = sprite_at(image, Vec2::new(-0.5, -0.5), Vec2::new(-1.0, -1.0));

        assert_eq!(sprite.update(0.0, SCREEN), Some(BounceAxis::Y));
        assert_eq!(sprite.velocity, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_draw_position_truncates() {
        let image = image_with_opaque(1, 1, &[]);
        let sprite = sprite_at(image, Vec2::new(12.9, -3.7), Vec2::ZERO);
        assert_eq!(sprite.draw_position(), IVec2::new(12, -3));
    }
}
