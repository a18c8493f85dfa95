//! Sprite loading

use std::path::Path;

use anyhow::Context;

use crate::sim::SpriteImage;

/// Decode a PNG into an RGBA pixel buffer.
///
/// Images without an alpha channel are accepted but every pixel is opaque.
pub fn load_sprite(path: &Path) -> anyhow::Result<SpriteImage> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to load sprite image {}", path.display()))?;

    if !decoded.color().has_alpha() {
        log::warn!(
            "{} has no alpha channel; the whole rectangle will collide",
            path.display()
        );
    }

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        anyhow::bail!("Sprite image {} is empty", path.display());
    }
    let image = SpriteImage::from_rgba(width, height, rgba.into_raw())
        .with_context(|| format!("Bad pixel buffer in {}", path.display()))?;

    log::info!("Loaded sprite {} ({}x{})", path.display(), width, height);
    Ok(image)
}
