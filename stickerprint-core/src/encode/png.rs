use std::path::Path;

use anyhow::Context;
use image::ImageEncoder;

use crate::{foundation::error::PrintResult, render::surface::Surface};

/// Encode a finished surface as a straight-alpha RGBA8 PNG.
pub fn encode_png(surface: &Surface) -> PrintResult<Vec<u8>> {
    let rgba = surface.to_rgba8();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgba8,
        )
        .context("encode png")?;
    Ok(out)
}

/// Encode `surface` and write it to `path`.
pub fn write_png(surface: &Surface, path: impl AsRef<Path>) -> PrintResult<()> {
    let path = path.as_ref();
    let bytes = encode_png(surface)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Download-style file name, e.g. `support-ticket-50x75-300dpi.png`.
pub fn export_file_name(size_key: &str, dpi: u32) -> String {
    format!("support-ticket-{size_key}-{dpi}dpi.png")
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
