use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PrintResult, UploadRejection};

/// Immutable decoded raster, straight-alpha RGBA8.
///
/// Cloning is cheap: the pixels are shared, never mutated.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: Arc<image::RgbaImage>,
}

impl SourceImage {
    pub fn from_rgba(rgba: image::RgbaImage) -> Self {
        Self {
            rgba: Arc::new(rgba),
        }
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn rgba(&self) -> &image::RgbaImage {
        &self.rgba
    }

    /// Row-major straight-alpha RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.rgba.as_raw()
    }

    pub(crate) fn shares_pixels_with(&self, other: &SourceImage) -> bool {
        Arc::ptr_eq(&self.rgba, &other.rgba)
    }
}

/// Identify the image container from its magic bytes, without decoding.
pub fn sniff_image_format(bytes: &[u8]) -> Option<image::ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Decode uploaded bytes into a [`SourceImage`].
///
/// Content that does not sniff as an image is [`UploadRejection::InvalidInputType`] and
/// never reaches a decoder. Recognized containers that fail to decode are
/// [`UploadRejection::DecodeFailure`].
pub fn decode_upload(bytes: &[u8]) -> Result<SourceImage, UploadRejection> {
    let Some(format) = sniff_image_format(bytes) else {
        return Err(UploadRejection::InvalidInputType);
    };
    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| UploadRejection::decode_failure(format!("{format:?}: {e}")))?;
    Ok(SourceImage::from_rgba(dyn_img.to_rgba8()))
}

/// Decode image bytes from a trusted source (fixtures, CLI input without validation).
pub fn decode_image(bytes: &[u8]) -> PrintResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(SourceImage::from_rgba(dyn_img.to_rgba8()))
}

/// Straight RGBA8 to premultiplied RGBA8, the layout tiny-skia pixmaps expect.
pub(crate) fn premultiply_rgba8(rgba: &[u8]) -> Vec<u8> {
    let mut out = rgba.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
