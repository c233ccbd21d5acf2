use crate::foundation::core::{PhysicalSize, RasterSize};

pub const MM_PER_INCH: f64 = 25.4;

/// Resolution at which stroke widths, dash lengths and tile sizes are authored.
pub const REFERENCE_DPI: u32 = 300;

/// Convert a physical length to whole pixels: `round(mm / 25.4 * dpi)`.
///
/// Ties round half away from zero (`f64::round`). Every millimeter conversion in the crate
/// goes through here so layouts stay pixel-exact across call sites.
pub fn to_pixels(mm: f64, dpi: u32) -> u32 {
    let px = (mm / MM_PER_INCH * f64::from(dpi)).round();
    if px.is_nan() || px <= 0.0 {
        return 0;
    }
    px as u32
}

/// Scale a pixel length authored at [`REFERENCE_DPI`] to `dpi`, rounded, never below 1.
pub fn scaled_px(base_px_at_reference: f64, dpi: u32) -> u32 {
    let px = (base_px_at_reference * f64::from(dpi) / f64::from(REFERENCE_DPI)).round();
    if px.is_nan() || px < 1.0 {
        return 1;
    }
    px as u32
}

pub fn raster_size(size: PhysicalSize, dpi: u32) -> RasterSize {
    RasterSize {
        width_px: to_pixels(size.width_mm, dpi),
        height_px: to_pixels(size.height_mm, dpi),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/units.rs"]
mod tests;
