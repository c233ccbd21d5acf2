use resvg::tiny_skia;

use crate::foundation::{
    error::{PrintError, PrintResult},
    units::scaled_px,
};

/// Tile side in pixels at the reference 300 dpi.
pub const PATTERN_TILE_PX_AT_REFERENCE: f64 = 20.0;
/// Tile background (straight RGBA8).
pub const PATTERN_BACKGROUND: [u8; 4] = [0xf2, 0xf2, 0xf2, 0xff];
/// Diagonal line color (straight RGBA8).
pub const PATTERN_LINE: [u8; 4] = [0xd0, 0xd0, 0xd0, 0xff];

/// Square, repeatable hatch tile: light fill crossed by two 1 px diagonals.
#[derive(Clone, Debug)]
pub struct PatternTile {
    pixmap: tiny_skia::Pixmap,
}

impl PartialEq for PatternTile {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.data() == other.data()
    }
}

impl PatternTile {
    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// Premultiplied RGBA8 tile pixels.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Repeating paint source anchored at the surface origin.
    pub(crate) fn shader(&self) -> tiny_skia::Shader<'_> {
        tiny_skia::Pattern::new(
            self.pixmap.as_ref(),
            tiny_skia::SpreadMode::Repeat,
            tiny_skia::FilterQuality::Nearest,
            1.0,
            tiny_skia::Transform::identity(),
        )
    }
}

/// Build the hatch tile for `dpi`. The side is 20 px at 300 dpi, scaled linearly.
///
/// Pure: the same dpi always yields bit-identical pixels.
pub fn build_pattern(dpi: u32) -> PrintResult<PatternTile> {
    let size = scaled_px(PATTERN_TILE_PX_AT_REFERENCE, dpi);
    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| PrintError::render(format!("failed to allocate {size}px pattern tile")))?;
    let [r, g, b, a] = PATTERN_BACKGROUND;
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

    let s = size as f32;
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to(0.0, 0.0);
    pb.line_to(s, s);
    pb.move_to(s, 0.0);
    pb.line_to(0.0, s);
    let cross = pb
        .finish()
        .ok_or_else(|| PrintError::render("empty pattern path"))?;

    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    let [r, g, b, a] = PATTERN_LINE;
    paint.set_color_rgba8(r, g, b, a);
    let stroke = tiny_skia::Stroke {
        width: 1.0,
        ..Default::default()
    };
    pixmap.stroke_path(
        &cross,
        &paint,
        &stroke,
        tiny_skia::Transform::identity(),
        None,
    );

    Ok(PatternTile { pixmap })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pattern.rs"]
mod tests;
