use kurbo::PathEl;
use resvg::tiny_skia;

use crate::{
    assets::decode::{SourceImage, premultiply_rgba8},
    foundation::{
        core::{BezPath, PxRect, RasterSize},
        error::{PrintError, PrintResult},
    },
    layout::fit::FitGeometry,
    render::pattern::PatternTile,
};

/// How new paint combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Clear covered pixels to fully transparent.
    Erase,
    /// Paint only where the surface is not yet opaque, beneath what is there.
    Under,
}

impl Composite {
    fn blend_mode(self) -> tiny_skia::BlendMode {
        match self {
            Self::SourceOver => tiny_skia::BlendMode::SourceOver,
            Self::Erase => tiny_skia::BlendMode::Clear,
            Self::Under => tiny_skia::BlendMode::DestinationOver,
        }
    }
}

/// Per-draw state: an optional clip path and the composite mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawParams<'a> {
    pub clip: Option<&'a BezPath>,
    pub composite: Composite,
}

impl<'a> DrawParams<'a> {
    pub fn clipped(clip: &'a BezPath) -> Self {
        Self {
            clip: Some(clip),
            composite: Composite::SourceOver,
        }
    }

    pub fn erase() -> Self {
        Self {
            clip: None,
            composite: Composite::Erase,
        }
    }

    pub fn under() -> Self {
        Self {
            clip: None,
            composite: Composite::Under,
        }
    }
}

/// Paint source for fills.
#[derive(Clone, Copy, Debug)]
pub enum Fill<'a> {
    /// Straight-alpha RGBA8.
    Solid([u8; 4]),
    /// Tiled from the surface origin.
    Pattern(&'a PatternTile),
}

pub const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Dashed or solid outline stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    /// Alternating dash and gap lengths in pixels. Empty means solid.
    pub dash: Vec<f64>,
    pub color: [u8; 4],
}

/// Output raster, premultiplied internally, transparent until painted.
#[derive(Clone, Debug)]
pub struct Surface {
    pixmap: tiny_skia::Pixmap,
}

impl Surface {
    pub fn new(size: RasterSize) -> PrintResult<Self> {
        let pixmap = tiny_skia::Pixmap::new(size.width_px, size.height_px).ok_or_else(|| {
            PrintError::render(format!(
                "failed to allocate {}x{} surface",
                size.width_px, size.height_px
            ))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> RasterSize {
        RasterSize {
            width_px: self.width(),
            height_px: self.height(),
        }
    }

    /// Straight-alpha RGBA8 at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Row-major straight-alpha RGBA8 copy of the whole surface.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    pub fn fill_rect(
        &mut self,
        rect: PxRect,
        fill: Fill<'_>,
        params: DrawParams<'_>,
    ) -> PrintResult<()> {
        let Some(r) = to_skia_rect(rect) else {
            return Ok(());
        };
        let mask = self.clip_mask(params.clip)?;
        let paint = make_paint(fill, params.composite);
        self.pixmap
            .fill_rect(r, &paint, tiny_skia::Transform::identity(), mask.as_ref());
        Ok(())
    }

    pub fn fill_path(
        &mut self,
        path: &BezPath,
        fill: Fill<'_>,
        params: DrawParams<'_>,
    ) -> PrintResult<()> {
        let Some(p) = to_skia_path(path) else {
            return Ok(());
        };
        let mask = self.clip_mask(params.clip)?;
        let paint = make_paint(fill, params.composite);
        self.pixmap.fill_path(
            &p,
            &paint,
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            mask.as_ref(),
        );
        Ok(())
    }

    pub fn stroke_path(
        &mut self,
        path: &BezPath,
        style: &StrokeStyle,
        params: DrawParams<'_>,
    ) -> PrintResult<()> {
        let Some(p) = to_skia_path(path) else {
            return Ok(());
        };
        let dash = if style.dash.is_empty() {
            None
        } else {
            let intervals = style.dash.iter().map(|&v| v as f32).collect();
            Some(
                tiny_skia::StrokeDash::new(intervals, 0.0)
                    .ok_or_else(|| PrintError::render(format!("invalid dash {:?}", style.dash)))?,
            )
        };
        let stroke = tiny_skia::Stroke {
            width: style.width as f32,
            dash,
            ..Default::default()
        };
        let mask = self.clip_mask(params.clip)?;
        let paint = make_paint(Fill::Solid(style.color), params.composite);
        self.pixmap.stroke_path(
            &p,
            &paint,
            &stroke,
            tiny_skia::Transform::identity(),
            mask.as_ref(),
        );
        Ok(())
    }

    /// Draw `geometry.source_rect` of `image` scaled onto `geometry.dest_rect`.
    pub fn draw_image(
        &mut self,
        image: &SourceImage,
        geometry: FitGeometry,
        params: DrawParams<'_>,
    ) -> PrintResult<()> {
        let (src, dst) = (geometry.source_rect, geometry.dest_rect);
        if src.width <= 0.0 || src.height <= 0.0 {
            return Err(PrintError::render("empty source rect"));
        }
        let Some(dest) = to_skia_rect(dst) else {
            return Ok(());
        };

        let source = source_pixmap(image)?;
        let sx = dst.width / src.width;
        let sy = dst.height / src.height;
        let transform = tiny_skia::Transform::from_row(
            sx as f32,
            0.0,
            0.0,
            sy as f32,
            (dst.x - src.x * sx) as f32,
            (dst.y - src.y * sy) as f32,
        );
        let paint = tiny_skia::Paint {
            shader: tiny_skia::Pattern::new(
                source.as_ref(),
                tiny_skia::SpreadMode::Pad,
                tiny_skia::FilterQuality::Bilinear,
                1.0,
                transform,
            ),
            anti_alias: true,
            blend_mode: params.composite.blend_mode(),
            ..Default::default()
        };
        let mask = self.clip_mask(params.clip)?;
        self.pixmap
            .fill_rect(dest, &paint, tiny_skia::Transform::identity(), mask.as_ref());
        Ok(())
    }

    fn clip_mask(&self, clip: Option<&BezPath>) -> PrintResult<Option<tiny_skia::Mask>> {
        let Some(clip) = clip else {
            return Ok(None);
        };
        let mut mask = tiny_skia::Mask::new(self.width(), self.height())
            .ok_or_else(|| PrintError::render("failed to allocate clip mask"))?;
        if let Some(p) = to_skia_path(clip) {
            mask.fill_path(
                &p,
                tiny_skia::FillRule::Winding,
                true,
                tiny_skia::Transform::identity(),
            );
        }
        Ok(Some(mask))
    }
}

fn make_paint(fill: Fill<'_>, composite: Composite) -> tiny_skia::Paint<'_> {
    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        blend_mode: composite.blend_mode(),
        ..Default::default()
    };
    match fill {
        Fill::Solid([r, g, b, a]) => paint.set_color_rgba8(r, g, b, a),
        Fill::Pattern(tile) => paint.shader = tile.shader(),
    }
    paint
}

fn source_pixmap(image: &SourceImage) -> PrintResult<tiny_skia::Pixmap> {
    let size = tiny_skia::IntSize::from_wh(image.width(), image.height())
        .ok_or_else(|| PrintError::render("source image has zero size"))?;
    tiny_skia::Pixmap::from_vec(premultiply_rgba8(image.as_raw()), size)
        .ok_or_else(|| PrintError::render("source pixels do not match image size"))
}

fn to_skia_rect(rect: PxRect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
