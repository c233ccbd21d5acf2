use crate::{
    assets::decode::SourceImage,
    foundation::{
        core::{PxRect, RasterSize},
        error::PrintResult,
        units::{scaled_px, to_pixels},
    },
    layout::{
        fit::{FitMode, fit},
        spec::{CutoutSpec, LayoutSpec},
    },
    render::{
        path::{CornerRadii, rounded_rect_path, stroke_guide_path},
        pattern::build_pattern,
        surface::{DrawParams, Fill, StrokeStyle, Surface, WHITE},
    },
};

/// Cut guide color (straight RGBA8).
pub const GUIDE_COLOR: [u8; 4] = [0x99, 0x99, 0x99, 0xff];
const GUIDE_DASH_AT_REFERENCE: f64 = 10.0;
const GUIDE_GAP_AT_REFERENCE: f64 = 5.0;
const GUIDE_WIDTH_AT_REFERENCE: f64 = 2.0;

/// Pixel placement of a sticker on its sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetGeometry {
    pub canvas: RasterSize,
    /// Sticker panel, centered on the canvas.
    pub sticker: PxRect,
    pub corner_radius_px: f64,
    pub cutout: Option<CutoutGeometry>,
}

/// Pixel placement of a cutout window, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutoutGeometry {
    pub window: PxRect,
    pub radii: CornerRadii,
}

/// Pixel geometry of a sheet layout, or `None` for layouts without a sheet.
pub fn sheet_geometry(layout: &LayoutSpec) -> Option<SheetGeometry> {
    let (sticker, corner_radius_mm, cutout) = match *layout {
        LayoutSpec::SheetWithSticker {
            sticker,
            corner_radius_mm,
            ..
        } => (sticker, corner_radius_mm, None),
        LayoutSpec::SheetWithCutout {
            sticker,
            corner_radius_mm,
            cutout,
            ..
        } => (sticker, corner_radius_mm, Some(cutout)),
        LayoutSpec::PlainResize { .. } | LayoutSpec::CustomFreeSize { .. } => return None,
    };

    let dpi = layout.dpi();
    let canvas = layout.raster_size();
    let sticker_w = f64::from(to_pixels(sticker.width_mm, dpi));
    let sticker_h = f64::from(to_pixels(sticker.height_mm, dpi));
    let sticker = PxRect::new(
        (f64::from(canvas.width_px) - sticker_w) / 2.0,
        (f64::from(canvas.height_px) - sticker_h) / 2.0,
        sticker_w,
        sticker_h,
    );

    Some(SheetGeometry {
        canvas,
        sticker,
        corner_radius_px: f64::from(to_pixels(corner_radius_mm, dpi)),
        cutout: cutout.map(|c| cutout_geometry(sticker, c, dpi)),
    })
}

/// The window hugs the sticker's left edge: square there, rounded on the inner side.
fn cutout_geometry(sticker: PxRect, cutout: CutoutSpec, dpi: u32) -> CutoutGeometry {
    let top = to_pixels(cutout.top_mm, dpi);
    let bottom = to_pixels(cutout.bottom_mm, dpi);
    CutoutGeometry {
        window: PxRect::new(
            sticker.x,
            sticker.y + f64::from(top),
            f64::from(to_pixels(cutout.width_mm, dpi)),
            f64::from(bottom.saturating_sub(top)),
        ),
        radii: CornerRadii::right(f64::from(to_pixels(cutout.corner_radius_mm, dpi))),
    }
}

/// Dashed cut guide style at `dpi`.
pub fn guide_stroke(dpi: u32) -> StrokeStyle {
    StrokeStyle {
        width: f64::from(scaled_px(GUIDE_WIDTH_AT_REFERENCE, dpi)),
        dash: vec![
            f64::from(scaled_px(GUIDE_DASH_AT_REFERENCE, dpi)),
            f64::from(scaled_px(GUIDE_GAP_AT_REFERENCE, dpi)),
        ],
        color: GUIDE_COLOR,
    }
}

/// Compose `image` onto a fresh surface according to `layout`.
///
/// The layout is validated first; nothing is drawn from an invalid one.
#[tracing::instrument(skip(image), fields(src_w = image.width(), src_h = image.height()))]
pub fn render(layout: &LayoutSpec, image: &SourceImage) -> PrintResult<Surface> {
    layout.validate()?;
    match sheet_geometry(layout) {
        Some(geometry) => render_sheet(&geometry, layout.dpi(), layout.fit_mode(), image),
        None => render_plain(layout.raster_size(), layout.fit_mode(), image),
    }
}

fn render_plain(canvas: RasterSize, mode: FitMode, image: &SourceImage) -> PrintResult<Surface> {
    let mut surface = Surface::new(canvas)?;
    let full = canvas.rect();
    surface.fill_rect(full, Fill::Solid(WHITE), DrawParams::default())?;

    let placed = fit(mode, f64::from(image.width()), f64::from(image.height()), full);
    tracing::debug!(?mode, dest = ?placed.dest_rect, "fit image");
    surface.draw_image(image, placed, DrawParams::default())?;
    Ok(surface)
}

fn render_sheet(
    geometry: &SheetGeometry,
    dpi: u32,
    mode: FitMode,
    image: &SourceImage,
) -> PrintResult<Surface> {
    let mut surface = Surface::new(geometry.canvas)?;
    let tile = build_pattern(dpi)?;
    surface.fill_rect(
        geometry.canvas.rect(),
        Fill::Pattern(&tile),
        DrawParams::default(),
    )?;

    let panel = rounded_rect_path(geometry.sticker, geometry.corner_radius_px);
    surface.fill_path(&panel, Fill::Solid(WHITE), DrawParams::default())?;

    let placed = fit(
        mode,
        f64::from(image.width()),
        f64::from(image.height()),
        geometry.sticker,
    );
    tracing::debug!(?mode, sticker = ?geometry.sticker, source = ?placed.source_rect, "fit image");
    surface.draw_image(image, placed, DrawParams::clipped(&panel))?;

    if let Some(cutout) = geometry.cutout {
        tracing::debug!(window = ?cutout.window, "punch cutout");
        let window = rounded_rect_path(cutout.window, cutout.radii);
        surface.fill_path(&window, Fill::Solid(WHITE), DrawParams::erase())?;
        // Refill beneath whatever survived the erase, so antialiased edges end opaque.
        let refill = build_pattern(dpi)?;
        surface.fill_rect(
            cutout.window.round_out(),
            Fill::Pattern(&refill),
            DrawParams::under(),
        )?;
    }

    let style = guide_stroke(dpi);
    let guide = stroke_guide_path(geometry.sticker, geometry.corner_radius_px, style.width);
    surface.stroke_path(&guide, &style, DrawParams::default())?;
    Ok(surface)
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
