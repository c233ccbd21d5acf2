use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::{
        PhysicalSize, RasterSize, check_dpi, check_non_negative_mm, check_positive_mm,
    },
    error::{PrintError, PrintResult},
    units::raster_size,
};
use crate::layout::fit::FitMode;

/// L-size photo print sheet, 89 x 127 mm.
pub const L_SIZE_SHEET: PhysicalSize = PhysicalSize {
    width_mm: 89.0,
    height_mm: 127.0,
};

/// Standard 50 x 75 mm sticker.
pub const STICKER_50X75: PhysicalSize = PhysicalSize {
    width_mm: 50.0,
    height_mm: 75.0,
};

pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_CORNER_RADIUS_MM: f64 = 3.0;

/// Names accepted by [`LayoutSpec::preset`].
pub const PRESET_NAMES: [&str; 3] = ["plain", "sticker", "cutout"];

/// Transparent window punched into the sticker, measured from its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CutoutSpec {
    /// First row of the window, from the sticker top.
    pub top_mm: f64,
    /// End row of the window (exclusive), from the sticker top.
    pub bottom_mm: f64,
    /// Window width, from the sticker's left edge.
    pub width_mm: f64,
    /// Radius of the two inner corners. The edge-side corners stay square.
    pub corner_radius_mm: f64,
}

impl Default for CutoutSpec {
    fn default() -> Self {
        Self {
            top_mm: 20.0,
            bottom_mm: 55.0,
            width_mm: 9.0,
            corner_radius_mm: 9.0,
        }
    }
}

/// What to print and at which resolution.
///
/// Serialized externally tagged, e.g.
/// `{"sheet_with_sticker": {"sheet": {...}, "sticker": {...}, "corner_radius_mm": 3.0, "dpi": 300}}`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSpec {
    /// The whole canvas is the target size; the image is contain-fit on white.
    PlainResize { target: PhysicalSize, dpi: u32 },
    /// A rounded sticker centered on a patterned sheet, with a dashed cut guide.
    SheetWithSticker {
        sheet: PhysicalSize,
        sticker: PhysicalSize,
        corner_radius_mm: f64,
        dpi: u32,
    },
    /// As [`LayoutSpec::SheetWithSticker`], with a window punched through the sticker.
    SheetWithCutout {
        sheet: PhysicalSize,
        sticker: PhysicalSize,
        corner_radius_mm: f64,
        #[serde(default)]
        cutout: CutoutSpec,
        dpi: u32,
    },
    /// User-chosen canvas, contain-fit on white.
    CustomFreeSize { width_mm: f64, height_mm: f64, dpi: u32 },
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self::sticker_sheet(DEFAULT_DPI)
    }
}

impl LayoutSpec {
    /// 50 x 75 mm sticker on an L-size sheet.
    pub fn sticker_sheet(dpi: u32) -> Self {
        Self::SheetWithSticker {
            sheet: L_SIZE_SHEET,
            sticker: STICKER_50X75,
            corner_radius_mm: DEFAULT_CORNER_RADIUS_MM,
            dpi,
        }
    }

    /// [`LayoutSpec::sticker_sheet`] with the default cutout window.
    pub fn cutout_sheet(dpi: u32) -> Self {
        Self::SheetWithCutout {
            sheet: L_SIZE_SHEET,
            sticker: STICKER_50X75,
            corner_radius_mm: DEFAULT_CORNER_RADIUS_MM,
            cutout: CutoutSpec::default(),
            dpi,
        }
    }

    /// Plain 50 x 75 mm print.
    pub fn plain(dpi: u32) -> Self {
        Self::PlainResize {
            target: STICKER_50X75,
            dpi,
        }
    }

    pub fn custom(width_mm: f64, height_mm: f64, dpi: u32) -> Self {
        Self::CustomFreeSize {
            width_mm,
            height_mm,
            dpi,
        }
    }

    /// Look up a named preset (see [`PRESET_NAMES`]).
    pub fn preset(name: &str, dpi: u32) -> Option<Self> {
        match name {
            "plain" => Some(Self::plain(dpi)),
            "sticker" => Some(Self::sticker_sheet(dpi)),
            "cutout" => Some(Self::cutout_sheet(dpi)),
            _ => None,
        }
    }

    pub fn dpi(&self) -> u32 {
        match *self {
            Self::PlainResize { dpi, .. }
            | Self::SheetWithSticker { dpi, .. }
            | Self::SheetWithCutout { dpi, .. }
            | Self::CustomFreeSize { dpi, .. } => dpi,
        }
    }

    /// Return the same layout at another resolution.
    pub fn with_dpi(mut self, new_dpi: u32) -> Self {
        match &mut self {
            Self::PlainResize { dpi, .. }
            | Self::SheetWithSticker { dpi, .. }
            | Self::SheetWithCutout { dpi, .. }
            | Self::CustomFreeSize { dpi, .. } => *dpi = new_dpi,
        }
        self
    }

    /// Physical size of the output canvas.
    pub fn canvas_size(&self) -> PhysicalSize {
        match *self {
            Self::PlainResize { target, .. } => target,
            Self::SheetWithSticker { sheet, .. } | Self::SheetWithCutout { sheet, .. } => sheet,
            Self::CustomFreeSize {
                width_mm,
                height_mm,
                ..
            } => PhysicalSize {
                width_mm,
                height_mm,
            },
        }
    }

    /// Plain and custom prints keep the whole photo; stickers are cropped to fill.
    pub fn fit_mode(&self) -> FitMode {
        match self {
            Self::PlainResize { .. } | Self::CustomFreeSize { .. } => FitMode::Contain,
            Self::SheetWithSticker { .. } | Self::SheetWithCutout { .. } => FitMode::Cover,
        }
    }

    pub fn raster_size(&self) -> RasterSize {
        raster_size(self.canvas_size(), self.dpi())
    }

    /// Check dpi range and geometry. Nothing is rendered from a layout that fails here.
    pub fn validate(&self) -> PrintResult<()> {
        check_dpi(self.dpi())?;
        match *self {
            Self::PlainResize { target, .. } => target.check("target"),
            Self::CustomFreeSize {
                width_mm,
                height_mm,
                ..
            } => {
                check_positive_mm(width_mm, "custom width")?;
                check_positive_mm(height_mm, "custom height")
            }
            Self::SheetWithSticker {
                sheet,
                sticker,
                corner_radius_mm,
                ..
            } => check_sheet(sheet, sticker, corner_radius_mm),
            Self::SheetWithCutout {
                sheet,
                sticker,
                corner_radius_mm,
                cutout,
                ..
            } => {
                check_sheet(sheet, sticker, corner_radius_mm)?;
                check_cutout(sticker, cutout)
            }
        }?;

        let px = self.raster_size();
        if px.width_px == 0 || px.height_px == 0 {
            return Err(PrintError::geometry(format!(
                "canvas rounds to {}x{} px at {} dpi",
                px.width_px,
                px.height_px,
                self.dpi()
            )));
        }
        Ok(())
    }

    /// Short label naming the layout kind and size, used in export file names.
    pub fn size_key(&self) -> String {
        match *self {
            Self::PlainResize { target, .. } => {
                format!("{}x{}", target.width_mm, target.height_mm)
            }
            Self::SheetWithSticker { sticker, .. } => {
                format!("{}x{}", sticker.width_mm, sticker.height_mm)
            }
            Self::SheetWithCutout { sticker, .. } => {
                format!("{}x{}-cutout", sticker.width_mm, sticker.height_mm)
            }
            Self::CustomFreeSize {
                width_mm,
                height_mm,
                ..
            } => format!("custom-{width_mm}x{height_mm}"),
        }
    }

    /// Parse and validate a layout from JSON.
    pub fn from_json(s: &str) -> PrintResult<Self> {
        let spec: Self = serde_json::from_str(s)
            .map_err(|e| PrintError::validation(format!("layout json: {e}")))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read, parse and validate a layout JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> PrintResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read layout file '{}'", path.display()))?;
        Self::from_json(&s)
    }
}

fn check_sheet(sheet: PhysicalSize, sticker: PhysicalSize, radius_mm: f64) -> PrintResult<()> {
    sheet.check("sheet")?;
    sticker.check("sticker")?;
    check_non_negative_mm(radius_mm, "corner radius")?;
    if !sticker.fits_within(sheet) {
        return Err(PrintError::geometry(format!(
            "sticker {}x{} mm does not fit on sheet {}x{} mm",
            sticker.width_mm, sticker.height_mm, sheet.width_mm, sheet.height_mm
        )));
    }
    Ok(())
}

fn check_cutout(sticker: PhysicalSize, cutout: CutoutSpec) -> PrintResult<()> {
    check_non_negative_mm(cutout.top_mm, "cutout top")?;
    check_positive_mm(cutout.width_mm, "cutout width")?;
    check_non_negative_mm(cutout.corner_radius_mm, "cutout corner radius")?;
    if !cutout.bottom_mm.is_finite() || cutout.bottom_mm <= cutout.top_mm {
        return Err(PrintError::geometry(format!(
            "cutout bottom {} mm must be below its top {} mm",
            cutout.bottom_mm, cutout.top_mm
        )));
    }
    if cutout.bottom_mm > sticker.height_mm || cutout.width_mm > sticker.width_mm {
        return Err(PrintError::geometry(format!(
            "cutout extends past the {}x{} mm sticker",
            sticker.width_mm, sticker.height_mm
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spec.rs"]
mod tests;
