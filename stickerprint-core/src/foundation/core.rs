use crate::foundation::error::{PrintError, PrintResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Lowest accepted print resolution.
pub const MIN_DPI: u32 = 72;
/// Highest accepted print resolution.
pub const MAX_DPI: u32 = 1200;

/// Physical dimensions in millimeters. Both sides must be strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhysicalSize {
    pub fn new(width_mm: f64, height_mm: f64) -> PrintResult<Self> {
        let size = Self {
            width_mm,
            height_mm,
        };
        size.check("size")?;
        Ok(size)
    }

    pub(crate) fn check(self, what: &str) -> PrintResult<()> {
        check_positive_mm(self.width_mm, &format!("{what} width"))?;
        check_positive_mm(self.height_mm, &format!("{what} height"))
    }

    pub fn fits_within(self, outer: PhysicalSize) -> bool {
        self.width_mm <= outer.width_mm && self.height_mm <= outer.height_mm
    }
}

/// Pixel dimensions derived from a [`PhysicalSize`] and a dpi.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RasterSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl RasterSize {
    pub fn rect(self) -> PxRect {
        PxRect::from_size(f64::from(self.width_px), f64::from(self.height_px))
    }
}

/// Axis-aligned rectangle in pixel space. Fractional coordinates are allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow (or shrink, for negative `d`) by `d` on every side.
    pub fn inflate(self, d: f64) -> Self {
        Self::new(
            self.x - d,
            self.y - d,
            self.width + 2.0 * d,
            self.height + 2.0 * d,
        )
    }

    /// Smallest rect on whole pixel edges that contains `self`.
    pub fn round_out(self) -> Self {
        let (x0, y0) = (self.x.floor(), self.y.floor());
        Self::new(x0, y0, self.right().ceil() - x0, self.bottom().ceil() - y0)
    }

    /// True when `other` lies inside `self`, allowing `eps` of floating point slack.
    pub fn contains_rect(self, other: PxRect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    pub fn to_kurbo(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

pub(crate) fn check_positive_mm(value: f64, what: &str) -> PrintResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PrintError::geometry(format!(
            "{what} must be a positive finite number of millimeters, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_non_negative_mm(value: f64, what: &str) -> PrintResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PrintError::geometry(format!(
            "{what} must be a non-negative finite number of millimeters, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_dpi(dpi: u32) -> PrintResult<()> {
    if !(MIN_DPI..=MAX_DPI).contains(&dpi) {
        return Err(PrintError::validation(format!(
            "dpi must be within {MIN_DPI}..={MAX_DPI}, got {dpi}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
