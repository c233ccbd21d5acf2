use std::f64::consts::{FRAC_PI_2, PI};

use crate::foundation::core::{BezPath, Point, PxRect, Vec2};

/// Flattening tolerance for corner arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.05;

/// Per-corner radii in pixels. A zero radius is a square corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub fn uniform(r: f64) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }

    /// Only the two right-hand corners rounded.
    pub fn right(r: f64) -> Self {
        Self {
            top_right: r,
            bottom_right: r,
            ..Self::default()
        }
    }

    /// Only the two left-hand corners rounded.
    pub fn left(r: f64) -> Self {
        Self {
            top_left: r,
            bottom_left: r,
            ..Self::default()
        }
    }

    pub fn is_square(self) -> bool {
        self.as_array().iter().all(|&r| r <= 0.0)
    }

    /// Grow each rounded corner by `d`; square corners stay square.
    pub fn inflate(self, d: f64) -> Self {
        let grow = |r: f64| if r > 0.0 { (r + d).max(0.0) } else { 0.0 };
        Self {
            top_left: grow(self.top_left),
            top_right: grow(self.top_right),
            bottom_right: grow(self.bottom_right),
            bottom_left: grow(self.bottom_left),
        }
    }

    /// Scale all radii down uniformly until the two radii sharing any edge fit on it.
    pub fn fit_to(self, width: f64, height: f64) -> Self {
        let r = self.non_negative();
        let mut factor: f64 = 1.0;
        for (sum, len) in [
            (r.top_left + r.top_right, width),
            (r.bottom_left + r.bottom_right, width),
            (r.top_left + r.bottom_left, height),
            (r.top_right + r.bottom_right, height),
        ] {
            if sum > len && sum > 0.0 {
                factor = factor.min(len.max(0.0) / sum);
            }
        }
        Self {
            top_left: r.top_left * factor,
            top_right: r.top_right * factor,
            bottom_right: r.bottom_right * factor,
            bottom_left: r.bottom_left * factor,
        }
    }

    fn non_negative(self) -> Self {
        let clean = |r: f64| if r.is_finite() && r > 0.0 { r } else { 0.0 };
        Self {
            top_left: clean(self.top_left),
            top_right: clean(self.top_right),
            bottom_right: clean(self.bottom_right),
            bottom_left: clean(self.bottom_left),
        }
    }

    fn as_array(self) -> [f64; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl From<f64> for CornerRadii {
    fn from(r: f64) -> Self {
        Self::uniform(r)
    }
}

/// Closed rounded-rectangle outline.
///
/// Traversal is clockwise (y down), starting just after the top-left corner: top edge,
/// top-right arc, right edge, bottom-right arc, bottom edge, bottom-left arc, left edge,
/// top-left arc. Square corners contribute no arc.
pub fn rounded_rect_path(rect: PxRect, radii: impl Into<CornerRadii>) -> BezPath {
    let r = radii.into().fit_to(rect.width, rect.height);
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());

    let mut path = BezPath::new();
    path.move_to((x0 + r.top_left, y0));
    path.line_to((x1 - r.top_right, y0));
    corner_arc(
        &mut path,
        Point::new(x1 - r.top_right, y0 + r.top_right),
        r.top_right,
        -FRAC_PI_2,
    );
    path.line_to((x1, y1 - r.bottom_right));
    corner_arc(
        &mut path,
        Point::new(x1 - r.bottom_right, y1 - r.bottom_right),
        r.bottom_right,
        0.0,
    );
    path.line_to((x0 + r.bottom_left, y1));
    corner_arc(
        &mut path,
        Point::new(x0 + r.bottom_left, y1 - r.bottom_left),
        r.bottom_left,
        FRAC_PI_2,
    );
    path.line_to((x0, y0 + r.top_left));
    corner_arc(
        &mut path,
        Point::new(x0 + r.top_left, y0 + r.top_left),
        r.top_left,
        PI,
    );
    path.close_path();
    path
}

/// Outline for a stroke of `stroke_width` whose inner edge sits on `rect`'s boundary.
///
/// The rect and every rounded corner are inflated by half the stroke width.
pub fn stroke_guide_path(
    rect: PxRect,
    radii: impl Into<CornerRadii>,
    stroke_width: f64,
) -> BezPath {
    let half = stroke_width / 2.0;
    rounded_rect_path(rect.inflate(half), radii.into().inflate(half))
}

fn corner_arc(path: &mut BezPath, center: Point, radius: f64, start_angle: f64) {
    if radius <= 0.0 {
        return;
    }
    let arc = kurbo::Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle: FRAC_PI_2,
        x_rotation: 0.0,
    };
    arc.to_cubic_beziers(ARC_TOLERANCE, |p1, p2, p3| path.curve_to(p1, p2, p3));
}

#[cfg(test)]
#[path = "../../tests/unit/render/path.rs"]
mod tests;
