use crate::foundation::core::PxRect;

/// Which part of the source lands where on the destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitGeometry {
    /// Subregion of the source image, in source pixels.
    pub source_rect: PxRect,
    /// Where `source_rect` is drawn, in destination pixels.
    pub dest_rect: PxRect,
}

/// How a source image is placed into its target rect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitMode {
    /// Whole source, one axis matched. See [`contain_fit`].
    Contain,
    /// Centered crop filling the target. See [`cover_fit`].
    Cover,
}

pub fn fit(mode: FitMode, src_w: f64, src_h: f64, target: PxRect) -> FitGeometry {
    match mode {
        FitMode::Contain => contain_fit(src_w, src_h, target),
        FitMode::Cover => cover_fit(src_w, src_h, target),
    }
}

/// Scale the whole source so one axis matches `target` exactly and center the other.
///
/// The matched axis is the one along which the source is relatively *shorter*, so the
/// other axis overflows `target` symmetrically and the drawing always covers it. Callers
/// paint an underlay first so rounding gaps at the edges never show through.
pub fn contain_fit(src_w: f64, src_h: f64, target: PxRect) -> FitGeometry {
    let source_rect = PxRect::from_size(src_w, src_h);
    if src_w <= 0.0 || src_h <= 0.0 {
        return FitGeometry {
            source_rect,
            dest_rect: PxRect::new(target.x, target.y, 0.0, 0.0),
        };
    }

    let (dst_w, dst_h) = (target.width, target.height);
    let dest_rect = if src_w * dst_h > dst_w * src_h {
        let draw_w = src_w * dst_h / src_h;
        PxRect::new(target.x + (dst_w - draw_w) / 2.0, target.y, draw_w, dst_h)
    } else {
        let draw_h = src_h * dst_w / src_w;
        PxRect::new(target.x, target.y + (dst_h - draw_h) / 2.0, dst_w, draw_h)
    };

    FitGeometry {
        source_rect,
        dest_rect,
    }
}

/// Crop a centered slice of the source with the target's aspect ratio and map it onto the
/// whole target. No letterboxing; the overflowing axis of the source is cropped.
pub fn cover_fit(src_w: f64, src_h: f64, target: PxRect) -> FitGeometry {
    let (dst_w, dst_h) = (target.width, target.height);
    if src_w <= 0.0 || src_h <= 0.0 || dst_w <= 0.0 || dst_h <= 0.0 {
        return FitGeometry {
            source_rect: PxRect::from_size(src_w.max(0.0), src_h.max(0.0)),
            dest_rect: target,
        };
    }

    let lhs = src_w * dst_h;
    let rhs = dst_w * src_h;
    let source_rect = if lhs > rhs {
        let slice_w = (dst_w * src_h / dst_h).min(src_w);
        PxRect::new((src_w - slice_w) / 2.0, 0.0, slice_w, src_h)
    } else if lhs < rhs {
        let slice_h = (dst_h * src_w / dst_w).min(src_h);
        PxRect::new(0.0, (src_h - slice_h) / 2.0, src_w, slice_h)
    } else {
        PxRect::from_size(src_w, src_h)
    };

    FitGeometry {
        source_rect,
        dest_rect: target,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
