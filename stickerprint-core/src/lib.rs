//! stickerprint turns an uploaded photo into a print-ready raster at a physical size.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: uploaded bytes are sniffed, decoded and handed to a [`CodeDetector`];
//!    only images carrying a scannable code are accepted ([`ValidationGate`], [`UploadSlot`]).
//! 2. **Lay out**: a [`LayoutSpec`] fixes the canvas in millimeters and a dpi; every length
//!    goes through [`to_pixels`].
//! 3. **Render**: [`render`] composes the image on a [`Surface`]: contain-fit for plain prints,
//!    cover-fit inside a rounded sticker panel on a patterned sheet, optionally with a
//!    transparent cutout window and always with a dashed cut guide.
//! 4. **Export**: [`encode_png`] produces lossless PNG bytes.
//!
//! [`Session`] ties these together for one user: it holds the accepted image and active layout
//! and drops back to an empty, retryable state whenever an upload is rejected.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same layout and image always produce identical pixels.
//! - **Explicit rounding**: millimeter conversions round half away from zero.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;
mod validate;

pub use assets::decode::{SourceImage, decode_image, decode_upload, sniff_image_format};
pub use encode::png::{encode_png, export_file_name, write_png};
pub use foundation::core::{
    BezPath, MAX_DPI, MIN_DPI, PhysicalSize, Point, PxRect, RasterSize, Rect, Vec2,
};
pub use foundation::error::{PrintError, PrintResult, UploadRejection};
pub use foundation::units::{MM_PER_INCH, REFERENCE_DPI, raster_size, scaled_px, to_pixels};
pub use layout::fit::{FitGeometry, FitMode, contain_fit, cover_fit, fit};
pub use layout::spec::{
    CutoutSpec, DEFAULT_CORNER_RADIUS_MM, DEFAULT_DPI, L_SIZE_SHEET, LayoutSpec, PRESET_NAMES,
    STICKER_50X75,
};
pub use render::engine::{
    CutoutGeometry, GUIDE_COLOR, SheetGeometry, guide_stroke, render, sheet_geometry,
};
pub use render::path::{CornerRadii, rounded_rect_path, stroke_guide_path};
pub use render::pattern::{
    PATTERN_BACKGROUND, PATTERN_LINE, PATTERN_TILE_PX_AT_REFERENCE, PatternTile, build_pattern,
};
pub use render::surface::{Composite, DrawParams, Fill, StrokeStyle, Surface, WHITE};
pub use session::state::Session;
pub use validate::detector::{CodeDetector, Detection, DetectorFrame};
pub use validate::gate::{
    DEFAULT_MAX_DECODE_DIM, GateConfig, MAX_DECODE_DIM_ENV, ValidationGate, ValidationTask,
    decode_dimensions,
};
pub use validate::slot::{UploadOutcome, UploadSlot};
