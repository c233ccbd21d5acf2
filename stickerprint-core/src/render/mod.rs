//! CPU compositing of a layout onto a pixel surface.

/// Layout engine entry point.
pub mod engine;
/// Rounded-rectangle outlines for panels, clips and cut guides.
pub mod path;
/// Decorative hatch tile for sheet margins.
pub mod pattern;
/// Drawing surface with explicit clip and composite per draw.
pub mod surface;
