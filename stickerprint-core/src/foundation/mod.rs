//! Shared vocabulary: physical and pixel geometry, unit conversion, errors.

/// Physical sizes, pixel rects and range checks.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
/// Millimeter to pixel conversion.
pub mod units;
