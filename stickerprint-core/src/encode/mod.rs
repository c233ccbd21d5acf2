/// Lossless PNG export.
pub mod png;
