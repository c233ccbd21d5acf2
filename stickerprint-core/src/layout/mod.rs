/// Contain and cover fit geometry.
pub mod fit;
/// Layout descriptions, presets and validation.
pub mod spec;
