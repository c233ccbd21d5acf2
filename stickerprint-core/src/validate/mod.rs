//! The validation gate: an upload is only accepted when it carries a scannable code.
//!
//! Detection itself is delegated to a [`detector::CodeDetector`] collaborator so the core
//! crate does not depend on any particular barcode library.

/// Detector collaborator trait and the frame it inspects.
pub mod detector;
/// Downscale, detect, and map results to accept/reject.
pub mod gate;
/// Cancel-and-replace handling for overlapping uploads.
pub mod slot;
