use std::borrow::Cow;
use std::sync::Arc;

use image::imageops::FilterType;

use crate::{
    assets::decode::{SourceImage, decode_upload},
    foundation::error::UploadRejection,
    validate::detector::{CodeDetector, Detection, DetectorFrame},
};

/// Longest side, in pixels, handed to the detector.
pub const DEFAULT_MAX_DECODE_DIM: u32 = 1000;

/// Environment override for [`GateConfig::max_decode_dim`].
pub const MAX_DECODE_DIM_ENV: &str = "STICKERPRINT_MAX_DECODE_DIM";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateConfig {
    /// Images with a longer side are downscaled to exactly this before detection.
    pub max_decode_dim: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_decode_dim: DEFAULT_MAX_DECODE_DIM,
        }
    }
}

impl GateConfig {
    pub fn from_env() -> Self {
        let max_decode_dim = std::env::var(MAX_DECODE_DIM_ENV)
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_DECODE_DIM);
        Self { max_decode_dim }
    }
}

/// Accept/reject check requiring a detectable code in an uploaded image.
#[derive(Clone)]
pub struct ValidationGate {
    detector: Arc<dyn CodeDetector>,
    config: GateConfig,
}

impl std::fmt::Debug for ValidationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ValidationGate {
    pub fn new(detector: Arc<dyn CodeDetector>) -> Self {
        Self {
            detector,
            config: GateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> GateConfig {
        self.config
    }

    /// Run the detector over `image`, downscaled first if it exceeds the decode cap.
    #[tracing::instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn validate(&self, image: &SourceImage) -> Result<(), UploadRejection> {
        let frame_img = downscale_for_decode(image.rgba(), self.config.max_decode_dim);
        let frame = DetectorFrame::new(frame_img.width(), frame_img.height(), frame_img.as_raw());
        tracing::debug!(
            frame_width = frame.width,
            frame_height = frame.height,
            "running code detector"
        );

        match self.detector.detect(&frame) {
            Ok(Detection::Found { .. }) => Ok(()),
            Ok(Detection::NotFound) => {
                tracing::warn!("no code found in upload");
                Err(UploadRejection::CodeNotFound)
            }
            Err(err) => {
                tracing::warn!(error = %err, "code detector failed");
                Err(UploadRejection::decode_failure(format!("{err:#}")))
            }
        }
    }

    /// Decode raw upload bytes and validate them. Returns the accepted image.
    pub fn validate_bytes(&self, bytes: &[u8]) -> Result<SourceImage, UploadRejection> {
        let image = decode_upload(bytes).inspect_err(|rejection| {
            tracing::warn!(%rejection, len = bytes.len(), "upload rejected before detection");
        })?;
        self.validate(&image)?;
        Ok(image)
    }

    /// Decode and validate on tokio's blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_validation(&self, bytes: Vec<u8>) -> ValidationTask {
        let gate = self.clone();
        ValidationTask {
            handle: tokio::task::spawn_blocking(move || gate.validate_bytes(&bytes)),
        }
    }
}

/// Awaitable, cancellable unit of validation work.
#[derive(Debug)]
pub struct ValidationTask {
    handle: tokio::task::JoinHandle<Result<SourceImage, UploadRejection>>,
}

impl ValidationTask {
    /// Request cancellation. Only a task that has not started yet is dropped; a decode
    /// already running on the blocking pool finishes and its result is still delivered.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the outcome. `None` means the task was cancelled before producing one.
    pub async fn join(self) -> Option<Result<SourceImage, UploadRejection>> {
        match self.handle.await {
            Ok(outcome) => Some(outcome),
            Err(err) if err.is_cancelled() => None,
            Err(err) => Some(Err(UploadRejection::decode_failure(format!(
                "validation worker failed: {err}"
            )))),
        }
    }
}

/// Dimensions handed to the detector for a `width x height` image under `max_dim`.
///
/// The longer side becomes exactly `max_dim`; the other keeps the aspect ratio.
pub fn decode_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let longer = width.max(height);
    if max_dim == 0 || longer <= max_dim {
        return (width, height);
    }
    let scale_side = |side: u32| -> u32 {
        let scaled = (f64::from(side) * f64::from(max_dim) / f64::from(longer)).round();
        (scaled as u32).max(1)
    };
    if width >= height {
        (max_dim, scale_side(height))
    } else {
        (scale_side(width), max_dim)
    }
}

fn downscale_for_decode(rgba: &image::RgbaImage, max_dim: u32) -> Cow<'_, image::RgbaImage> {
    let (width, height) = rgba.dimensions();
    let (next_width, next_height) = decode_dimensions(width, height, max_dim);
    if (next_width, next_height) == (width, height) {
        return Cow::Borrowed(rgba);
    }
    Cow::Owned(image::imageops::resize(
        rgba,
        next_width,
        next_height,
        FilterType::Triangle,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/validate/gate.rs"]
mod tests;
