/// Convenience result type used across stickerprint.
pub type PrintResult<T> = Result<T, PrintError>;

/// Reasons an upload is turned away at the validation gate.
///
/// These never reach the layout engine: the gate handles them and the session drops back
/// to an empty, retryable state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// The uploaded bytes do not look like image data. Checked before any decode attempt.
    #[error("upload is not image data")]
    InvalidInputType,

    /// The image decoded fine but carries no scannable code.
    #[error("no scannable code found in image")]
    CodeNotFound,

    /// Decoding failed, either in the image decoder or inside the code detector.
    #[error("decode failure: {0}")]
    DecodeFailure(String),
}

impl UploadRejection {
    /// Build a [`UploadRejection::DecodeFailure`] value.
    pub fn decode_failure(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Message suitable for an error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInputType => "Please upload an image file.",
            Self::CodeNotFound => {
                "No code was found in this image. Upload a photo that shows the code clearly."
            }
            Self::DecodeFailure(_) => "The image could not be read. Please try again.",
        }
    }

    /// Whether a banner for this rejection may disappear on its own.
    ///
    /// A missing code needs an explicit acknowledgment from the user.
    pub fn auto_dismiss(&self) -> bool {
        !matches!(self, Self::CodeNotFound)
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PrintError {
    /// Invalid user-provided configuration (dpi out of range, malformed layout file).
    #[error("validation error: {0}")]
    Validation(String),

    /// Zero, negative or non-finite physical dimensions, or parts that do not fit.
    #[error("geometry error: {0}")]
    DegenerateGeometry(String),

    /// Errors while allocating or drawing a surface.
    #[error("render error: {0}")]
    Render(String),

    /// An upload was rejected by the validation gate.
    #[error("upload rejected: {0}")]
    Upload(#[from] UploadRejection),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrintError {
    /// Build a [`PrintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PrintError::DegenerateGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`PrintError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
