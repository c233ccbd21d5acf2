use crate::{
    assets::decode::SourceImage,
    encode::png::export_file_name,
    foundation::error::{PrintResult, UploadRejection},
    layout::spec::LayoutSpec,
    render::{engine::render, surface::Surface},
    validate::slot::UploadOutcome,
};

/// One user's working state: the accepted image (if any) and the active layout.
///
/// Starts empty with the default layout. Every rejection drops the image so the
/// session is always ready for another upload.
#[derive(Clone, Debug, Default)]
pub struct Session {
    image: Option<SourceImage>,
    layout: LayoutSpec,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `layout` instead of the default one.
    pub fn with_layout(layout: LayoutSpec) -> PrintResult<Self> {
        layout.validate()?;
        Ok(Self {
            image: None,
            layout,
        })
    }

    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Replace the current image with a validated one.
    pub fn accept(&mut self, image: SourceImage) {
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "session accepted image"
        );
        self.image = Some(image);
    }

    /// Drop the image and go back to the default layout.
    pub fn clear(&mut self) {
        self.image = None;
        self.layout = LayoutSpec::default();
    }

    /// Switch layouts. An invalid layout is refused and the current one stays active.
    pub fn set_layout(&mut self, layout: LayoutSpec) -> PrintResult<()> {
        layout.validate()?;
        self.layout = layout;
        Ok(())
    }

    /// Fold an upload result into the session.
    ///
    /// `Accepted` replaces the image, `Rejected` drops it and hands the rejection back for
    /// display, `Superseded` leaves the session untouched.
    pub fn apply_upload(&mut self, outcome: UploadOutcome) -> Result<(), UploadRejection> {
        match outcome {
            UploadOutcome::Accepted(image) => {
                self.accept(image);
                Ok(())
            }
            UploadOutcome::Rejected(rejection) => {
                self.image = None;
                Err(rejection)
            }
            UploadOutcome::Superseded => Ok(()),
        }
    }

    /// Render the current image with the active layout, or `None` when there is no image.
    pub fn render(&self) -> PrintResult<Option<Surface>> {
        let Some(image) = &self.image else {
            return Ok(None);
        };
        render(&self.layout, image).map(Some)
    }

    /// Export file name for the active layout.
    pub fn export_file_name(&self) -> String {
        export_file_name(&self.layout.size_key(), self.layout.dpi())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
