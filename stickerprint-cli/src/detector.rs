use stickerprint::{CodeDetector, Detection, DetectorFrame};

/// QR code detector backed by `rqrr`.
///
/// A grid that is located but cannot be decoded does not count; the image passes only when
/// at least one grid decodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct QrDetector;

impl CodeDetector for QrDetector {
    fn detect(&self, frame: &DetectorFrame<'_>) -> anyhow::Result<Detection> {
        if frame.width == 0 || frame.height == 0 {
            anyhow::bail!("empty frame {}x{}", frame.width, frame.height);
        }
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            frame.width as usize,
            frame.height as usize,
            |x, y| frame.luma(x as u32, y as u32),
        );
        let grids = prepared.detect_grids();
        tracing::debug!(grids = grids.len(), "qr grids located");

        for grid in &grids {
            match grid.decode() {
                Ok((_meta, content)) => {
                    return Ok(Detection::Found {
                        payload: Some(content),
                    });
                }
                Err(err) => tracing::debug!(error = ?err, "qr grid failed to decode"),
            }
        }
        Ok(Detection::NotFound)
    }
}
