/// Borrowed straight-alpha RGBA8 buffer handed to a [`CodeDetector`].
#[derive(Clone, Copy, Debug)]
pub struct DetectorFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

impl<'a> DetectorFrame<'a> {
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Rec. 601 luma of the pixel at `(x, y)`, composited over white.
    ///
    /// Out-of-range coordinates read as white.
    pub fn luma(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 255;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let Some(px) = self.rgba.get(idx..idx + 4) else {
            return 255;
        };
        let a = u32::from(px[3]);
        let over_white = |c: u8| (u32::from(c) * a + 255 * (255 - a) + 127) / 255;
        let (r, g, b) = (over_white(px[0]), over_white(px[1]), over_white(px[2]));
        ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
    }
}

/// Result of running a detector over a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Detection {
    /// A code was located. The payload is informational only.
    Found { payload: Option<String> },
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Decode-capable collaborator (for example a QR reader).
///
/// The gate treats any [`Detection::Found`] as success and ignores the payload. Returning
/// `Err` means the detector itself broke, which is reported separately from "not found".
pub trait CodeDetector: Send + Sync {
    fn detect(&self, frame: &DetectorFrame<'_>) -> anyhow::Result<Detection>;
}

impl<F> CodeDetector for F
where
    F: Fn(&DetectorFrame<'_>) -> anyhow::Result<Detection> + Send + Sync,
{
    fn detect(&self, frame: &DetectorFrame<'_>) -> anyhow::Result<Detection> {
        self(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/detector.rs"]
mod tests;
