use std::io::Cursor;
use std::sync::Mutex;

use super::*;

/// Reports a code whenever the frame contains a near-black pixel, and records frame sizes.
#[derive(Default)]
struct DarkMarkDetector {
    seen: Mutex<Vec<(u32, u32)>>,
}

impl CodeDetector for DarkMarkDetector {
    fn detect(&self, frame: &DetectorFrame<'_>) -> anyhow::Result<Detection> {
        self.seen.lock().unwrap().push((frame.width, frame.height));
        for y in 0..frame.height {
            for x in 0..frame.width {
                if frame.luma(x, y) < 16 {
                    return Ok(Detection::Found { payload: None });
                }
            }
        }
        Ok(Detection::NotFound)
    }
}

struct BrokenDetector;

impl CodeDetector for BrokenDetector {
    fn detect(&self, _frame: &DetectorFrame<'_>) -> anyhow::Result<Detection> {
        anyhow::bail!("finder pattern table corrupted")
    }
}

fn photo(width: u32, height: u32, with_code: bool) -> image::RgbaImage {
    let mut img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([120 + (x % 60) as u8, 100 + (y % 80) as u8, 140, 255])
    });
    if with_code {
        for y in height / 3..height / 2 {
            for x in width / 3..width / 2 {
                img.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
            }
        }
    }
    img
}

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_dimensions_cap_the_longer_side() {
    assert_eq!(decode_dimensions(4000, 3000, 1000), (1000, 750));
    assert_eq!(decode_dimensions(600, 2400, 1000), (250, 1000));
    assert_eq!(decode_dimensions(800, 600, 1000), (800, 600));
    assert_eq!(decode_dimensions(1000, 1000, 1000), (1000, 1000));
    assert_eq!(decode_dimensions(5000, 2, 1000), (1000, 1));
}

#[test]
fn large_images_are_downscaled_before_detection() {
    let detector = Arc::new(DarkMarkDetector::default());
    let gate = ValidationGate::new(detector.clone());
    let image = SourceImage::from_rgba(photo(2000, 500, true));
    gate.validate(&image).unwrap();
    assert_eq!(detector.seen.lock().unwrap().as_slice(), &[(1000, 250)]);
}

#[test]
fn custom_cap_is_honored() {
    let detector = Arc::new(DarkMarkDetector::default());
    let gate = ValidationGate::new(detector.clone()).with_config(GateConfig { max_decode_dim: 64 });
    let image = SourceImage::from_rgba(photo(128, 256, true));
    gate.validate(&image).unwrap();
    assert_eq!(detector.seen.lock().unwrap().as_slice(), &[(32, 64)]);
}

#[test]
fn default_config_caps_at_one_thousand() {
    assert_eq!(GateConfig::default().max_decode_dim, DEFAULT_MAX_DECODE_DIM);
    assert_eq!(DEFAULT_MAX_DECODE_DIM, 1000);
}

#[test]
fn uploads_are_sorted_by_content() {
    let detector = Arc::new(DarkMarkDetector::default());
    let gate = ValidationGate::new(detector.clone());

    let blob = b"\x00\x01\x02 not a photo at all".to_vec();
    assert_eq!(
        gate.validate_bytes(&blob).unwrap_err(),
        UploadRejection::InvalidInputType
    );
    assert!(detector.seen.lock().unwrap().is_empty());

    let plain = png_bytes(photo(64, 48, false));
    assert_eq!(
        gate.validate_bytes(&plain).unwrap_err(),
        UploadRejection::CodeNotFound
    );

    let coded = png_bytes(photo(64, 48, true));
    let accepted = gate.validate_bytes(&coded).unwrap();
    assert_eq!((accepted.width(), accepted.height()), (64, 48));
}

#[test]
fn detector_errors_are_decode_failures() {
    let gate = ValidationGate::new(Arc::new(BrokenDetector));
    let image = SourceImage::from_rgba(photo(8, 8, true));
    match gate.validate(&image) {
        Err(UploadRejection::DecodeFailure(msg)) => {
            assert!(msg.contains("finder pattern table corrupted"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn spawned_validation_is_awaitable() {
    let gate = ValidationGate::new(Arc::new(DarkMarkDetector::default()));
    let task = gate.spawn_validation(png_bytes(photo(32, 32, true)));
    let outcome = task.join().await.expect("not cancelled");
    assert_eq!(outcome.unwrap().width(), 32);

    let task = gate.spawn_validation(png_bytes(photo(32, 32, false)));
    assert!(matches!(
        task.join().await,
        Some(Err(UploadRejection::CodeNotFound))
    ));
}
