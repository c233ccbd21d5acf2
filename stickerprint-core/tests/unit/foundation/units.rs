use super::*;

#[test]
fn sticker_sizes_at_300_dpi() {
    assert_eq!(to_pixels(50.0, 300), 591);
    assert_eq!(to_pixels(75.0, 300), 886);
}

#[test]
fn l_size_sheet_at_300_dpi() {
    // 89 / 25.4 * 300 = 1051.18; the formula wins over the 1050 quoted for prints.
    assert_eq!(to_pixels(89.0, 300), 1051);
    assert_eq!(to_pixels(127.0, 300), 1500);
    assert_eq!(
        raster_size(PhysicalSize::new(89.0, 127.0).unwrap(), 300),
        RasterSize {
            width_px: 1051,
            height_px: 1500
        }
    );
}

#[test]
fn zero_and_one_inch() {
    assert_eq!(to_pixels(0.0, 300), 0);
    assert_eq!(to_pixels(25.4, 72), 72);
    assert_eq!(to_pixels(25.4, 1200), 1200);
}

#[test]
fn ties_round_away_from_zero() {
    // 12.7 mm is exactly half an inch, so odd dpi values land on .5 px.
    assert_eq!(to_pixels(12.7, 73), 37);
    assert_eq!(to_pixels(12.7, 75), 38);
}

#[test]
fn monotone_in_both_arguments() {
    let mut prev = 0;
    for step in 0..2000 {
        let mm = step as f64 * 0.137;
        let px = to_pixels(mm, 300);
        assert!(px >= prev, "mm={mm}");
        prev = px;
    }

    let mut prev = 0;
    for dpi in 72..=1200 {
        let px = to_pixels(12.34, dpi);
        assert!(px >= prev, "dpi={dpi}");
        prev = px;
    }
}

#[test]
fn rounding_error_below_one_pixel() {
    for dpi in [72, 150, 300, 350, 600, 1200] {
        for step in 1..500 {
            let mm = step as f64 * 0.173;
            let back = f64::from(to_pixels(mm, dpi)) / f64::from(dpi) * MM_PER_INCH;
            assert!((back - mm).abs() < MM_PER_INCH / f64::from(dpi), "mm={mm} dpi={dpi}");
        }
    }
}

#[test]
fn reference_lengths_scale_with_dpi() {
    assert_eq!(scaled_px(20.0, 300), 20);
    assert_eq!(scaled_px(20.0, 600), 40);
    assert_eq!(scaled_px(20.0, 72), 5);
    assert_eq!(scaled_px(2.0, 72), 1);
    assert_eq!(scaled_px(5.0, 150), 3);
    assert_eq!(scaled_px(0.1, 72), 1);
}
