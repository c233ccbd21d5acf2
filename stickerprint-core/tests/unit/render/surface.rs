use super::*;
use crate::render::{path::rounded_rect_path, pattern::build_pattern};

fn surface(w: u32, h: u32) -> Surface {
    Surface::new(RasterSize {
        width_px: w,
        height_px: h,
    })
    .unwrap()
}

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    SourceImage::from_rgba(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}

fn assert_near(actual: Option<[u8; 4]>, expected: [u8; 4]) {
    let actual = actual.expect("pixel in bounds");
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn new_surface_is_transparent() {
    let s = surface(4, 3);
    assert_eq!(s.size(), RasterSize { width_px: 4, height_px: 3 });
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(4, 0), None);
    assert_eq!(s.to_rgba8().len(), 4 * 3 * 4);
}

#[test]
fn zero_sized_surface_is_a_render_error() {
    let err = Surface::new(RasterSize {
        width_px: 0,
        height_px: 10,
    })
    .unwrap_err();
    assert!(matches!(err, PrintError::Render(_)));
}

#[test]
fn clipped_fill_only_touches_inside_the_clip() {
    let mut s = surface(20, 20);
    let clip = rounded_rect_path(PxRect::new(5.0, 5.0, 10.0, 10.0), 0.0);
    s.fill_rect(
        PxRect::from_size(20.0, 20.0),
        Fill::Solid([255, 0, 0, 255]),
        DrawParams::clipped(&clip),
    )
    .unwrap();
    assert_eq!(s.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(2, 2), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(16, 10), Some([0, 0, 0, 0]));
}

#[test]
fn erase_clears_to_transparent() {
    let mut s = surface(10, 10);
    s.fill_rect(
        PxRect::from_size(10.0, 10.0),
        Fill::Solid(WHITE),
        DrawParams::default(),
    )
    .unwrap();
    let hole = rounded_rect_path(PxRect::new(2.0, 2.0, 4.0, 4.0), 0.0);
    s.fill_path(&hole, Fill::Solid(WHITE), DrawParams::erase())
        .unwrap();
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(8, 8), Some(WHITE));
}

#[test]
fn pattern_fill_tiles_from_the_origin() {
    let tile = build_pattern(300).unwrap();
    let mut s = surface(60, 60);
    s.fill_rect(
        PxRect::from_size(60.0, 60.0),
        Fill::Pattern(&tile),
        DrawParams::default(),
    )
    .unwrap();
    for (x, y) in [(3, 7), (10, 9), (5, 5), (17, 1)] {
        let base = s.pixel(x, y);
        assert_eq!(s.pixel(x + 20, y), base);
        assert_eq!(s.pixel(x + 40, y + 20), base);
    }
}

#[test]
fn draw_image_maps_source_rect_onto_dest_rect() {
    // Left half red, right half blue.
    let mut img = image::RgbaImage::from_pixel(20, 10, image::Rgba([255, 0, 0, 255]));
    for y in 0..10 {
        for x in 10..20 {
            img.put_pixel(x, y, image::Rgba([0, 0, 255, 255]));
        }
    }
    let img = SourceImage::from_rgba(img);

    let mut s = surface(30, 30);
    let geometry = FitGeometry {
        source_rect: PxRect::new(10.0, 0.0, 10.0, 10.0),
        dest_rect: PxRect::new(0.0, 0.0, 30.0, 30.0),
    };
    s.draw_image(&img, geometry, DrawParams::default()).unwrap();
    assert_near(s.pixel(15, 15), [0, 0, 255, 255]);
    assert_near(s.pixel(28, 28), [0, 0, 255, 255]);
}

#[test]
fn draw_image_respects_clip() {
    let img = solid_image(8, 8, [0, 200, 0, 255]);
    let mut s = surface(40, 40);
    let clip = rounded_rect_path(PxRect::new(0.0, 0.0, 40.0, 40.0), 20.0);
    let geometry = FitGeometry {
        source_rect: PxRect::from_size(8.0, 8.0),
        dest_rect: PxRect::from_size(40.0, 40.0),
    };
    s.draw_image(&img, geometry, DrawParams::clipped(&clip))
        .unwrap();
    assert_near(s.pixel(20, 20), [0, 200, 0, 255]);
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(39, 39), Some([0, 0, 0, 0]));
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut s = surface(100, 10);
    let mut line = BezPath::new();
    line.move_to((0.0, 5.0));
    line.line_to((100.0, 5.0));
    let style = StrokeStyle {
        width: 2.0,
        dash: vec![10.0, 5.0],
        color: [0x99, 0x99, 0x99, 0xff],
    };
    s.stroke_path(&line, &style, DrawParams::default()).unwrap();
    assert_eq!(s.pixel(5, 5), Some([0x99, 0x99, 0x99, 0xff]));
    assert_eq!(s.pixel(12, 5), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(20, 5), Some([0x99, 0x99, 0x99, 0xff]));
}

#[test]
fn clipped_stroke_stays_inside_the_clip() {
    let mut s = surface(100, 10);
    let mut line = BezPath::new();
    line.move_to((0.0, 5.0));
    line.line_to((100.0, 5.0));
    let style = StrokeStyle {
        width: 2.0,
        dash: Vec::new(),
        color: [0x99, 0x99, 0x99, 0xff],
    };
    let clip = rounded_rect_path(PxRect::new(0.0, 0.0, 50.0, 10.0), 0.0);
    s.stroke_path(&line, &style, DrawParams::clipped(&clip))
        .unwrap();
    assert_eq!(s.pixel(20, 5), Some([0x99, 0x99, 0x99, 0xff]));
    assert_eq!(s.pixel(70, 5), Some([0, 0, 0, 0]));
}

#[test]
fn under_fill_only_shows_through_transparency() {
    let mut s = surface(20, 20);
    s.fill_rect(
        PxRect::from_size(20.0, 20.0),
        Fill::Solid([255, 0, 0, 255]),
        DrawParams::default(),
    )
    .unwrap();
    let hole = rounded_rect_path(PxRect::new(4.5, 4.5, 10.0, 10.0), 3.0);
    s.fill_path(&hole, Fill::Solid(WHITE), DrawParams::erase())
        .unwrap();
    assert!(s.to_rgba8().chunks(4).any(|c| c[3] < 255));

    s.fill_rect(
        PxRect::from_size(20.0, 20.0),
        Fill::Solid([0, 0, 255, 255]),
        DrawParams::under(),
    )
    .unwrap();
    assert!(s.to_rgba8().chunks(4).all(|c| c[3] == 255));
    assert_eq!(s.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(9, 9), Some([0, 0, 255, 255]));
}
