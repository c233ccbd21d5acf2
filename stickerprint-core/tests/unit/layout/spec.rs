use super::*;

#[test]
fn default_is_the_sticker_sheet_at_300_dpi() {
    let spec = LayoutSpec::default();
    assert_eq!(spec, LayoutSpec::sticker_sheet(300));
    assert_eq!(spec.dpi(), 300);
    assert_eq!(spec.canvas_size(), L_SIZE_SHEET);
    assert_eq!(
        spec.raster_size(),
        RasterSize {
            width_px: 1051,
            height_px: 1500
        }
    );
    spec.validate().unwrap();
}

#[test]
fn fit_mode_follows_layout_kind() {
    assert_eq!(LayoutSpec::plain(300).fit_mode(), FitMode::Contain);
    assert_eq!(LayoutSpec::custom(20.0, 30.0, 300).fit_mode(), FitMode::Contain);
    assert_eq!(LayoutSpec::sticker_sheet(300).fit_mode(), FitMode::Cover);
    assert_eq!(LayoutSpec::cutout_sheet(300).fit_mode(), FitMode::Cover);
}

#[test]
fn plain_canvas_is_the_target() {
    let spec = LayoutSpec::plain(300);
    assert_eq!(
        spec.raster_size(),
        RasterSize {
            width_px: 591,
            height_px: 886
        }
    );
    assert_eq!(spec.size_key(), "50x75");
}

#[test]
fn presets_resolve_by_name() {
    for name in PRESET_NAMES {
        let spec = LayoutSpec::preset(name, 350).unwrap();
        assert_eq!(spec.dpi(), 350);
        spec.validate().unwrap();
    }
    assert!(LayoutSpec::preset("poster", 300).is_none());
}

#[test]
fn size_keys_name_the_layout_kind() {
    assert_eq!(LayoutSpec::sticker_sheet(300).size_key(), "50x75");
    assert_eq!(LayoutSpec::cutout_sheet(300).size_key(), "50x75-cutout");
    assert_eq!(LayoutSpec::custom(100.0, 148.5, 300).size_key(), "custom-100x148.5");
}

#[test]
fn with_dpi_keeps_geometry() {
    let spec = LayoutSpec::cutout_sheet(300).with_dpi(600);
    assert_eq!(spec.dpi(), 600);
    assert_eq!(spec.canvas_size(), L_SIZE_SHEET);
}

#[test]
fn dpi_outside_range_is_a_validation_error() {
    for dpi in [0, 71, 1201] {
        let err = LayoutSpec::plain(dpi).validate().unwrap_err();
        assert!(matches!(err, PrintError::Validation(_)), "dpi={dpi}: {err}");
    }
    LayoutSpec::plain(72).validate().unwrap();
    LayoutSpec::plain(1200).validate().unwrap();
}

#[test]
fn degenerate_sizes_are_rejected() {
    let bad = [
        LayoutSpec::custom(0.0, 10.0, 300),
        LayoutSpec::custom(10.0, -1.0, 300),
        LayoutSpec::custom(f64::NAN, 10.0, 300),
        LayoutSpec::PlainResize {
            target: PhysicalSize {
                width_mm: f64::INFINITY,
                height_mm: 10.0,
            },
            dpi: 300,
        },
        // Rounds to zero pixels.
        LayoutSpec::custom(0.1, 10.0, 72),
    ];
    for spec in bad {
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, PrintError::DegenerateGeometry(_)), "{spec:?}: {err}");
    }
}

#[test]
fn sticker_must_fit_on_sheet() {
    let spec = LayoutSpec::SheetWithSticker {
        sheet: L_SIZE_SHEET,
        sticker: PhysicalSize {
            width_mm: 90.0,
            height_mm: 75.0,
        },
        corner_radius_mm: 3.0,
        dpi: 300,
    };
    assert!(matches!(
        spec.validate(),
        Err(PrintError::DegenerateGeometry(_))
    ));
}

#[test]
fn cutout_must_stay_inside_sticker() {
    let with = |cutout: CutoutSpec| LayoutSpec::SheetWithCutout {
        sheet: L_SIZE_SHEET,
        sticker: STICKER_50X75,
        corner_radius_mm: 3.0,
        cutout,
        dpi: 300,
    };
    let inverted = CutoutSpec {
        top_mm: 55.0,
        bottom_mm: 20.0,
        ..CutoutSpec::default()
    };
    let too_low = CutoutSpec {
        bottom_mm: 80.0,
        ..CutoutSpec::default()
    };
    let too_wide = CutoutSpec {
        width_mm: 51.0,
        ..CutoutSpec::default()
    };
    for c in [inverted, too_low, too_wide] {
        assert!(
            matches!(with(c).validate(), Err(PrintError::DegenerateGeometry(_))),
            "{c:?}"
        );
    }
    with(CutoutSpec::default()).validate().unwrap();
}

#[test]
fn json_is_externally_tagged_snake_case() {
    let json = r#"{
        "sheet_with_cutout": {
            "sheet": { "width_mm": 89.0, "height_mm": 127.0 },
            "sticker": { "width_mm": 50.0, "height_mm": 75.0 },
            "corner_radius_mm": 3.0,
            "dpi": 300
        }
    }"#;
    let spec = LayoutSpec::from_json(json).unwrap();
    assert_eq!(spec, LayoutSpec::cutout_sheet(300));

    let back = serde_json::to_string(&spec).unwrap();
    assert!(back.starts_with("{\"sheet_with_cutout\":"));
}

#[test]
fn invalid_json_is_a_validation_error() {
    let err = LayoutSpec::from_json("{\"poster\": {}}").unwrap_err();
    assert!(matches!(err, PrintError::Validation(_)));

    let err = LayoutSpec::from_json(
        r#"{"custom_free_size": {"width_mm": 0.0, "height_mm": 10.0, "dpi": 300}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, PrintError::DegenerateGeometry(_)));
}

#[test]
fn from_path_reports_missing_file() {
    let err = LayoutSpec::from_path("/nonexistent/stickerprint/layout.json").unwrap_err();
    assert!(matches!(err, PrintError::Other(_)));
    assert!(err.to_string().contains("read layout file"));
}

#[test]
fn from_path_reads_a_layout_file() {
    let path = std::env::temp_dir().join(format!(
        "stickerprint-layout-{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"{"plain_resize": {"target": {"width_mm": 50.0, "height_mm": 75.0}, "dpi": 600}}"#,
    )
    .unwrap();
    let spec = LayoutSpec::from_path(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(spec, LayoutSpec::plain(600));
}
