use super::*;
use crate::foundation::core::PixelBuffer;
use crate::source::model::Frame;

fn sized_source(name: &str, width: u32, height: u32) -> Source {
    let frames = vec![Frame::new(PixelBuffer::blank(width, height), 100)];
    Source::new(name, width, height, frames).unwrap()
}

fn sources(count: usize, width: u32, height: u32) -> Vec<Source> {
    (0..count)
        .map(|i| sized_source(&format!("s{i}"), width, height))
        .collect()
}

#[test]
fn content_driven_layout_has_unit_scale() {
    let sources = sources(2, 100, 100);
    let settings = LayoutSettings {
        columns: 2,
        gap: 10,
        fixed_size: false,
        ..LayoutSettings::default()
    };
    let m = compute_layout(&sources, &settings).unwrap();

    assert_eq!((m.content_width, m.content_height), (210, 100));
    assert_eq!((m.width, m.height), (210, 100));
    assert_eq!(m.draw_scale, 1.0);
    assert_eq!((m.origin_x, m.origin_y), (0.0, 0.0));

    let p0 = item_base_position(0, &settings, &m);
    let p1 = item_base_position(1, &settings, &m);
    assert_eq!((p0.x, p0.y), (0.0, 0.0));
    assert_eq!((p1.x, p1.y), (110.0, 0.0));
}

#[test]
fn fixed_canvas_downscales_uniformly_and_centers() {
    let sources = sources(2, 100, 100);
    let settings = LayoutSettings {
        columns: 2,
        gap: 10,
        fixed_size: true,
        canvas_width: 100,
        canvas_height: 100,
        ..LayoutSettings::default()
    };
    let m = compute_layout(&sources, &settings).unwrap();

    assert_eq!((m.width, m.height), (100, 100));
    assert!((m.draw_scale - 100.0 / 210.0).abs() < 1e-12);
    assert_eq!(m.origin_x, 0.0);
    assert_eq!(m.origin_y, ((100.0_f64 - 100.0 * (100.0 / 210.0)) / 2.0).floor());
}

#[test]
fn fixed_canvas_never_upscales() {
    let sources = sources(1, 50, 50);
    let settings = LayoutSettings {
        columns: 1,
        fixed_size: true,
        canvas_width: 400,
        canvas_height: 400,
        ..LayoutSettings::default()
    };
    let m = compute_layout(&sources, &settings).unwrap();
    assert_eq!(m.draw_scale, 1.0);
    assert_eq!((m.width, m.height), (400, 400));
    // 50x50 content centered on a 400x400 canvas.
    assert_eq!((m.origin_x, m.origin_y), (175.0, 175.0));
}

#[test]
fn cells_are_sized_to_the_largest_source() {
    let sources = vec![sized_source("small", 20, 40), sized_source("big", 60, 30)];
    let settings = LayoutSettings {
        columns: 2,
        gap: 0,
        ..LayoutSettings::default()
    };
    let m = compute_layout(&sources, &settings).unwrap();
    assert_eq!((m.cell_width, m.cell_height), (60, 40));
    assert_eq!((m.content_width, m.content_height), (120, 40));
}

#[test]
fn row_count_rounds_up() {
    let sources = sources(5, 10, 10);
    let settings = LayoutSettings {
        columns: 2,
        gap: 0,
        ..LayoutSettings::default()
    };
    let m = compute_layout(&sources, &settings).unwrap();
    assert_eq!(m.rows, 3);

    let p4 = item_base_position(4, &settings, &m);
    assert_eq!((p4.x, p4.y), (0.0, 20.0));
}

#[test]
fn oversized_column_request_is_clamped_before_layout() {
    let sources = sources(2, 10, 10);
    let wild = LayoutSettings {
        columns: 999,
        gap: 0,
        ..LayoutSettings::default()
    };

    let (sanitized, warnings) = wild.sanitize();
    assert_eq!(sanitized.columns, MAX_COLUMNS);
    assert_eq!(
        warnings,
        vec![crate::foundation::error::ConfigWarning::ColumnsClamped {
            requested: 999,
            max: MAX_COLUMNS,
        }]
    );

    // compute_layout applies the same clamp even on unsanitized input.
    let m = compute_layout(&sources, &wild).unwrap();
    assert_eq!(m.content_width, MAX_COLUMNS * 10);
}

#[test]
fn sanitize_leaves_in_range_settings_alone() {
    let settings = LayoutSettings::default();
    let (sanitized, warnings) = settings.sanitize();
    assert_eq!(sanitized, settings);
    assert!(warnings.is_empty());
}

#[test]
fn empty_source_set_is_a_validation_error() {
    let err = compute_layout(&[], &LayoutSettings::default()).unwrap_err();
    assert!(matches!(err, crate::foundation::error::GridError::Validation(_)));
}

#[test]
fn resolution_warnings_trigger_on_thresholds() {
    let sources = sources(1, 3000, 3000);
    let settings = LayoutSettings {
        columns: 1,
        ..LayoutSettings::default()
    };
    let m = compute_layout(&sources, &settings).unwrap();

    let preview = resolution_warnings(&m, None);
    assert_eq!(preview.len(), 1);

    let export = resolution_warnings(&m, Some(1000));
    assert_eq!(export.len(), 2);

    let small = compute_layout(&self::sources(1, 10, 10), &settings).unwrap();
    assert!(resolution_warnings(&small, Some(10)).is_empty());
}
