use super::*;
use crate::foundation::core::{CHROMA_KEY, Rgba8};
use crate::layout::grid::compute_layout;
use crate::source::model::Frame;

fn solid_source(name: &str, px: [u8; 4], delays: &[u32]) -> Source {
    let frames = delays
        .iter()
        .map(|&d| Frame::new(PixelBuffer::filled(2, 2, px), d))
        .collect();
    Source::new(name, 2, 2, frames).unwrap()
}

fn blinking_source(name: &str, a: [u8; 4], b: [u8; 4], delay: u32) -> Source {
    let frames = vec![
        Frame::new(PixelBuffer::filled(2, 2, a), delay),
        Frame::new(PixelBuffer::filled(2, 2, b), delay),
    ];
    Source::new(name, 2, 2, frames).unwrap()
}

fn settings(fps: u32) -> LayoutSettings {
    LayoutSettings {
        columns: 2,
        gap: 0,
        bg_color: Rgba8::opaque(0, 0, 0),
        fps,
        ..LayoutSettings::default()
    }
}

fn run(sources: &[Source], settings: &LayoutSettings) -> Vec<CompositeFrame> {
    let metrics = compute_layout(sources, settings).unwrap();
    composite(
        sources,
        settings,
        &metrics,
        BackgroundMode::Opaque(settings.bg_color),
        &CancelToken::new(),
    )
    .unwrap()
}

#[test]
fn collapse_is_duration_lossless() {
    let sources = vec![
        blinking_source("blink", [255, 0, 0, 255], [0, 0, 255, 255], 100),
        solid_source("still", [0, 255, 0, 255], &[300]),
    ];
    let settings = settings(10);
    let frame_delay = output_frame_delay_ms(settings.fps);

    let max_duration = sources.iter().map(Source::duration_ms).max().unwrap();
    let total_frames = u64::from(max_duration).div_ceil(u64::from(frame_delay)).max(1);

    let frames = run(&sources, &settings);
    let total_delay: u64 = frames.iter().map(|f| u64::from(f.delay_ms)).sum();
    assert_eq!(total_delay, total_frames * u64::from(frame_delay));
}

#[test]
fn static_content_collapses_to_one_frame() {
    // Two identical static sources: every tick paints the same raster, so
    // exactly one composite comes out carrying the full export duration.
    let sources = vec![
        solid_source("a", [255, 0, 0, 255], &[100, 100]),
        solid_source("b", [255, 0, 0, 255], &[100, 100]),
    ];
    let settings = settings(10);
    let frames = run(&sources, &settings);

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].delay_ms, 200);
}

#[test]
fn animated_content_emits_one_frame_per_change() {
    let sources = vec![blinking_source(
        "blink",
        [255, 0, 0, 255],
        [0, 0, 255, 255],
        100,
    )];
    let frames = run(&sources, &settings(10));

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].delay_ms, 100);
    assert_eq!(frames[1].delay_ms, 100);
    assert_eq!(frames[0].pixels.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(frames[1].pixels.pixel(0, 0), [0, 0, 255, 255]);
}

#[test]
fn later_sources_occlude_earlier_ones() {
    let mut under = solid_source("under", [255, 0, 0, 255], &[100]);
    let over = solid_source("over", [0, 0, 255, 255], &[100]);
    // Push the first source onto the second one's cell.
    under.set_offset(2, 0);

    let sources = vec![under, over];
    let frames = run(&sources, &settings(10));
    assert_eq!(frames[0].pixels.pixel(2, 0), [0, 0, 255, 255]);
}

#[test]
fn user_offset_moves_the_draw_position() {
    let mut source = solid_source("a", [255, 0, 0, 255], &[100]);
    source.set_offset(1, 1);
    let sources = vec![source];

    let settings = LayoutSettings {
        columns: 1,
        ..settings(10)
    };
    let frames = run(&sources, &settings);
    assert_eq!(frames[0].pixels.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(frames[0].pixels.pixel(1, 1), [255, 0, 0, 255]);
}

#[test]
fn chroma_key_background_fills_uncovered_pixels() {
    let sources = vec![solid_source("a", [255, 0, 0, 255], &[100])];
    let settings = LayoutSettings {
        columns: 2,
        ..settings(10)
    };
    let metrics = compute_layout(&sources, &settings).unwrap();
    let frames = composite(
        &sources,
        &settings,
        &metrics,
        BackgroundMode::ChromaKey(CHROMA_KEY),
        &CancelToken::new(),
    )
    .unwrap();

    // Covered pixel keeps the source color; the empty second cell is keyed.
    assert_eq!(frames[0].pixels.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(frames[0].pixels.pixel(3, 0), CHROMA_KEY.to_premul());
}

#[test]
fn pre_cancelled_run_returns_cancelled_with_no_output() {
    let sources = vec![solid_source("a", [255, 0, 0, 255], &[100])];
    let settings = settings(10);
    let metrics = compute_layout(&sources, &settings).unwrap();

    let token = CancelToken::new();
    token.cancel();
    let err = composite(
        &sources,
        &settings,
        &metrics,
        BackgroundMode::Opaque(settings.bg_color),
        &token,
    )
    .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn empty_source_set_is_rejected() {
    let settings = settings(10);
    let sources = vec![solid_source("a", [0, 0, 0, 255], &[100])];
    let metrics = compute_layout(&sources, &settings).unwrap();
    let err = composite(
        &[],
        &settings,
        &metrics,
        BackgroundMode::Opaque(settings.bg_color),
        &CancelToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, GridError::Validation(_)));
}

#[test]
fn tick_floor_caps_the_output_rate() {
    assert_eq!(output_frame_delay_ms(10), 100);
    assert_eq!(output_frame_delay_ms(15), 67);
    assert_eq!(output_frame_delay_ms(30), 33);
    // Absurd rates floor at the minimum tick rather than dividing to zero.
    assert_eq!(output_frame_delay_ms(1000), 10);
    assert_eq!(output_frame_delay_ms(0), 1000);
}
