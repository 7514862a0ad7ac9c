use super::*;
use crate::foundation::core::PixelBuffer;
use crate::source::model::Frame;

fn source_with_delays(delays: &[u32]) -> Source {
    let frames = delays
        .iter()
        .map(|&d| Frame::new(PixelBuffer::blank(1, 1), d))
        .collect();
    Source::new("s", 1, 1, frames).unwrap()
}

#[test]
fn choice_is_deterministic() {
    let sources = vec![source_with_delays(&[33, 66, 100]), source_with_delays(&[40])];
    let first = choose_fps(&sources, 5, 30);
    for _ in 0..5 {
        assert_eq!(choose_fps(&sources, 5, 30), first);
    }
}

#[test]
fn uniform_100ms_delays_pick_10_over_7() {
    // 100ms divides evenly at 10 fps; 7 fps (142.9ms steps) cannot.
    let sources = vec![source_with_delays(&[100, 100, 100])];
    assert_eq!(choose_fps(&sources, 7, 10), 10);
}

#[test]
fn exact_ties_prefer_the_higher_fps() {
    // Both 10 and 20 fps quantize 100ms delays with zero error.
    let sources = vec![source_with_delays(&[100, 100])];
    assert_eq!(choose_fps(&sources, 10, 20), 20);
}

#[test]
fn delays_matching_a_rate_pick_that_rate() {
    // 200ms delays are an exact multiple of the 5 fps step only.
    let sources = vec![source_with_delays(&[200, 200, 200])];
    assert_eq!(choose_fps(&sources, 5, 7), 5);
}

#[test]
fn no_usable_delays_falls_back_to_default() {
    assert_eq!(choose_fps(&[], 5, 30), DEFAULT_FPS);
}

#[test]
fn fallback_is_clamped_into_the_requested_range() {
    assert_eq!(choose_fps(&[], 5, 10), 10);
    assert_eq!(choose_fps(&[], 20, 30), 20);
}

#[test]
fn inverted_bounds_fall_back_to_default() {
    let sources = vec![source_with_delays(&[100])];
    assert_eq!(choose_fps(&sources, 30, 5), DEFAULT_FPS);
}

#[test]
fn mixed_sources_pool_all_delays() {
    // One source wants 10 fps, the other 30; the blend should land between.
    let sources = vec![
        source_with_delays(&[100, 100, 100, 100]),
        source_with_delays(&[33, 33, 33, 33]),
    ];
    let fps = choose_fps(&sources, 5, 30);
    assert!((10..=30).contains(&fps));
}
