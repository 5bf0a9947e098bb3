use super::*;

#[test]
fn anchors_for_thousand_pixel_width() {
    assert_eq!(caption_anchor_x(1000, TextAlign::Left), 20.0);
    assert_eq!(caption_anchor_x(1000, TextAlign::Right), 980.0);
    assert_eq!(caption_anchor_x(1000, TextAlign::Center), 500.0);
}

#[test]
fn center_anchor_on_odd_width_is_half_pixel() {
    assert_eq!(caption_anchor_x(801, TextAlign::Center), 400.5);
}

#[test]
fn baselines_for_800x600_at_42px() {
    let size = FontSize::new(42).unwrap();
    assert_eq!(top_baseline(size), 62.0);
    assert_eq!(bottom_baseline(600), 580.0);
    assert_eq!(baseline_for(CaptionSlot::Top, size, 600), 62.0);
    assert_eq!(baseline_for(CaptionSlot::Bottom, size, 600), 580.0);
}

#[test]
fn stroke_width_for_42px_is_2_1() {
    let w = stroke_width(FontSize::new(42).unwrap());
    assert!((w - 2.1).abs() < 1e-12);
}

#[test]
fn run_start_respects_alignment() {
    assert_eq!(run_start_x(20.0, 100.0, TextAlign::Left), 20.0);
    assert_eq!(run_start_x(400.0, 100.0, TextAlign::Center), 350.0);
    assert_eq!(run_start_x(980.0, 100.0, TextAlign::Right), 880.0);
}

#[test]
fn placement_run_end() {
    let p = CaptionPlacement {
        slot: CaptionSlot::Top,
        anchor: Point::new(400.0, 62.0),
        run_start_x: 350.0,
        advance: 100.0,
        stroke_width: 2.1,
    };
    assert_eq!(p.run_end_x(), 450.0);
}
