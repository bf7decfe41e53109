use super::*;

#[test]
fn clamp_keeps_in_range_values() {
    let size = clamp_thumbs_per_side(5, 16);
    assert_eq!(size.thumbs_per_side, 5);
    assert_eq!(size.clamp, None);

    let size = clamp_thumbs_per_side(16, 16);
    assert_eq!(size.thumbs_per_side, 16);
    assert_eq!(size.clamp, None);
}

#[test]
fn clamp_records_forced_minimum() {
    let size = clamp_thumbs_per_side(1, 16);
    assert_eq!(size.thumbs_per_side, 2);
    assert_eq!(
        size.clamp,
        Some(ClampEvent::ForcedMinimum {
            computed: 1,
            forced: 2
        })
    );
}

#[test]
fn clamp_records_forced_maximum() {
    let size = clamp_thumbs_per_side(40, 16);
    assert_eq!(size.thumbs_per_side, 16);
    assert_eq!(
        size.clamp,
        Some(ClampEvent::ForcedMaximum {
            computed: 40,
            forced: 16
        })
    );
}

#[test]
fn grid_size_rounds_to_nearest_speed_target() {
    let cfg = GridConfig::default();
    for (duration, fps, expected) in [(8.0, 24.0, 3), (30.0, 30.0, 5), (90.0, 25.0, 9), (20.0, 60.0, 6)]
    {
        let meta = SourceMetadata::new(duration, fps, 1280, 720).unwrap();
        let size = WidthFirst.grid_size(&meta, &cfg);
        assert_eq!(size.thumbs_per_side, expected, "{duration}s@{fps}");
        assert_eq!(size.clamp, None);
    }
}

#[test]
fn rounding_up_keeps_slide_speed_above_minimum() {
    let cfg = GridConfig::default();
    // sqrt(2 * 24 * 8 / 60) = 2.53, rounded up to 3.
    let meta = SourceMetadata::new(8.0, 24.0, 1280, 720).unwrap();
    let n = f64::from(WidthFirst.grid_size(&meta, &cfg).thumbs_per_side);
    let thumb_duration = meta.duration / (n * n);
    let speed = f64::from(cfg.min_thumb_width) / thumb_duration / meta.frame_rate;
    assert!(speed >= cfg.min_speed_pixels_per_frame, "{speed}");
}

#[test]
fn policies_differ_only_in_canvas_width() {
    let cfg = GridConfig::default();
    assert_eq!(WidthFirst.full_width(&cfg, 7), 1000);
    assert_eq!(ThumbSizeFirst.full_width(&cfg, 7), 420);

    let meta = SourceMetadata::new(16.0, 24.0, 1920, 1080).unwrap();
    assert_eq!(
        WidthFirst.grid_size(&meta, &cfg),
        ThumbSizeFirst.grid_size(&meta, &cfg)
    );
}

#[test]
fn policy_kind_resolves_and_round_trips_names() {
    assert_eq!(SizingPolicyKind::default(), SizingPolicyKind::WidthFirst);
    assert_eq!(SizingPolicyKind::WidthFirst.policy().name(), "width-first");
    assert_eq!(
        SizingPolicyKind::ThumbSizeFirst.policy().name(),
        "thumb-size-first"
    );

    let json = serde_json::to_string(&SizingPolicyKind::ThumbSizeFirst).unwrap();
    assert_eq!(json, "\"thumb-size-first\"");
}

#[test]
fn grid_config_fills_missing_fields_with_defaults() {
    let cfg: GridConfig = serde_json::from_str(r#"{ "output_width": 1200 }"#).unwrap();
    assert_eq!(cfg.output_width, 1200);
    assert_eq!(cfg.min_thumb_width, 60);
    assert_eq!(cfg.max_thumbs_per_side(), 20);
}
