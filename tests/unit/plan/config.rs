use super::*;

fn source(duration: f64, frame_rate: f64, width: u32, height: u32) -> SourceMetadata {
    SourceMetadata {
        duration,
        frame_rate,
        width,
        height,
    }
}

fn assert_invalid_input(meta: SourceMetadata) {
    let err = meta.validate().unwrap_err();
    assert!(matches!(err, GestaltError::InvalidInput(_)), "{meta:?}: {err}");
}

fn assert_layout_constraint(cfg: GridConfig) {
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, GestaltError::LayoutConstraint(_)), "{cfg:?}: {err}");
}

#[test]
fn new_accepts_ordinary_metadata() {
    let meta = SourceMetadata::new(16.0, 24.0, 1920, 1080).unwrap();
    assert_eq!(meta, source(16.0, 24.0, 1920, 1080));
}

#[test]
fn non_positive_or_non_finite_duration_is_invalid_input() {
    for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_invalid_input(source(duration, 24.0, 1920, 1080));
    }
}

#[test]
fn non_positive_or_non_finite_frame_rate_is_invalid_input() {
    for frame_rate in [0.0, -24.0, f64::NAN, f64::INFINITY] {
        assert_invalid_input(source(10.0, frame_rate, 1920, 1080));
    }
}

#[test]
fn zero_dimensions_are_invalid_input() {
    assert_invalid_input(source(10.0, 24.0, 0, 1080));
    assert_invalid_input(source(10.0, 24.0, 1920, 0));
}

#[test]
fn new_runs_validation() {
    let err = SourceMetadata::new(10.0, 0.0, 640, 480).unwrap_err();
    assert!(matches!(err, GestaltError::InvalidInput(_)), "{err}");
}

#[test]
fn last_frame_time_is_one_frame_before_the_end() {
    assert!((source(10.0, 25.0, 640, 480).last_frame_time() - 9.96).abs() < 1e-12);
    assert_eq!(source(0.01, 25.0, 640, 480).last_frame_time(), 0.0);
}

#[test]
fn default_config_is_valid() {
    let cfg = GridConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.max_thumbs_per_side(), 16);
}

#[test]
fn zero_widths_are_layout_constraints() {
    assert_layout_constraint(GridConfig {
        output_width: 0,
        ..GridConfig::default()
    });
    assert_layout_constraint(GridConfig {
        min_thumb_width: 0,
        ..GridConfig::default()
    });
}

#[test]
fn non_positive_or_non_finite_speed_is_a_layout_constraint() {
    for speed in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        assert_layout_constraint(GridConfig {
            min_speed_pixels_per_frame: speed,
            ..GridConfig::default()
        });
    }
}

#[test]
fn room_for_fewer_than_two_thumbnails_is_a_layout_constraint() {
    let cfg = GridConfig {
        output_width: 119,
        min_thumb_width: 60,
        ..GridConfig::default()
    };
    assert_eq!(cfg.max_thumbs_per_side(), 1);
    assert_layout_constraint(cfg);

    GridConfig {
        output_width: 120,
        min_thumb_width: 60,
        ..GridConfig::default()
    }
    .validate()
    .unwrap();
}

#[test]
fn max_thumbs_per_side_is_zero_without_a_thumb_width() {
    let cfg = GridConfig {
        min_thumb_width: 0,
        ..GridConfig::default()
    };
    assert_eq!(cfg.max_thumbs_per_side(), 0);
}

#[test]
fn config_fills_missing_fields_from_defaults() {
    let cfg: GridConfig = serde_json::from_str(r#"{"min_thumb_width": 80}"#).unwrap();
    assert_eq!(cfg.min_thumb_width, 80);
    assert_eq!(cfg.output_width, 1000);
    assert_eq!(cfg.policy, SizingPolicyKind::WidthFirst);
}
