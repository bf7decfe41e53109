use super::*;

#[test]
fn parse_rate_accepts_rationals_and_decimals() {
    assert_eq!(parse_rate("30/1"), Some(30.0));
    assert!((parse_rate("30000/1001").unwrap() - 29.97).abs() < 1e-3);
    assert_eq!(parse_rate("25"), Some(25.0));
    assert_eq!(parse_rate("0/0"), None);
    assert_eq!(parse_rate("0/1"), None);
    assert_eq!(parse_rate("abc"), None);
}

#[test]
fn parses_first_video_stream() {
    let json = br#"{
        "streams": [
            { "codec_type": "audio", "duration": "12.000000" },
            {
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "avg_frame_rate": "24/1",
                "r_frame_rate": "24/1",
                "duration": "16.000000"
            }
        ],
        "format": { "duration": "16.020000" }
    }"#;
    let meta = parse_probe_json(json).unwrap();
    assert_eq!(meta.width, 1920);
    assert_eq!(meta.height, 1080);
    assert_eq!(meta.frame_rate, 24.0);
    assert_eq!(meta.duration, 16.0);
}

#[test]
fn falls_back_to_r_frame_rate_and_container_duration() {
    let json = br#"{
        "streams": [
            {
                "codec_type": "video",
                "width": 640,
                "height": 480,
                "avg_frame_rate": "0/0",
                "r_frame_rate": "30000/1001"
            }
        ],
        "format": { "duration": "9.5" }
    }"#;
    let meta = parse_probe_json(json).unwrap();
    assert!((meta.frame_rate - 29.97).abs() < 1e-3);
    assert_eq!(meta.duration, 9.5);
}

#[test]
fn rejects_streams_without_video() {
    let json = br#"{ "streams": [ { "codec_type": "audio" } ], "format": {} }"#;
    let err = parse_probe_json(json).unwrap_err();
    assert!(matches!(err, GestaltError::InvalidInput(_)), "{err}");
    assert!(err.to_string().contains("no video stream"));
}

#[test]
fn rejects_zero_duration() {
    let json = br#"{
        "streams": [
            { "codec_type": "video", "width": 8, "height": 8, "r_frame_rate": "25/1", "duration": "0.0" }
        ]
    }"#;
    let err = parse_probe_json(json).unwrap_err();
    assert!(matches!(err, GestaltError::InvalidInput(_)), "{err}");
}

#[test]
fn rejects_garbage() {
    assert!(matches!(
        parse_probe_json(b"not json"),
        Err(GestaltError::InvalidInput(_))
    ));
}

#[test]
fn probing_a_directory_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = probe_video(dir.path()).unwrap_err();
    assert!(err.to_string().contains("is a directory"), "{err}");
}

#[test]
fn probing_a_missing_file_is_invalid_input() {
    let err = probe_video(Path::new("definitely/not/here.mp4")).unwrap_err();
    assert!(matches!(err, GestaltError::InvalidInput(_)), "{err}");
}
