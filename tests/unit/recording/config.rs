use super::*;

#[test]
fn empty_object_uses_defaults() {
    let cfg = CanvasConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, CanvasConfig::default());
    assert!(cfg.blurred_rrect_fast_path);
    assert!(cfg.clip_layer_bounds);
}

#[test]
fn fields_override_defaults() {
    let cfg = CanvasConfig::from_json_str(r#"{"blurred_rrect_fast_path": false}"#).unwrap();
    assert!(!cfg.blurred_rrect_fast_path);
    assert!(cfg.clip_layer_bounds);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = CanvasConfig::from_json_str(r#"{"fast": true}"#).unwrap_err();
    assert!(matches!(err, CanvasError::Serde(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = CanvasConfig::from_path("/definitely/not/here/canvas.json").unwrap_err();
    assert!(matches!(err, CanvasError::Other(_)));
    assert!(format!("{err:#}").contains("canvas.json"));
}
