use complexlane_core::{
    ByteOrder, ComplexBuffer, ElementType, LogLevel, LoggingConfig, Sample, TypeKind,
};

#[test]
fn buffer_serializes_as_lane_pairs() {
    let buffer = ComplexBuffer::from(vec![Sample::new(1.0, 2.0), Sample::new(-0.5, 0.0)]);
    let json = serde_json::to_value(&buffer).expect("serialize buffer");
    assert_eq!(json, serde_json::json!([[1.0, 2.0], [-0.5, 0.0]]));

    let decoded: ComplexBuffer = serde_json::from_value(json).expect("deserialize buffer");
    assert_eq!(decoded, buffer);
}

#[test]
fn element_type_uses_snake_case_wire_names() {
    let json = serde_json::to_value(ElementType::COMPLEX64).expect("serialize element type");
    assert_eq!(json["kind"], "complex");
    assert_eq!(json["itemsize"], 8);
    assert_eq!(json["byte_order"], "native");

    let decoded: ElementType = serde_json::from_value(serde_json::json!({
        "kind": "complex",
        "itemsize": 8,
        "byte_order": "not_applicable"
    }))
    .expect("deserialize element type");
    assert_eq!(
        decoded,
        ElementType::new(TypeKind::Complex, 8, ByteOrder::NotApplicable)
    );
    assert!(decoded.is_complex64());
}

#[test]
fn logging_config_fills_missing_fields_with_defaults() {
    let config: LoggingConfig =
        serde_json::from_value(serde_json::json!({ "level": "warning" })).expect("partial config");
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.log_dir, LoggingConfig::default().log_dir);

    let err = serde_json::from_value::<LoggingConfig>(serde_json::json!({ "level": "loud" }))
        .expect_err("unknown level must fail");
    assert!(err.to_string().contains("loud"), "unexpected error: {err}");
}

#[test]
fn logging_level_accepts_the_same_spellings_as_the_environment() {
    for (raw, expected) in [
        ("INFO", LogLevel::Info),
        (" Debug ", LogLevel::Debug),
        ("WARNING", LogLevel::Warn),
        ("error", LogLevel::Error),
    ] {
        let config: LoggingConfig = serde_json::from_value(serde_json::json!({ "level": raw }))
            .unwrap_or_else(|err| panic!("level `{raw}` should load: {err}"));
        assert_eq!(config.level, expected);
    }

    let json = serde_json::to_value(LoggingConfig {
        level: LogLevel::Warn,
        ..LoggingConfig::default()
    })
    .expect("serialize config");
    assert_eq!(json["level"], "warn");
}
