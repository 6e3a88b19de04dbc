use flow_core::errors::{ErrorInfo, FlowError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("harmonic", 9)
        .with_context("max_harmonic", 8)
}

#[test]
fn bounds_error_surface() {
    let err = FlowError::Bounds(sample_info("harmonic-out-of-bounds", "harmonic too large"));
    assert_eq!(err.info().code, "harmonic-out-of-bounds");
    assert_eq!(err.info().context["harmonic"], "9");
    assert!(err.is_fatal());
}

#[test]
fn insufficient_is_not_fatal() {
    let err = FlowError::Insufficient(ErrorInfo::new("too-few-particles", "need 2"));
    assert!(!err.is_fatal());
}

#[test]
fn display_lists_context_and_hint() {
    let err = FlowError::Config(
        sample_info("order", "order too large").with_hint("lower the order"),
    );
    let text = err.to_string();
    assert!(text.starts_with("config error: order too large (code: order)"));
    assert!(text.contains("harmonic=9, max_harmonic=8"));
    assert!(text.ends_with("| hint: lower the order"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = FlowError::Weights(ErrorInfo::new("W001", "length mismatch"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Weights\""));
    let decoded: FlowError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
