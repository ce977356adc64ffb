use tbodemy::infrastructure::observability::sanitize_for_log;

#[test]
fn given_blank_text_when_sanitizing_then_marks_empty() {
    assert_eq!(sanitize_for_log("   "), "[EMPTY]");
}

#[test]
fn given_long_multibyte_text_when_sanitizing_then_truncates_on_char_boundary() {
    let text = "é".repeat(150);

    let sanitized = sanitize_for_log(&text);

    assert!(sanitized.starts_with(&"é".repeat(100)));
    assert!(sanitized.ends_with("(150 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_for_log("use password=hunter2 and token=abc&x=1");

    assert_eq!(
        sanitized,
        "use password=[REDACTED] and token=[REDACTED]&x=1"
    );
}

#[test]
fn given_bearer_header_when_sanitizing_then_token_is_hidden() {
    assert_eq!(
        sanitize_for_log("Authorization: Bearer eyJhbGci"),
        "Authorization: Bearer [REDACTED]"
    );
}
