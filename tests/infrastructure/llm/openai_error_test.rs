use reqwest::StatusCode;
use tbodemy::infrastructure::llm::is_quota_error;

#[test]
fn given_too_many_requests_when_classifying_then_is_quota() {
    assert!(is_quota_error(StatusCode::TOO_MANY_REQUESTS, ""));
}

#[test]
fn given_insufficient_quota_code_when_classifying_then_is_quota() {
    let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;

    assert!(is_quota_error(StatusCode::FORBIDDEN, body));
}

#[test]
fn given_other_error_when_classifying_then_is_not_quota() {
    let body = r#"{"error":{"message":"Invalid file format","type":"invalid_request_error","code":null}}"#;

    assert!(!is_quota_error(StatusCode::BAD_REQUEST, body));
}

#[test]
fn given_unstructured_body_mentioning_quota_when_classifying_then_is_not_quota() {
    assert!(!is_quota_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "insufficient_quota"
    ));
}
