use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

const QUOTA_CODES: [&str; 2] = ["insufficient_quota", "rate_limit_exceeded"];

/// True when an OpenAI error response means the account is out of quota or
/// throttled, judged from the status and the structured error body.
pub fn is_quota_error(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }

    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| {
            [envelope.error.code, envelope.error.kind]
                .into_iter()
                .flatten()
                .any(|value| QUOTA_CODES.contains(&value.as_str()))
        })
        .unwrap_or(false)
}
