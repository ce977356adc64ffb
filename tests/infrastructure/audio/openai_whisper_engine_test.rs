use std::path::Path;

use serde_json::json;
use tbodemy::application::ports::{TranscriptionEngine, TranscriptionError};
use tbodemy::infrastructure::audio::OpenAiWhisperEngine;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(server: &MockServer) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new(
        "test-key".to_string(),
        Some(format!("{}/", server.uri())),
        None,
        "en",
    )
}

fn recording(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let file = dir.path().join(name);
    std::fs::write(&file, b"fake audio").unwrap();
    file
}

#[tokio::test]
async fn given_recording_when_transcribing_then_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "  I goes to school \n"})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let transcript = engine_for(&server)
        .transcribe(&recording(&dir, "turn.MP3"))
        .await
        .unwrap();

    assert_eq!(transcript, "I goes to school");
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("audio/mpeg"));
    assert!(body.contains("whisper-1"));
    assert!(body.contains("filename=\"turn.MP3\""));
}

#[tokio::test]
async fn given_recording_without_extension_when_transcribing_then_sends_webm() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hello"})))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    engine_for(&server)
        .transcribe(&recording(&dir, "turn"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(String::from_utf8_lossy(&requests[0].body).contains("audio/webm"));
}

#[tokio::test]
async fn given_exhausted_quota_when_transcribing_then_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let result = engine_for(&server)
        .transcribe(&recording(&dir, "turn.webm"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::QuotaExceeded)));
}

#[tokio::test]
async fn given_rejected_format_when_transcribing_then_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Invalid file format", "type": "invalid_request_error", "code": null}
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let result = engine_for(&server)
        .transcribe(&recording(&dir, "turn.webm"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_fails_before_calling_api() {
    let server = MockServer::start().await;

    let result = engine_for(&server)
        .transcribe(Path::new("/nonexistent/turn.webm"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::ReadFailed(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
