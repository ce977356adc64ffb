use tbodemy::application::services::{ServiceError, SessionRequest};
use tbodemy::domain::{ConversationType, DifficultyLevel, MessageRole, SessionState, UserRole};

use crate::helpers::mock_adapters::{CountingSynthesizer, MockTranscriber, ScriptedLlm, TestApp};

fn travel_session() -> SessionRequest {
    SessionRequest {
        topic: "travel".to_string(),
        conversation_type: ConversationType::Casual,
        difficulty_level: DifficultyLevel::Beginner,
    }
}

#[tokio::test]
async fn given_new_session_when_created_then_it_is_active_with_voiced_greeting() {
    let app = TestApp::new();
    let student = app.user("s@x.io", UserRole::Student).await;

    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Active);
    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 1);
    assert_eq!(details.messages[0].role, MessageRole::Assistant);
    assert!(details.messages[0].audio_path.is_some());
    assert_eq!(app.synthesizer.call_count(), 1);
}

#[tokio::test]
async fn given_active_session_when_submitting_turn_then_user_and_tutor_turns_are_stored() {
    let app = TestApp::new();
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    let exchange = app
        .state
        .speaking
        .submit_turn(&student, session.id, b"fake-audio", Some("turn.webm"))
        .await
        .unwrap();

    assert_eq!(exchange.user_message.role, MessageRole::User);
    assert_eq!(exchange.user_message.content, "I goes to school");
    assert_eq!(exchange.assistant_message.role, MessageRole::Assistant);
    assert_eq!(exchange.assistant_message.content, "Nice! Where is your school?");
    let audio_path = exchange.assistant_message.audio_path.unwrap();
    assert!(audio_path.starts_with("/static/speaking/session_"));

    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 3);
}

#[tokio::test]
async fn given_submitted_turn_when_transcribed_then_staged_upload_is_removed() {
    let app = TestApp::new();
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    app.state
        .speaking
        .submit_turn(&student, session.id, b"fake-audio", Some("turn.wav"))
        .await
        .unwrap();

    let seen = app.transcriber.seen_paths();
    assert_eq!(seen.len(), 1);
    let (path, existed) = &seen[0];
    assert!(*existed);
    assert_eq!(path.extension().unwrap(), "wav");
    assert!(!path.exists());
}

#[tokio::test]
async fn given_exhausted_quota_when_submitting_turn_then_rate_limited_and_nothing_stored() {
    let app = TestApp::with_transcriber(MockTranscriber::quota_exhausted());
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    let result = app
        .state
        .speaking
        .submit_turn(&student, session.id, b"fake-audio", None)
        .await;

    assert!(matches!(result, Err(ServiceError::RateLimited(_))));
    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 1);
    let (path, _) = &app.transcriber.seen_paths()[0];
    assert!(!path.exists());
}

#[tokio::test]
async fn given_ended_session_when_submitting_turn_then_invalid_state() {
    let app = TestApp::new();
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();
    let ended = app
        .state
        .speaking
        .end_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(ended.state, SessionState::Ended);
    assert!(ended.ended_at.is_some());

    let result = app
        .state
        .speaking
        .submit_turn(&student, session.id, b"fake-audio", None)
        .await;

    assert!(matches!(result, Err(ServiceError::InvalidState(_))));
    assert!(app.transcriber.seen_paths().is_empty());
    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 1);
}

#[tokio::test]
async fn given_ended_session_when_ending_again_then_invalid_state() {
    let app = TestApp::new();
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();
    app.state
        .speaking
        .end_session(&student, session.id)
        .await
        .unwrap();

    let result = app.state.speaking.end_session(&student, session.id).await;

    assert!(matches!(result, Err(ServiceError::InvalidState(_))));
}

#[tokio::test]
async fn given_other_students_session_when_reading_then_forbidden() {
    let app = TestApp::new();
    let owner = app.user("a@x.io", UserRole::Student).await;
    let intruder = app.user("b@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&owner, travel_session())
        .await
        .unwrap();

    let result = app.state.speaking.get_session(&intruder, session.id).await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn given_blank_transcript_when_submitting_turn_then_bad_request() {
    let app = TestApp::with_transcriber(MockTranscriber::saying("   "));
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    let result = app
        .state
        .speaking
        .submit_turn(&student, session.id, b"silence", None)
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn given_throttled_tutor_when_submitting_turn_then_internal_and_user_turn_is_kept() {
    let app = TestApp::with_adapters(
        MockTranscriber::saying("I goes to school"),
        ScriptedLlm::replying_then_rate_limited("Hi! Where did you travel last?"),
        CountingSynthesizer::default(),
    );
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    let result = app
        .state
        .speaking
        .submit_turn(&student, session.id, b"fake-audio", Some("turn.webm"))
        .await;

    assert!(matches!(result, Err(ServiceError::Internal(_))));
    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 2);
    assert_eq!(details.messages[1].role, MessageRole::User);
    assert_eq!(details.messages[1].content, "I goes to school");
    assert_eq!(details.session.state, SessionState::Active);
    let (path, _) = &app.transcriber.seen_paths()[0];
    assert!(!path.exists());
}

#[tokio::test]
async fn given_failing_reply_voice_when_submitting_turn_then_internal_and_both_turns_are_kept() {
    let app = TestApp::with_adapters(
        MockTranscriber::saying("I goes to school"),
        ScriptedLlm::replying("Nice! Where is your school?"),
        CountingSynthesizer::failing_from(1),
    );
    let student = app.user("s@x.io", UserRole::Student).await;
    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    let result = app
        .state
        .speaking
        .submit_turn(&student, session.id, b"fake-audio", Some("turn.webm"))
        .await;

    assert!(matches!(result, Err(ServiceError::Internal(_))));
    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 3);
    assert!(details.messages[0].audio_path.is_some());
    assert_eq!(details.messages[1].role, MessageRole::User);
    assert_eq!(details.messages[2].role, MessageRole::Assistant);
    assert_eq!(details.messages[2].content, "Nice! Where is your school?");
    assert!(details.messages[2].audio_path.is_none());
    assert_eq!(app.audio_store.len(), 1);
    let (path, _) = &app.transcriber.seen_paths()[0];
    assert!(!path.exists());
}

#[tokio::test]
async fn given_silent_greeting_voice_when_creating_session_then_session_still_starts() {
    let app = TestApp::with_adapters(
        MockTranscriber::saying("I goes to school"),
        ScriptedLlm::replying("Hello!"),
        CountingSynthesizer::failing_from(0),
    );
    let student = app.user("s@x.io", UserRole::Student).await;

    let session = app
        .state
        .speaking
        .create_session(&student, travel_session())
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Active);
    let details = app
        .state
        .speaking
        .get_session(&student, session.id)
        .await
        .unwrap();
    assert_eq!(details.messages.len(), 1);
    assert!(details.messages[0].audio_path.is_none());
}
