use serde_json::json;

use tbodemy::application::services::{
    AudioSentenceInput, CompleteCourse, CourseInput, ServiceError, UnitInput,
};
use tbodemy::domain::{CourseChanges, QuizType, UserRole};

use crate::helpers::mock_adapters::{
    CountingSynthesizer, MockTranscriber, ScriptedLlm, TestApp,
};

fn outline(value: serde_json::Value) -> CompleteCourse {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn given_mixed_content_when_creating_complete_course_then_units_hold_text_audio_and_quizzes() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;

    let details = app
        .state
        .courses
        .create_complete_course(
            &teacher,
            outline(json!({
                "title": "Basics",
                "description": "First steps",
                "is_published": true,
                "unidades": [
                    {
                        "title": "Greetings",
                        "contenido": [
                            {"tipo": "texto", "texto": "Hello"},
                            {"tipo": "texto", "texto": "Goodbye"},
                            {"tipo": "audio", "sentence": "Good morning"},
                            {"tipo": "quiz", "question": "Hi means?", "correct_answer": "Hola",
                             "quiz_type": "multiple_choice", "options": ["Hola", "Adios"]},
                            {"tipo": "video", "url": "ignored"}
                        ]
                    },
                    {"title": "Numbers", "contenido": []}
                ]
            })),
        )
        .await
        .unwrap();

    assert!(details.course.is_published);
    assert_eq!(details.teacher.id, teacher.id);
    assert_eq!(details.units.len(), 2);

    let first = &details.units[0];
    assert_eq!(first.unit.order, 0);
    assert_eq!(first.unit.content.as_deref(), Some("Hello\n\nGoodbye"));
    assert_eq!(first.quizzes.len(), 1);
    assert_eq!(first.quizzes[0].quiz_type, QuizType::MultipleChoice);
    assert_eq!(first.audio_sentences.len(), 1);
    let expected_prefix = format!(
        "/audio/course_{id}/course_{id}_unit_0_",
        id = details.course.id
    );
    assert!(first.audio_sentences[0].audio_path.starts_with(&expected_prefix));

    assert_eq!(details.units[1].unit.order, 1);
    assert_eq!(app.synthesizer.call_count(), 1);
    assert_eq!(app.audio_store.len(), 1);
}

#[tokio::test]
async fn given_repeated_sentence_when_creating_complete_course_then_audio_is_synthesized_once() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;

    let details = app
        .state
        .courses
        .create_complete_course(
            &teacher,
            outline(json!({
                "title": "Echo",
                "unidades": [{
                    "title": "U1",
                    "contenido": [
                        {"tipo": "audio", "sentence": "Same words"},
                        {"tipo": "audio", "sentence": "Same words"}
                    ]
                }]
            })),
        )
        .await
        .unwrap();

    let sentences = &details.units[0].audio_sentences;
    assert_eq!(sentences.len(), 2);
    assert_eq!(sentences[0].audio_path, sentences[1].audio_path);
    assert_eq!(sentences[0].order, 0);
    assert_eq!(sentences[1].order, 1);
    assert_eq!(app.synthesizer.call_count(), 1);
}

#[tokio::test]
async fn given_other_teachers_course_when_updating_then_forbidden() {
    let app = TestApp::new();
    let owner = app.user("owner@x.io", UserRole::Teacher).await;
    let other = app.user("other@x.io", UserRole::Teacher).await;
    let course = app
        .state
        .courses
        .create_course(
            &owner,
            CourseInput {
                title: "Mine".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let result = app
        .state
        .courses
        .update_course(
            &other,
            course.id,
            CourseChanges {
                title: Some("Stolen".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn given_new_course_when_created_then_it_starts_unpublished() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;

    let course = app
        .state
        .courses
        .create_course(
            &teacher,
            CourseInput {
                title: "Draft".to_string(),
                description: Some("Work in progress".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(!course.is_published);
    let mine = app.state.courses.teacher_courses(&teacher).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn given_negative_order_when_creating_unit_then_bad_request() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;
    let course = app
        .state
        .courses
        .create_course(
            &teacher,
            CourseInput {
                title: "Course".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let result = app
        .state
        .courses
        .create_unit(
            &teacher,
            UnitInput {
                course_id: course.id,
                title: "Bad".to_string(),
                content: None,
                order: -1,
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn given_deleted_course_when_fetching_then_not_found() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;
    let details = app
        .state
        .courses
        .create_complete_course(
            &teacher,
            outline(json!({
                "title": "Short lived",
                "unidades": [{"title": "U1", "contenido": [{"tipo": "texto", "texto": "x"}]}]
            })),
        )
        .await
        .unwrap();

    app.state
        .courses
        .delete_course(&teacher, details.course.id)
        .await
        .unwrap();

    let result = app.state.courses.course_details(details.course.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

fn silent_voice_app() -> TestApp {
    TestApp::with_adapters(
        MockTranscriber::saying("unused"),
        ScriptedLlm::replying("unused"),
        CountingSynthesizer::failing_from(0),
    )
}

#[tokio::test]
async fn given_silent_voice_when_creating_complete_course_then_placeholders_follow_sentence_order() {
    let app = silent_voice_app();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;

    let details = app
        .state
        .courses
        .create_complete_course(
            &teacher,
            outline(json!({
                "title": "Quiet",
                "unidades": [
                    {"title": "U0", "contenido": []},
                    {"title": "U1", "contenido": []},
                    {
                        "title": "U2",
                        "contenido": [
                            {"tipo": "audio", "sentence": "Good morning"},
                            {"tipo": "texto", "texto": "between"},
                            {"tipo": "audio", "sentence": "Good night"}
                        ]
                    }
                ]
            })),
        )
        .await
        .unwrap();

    let third = &details.units[2];
    assert_eq!(third.unit.order, 2);
    let paths: Vec<&str> = third
        .audio_sentences
        .iter()
        .map(|s| s.audio_path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec!["/audio/placeholder/0.mp3", "/audio/placeholder/1.mp3"]
    );
    assert_eq!(app.audio_store.len(), 0);
}

#[tokio::test]
async fn given_silent_voice_when_adding_single_sentence_then_placeholder_follows_unit_order() {
    let app = silent_voice_app();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;
    let course = app
        .state
        .courses
        .create_course(
            &teacher,
            CourseInput {
                title: "Course".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    let unit = app
        .state
        .courses
        .create_unit(
            &teacher,
            UnitInput {
                course_id: course.id,
                title: "Third".to_string(),
                content: None,
                order: 2,
            },
        )
        .await
        .unwrap();

    let sentence = app
        .state
        .courses
        .create_audio_sentence(
            &teacher,
            AudioSentenceInput {
                unit_id: unit.id,
                sentence: "See you soon".to_string(),
                audio_path: String::new(),
                order: 0,
            },
        )
        .await
        .unwrap();

    assert_eq!(sentence.audio_path, "/audio/placeholder/2.mp3");
}
