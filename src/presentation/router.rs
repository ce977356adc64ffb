use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    accept_friend_request_handler, conversation_handler, conversations_handler,
    course_students_handler, course_units_handler, create_audio_sentence_handler,
    create_complete_course_handler, create_course_handler, create_quiz_handler,
    create_session_handler, create_unit_handler, daily_lesson_handler, daily_lessons_handler,
    delete_audio_sentence_handler, delete_course_handler, delete_quiz_handler,
    delete_unit_handler, end_session_handler, enroll_handler, friends_handler,
    get_course_handler, get_session_handler, get_unit_handler, grammar_check_handler,
    health_handler, list_courses_handler, list_sessions_handler, list_students_handler,
    me_handler, my_courses_handler, my_enrollments_handler, pending_requests_handler,
    register_handler, reject_friend_request_handler, root_handler, send_friend_request_handler,
    send_message_handler, submit_turn_handler, token_handler, unit_audio_sentences_handler,
    unit_quizzes_handler, update_audio_sentence_handler, update_course_handler,
    update_quiz_handler, update_unit_handler,
};
use crate::presentation::state::AppState;

const MAX_AUDIO_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let audio_dir = ServeDir::new(state.static_dir.join("audio"));
    let speaking_dir = ServeDir::new(state.static_dir.join("speaking"));

    let accounts = Router::new()
        .route("/register", post(register_handler))
        .route("/token", post(token_handler))
        .route("/me", get(me_handler));

    let courses = Router::new()
        .route("/courses", post(create_course_handler).get(list_courses_handler))
        .route("/courses/complete", post(create_complete_course_handler))
        .route(
            "/courses/{course_id}",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler),
        )
        .route("/my-courses", get(my_courses_handler))
        .route("/courses/{course_id}/units", get(course_units_handler))
        .route("/courses/{course_id}/students", get(course_students_handler))
        .route("/units", post(create_unit_handler))
        .route(
            "/units/{unit_id}",
            get(get_unit_handler)
                .put(update_unit_handler)
                .delete(delete_unit_handler),
        )
        .route("/units/{unit_id}/quizzes", get(unit_quizzes_handler))
        .route(
            "/units/{unit_id}/audio-sentences",
            get(unit_audio_sentences_handler),
        )
        .route("/quizzes", post(create_quiz_handler))
        .route(
            "/quizzes/{quiz_id}",
            put(update_quiz_handler).delete(delete_quiz_handler),
        )
        .route("/audio-sentences", post(create_audio_sentence_handler))
        .route(
            "/audio-sentences/{audio_id}",
            put(update_audio_sentence_handler).delete(delete_audio_sentence_handler),
        );

    let learning = Router::new()
        .route("/enrollments", post(enroll_handler))
        .route("/my-enrollments", get(my_enrollments_handler))
        .route("/daily-lesson", get(daily_lesson_handler))
        .route("/daily-lessons", get(daily_lessons_handler));

    let social = Router::new()
        .route("/students", get(list_students_handler))
        .route(
            "/friend-requests",
            post(send_friend_request_handler).get(pending_requests_handler),
        )
        .route(
            "/friend-requests/{request_id}/accept",
            post(accept_friend_request_handler),
        )
        .route(
            "/friend-requests/{request_id}/reject",
            post(reject_friend_request_handler),
        )
        .route("/friends", get(friends_handler))
        .route("/messages", post(send_message_handler))
        .route("/conversations", get(conversations_handler))
        .route("/conversations/{other_user_id}", get(conversation_handler))
        .route("/grammar-check", post(grammar_check_handler));

    let speaking = Router::new()
        .route(
            "/speaking/sessions",
            post(create_session_handler).get(list_sessions_handler),
        )
        .route("/speaking/sessions/{session_id}", get(get_session_handler))
        .route(
            "/speaking/sessions/{session_id}/message",
            post(submit_turn_handler).layer(DefaultBodyLimit::max(MAX_AUDIO_UPLOAD_BYTES)),
        )
        .route(
            "/speaking/sessions/{session_id}/end",
            post(end_session_handler),
        );

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(accounts)
        .merge(courses)
        .merge(learning)
        .merge(social)
        .merge(speaking)
        .nest_service("/audio", audio_dir)
        .nest_service("/static/speaking", speaking_dir)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
