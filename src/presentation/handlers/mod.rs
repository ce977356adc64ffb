mod auth;
mod courses;
mod enrollments;
mod health;
mod lessons;
mod social;
mod speaking;
mod units;

pub use auth::{me_handler, register_handler, token_handler};
pub use courses::{
    course_students_handler, course_units_handler, create_complete_course_handler,
    create_course_handler, delete_course_handler, get_course_handler, list_courses_handler,
    my_courses_handler, update_course_handler,
};
pub use enrollments::{enroll_handler, my_enrollments_handler};
pub use health::{health_handler, root_handler};
pub use lessons::{daily_lesson_handler, daily_lessons_handler};
pub use social::{
    accept_friend_request_handler, conversation_handler, conversations_handler, friends_handler,
    grammar_check_handler, list_students_handler, pending_requests_handler,
    reject_friend_request_handler, send_friend_request_handler, send_message_handler,
};
pub use speaking::{
    create_session_handler, end_session_handler, get_session_handler, list_sessions_handler,
    submit_turn_handler,
};
pub use units::{
    create_audio_sentence_handler, create_quiz_handler, create_unit_handler,
    delete_audio_sentence_handler, delete_quiz_handler, delete_unit_handler, get_unit_handler,
    unit_audio_sentences_handler, unit_quizzes_handler, update_audio_sentence_handler,
    update_quiz_handler, update_unit_handler,
};
