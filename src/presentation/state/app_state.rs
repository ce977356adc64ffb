use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CourseService, EnrollmentService, LessonService, SocialService, SpeakingService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub courses: Arc<CourseService>,
    pub enrollments: Arc<EnrollmentService>,
    pub social: Arc<SocialService>,
    pub speaking: Arc<SpeakingService>,
    pub lessons: Arc<LessonService>,
    /// Served under `/audio` and `/static/speaking`.
    pub static_dir: PathBuf,
}
