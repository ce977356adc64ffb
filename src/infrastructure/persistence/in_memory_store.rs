use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::application::ports::{
    CourseRepository, CourseTransaction, EnrollmentRepository, FriendshipRepository,
    MessageRepository, RepositoryError, SpeakingRepository, UnitContentRepository, UserRepository,
};
use crate::domain::{
    AudioSentence, AudioSentenceChanges, AudioSentenceId, Course, CourseChanges, CourseId,
    Enrollment, EnrollmentId, Friendship, FriendshipId, FriendshipStatus, Message, MessageId,
    NewAudioSentence, NewCourse, NewMessage, NewQuiz, NewSpeakingMessage, NewSpeakingSession,
    NewUnit, NewUser, Quiz, QuizChanges, QuizId, SessionState, SpeakingMessage, SpeakingMessageId,
    SpeakingSession, SpeakingSessionId, Unit, UnitChanges, UnitId, User, UserId, UserRole,
};

#[derive(Default)]
struct Tables {
    sequence: i64,
    users: BTreeMap<i64, User>,
    courses: BTreeMap<i64, Course>,
    units: BTreeMap<i64, Unit>,
    quizzes: BTreeMap<i64, Quiz>,
    audio_sentences: BTreeMap<i64, AudioSentence>,
    enrollments: BTreeMap<i64, Enrollment>,
    friendships: BTreeMap<i64, Friendship>,
    messages: BTreeMap<i64, Message>,
    sessions: BTreeMap<i64, SpeakingSession>,
    speaking_messages: BTreeMap<i64, SpeakingMessage>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn require_course(&self, id: CourseId) -> Result<(), RepositoryError> {
        if self.courses.contains_key(&id.as_i64()) {
            Ok(())
        } else {
            Err(RepositoryError::ConstraintViolation(format!(
                "course {} does not exist",
                id
            )))
        }
    }

    fn require_unit(&self, id: UnitId) -> Result<(), RepositoryError> {
        if self.units.contains_key(&id.as_i64()) {
            Ok(())
        } else {
            Err(RepositoryError::ConstraintViolation(format!(
                "unit {} does not exist",
                id
            )))
        }
    }

    fn drop_unit_content(&mut self, unit_id: UnitId) {
        self.quizzes.retain(|_, q| q.unit_id != unit_id);
        self.audio_sentences.retain(|_, a| a.unit_id != unit_id);
    }
}

fn sorted_by_order<T: Clone>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> (i32, i64)) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| key(row));
    rows
}

fn build_course(id: i64, course: &NewCourse) -> Course {
    let now = Utc::now();
    Course {
        id: CourseId::from_i64(id),
        title: course.title.clone(),
        description: course.description.clone(),
        teacher_id: course.teacher_id,
        is_published: course.is_published,
        created_at: now,
        updated_at: now,
    }
}

fn build_unit(id: i64, unit: &NewUnit) -> Unit {
    Unit {
        id: UnitId::from_i64(id),
        course_id: unit.course_id,
        title: unit.title.clone(),
        order: unit.order,
        content: unit.content.clone(),
        created_at: Utc::now(),
    }
}

fn build_quiz(id: i64, quiz: &NewQuiz) -> Quiz {
    Quiz {
        id: QuizId::from_i64(id),
        unit_id: quiz.unit_id,
        quiz_type: quiz.quiz_type,
        question: quiz.question.clone(),
        correct_answer: quiz.correct_answer.clone(),
        options: quiz.options.clone(),
        order: quiz.order,
    }
}

fn build_audio_sentence(id: i64, audio: &NewAudioSentence) -> AudioSentence {
    AudioSentence {
        id: AudioSentenceId::from_i64(id),
        unit_id: audio.unit_id,
        sentence: audio.sentence.clone(),
        audio_path: audio.audio_path.clone(),
        order: audio.order,
    }
}

/// Process-local storage backing every repository port. Used for tests and
/// for running the service without PostgreSQL; nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::ConstraintViolation(
                "users.email must be unique".to_string(),
            ));
        }
        let id = tables.next_id();
        let created = User {
            id: UserId::from_i64(id),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            name: user.name.clone(),
            role: user.role,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables.lock().await.users.get(&id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_students(&self, exclude: Option<UserId>) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.role == UserRole::Student && Some(u.id) != exclude)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn create_course(&self, course: &NewCourse) -> Result<Course, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let created = build_course(id, course);
        tables.courses.insert(id, created.clone());
        Ok(created)
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, RepositoryError> {
        Ok(self.tables.lock().await.courses.get(&id.as_i64()).cloned())
    }

    async fn list_courses(&self, offset: i64, limit: i64) -> Result<Vec<Course>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .courses
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_teacher_courses(
        &self,
        teacher_id: UserId,
    ) -> Result<Vec<Course>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .courses
            .values()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let Some(course) = tables.courses.get_mut(&id.as_i64()) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            course.title = title.clone();
        }
        if let Some(description) = &changes.description {
            course.description = Some(description.clone());
        }
        if let Some(is_published) = changes.is_published {
            course.is_published = is_published;
        }
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.courses.remove(&id.as_i64()).is_none() {
            return Ok(false);
        }
        let unit_ids: Vec<UnitId> = tables
            .units
            .values()
            .filter(|u| u.course_id == id)
            .map(|u| u.id)
            .collect();
        for unit_id in unit_ids {
            tables.units.remove(&unit_id.as_i64());
            tables.drop_unit_content(unit_id);
        }
        tables.enrollments.retain(|_, e| e.course_id != id);
        Ok(true)
    }

    async fn create_unit(&self, unit: &NewUnit) -> Result<Unit, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.require_course(unit.course_id)?;
        let id = tables.next_id();
        let created = build_unit(id, unit);
        tables.units.insert(id, created.clone());
        Ok(created)
    }

    async fn get_unit(&self, id: UnitId) -> Result<Option<Unit>, RepositoryError> {
        Ok(self.tables.lock().await.units.get(&id.as_i64()).cloned())
    }

    async fn list_units(&self, course_id: CourseId) -> Result<Vec<Unit>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(sorted_by_order(
            tables.units.values().filter(|u| u.course_id == course_id).cloned(),
            |u| (u.order, u.id.as_i64()),
        ))
    }

    async fn update_unit(
        &self,
        id: UnitId,
        changes: &UnitChanges,
    ) -> Result<Option<Unit>, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let Some(unit) = tables.units.get_mut(&id.as_i64()) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            unit.title = title.clone();
        }
        if let Some(content) = &changes.content {
            unit.content = Some(content.clone());
        }
        if let Some(order) = changes.order {
            unit.order = order;
        }
        Ok(Some(unit.clone()))
    }

    async fn delete_unit(&self, id: UnitId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.units.remove(&id.as_i64()).is_none() {
            return Ok(false);
        }
        tables.drop_unit_content(id);
        Ok(true)
    }

    async fn begin(&self) -> Result<Box<dyn CourseTransaction>, RepositoryError> {
        Ok(Box::new(InMemoryCourseTransaction {
            tables: Arc::clone(&self.tables),
            courses: Vec::new(),
            units: Vec::new(),
            quizzes: Vec::new(),
            audio_sentences: Vec::new(),
        }))
    }
}

/// Rows are staged locally and written under a single lock on commit.
pub struct InMemoryCourseTransaction {
    tables: Arc<Mutex<Tables>>,
    courses: Vec<Course>,
    units: Vec<Unit>,
    quizzes: Vec<Quiz>,
    audio_sentences: Vec<AudioSentence>,
}

impl InMemoryCourseTransaction {
    async fn reserve_id(&self) -> i64 {
        self.tables.lock().await.next_id()
    }
}

#[async_trait]
impl CourseTransaction for InMemoryCourseTransaction {
    async fn insert_course(&mut self, course: &NewCourse) -> Result<Course, RepositoryError> {
        let created = build_course(self.reserve_id().await, course);
        self.courses.push(created.clone());
        Ok(created)
    }

    async fn insert_unit(&mut self, unit: &NewUnit) -> Result<Unit, RepositoryError> {
        let staged = self.courses.iter().any(|c| c.id == unit.course_id);
        if !staged {
            self.tables.lock().await.require_course(unit.course_id)?;
        }
        let created = build_unit(self.reserve_id().await, unit);
        self.units.push(created.clone());
        Ok(created)
    }

    async fn insert_quiz(&mut self, quiz: &NewQuiz) -> Result<Quiz, RepositoryError> {
        let staged = self.units.iter().any(|u| u.id == quiz.unit_id);
        if !staged {
            self.tables.lock().await.require_unit(quiz.unit_id)?;
        }
        let created = build_quiz(self.reserve_id().await, quiz);
        self.quizzes.push(created.clone());
        Ok(created)
    }

    async fn insert_audio_sentence(
        &mut self,
        audio: &NewAudioSentence,
    ) -> Result<AudioSentence, RepositoryError> {
        let staged = self.units.iter().any(|u| u.id == audio.unit_id);
        if !staged {
            self.tables.lock().await.require_unit(audio.unit_id)?;
        }
        let created = build_audio_sentence(self.reserve_id().await, audio);
        self.audio_sentences.push(created.clone());
        Ok(created)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let this = *self;
        let mut tables = this.tables.lock().await;
        for course in this.courses {
            tables.courses.insert(course.id.as_i64(), course);
        }
        for unit in this.units {
            tables.units.insert(unit.id.as_i64(), unit);
        }
        for quiz in this.quizzes {
            tables.quizzes.insert(quiz.id.as_i64(), quiz);
        }
        for audio in this.audio_sentences {
            tables.audio_sentences.insert(audio.id.as_i64(), audio);
        }
        Ok(())
    }
}

#[async_trait]
impl UnitContentRepository for InMemoryStore {
    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.require_unit(quiz.unit_id)?;
        let id = tables.next_id();
        let created = build_quiz(id, quiz);
        tables.quizzes.insert(id, created.clone());
        Ok(created)
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, RepositoryError> {
        Ok(self.tables.lock().await.quizzes.get(&id.as_i64()).cloned())
    }

    async fn list_quizzes(&self, unit_id: UnitId) -> Result<Vec<Quiz>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(sorted_by_order(
            tables.quizzes.values().filter(|q| q.unit_id == unit_id).cloned(),
            |q| (q.order, q.id.as_i64()),
        ))
    }

    async fn update_quiz(
        &self,
        id: QuizId,
        changes: &QuizChanges,
    ) -> Result<Option<Quiz>, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let Some(quiz) = tables.quizzes.get_mut(&id.as_i64()) else {
            return Ok(None);
        };
        if let Some(quiz_type) = changes.quiz_type {
            quiz.quiz_type = quiz_type;
        }
        if let Some(question) = &changes.question {
            quiz.question = question.clone();
        }
        if let Some(answer) = &changes.correct_answer {
            quiz.correct_answer = answer.clone();
        }
        if let Some(options) = &changes.options {
            quiz.options = Some(options.clone());
        }
        if let Some(order) = changes.order {
            quiz.order = order;
        }
        Ok(Some(quiz.clone()))
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<bool, RepositoryError> {
        Ok(self.tables.lock().await.quizzes.remove(&id.as_i64()).is_some())
    }

    async fn create_audio_sentence(
        &self,
        audio: &NewAudioSentence,
    ) -> Result<AudioSentence, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.require_unit(audio.unit_id)?;
        let id = tables.next_id();
        let created = build_audio_sentence(id, audio);
        tables.audio_sentences.insert(id, created.clone());
        Ok(created)
    }

    async fn get_audio_sentence(
        &self,
        id: AudioSentenceId,
    ) -> Result<Option<AudioSentence>, RepositoryError> {
        Ok(self.tables.lock().await.audio_sentences.get(&id.as_i64()).cloned())
    }

    async fn list_audio_sentences(
        &self,
        unit_id: UnitId,
    ) -> Result<Vec<AudioSentence>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(sorted_by_order(
            tables.audio_sentences.values().filter(|a| a.unit_id == unit_id).cloned(),
            |a| (a.order, a.id.as_i64()),
        ))
    }

    async fn update_audio_sentence(
        &self,
        id: AudioSentenceId,
        changes: &AudioSentenceChanges,
    ) -> Result<Option<AudioSentence>, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let Some(audio) = tables.audio_sentences.get_mut(&id.as_i64()) else {
            return Ok(None);
        };
        if let Some(sentence) = &changes.sentence {
            audio.sentence = sentence.clone();
        }
        if let Some(path) = &changes.audio_path {
            audio.audio_path = path.clone();
        }
        if let Some(order) = changes.order {
            audio.order = order;
        }
        Ok(Some(audio.clone()))
    }

    async fn delete_audio_sentence(&self, id: AudioSentenceId) -> Result<bool, RepositoryError> {
        Ok(self.tables.lock().await.audio_sentences.remove(&id.as_i64()).is_some())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn create(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.require_course(course_id)?;
        let duplicate = tables
            .enrollments
            .values()
            .any(|e| e.student_id == student_id && e.course_id == course_id);
        if duplicate {
            return Err(RepositoryError::ConstraintViolation(
                "enrollment already exists".to_string(),
            ));
        }
        let id = tables.next_id();
        let created = Enrollment {
            id: EnrollmentId::from_i64(id),
            student_id,
            course_id,
            enrolled_at: Utc::now(),
            progress: serde_json::json!({}),
        };
        tables.enrollments.insert(id, created.clone());
        Ok(created)
    }

    async fn find(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .enrollments
            .values()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<Enrollment>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_students(&self, course_id: CourseId) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| tables.users.get(&e.student_id.as_i64()).cloned())
            .collect())
    }
}

#[async_trait]
impl FriendshipRepository for InMemoryStore {
    async fn find_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Option<Friendship>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.friendships.values().find(|f| f.involves(a, b)).cloned())
    }

    async fn create(
        &self,
        requester_id: UserId,
        receiver_id: UserId,
    ) -> Result<Friendship, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if requester_id == receiver_id {
            return Err(RepositoryError::ConstraintViolation(
                "friendship requires two distinct users".to_string(),
            ));
        }
        if tables
            .friendships
            .values()
            .any(|f| f.involves(requester_id, receiver_id))
        {
            return Err(RepositoryError::ConstraintViolation(
                "friendship pair already exists".to_string(),
            ));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let created = Friendship {
            id: FriendshipId::from_i64(id),
            requester_id,
            receiver_id,
            status: FriendshipStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.friendships.insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: FriendshipId) -> Result<Option<Friendship>, RepositoryError> {
        Ok(self.tables.lock().await.friendships.get(&id.as_i64()).cloned())
    }

    async fn update_status(
        &self,
        id: FriendshipId,
        status: FriendshipStatus,
    ) -> Result<Option<Friendship>, RepositoryError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.friendships.get_mut(&id.as_i64()).map(|f| {
            f.status = status;
            f.updated_at = Utc::now();
            f.clone()
        }))
    }

    async fn list_pending_for(
        &self,
        receiver_id: UserId,
    ) -> Result<Vec<Friendship>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .friendships
            .values()
            .filter(|f| f.receiver_id == receiver_id && f.status == FriendshipStatus::Pending)
            .cloned()
            .collect())
    }

    async fn list_accepted_for(&self, user_id: UserId) -> Result<Vec<Friendship>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .friendships
            .values()
            .filter(|f| {
                f.status == FriendshipStatus::Accepted
                    && (f.requester_id == user_id || f.receiver_id == user_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let created = Message {
            id: MessageId::from_i64(id),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            corrected_content: message.corrected_content.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        tables.messages.insert(id, created.clone());
        Ok(created)
    }

    async fn between(
        &self,
        a: UserId,
        b: UserId,
        limit: i64,
    ) -> Result<Vec<Message>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .messages
            .values()
            .rev()
            .filter(|m| {
                (m.sender_id == a && m.receiver_id == b) || (m.sender_id == b && m.receiver_id == a)
            })
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(
        &self,
        receiver_id: UserId,
        sender_id: UserId,
    ) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let mut updated = 0;
        for message in tables.messages.values_mut() {
            if message.receiver_id == receiver_id && message.sender_id == sender_id && !message.is_read
            {
                message.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn partners_of(&self, user_id: UserId) -> Result<Vec<UserId>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut partners: Vec<UserId> = tables
            .messages
            .values()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .map(|m| m.partner_of(user_id))
            .collect();
        partners.sort();
        partners.dedup();
        Ok(partners)
    }

    async fn unread_count(
        &self,
        receiver_id: UserId,
        sender_id: UserId,
    ) -> Result<i64, RepositoryError> {
        let tables = self.tables.lock().await;
        let count = tables
            .messages
            .values()
            .filter(|m| m.receiver_id == receiver_id && m.sender_id == sender_id && !m.is_read)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl SpeakingRepository for InMemoryStore {
    async fn create_session(
        &self,
        session: &NewSpeakingSession,
    ) -> Result<SpeakingSession, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let created = SpeakingSession {
            id: SpeakingSessionId::from_i64(id),
            student_id: session.student_id,
            topic: session.topic.clone(),
            conversation_type: session.conversation_type,
            difficulty_level: session.difficulty_level,
            state: SessionState::Created,
            is_active: false,
            created_at: Utc::now(),
            ended_at: None,
        };
        tables.sessions.insert(id, created.clone());
        Ok(created)
    }

    async fn get_session(
        &self,
        id: SpeakingSessionId,
    ) -> Result<Option<SpeakingSession>, RepositoryError> {
        Ok(self.tables.lock().await.sessions.get(&id.as_i64()).cloned())
    }

    async fn list_sessions(
        &self,
        student_id: UserId,
    ) -> Result<Vec<SpeakingSession>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .sessions
            .values()
            .rev()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn set_state(
        &self,
        id: SpeakingSessionId,
        state: SessionState,
    ) -> Result<SpeakingSession, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let session = tables
            .sessions
            .get_mut(&id.as_i64())
            .ok_or_else(|| RepositoryError::NotFound(format!("speaking session {}", id)))?;
        *session = session.clone().with_state(state);
        if state == SessionState::Ended {
            session.ended_at = Some(Utc::now());
        }
        Ok(session.clone())
    }

    async fn append_message(
        &self,
        message: &NewSpeakingMessage,
    ) -> Result<SpeakingMessage, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.sessions.contains_key(&message.session_id.as_i64()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "speaking session {} does not exist",
                message.session_id
            )));
        }
        let id = tables.next_id();
        let created = SpeakingMessage {
            id: SpeakingMessageId::from_i64(id),
            session_id: message.session_id,
            role: message.role,
            content: message.content.clone(),
            corrected_content: message.corrected_content.clone(),
            audio_path: message.audio_path.clone(),
            created_at: Utc::now(),
        };
        tables.speaking_messages.insert(id, created.clone());
        Ok(created)
    }

    async fn set_message_audio(
        &self,
        id: SpeakingMessageId,
        audio_path: &str,
    ) -> Result<SpeakingMessage, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let message = tables
            .speaking_messages
            .get_mut(&id.as_i64())
            .ok_or_else(|| RepositoryError::NotFound(format!("speaking message {}", id)))?;
        message.audio_path = Some(audio_path.to_string());
        Ok(message.clone())
    }

    async fn list_messages(
        &self,
        session_id: SpeakingSessionId,
    ) -> Result<Vec<SpeakingMessage>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .speaking_messages
            .values()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }
}
