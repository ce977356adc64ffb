use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::{AudioLibrary, ServiceError};
use crate::application::ports::{
    CourseRepository, CourseTransaction, EnrollmentRepository, RepositoryError,
    UnitContentRepository, UserRepository,
};
use crate::domain::{
    AudioScope, AudioSentence, AudioSentenceChanges, AudioSentenceId, Course, CourseChanges,
    CourseDetails, CourseId, NewAudioSentence, NewCourse, NewQuiz, NewUnit, Quiz, QuizChanges,
    QuizId, QuizType, Unit, UnitChanges, UnitDetails, UnitId, User,
};

#[derive(Debug, Clone, Deserialize)]
pub struct CourseInput {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitInput {
    pub course_id: CourseId,
    pub title: String,
    pub content: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizInput {
    pub unit_id: UnitId,
    pub quiz_type: QuizType,
    pub question: String,
    pub correct_answer: String,
    pub options: Option<Vec<String>>,
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSentenceInput {
    pub unit_id: UnitId,
    pub sentence: String,
    /// Ignored; the recording is always generated from `sentence`.
    #[serde(default)]
    pub audio_path: String,
    pub order: i32,
}

/// A whole course authored in one request.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteCourse {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    pub unidades: Vec<UnitOutline>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitOutline {
    pub title: String,
    pub contenido: Vec<ContentItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "tipo", rename_all = "lowercase")]
pub enum ContentItem {
    Texto {
        texto: Option<String>,
    },
    Audio {
        sentence: Option<String>,
        audio_path: Option<String>,
    },
    Quiz {
        question: Option<String>,
        correct_answer: Option<String>,
        quiz_type: Option<QuizType>,
        options: Option<Vec<String>>,
    },
    #[serde(other)]
    Unsupported,
}

fn ensure_order(order: i32) -> Result<(), ServiceError> {
    if order < 0 {
        return Err(ServiceError::bad_request(
            "order must be greater than or equal to 0",
        ));
    }
    Ok(())
}

fn ensure_optional_order(order: Option<i32>) -> Result<(), ServiceError> {
    order.map_or(Ok(()), ensure_order)
}

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    content: Arc<dyn UnitContentRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    users: Arc<dyn UserRepository>,
    audio: Arc<AudioLibrary>,
}

impl CourseService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        content: Arc<dyn UnitContentRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        users: Arc<dyn UserRepository>,
        audio: Arc<AudioLibrary>,
    ) -> Self {
        Self {
            courses,
            content,
            enrollments,
            users,
            audio,
        }
    }

    async fn course(&self, id: CourseId) -> Result<Course, ServiceError> {
        self.courses
            .get_course(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course not found"))
    }

    async fn owned_course(
        &self,
        teacher: &User,
        id: CourseId,
        denied: &str,
    ) -> Result<Course, ServiceError> {
        let course = self.course(id).await?;
        if !course.is_owned_by(teacher.id) {
            return Err(ServiceError::forbidden(denied));
        }
        Ok(course)
    }

    async fn unit(&self, id: UnitId) -> Result<Unit, ServiceError> {
        self.courses
            .get_unit(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Unit not found"))
    }

    async fn owned_unit(
        &self,
        teacher: &User,
        id: UnitId,
        denied: &str,
    ) -> Result<(Unit, Course), ServiceError> {
        let unit = self.unit(id).await?;
        let course = self.course(unit.course_id).await?;
        if !course.is_owned_by(teacher.id) {
            return Err(ServiceError::forbidden(denied));
        }
        Ok((unit, course))
    }

    async fn unit_details(&self, unit: Unit) -> Result<UnitDetails, ServiceError> {
        let quizzes = self.content.list_quizzes(unit.id).await?;
        let audio_sentences = self.content.list_audio_sentences(unit.id).await?;
        Ok(UnitDetails {
            unit,
            quizzes,
            audio_sentences,
        })
    }

    // Courses

    #[instrument(skip(self, teacher, input), fields(teacher_id = %teacher.id))]
    pub async fn create_course(
        &self,
        teacher: &User,
        input: CourseInput,
    ) -> Result<Course, ServiceError> {
        let course = self
            .courses
            .create_course(&NewCourse {
                title: input.title,
                description: input.description,
                teacher_id: teacher.id,
                is_published: false,
            })
            .await?;
        info!(course_id = %course.id, "Created course");
        Ok(course)
    }

    pub async fn list_courses(&self, skip: i64, limit: i64) -> Result<Vec<Course>, ServiceError> {
        Ok(self
            .courses
            .list_courses(skip.max(0), limit.clamp(0, 1000))
            .await?)
    }

    pub async fn course_details(&self, id: CourseId) -> Result<CourseDetails, ServiceError> {
        let course = self.course(id).await?;
        let teacher = self
            .users
            .find_by_id(course.teacher_id)
            .await?
            .ok_or_else(|| ServiceError::internal("course teacher is missing"))?;

        let units = self.courses.list_units(id).await?;
        let mut detailed = Vec::with_capacity(units.len());
        for unit in units {
            detailed.push(self.unit_details(unit).await?);
        }

        Ok(CourseDetails {
            course,
            teacher,
            units: detailed,
        })
    }

    pub async fn teacher_courses(&self, teacher: &User) -> Result<Vec<Course>, ServiceError> {
        Ok(self.courses.list_teacher_courses(teacher.id).await?)
    }

    pub async fn update_course(
        &self,
        teacher: &User,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Course, ServiceError> {
        self.owned_course(teacher, id, "Not authorized to update this course")
            .await?;
        self.courses
            .update_course(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course not found"))
    }

    pub async fn delete_course(&self, teacher: &User, id: CourseId) -> Result<(), ServiceError> {
        self.owned_course(teacher, id, "Not authorized to delete this course")
            .await?;
        if !self.courses.delete_course(id).await? {
            return Err(ServiceError::not_found("Course not found"));
        }
        info!(course_id = %id, "Deleted course");
        Ok(())
    }

    pub async fn course_students(
        &self,
        teacher: &User,
        id: CourseId,
    ) -> Result<Vec<User>, ServiceError> {
        self.owned_course(teacher, id, "Not authorized to view this course's students")
            .await?;
        Ok(self.enrollments.list_students(id).await?)
    }

    // Units

    pub async fn create_unit(&self, teacher: &User, input: UnitInput) -> Result<Unit, ServiceError> {
        ensure_order(input.order)?;
        self.owned_course(
            teacher,
            input.course_id,
            "Not authorized to add units to this course",
        )
        .await?;

        Ok(self
            .courses
            .create_unit(&NewUnit {
                course_id: input.course_id,
                title: input.title,
                order: input.order,
                content: input.content,
            })
            .await?)
    }

    pub async fn course_units(&self, course_id: CourseId) -> Result<Vec<UnitDetails>, ServiceError> {
        self.course(course_id).await?;
        let units = self.courses.list_units(course_id).await?;
        let mut detailed = Vec::with_capacity(units.len());
        for unit in units {
            detailed.push(self.unit_details(unit).await?);
        }
        Ok(detailed)
    }

    pub async fn unit_with_details(&self, id: UnitId) -> Result<UnitDetails, ServiceError> {
        let unit = self.unit(id).await?;
        self.unit_details(unit).await
    }

    pub async fn update_unit(
        &self,
        teacher: &User,
        id: UnitId,
        changes: UnitChanges,
    ) -> Result<Unit, ServiceError> {
        ensure_optional_order(changes.order)?;
        self.owned_unit(teacher, id, "Not authorized to update this unit")
            .await?;
        self.courses
            .update_unit(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Unit not found"))
    }

    pub async fn delete_unit(&self, teacher: &User, id: UnitId) -> Result<(), ServiceError> {
        self.owned_unit(teacher, id, "Not authorized to delete this unit")
            .await?;
        if !self.courses.delete_unit(id).await? {
            return Err(ServiceError::not_found("Unit not found"));
        }
        Ok(())
    }

    // Quizzes

    pub async fn create_quiz(&self, teacher: &User, input: QuizInput) -> Result<Quiz, ServiceError> {
        ensure_order(input.order)?;
        self.owned_unit(
            teacher,
            input.unit_id,
            "Not authorized to add quizzes to this unit",
        )
        .await?;

        Ok(self
            .content
            .create_quiz(&NewQuiz {
                unit_id: input.unit_id,
                quiz_type: input.quiz_type,
                question: input.question,
                correct_answer: input.correct_answer,
                options: input.options,
                order: input.order,
            })
            .await?)
    }

    pub async fn unit_quizzes(&self, unit_id: UnitId) -> Result<Vec<Quiz>, ServiceError> {
        self.unit(unit_id).await?;
        Ok(self.content.list_quizzes(unit_id).await?)
    }

    async fn owned_quiz(
        &self,
        teacher: &User,
        id: QuizId,
        denied: &str,
    ) -> Result<Quiz, ServiceError> {
        let quiz = self
            .content
            .get_quiz(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quiz not found"))?;
        self.owned_unit(teacher, quiz.unit_id, denied).await?;
        Ok(quiz)
    }

    pub async fn update_quiz(
        &self,
        teacher: &User,
        id: QuizId,
        changes: QuizChanges,
    ) -> Result<Quiz, ServiceError> {
        ensure_optional_order(changes.order)?;
        self.owned_quiz(teacher, id, "Not authorized to update this quiz")
            .await?;
        self.content
            .update_quiz(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Quiz not found"))
    }

    pub async fn delete_quiz(&self, teacher: &User, id: QuizId) -> Result<(), ServiceError> {
        self.owned_quiz(teacher, id, "Not authorized to delete this quiz")
            .await?;
        if !self.content.delete_quiz(id).await? {
            return Err(ServiceError::not_found("Quiz not found"));
        }
        Ok(())
    }

    // Audio sentences

    pub async fn create_audio_sentence(
        &self,
        teacher: &User,
        input: AudioSentenceInput,
    ) -> Result<AudioSentence, ServiceError> {
        ensure_order(input.order)?;
        let (unit, course) = self
            .owned_unit(
                teacher,
                input.unit_id,
                "Not authorized to add audio to this unit",
            )
            .await?;

        let audio_path = self
            .audio
            .sentence_audio(&input.sentence, &AudioScope::unit(course.id, unit.order))
            .await;

        Ok(self
            .content
            .create_audio_sentence(&NewAudioSentence {
                unit_id: unit.id,
                sentence: input.sentence,
                audio_path,
                order: input.order,
            })
            .await?)
    }

    pub async fn unit_audio_sentences(
        &self,
        unit_id: UnitId,
    ) -> Result<Vec<AudioSentence>, ServiceError> {
        self.unit(unit_id).await?;
        Ok(self.content.list_audio_sentences(unit_id).await?)
    }

    async fn owned_audio_sentence(
        &self,
        teacher: &User,
        id: AudioSentenceId,
        denied: &str,
    ) -> Result<AudioSentence, ServiceError> {
        let audio = self
            .content
            .get_audio_sentence(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Audio sentence not found"))?;
        self.owned_unit(teacher, audio.unit_id, denied).await?;
        Ok(audio)
    }

    pub async fn update_audio_sentence(
        &self,
        teacher: &User,
        id: AudioSentenceId,
        changes: AudioSentenceChanges,
    ) -> Result<AudioSentence, ServiceError> {
        ensure_optional_order(changes.order)?;
        self.owned_audio_sentence(teacher, id, "Not authorized to update this audio sentence")
            .await?;
        self.content
            .update_audio_sentence(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Audio sentence not found"))
    }

    pub async fn delete_audio_sentence(
        &self,
        teacher: &User,
        id: AudioSentenceId,
    ) -> Result<(), ServiceError> {
        self.owned_audio_sentence(teacher, id, "Not authorized to delete this audio sentence")
            .await?;
        if !self.content.delete_audio_sentence(id).await? {
            return Err(ServiceError::not_found("Audio sentence not found"));
        }
        Ok(())
    }

    // Complete course

    /// Creates the course, its units and their content in one unit of work.
    /// Nothing is kept if any insert fails.
    #[instrument(skip(self, teacher, outline), fields(teacher_id = %teacher.id, units = outline.unidades.len()))]
    pub async fn create_complete_course(
        &self,
        teacher: &User,
        outline: CompleteCourse,
    ) -> Result<CourseDetails, ServiceError> {
        let mut tx = self.courses.begin().await?;

        let course = tx
            .insert_course(&NewCourse {
                title: outline.title,
                description: outline.description,
                teacher_id: teacher.id,
                is_published: outline.is_published,
            })
            .await
            .map_err(|e| ServiceError::internal(format!("Error creating course: {}", e)))?;

        for (index, unit_outline) in outline.unidades.into_iter().enumerate() {
            let order = i32::try_from(index)
                .map_err(|_| ServiceError::bad_request("Too many units in one course"))?;
            self.insert_unit_outline(tx.as_mut(), &course, order, unit_outline)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| ServiceError::internal(format!("Error creating course: {}", e)))?;
        info!(course_id = %course.id, "Created complete course");

        self.course_details(course.id).await
    }

    async fn insert_unit_outline(
        &self,
        tx: &mut dyn CourseTransaction,
        course: &Course,
        order: i32,
        outline: UnitOutline,
    ) -> Result<(), ServiceError> {
        let failed =
            |e: RepositoryError| ServiceError::internal(format!("Error creating course: {}", e));

        let texts: Vec<&str> = outline
            .contenido
            .iter()
            .filter_map(|item| match item {
                ContentItem::Texto { texto: Some(text) } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        let unit = tx
            .insert_unit(&NewUnit {
                course_id: course.id,
                title: outline.title.clone(),
                order,
                content: Some(texts.join("\n\n")),
            })
            .await
            .map_err(failed)?;

        let scope = AudioScope::unit(course.id, unit.order);
        let mut audio_order = 0;
        let mut quiz_order = 0;

        for item in outline.contenido {
            match item {
                ContentItem::Audio {
                    sentence: Some(sentence),
                    ..
                } => {
                    // Bulk imports number placeholders by position within the unit.
                    let audio_path = match self.audio.try_sentence_audio(&sentence, &scope).await
                    {
                        Ok(path) => path,
                        Err(e) => {
                            warn!(
                                scope = %scope,
                                audio_order,
                                error = %e,
                                "Sentence audio unavailable, using placeholder"
                            );
                            format!("/audio/placeholder/{}.mp3", audio_order)
                        }
                    };
                    tx.insert_audio_sentence(&NewAudioSentence {
                        unit_id: unit.id,
                        sentence,
                        audio_path,
                        order: audio_order,
                    })
                    .await
                    .map_err(failed)?;
                    audio_order += 1;
                }
                ContentItem::Quiz {
                    question: Some(question),
                    correct_answer: Some(correct_answer),
                    quiz_type: Some(quiz_type),
                    options,
                } => {
                    tx.insert_quiz(&NewQuiz {
                        unit_id: unit.id,
                        quiz_type,
                        question,
                        correct_answer,
                        options,
                        order: quiz_order,
                    })
                    .await
                    .map_err(failed)?;
                    quiz_order += 1;
                }
                _ => {}
            }
        }

        Ok(())
    }
}
