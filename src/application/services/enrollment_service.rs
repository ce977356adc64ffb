use std::sync::Arc;

use tracing::info;

use super::ServiceError;
use crate::application::ports::{CourseRepository, EnrollmentRepository, RepositoryError};
use crate::domain::{CourseId, Enrollment, User};

pub struct EnrollmentService {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl EnrollmentService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            courses,
            enrollments,
        }
    }

    pub async fn enroll(
        &self,
        student: &User,
        course_id: CourseId,
    ) -> Result<Enrollment, ServiceError> {
        let course = self
            .courses
            .get_course(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course not found"))?;

        if !course.is_published {
            return Err(ServiceError::bad_request("Course is not published yet"));
        }

        if self.enrollments.find(student.id, course_id).await?.is_some() {
            return Err(ServiceError::bad_request("Already enrolled in this course"));
        }

        let enrollment = self
            .enrollments
            .create(student.id, course_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => {
                    ServiceError::bad_request("Already enrolled in this course")
                }
                other => other.into(),
            })?;

        info!(student_id = %student.id, course_id = %course_id, "Enrolled student");
        Ok(enrollment)
    }

    pub async fn my_enrollments(&self, student: &User) -> Result<Vec<Enrollment>, ServiceError> {
        Ok(self.enrollments.list_for_student(student.id).await?)
    }
}
