//! Runs the Postgres adapters against a throwaway container. Needs Docker:
//! `cargo test --test api_test pg_repository -- --ignored`.

use tbodemy::application::ports::{
    CourseRepository, EnrollmentRepository, FriendshipRepository, MessageRepository,
    RepositoryError, UnitContentRepository, UserRepository,
};
use tbodemy::domain::{NewCourse, NewMessage, NewQuiz, NewUnit, NewUser, QuizType, User, UserRole};

use crate::helpers::test_postgres::TestPostgres;

async fn user(pg: &TestPostgres, email: &str, role: UserRole) -> User {
    pg.users
        .create(&NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Someone".to_string(),
            role,
        })
        .await
        .expect("Failed to create user")
}

fn course(teacher: &User, title: &str) -> NewCourse {
    NewCourse {
        title: title.to_string(),
        description: None,
        teacher_id: teacher.id,
        is_published: true,
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_taken_email_when_creating_user_then_constraint_violation() {
    let pg = TestPostgres::new().await;
    user(&pg, "dup@x.io", UserRole::Student).await;

    let result = pg
        .users
        .create(&NewUser {
            email: "dup@x.io".to_string(),
            password_hash: "hash".to_string(),
            name: "Again".to_string(),
            role: UserRole::Student,
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_uncommitted_transaction_when_dropped_then_nothing_is_persisted() {
    let pg = TestPostgres::new().await;
    let teacher = user(&pg, "t@x.io", UserRole::Teacher).await;

    let mut tx = pg.courses.begin().await.unwrap();
    let created = tx.insert_course(&course(&teacher, "Ghost")).await.unwrap();
    tx.insert_unit(&NewUnit {
        course_id: created.id,
        title: "U1".to_string(),
        order: 0,
        content: None,
    })
    .await
    .unwrap();
    drop(tx);

    assert!(pg.courses.get_course(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_committed_transaction_when_reading_then_course_tree_is_visible() {
    let pg = TestPostgres::new().await;
    let teacher = user(&pg, "t@x.io", UserRole::Teacher).await;

    let mut tx = pg.courses.begin().await.unwrap();
    let created = tx.insert_course(&course(&teacher, "Real")).await.unwrap();
    let unit = tx
        .insert_unit(&NewUnit {
            course_id: created.id,
            title: "U1".to_string(),
            order: 0,
            content: Some("Hi".to_string()),
        })
        .await
        .unwrap();
    tx.insert_quiz(&NewQuiz {
        unit_id: unit.id,
        quiz_type: QuizType::MultipleChoice,
        question: "Q?".to_string(),
        correct_answer: "A".to_string(),
        options: Some(vec!["A".to_string(), "B".to_string()]),
        order: 0,
    })
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let units = pg.courses.list_units(created.id).await.unwrap();
    assert_eq!(units.len(), 1);
    let quizzes = pg.content.list_quizzes(unit.id).await.unwrap();
    assert_eq!(
        quizzes[0].options,
        Some(vec!["A".to_string(), "B".to_string()])
    );

    assert!(pg.courses.delete_course(created.id).await.unwrap());
    assert!(pg.content.list_quizzes(unit.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_existing_enrollment_when_enrolling_again_then_constraint_violation() {
    let pg = TestPostgres::new().await;
    let teacher = user(&pg, "t@x.io", UserRole::Teacher).await;
    let student = user(&pg, "s@x.io", UserRole::Student).await;
    let created = pg
        .courses
        .create_course(&course(&teacher, "Open"))
        .await
        .unwrap();

    pg.enrollments.create(student.id, created.id).await.unwrap();
    let result = pg.enrollments.create(student.id, created.id).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_friendship_when_requesting_in_reverse_then_constraint_violation() {
    let pg = TestPostgres::new().await;
    let ana = user(&pg, "ana@x.io", UserRole::Student).await;
    let ben = user(&pg, "ben@x.io", UserRole::Student).await;

    pg.friendships.create(ana.id, ben.id).await.unwrap();
    let result = pg.friendships.create(ben.id, ana.id).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    assert!(pg.friendships.find_between(ben.id, ana.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn given_unread_messages_when_marking_read_then_count_drops_to_zero() {
    let pg = TestPostgres::new().await;
    let ana = user(&pg, "ana@x.io", UserRole::Student).await;
    let ben = user(&pg, "ben@x.io", UserRole::Student).await;

    for content in ["one", "two"] {
        pg.messages
            .create(&NewMessage {
                sender_id: ana.id,
                receiver_id: ben.id,
                content: content.to_string(),
                corrected_content: None,
            })
            .await
            .unwrap();
    }

    assert_eq!(pg.messages.unread_count(ben.id, ana.id).await.unwrap(), 2);
    assert_eq!(pg.messages.partners_of(ben.id).await.unwrap(), vec![ana.id]);
    let newest = pg.messages.between(ben.id, ana.id, 1).await.unwrap();
    assert_eq!(newest[0].content, "two");

    assert_eq!(pg.messages.mark_read(ben.id, ana.id).await.unwrap(), 2);
    assert_eq!(pg.messages.unread_count(ben.id, ana.id).await.unwrap(), 0);
}
