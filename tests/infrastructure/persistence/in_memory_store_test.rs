use tbodemy::application::ports::{
    CourseRepository, CourseTransaction, EnrollmentRepository, FriendshipRepository,
    MessageRepository, RepositoryError, UnitContentRepository,
};
use tbodemy::domain::{
    Course, NewAudioSentence, NewCourse, NewMessage, NewQuiz, NewUnit, QuizType, UserId,
};
use tbodemy::infrastructure::persistence::InMemoryStore;

async fn seed_course(store: &InMemoryStore) -> Course {
    CourseRepository::create_course(
        store,
        &NewCourse {
            title: "Spanish".to_string(),
            description: None,
            teacher_id: UserId::from_i64(99),
            is_published: true,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn given_uncommitted_transaction_when_dropped_then_nothing_is_visible() {
    let store = InMemoryStore::new();
    let mut tx = store.begin().await.unwrap();
    let course = tx
        .insert_course(&NewCourse {
            title: "Draft".to_string(),
            description: None,
            teacher_id: UserId::from_i64(1),
            is_published: false,
        })
        .await
        .unwrap();
    drop(tx);

    assert!(store.get_course(course.id).await.unwrap().is_none());
}

#[tokio::test]
async fn given_committed_transaction_when_reading_then_all_rows_are_visible() {
    let store = InMemoryStore::new();
    let mut tx = store.begin().await.unwrap();
    let course = tx
        .insert_course(&NewCourse {
            title: "Full".to_string(),
            description: None,
            teacher_id: UserId::from_i64(1),
            is_published: true,
        })
        .await
        .unwrap();
    let unit = tx
        .insert_unit(&NewUnit {
            course_id: course.id,
            title: "U1".to_string(),
            order: 0,
            content: Some("Hi".to_string()),
        })
        .await
        .unwrap();
    tx.insert_quiz(&NewQuiz {
        unit_id: unit.id,
        quiz_type: QuizType::FillBlank,
        question: "Hola = ?".to_string(),
        correct_answer: "Hello".to_string(),
        options: None,
        order: 0,
    })
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(store.list_units(course.id).await.unwrap().len(), 1);
    assert_eq!(store.list_quizzes(unit.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_duplicate_enrollment_when_creating_then_constraint_is_violated() {
    let store = InMemoryStore::new();
    let course = seed_course(&store).await;
    let student = UserId::from_i64(7);
    EnrollmentRepository::create(&store, student, course.id)
        .await
        .unwrap();

    let err = EnrollmentRepository::create(&store, student, course.id)
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
}

#[tokio::test]
async fn given_existing_friendship_when_reverse_request_created_then_constraint_is_violated() {
    let store = InMemoryStore::new();
    let a = UserId::from_i64(1);
    let b = UserId::from_i64(2);
    FriendshipRepository::create(&store, a, b).await.unwrap();

    let err = FriendshipRepository::create(&store, b, a).await.unwrap_err();

    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
}

#[tokio::test]
async fn given_course_with_units_when_deleted_then_units_and_content_are_removed() {
    let store = InMemoryStore::new();
    let course = seed_course(&store).await;
    let unit = store
        .create_unit(&NewUnit {
            course_id: course.id,
            title: "U1".to_string(),
            order: 0,
            content: None,
        })
        .await
        .unwrap();
    store
        .create_audio_sentence(&NewAudioSentence {
            unit_id: unit.id,
            sentence: "Hola".to_string(),
            audio_path: "/audio/x.mp3".to_string(),
            order: 0,
        })
        .await
        .unwrap();

    assert!(store.delete_course(course.id).await.unwrap());

    assert!(store.get_unit(unit.id).await.unwrap().is_none());
    assert!(store.list_audio_sentences(unit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_messages_when_listing_between_then_newest_come_first() {
    let store = InMemoryStore::new();
    let a = UserId::from_i64(1);
    let b = UserId::from_i64(2);
    for content in ["first", "second", "third"] {
        MessageRepository::create(
            &store,
            &NewMessage {
                sender_id: a,
                receiver_id: b,
                content: content.to_string(),
                corrected_content: None,
            },
        )
        .await
        .unwrap();
    }

    let messages = store.between(b, a, 2).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "third");
    assert_eq!(store.unread_count(b, a).await.unwrap(), 3);
    assert_eq!(store.mark_read(b, a).await.unwrap(), 3);
    assert_eq!(store.unread_count(b, a).await.unwrap(), 0);
}
