use tbodemy::application::services::{CourseInput, ServiceError};
use tbodemy::domain::{CourseChanges, FriendshipStatus, UserRole};

use crate::helpers::mock_adapters::TestApp;

#[tokio::test]
async fn given_unpublished_course_when_enrolling_then_bad_request() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;
    let student = app.user("s@x.io", UserRole::Student).await;
    let course = app
        .state
        .courses
        .create_course(
            &teacher,
            CourseInput {
                title: "Draft".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let result = app.state.enrollments.enroll(&student, course.id).await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn given_enrolled_student_when_enrolling_again_then_bad_request() {
    let app = TestApp::new();
    let teacher = app.user("t@x.io", UserRole::Teacher).await;
    let student = app.user("s@x.io", UserRole::Student).await;
    let course = app
        .state
        .courses
        .create_course(
            &teacher,
            CourseInput {
                title: "Open".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    app.state
        .courses
        .update_course(
            &teacher,
            course.id,
            CourseChanges {
                is_published: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    app.state
        .enrollments
        .enroll(&student, course.id)
        .await
        .unwrap();
    let result = app.state.enrollments.enroll(&student, course.id).await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    let enrolled = app
        .state
        .courses
        .course_students(&teacher, course.id)
        .await
        .unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, student.id);
}

#[tokio::test]
async fn given_pending_request_when_receiver_asks_back_then_bad_request() {
    let app = TestApp::new();
    let ana = app.user("ana@x.io", UserRole::Student).await;
    let ben = app.user("ben@x.io", UserRole::Student).await;

    app.state
        .social
        .send_friend_request(&ana, ben.id)
        .await
        .unwrap();
    let result = app.state.social.send_friend_request(&ben, ana.id).await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn given_accepted_request_when_listing_friends_then_both_sides_see_each_other() {
    let app = TestApp::new();
    let ana = app.user("ana@x.io", UserRole::Student).await;
    let ben = app.user("ben@x.io", UserRole::Student).await;
    let request = app
        .state
        .social
        .send_friend_request(&ana, ben.id)
        .await
        .unwrap();
    assert_eq!(request.status, FriendshipStatus::Pending);

    let pending = app.state.social.pending_requests(&ben).await.unwrap();
    assert_eq!(pending.len(), 1);

    let accepted = app
        .state
        .social
        .answer_friend_request(&ben, request.id, true)
        .await
        .unwrap();
    assert_eq!(accepted.status, FriendshipStatus::Accepted);

    let ana_friends = app.state.social.friends(&ana).await.unwrap();
    let ben_friends = app.state.social.friends(&ben).await.unwrap();
    assert_eq!(ana_friends[0].id, ben.id);
    assert_eq!(ben_friends[0].id, ana.id);
}

#[tokio::test]
async fn given_request_when_sender_tries_to_accept_then_bad_request() {
    let app = TestApp::new();
    let ana = app.user("ana@x.io", UserRole::Student).await;
    let ben = app.user("ben@x.io", UserRole::Student).await;
    let request = app
        .state
        .social
        .send_friend_request(&ana, ben.id)
        .await
        .unwrap();

    let result = app
        .state
        .social
        .answer_friend_request(&ana, request.id, true)
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn given_unread_messages_when_opening_conversation_then_they_are_marked_read() {
    let app = TestApp::new();
    let ana = app.user("ana@x.io", UserRole::Student).await;
    let ben = app.user("ben@x.io", UserRole::Student).await;

    app.state
        .social
        .send_message(&ana, ben.id, "hello".to_string())
        .await
        .unwrap();
    app.state
        .social
        .send_message(&ana, ben.id, "are you there".to_string())
        .await
        .unwrap();

    let previews = app.state.social.conversations(&ben).await.unwrap();
    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].user.id, ana.id);
    assert_eq!(previews[0].unread_count, 2);
    assert_eq!(previews[0].last_message.content, "are you there");

    let thread = app.state.social.conversation(&ben, ana.id).await.unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].content, "hello");

    let previews = app.state.social.conversations(&ben).await.unwrap();
    assert_eq!(previews[0].unread_count, 0);
}

#[tokio::test]
async fn given_blank_message_when_sending_then_bad_request() {
    let app = TestApp::new();
    let ana = app.user("ana@x.io", UserRole::Student).await;
    let ben = app.user("ben@x.io", UserRole::Student).await;

    let result = app
        .state
        .social
        .send_message(&ana, ben.id, "   ".to_string())
        .await;

    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn given_no_grammar_backends_when_checking_then_text_is_returned_unchanged() {
    let app = TestApp::new();

    let report = app.state.social.grammar_check("I goes home").await;

    assert_eq!(report.corrected, "I goes home");
    assert!(!report.has_errors);
    assert!(report.error.is_some());
}
