// SMS notification fan-out against the fully wired application.

mod common;

use std::sync::atomic::Ordering;

use chrono::Utc;

use campushub_backend::types::dto::event_notification::{
    BulkCreateEventNotificationRequest, CreateEventNotificationRequest,
};
use campushub_backend::types::dto::school_event::CreateSchoolEventRequest;
use campushub_backend::types::dto::user::UserResponse;

use common::{setup_app, user_request, TestApp};

async fn seed(app: &TestApp) -> (UserResponse, String) {
    let admin = app
        .data
        .auth_service
        .sign_up(user_request("admin", "admin@example.com", "admin"))
        .await
        .unwrap();

    let event = app
        .data
        .school_event_service
        .create(
            &admin.id,
            CreateSchoolEventRequest {
                title: "Orientation".to_string(),
                description: None,
                date: Utc::now().timestamp() + 86_400,
                venue: "Main Hall".to_string(),
                organized_by: "admin".to_string(),
            },
        )
        .await
        .unwrap();

    (admin, event.id)
}

#[tokio::test]
async fn notification_is_stored_and_delivered() {
    let app = setup_app().await;
    let (admin, event_id) = seed(&app).await;
    let student = app
        .data
        .auth_service
        .sign_up(user_request("stud", "stud@example.com", "student"))
        .await
        .unwrap();

    let notification = app
        .data
        .event_notification_service
        .create(
            &admin.id,
            CreateEventNotificationRequest {
                event_id: event_id.clone(),
                recipient_id: student.id.clone(),
                message: "See you tomorrow".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(notification.status, "sent");
    let sent = app.sms.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+639171234567");
}

#[tokio::test]
async fn gateway_failure_is_demoted_to_failed_status() {
    let app = setup_app().await;
    let (admin, event_id) = seed(&app).await;
    let student = app
        .data
        .auth_service
        .sign_up(user_request("stud", "stud@example.com", "student"))
        .await
        .unwrap();

    app.sms.fail.store(true, Ordering::SeqCst);
    let notification = app
        .data
        .event_notification_service
        .create(
            &admin.id,
            CreateEventNotificationRequest {
                event_id: event_id.clone(),
                recipient_id: student.id.clone(),
                message: "See you tomorrow".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(notification.status, "failed");

    // The stored row carries the demoted status too.
    let stored = app
        .data
        .event_notification_service
        .get(&admin.id, &notification.id)
        .await
        .unwrap();
    assert_eq!(stored.status, "failed");
}

#[tokio::test]
async fn bulk_create_dedupes_and_skips_already_notified_recipients() {
    let app = setup_app().await;
    let (admin, event_id) = seed(&app).await;
    let first = app
        .data
        .auth_service
        .sign_up(user_request("first", "first@example.com", "student"))
        .await
        .unwrap();
    let second = app
        .data
        .auth_service
        .sign_up(user_request("second", "second@example.com", "student"))
        .await
        .unwrap();

    app.data
        .event_notification_service
        .create(
            &admin.id,
            CreateEventNotificationRequest {
                event_id: event_id.clone(),
                recipient_id: first.id.clone(),
                message: "early bird".to_string(),
            },
        )
        .await
        .unwrap();

    let result = app
        .data
        .event_notification_service
        .bulk_create(
            &admin.id,
            BulkCreateEventNotificationRequest {
                event_id: event_id.clone(),
                recipient_ids: vec![first.id.clone(), second.id.clone(), second.id.clone()],
                message: "reminder".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.total_recipients, 2);
    assert_eq!(result.skipped_duplicates, 1);
    assert_eq!(result.notifications_created, 1);
    assert_eq!(result.notifications[0].recipient_id, second.id);

    // Everyone has one now; a second fan-out has nobody left to notify.
    let err = app
        .data
        .event_notification_service
        .bulk_create(
            &admin.id,
            BulkCreateEventNotificationRequest {
                event_id,
                recipient_ids: vec![first.id, second.id],
                message: "reminder".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(
        err.message(),
        "All recipients already have notifications for this event"
    );
}

#[tokio::test]
async fn bulk_create_names_missing_recipients() {
    let app = setup_app().await;
    let (admin, event_id) = seed(&app).await;

    let ghost = "00000000-0000-4000-8000-000000000000".to_string();
    let err = app
        .data
        .event_notification_service
        .bulk_create(
            &admin.id,
            BulkCreateEventNotificationRequest {
                event_id,
                recipient_ids: vec![ghost.clone()],
                message: "reminder".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.message(), format!("Recipients not found: {ghost}"));
}
