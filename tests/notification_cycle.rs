// SPDX-License-Identifier: MPL-2.0
//! End-to-end notification cycles against a scripted notification server.

use grid_notify::application::port::{FetchRequest, NotificationSource, TransportError};
use grid_notify::notifications::{
    CycleOutcome, JsonMessage, LayoutSnapshot, NotificationController, NotificationEnvelope,
    NotificationOptions, Trigger, VerticalSpan,
};
use serde_json::json;
use std::sync::Mutex;

type Answer = Result<JsonMessage, TransportError>;

/// Replays canned answers in order and records every request.
#[derive(Default)]
struct FakeServer {
    answers: Mutex<Vec<Answer>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl FakeServer {
    fn new(answers: Vec<Answer>) -> Self {
        let mut answers = answers;
        answers.reverse();
        Self {
            answers: Mutex::new(answers),
            requests: Mutex::default(),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl NotificationSource for FakeServer {
    async fn fetch(&self, request: &FetchRequest) -> Result<JsonMessage, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(TransportError::Status(500)))
    }
}

fn options() -> NotificationOptions {
    NotificationOptions::new(
        "https://journal.example/notification/fetch",
        json!({ "assocType": 256, "assocId": 12 }),
    )
}

fn visible() -> LayoutSnapshot {
    LayoutSnapshot {
        element: VerticalSpan::new(100.0, 50.0),
        window: VerticalSpan::new(0.0, 768.0),
        modal: None,
    }
}

fn below_the_fold() -> LayoutSnapshot {
    LayoutSnapshot {
        element: VerticalSpan::new(1500.0, 50.0),
        window: VerticalSpan::new(0.0, 768.0),
        modal: None,
    }
}

fn wire(content: serde_json::Value) -> Answer {
    Ok(serde_json::from_value(json!({ "status": true, "content": content })).unwrap())
}

fn two_notifications() -> NotificationEnvelope {
    NotificationEnvelope::new()
        .with("1", "11", "<div>Submission saved</div>")
        .with("3", "12", "<div>Review due</div>")
}

#[tokio::test]
async fn empty_in_place_answer_clears_and_hides_region() {
    let server = FakeServer::new(vec![
        Ok(JsonMessage::with_envelope(&two_notifications())),
        wire(json!({ "inPlace": [], "general": [] })),
    ]);
    let (mut controller, mut parent, _) =
        NotificationController::start(options(), &server, &visible()).await;
    assert!(controller.region().is_shown());

    let outcome = controller
        .notify_user(Trigger::Fetch, &server, &below_the_fold())
        .await;

    assert_eq!(outcome, CycleOutcome::Cleared);
    assert!(!controller.region().is_shown());
    assert!(controller.region().html().is_empty());
    assert!(parent.try_recv().is_err());
}

#[tokio::test]
async fn new_content_in_view_is_shown_without_escalation() {
    let server = FakeServer::new(vec![Ok(JsonMessage::with_envelope(&two_notifications()))]);
    let mut controller = NotificationController::new(options());
    let mut parent = controller.subscribe();

    let outcome = controller
        .notify_user(Trigger::Fetch, &server, &visible())
        .await;

    assert_eq!(
        outcome,
        CycleOutcome::Shown {
            new_content: true,
            escalation: None
        }
    );
    assert_eq!(
        controller.region().html(),
        "<div>Submission saved</div><div>Review due</div>"
    );
    assert!(parent.try_recv().is_err());
}

#[tokio::test]
async fn new_content_below_the_fold_escalates_full_payload() {
    let server = FakeServer::new(vec![wire(json!({
        "inPlace": {
            "1": { "11": "<div>Submission saved</div>" },
            "3": { "12": "<div>Review due</div>" }
        },
        "general": {}
    }))]);
    let mut controller = NotificationController::new(options());
    let mut parent = controller.subscribe();

    controller
        .notify_user(Trigger::Fetch, &server, &below_the_fold())
        .await;

    let escalation = parent.try_recv().expect("off-screen content escalates");
    assert_eq!(escalation.event_name(), "notifyUser");
    assert_eq!(escalation.envelope.in_place, two_notifications().in_place);
    assert!(controller.region().is_shown());
    assert!(parent.try_recv().is_err());
}

#[tokio::test]
async fn repeated_answer_does_not_escalate_twice() {
    let server = FakeServer::new(vec![
        Ok(JsonMessage::with_envelope(&two_notifications())),
        Ok(JsonMessage::with_envelope(&two_notifications())),
    ]);
    let mut controller = NotificationController::new(options());
    let mut parent = controller.subscribe();

    controller
        .notify_user(Trigger::Fetch, &server, &below_the_fold())
        .await;
    let second = controller
        .notify_user(Trigger::Fetch, &server, &below_the_fold())
        .await;

    assert_eq!(
        second,
        CycleOutcome::Shown {
            new_content: false,
            escalation: None
        }
    );
    assert!(parent.try_recv().is_ok());
    assert!(parent.try_recv().is_err());
}

#[tokio::test]
async fn failures_leave_region_untouched() {
    let server = FakeServer::new(vec![
        Ok(JsonMessage::with_envelope(&two_notifications())),
        Ok(JsonMessage::failure()),
        Err(TransportError::Timeout),
    ]);
    let (mut controller, mut parent, _) =
        NotificationController::start(options(), &server, &visible()).await;
    let before = controller.region().clone();

    for _ in 0..2 {
        let outcome = controller
            .notify_user(Trigger::Fetch, &server, &below_the_fold())
            .await;
        assert_eq!(outcome, CycleOutcome::Aborted);
        assert_eq!(controller.region(), &before);
    }
    assert!(parent.try_recv().is_err());
    assert_eq!(server.request_count(), 3);
}

#[tokio::test]
async fn every_request_carries_the_request_options() {
    let server = FakeServer::new(vec![wire(json!(null))]);
    let (_controller, _parent, outcome) =
        NotificationController::start(options(), &server, &visible()).await;

    assert_eq!(outcome, CycleOutcome::Cleared);
    let requests = server.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://journal.example/notification/fetch");
    assert_eq!(
        requests[0].body,
        json!({ "requestOptions": { "assocType": 256, "assocId": 12 } })
    );
}

#[tokio::test]
async fn triggers_during_a_fetch_cause_one_follow_up_request() {
    let server = FakeServer::new(vec![Ok(JsonMessage::with_envelope(&two_notifications()))]);
    let mut controller = NotificationController::new(options());

    let (ticket, _request) = controller.begin_fetch().expect("idle controller fetches");
    for _ in 0..3 {
        assert_eq!(
            controller
                .notify_user(Trigger::Fetch, &server, &visible())
                .await,
            CycleOutcome::Queued
        );
    }
    assert_eq!(server.request_count(), 0);

    let outcome = controller
        .complete_fetch(ticket, Ok(JsonMessage::failure()), &server, &visible())
        .await;

    assert!(matches!(outcome, CycleOutcome::Shown { new_content: true, .. }));
    assert_eq!(server.request_count(), 1);
    assert!(!controller.has_pending_trigger());
}
