use std::sync::Arc;

use socratis_core::{ChatEvent, ImageAttachment, Role};
use socratis_llms::{Part, ScriptedProvider};
use socratis_runtime::{
    ChatSession, FailureKind, Runtime, RuntimeConfig, RuntimeError, TurnOutcome,
};
use tokio::sync::mpsc;

fn runtime(provider: ScriptedProvider) -> Runtime {
    Runtime::new(Arc::new(provider), RuntimeConfig::new())
}

#[tokio::test]
async fn fragments_publish_full_text_in_order() {
    let rt = runtime(ScriptedProvider::new(["Hel", "lo, ", "World"]));
    let mut session = ChatSession::empty();
    let turn = session.submit("greet me", vec![]).unwrap();
    let reply_id = turn.reply_id.clone();

    let mut events: Vec<ChatEvent> = Vec::new();
    let outcome = rt.drive_turn(turn, &mut events).await.unwrap();

    let updates: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            ChatEvent::TextUpdated { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(updates, vec!["Hel", "Hello, ", "Hello, World"]);
    assert_eq!(events.first(), Some(&ChatEvent::turn_start(reply_id.clone())));
    assert_eq!(events.last(), Some(&ChatEvent::turn_end(reply_id.clone())));
    assert!(matches!(outcome, TurnOutcome::Completed { ref text, .. } if text == "Hello, World"));

    for event in events {
        session.apply(event).unwrap();
    }
    assert_eq!(session.transcript().get(&reply_id).unwrap().text, "Hello, World");
    assert!(!session.is_busy());
}

#[tokio::test]
async fn inline_send_updates_session() {
    let rt = runtime(ScriptedProvider::new(["Debit ", "the ", "receiver"]));
    let mut session = ChatSession::new();
    let outcome = session.send(&rt, "Golden rule?", vec![]).await.unwrap();

    assert!(outcome.is_completed());
    let roles: Vec<Role> = session.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
    assert_eq!(session.transcript().last().unwrap().text, "Debit the receiver");
    assert!(!session.is_busy());
}

#[tokio::test]
async fn second_submit_while_streaming_is_rejected() {
    let rt = runtime(ScriptedProvider::new(["a", "b"]));
    let mut session = ChatSession::new();
    let turn = session.submit("first", vec![]).unwrap();
    session.apply(ChatEvent::turn_start(turn.reply_id.clone())).unwrap();
    session
        .apply(ChatEvent::text_updated(turn.reply_id.clone(), "a"))
        .unwrap();

    let before = session.transcript().len();
    let err = session.submit("second", vec![]).unwrap_err();
    assert!(matches!(err, RuntimeError::Busy));
    assert_eq!(session.transcript().len(), before);
    assert_eq!(session.transcript().last().unwrap().text, "a");

    let err = session.send(&rt, "third", vec![]).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Busy));
    assert_eq!(session.transcript().len(), before);
}

#[tokio::test]
async fn failure_after_two_of_five_keeps_partial_text() {
    let rt = runtime(
        ScriptedProvider::new(["Step 1. ", "Step 2. ", "Step 3. ", "Step 4. ", "Step 5."])
            .failing_after(2, "connection reset"),
    );
    let mut session = ChatSession::new();
    let outcome = session.send(&rt, "solve", vec![]).await.unwrap();

    let TurnOutcome::Failed {
        message_id: Some(id),
        partial_text,
        ..
    } = outcome
    else {
        panic!("expected failure with a reply message");
    };
    assert_eq!(partial_text, "Step 1. Step 2. ");
    assert_eq!(session.transcript().get(&id).unwrap().text, "Step 1. Step 2. ");
    assert!(!session.is_busy());
    assert_eq!(session.last_failure().unwrap().kind, FailureKind::Unknown);
}

#[tokio::test]
async fn open_failure_creates_no_reply() {
    let rt = runtime(ScriptedProvider::new(["x"]).failing_on_open(403, "API key not valid"));
    let mut session = ChatSession::new();
    let outcome = session.send(&rt, "hi", vec![]).await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Failed { message_id: None, .. }));
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.transcript().last().unwrap().role, Role::User);
    let failure = session.last_failure().unwrap();
    assert_eq!(failure.kind, FailureKind::Authorization);
    assert!(failure.user_message().starts_with("API Key missing"));
}

#[tokio::test]
async fn events_marshaled_through_channel() {
    let rt = Arc::new(runtime(ScriptedProvider::new(["Cash ", "A/c"])));
    let mut session = ChatSession::new();
    let turn = session.submit("entry?", vec![]).unwrap();

    let (tx, mut rx) = mpsc::channel(16);
    let driver = {
        let rt = Arc::clone(&rt);
        tokio::spawn(async move {
            let mut tx = tx;
            rt.drive_turn(turn, &mut tx).await
        })
    };

    while let Some(event) = rx.recv().await {
        session.apply(event).unwrap();
    }
    assert!(driver.await.unwrap().unwrap().is_completed());
    assert_eq!(session.transcript().last().unwrap().text, "Cash A/c");
    assert!(!session.is_busy());
}

#[tokio::test]
async fn provider_receives_images_in_order_before_text() {
    let provider = ScriptedProvider::new(["ok"]);
    let rt = Runtime::new(Arc::new(provider.clone()), RuntimeConfig::new());
    let mut session = ChatSession::new();
    let images = vec![
        ImageAttachment::new("image/png", b"page-1".to_vec()),
        ImageAttachment::new("image/jpeg", b"page-2".to_vec()),
    ];
    session.send(&rt, "Check my ledger", images).await.unwrap();

    let requests = provider.requests();
    let last = requests[0].contents.last().unwrap();
    assert_eq!(
        last.parts,
        vec![
            Part::inline_data("image/png", b"page-1".to_vec()),
            Part::inline_data("image/jpeg", b"page-2".to_vec()),
            Part::text("Check my ledger"),
        ]
    );
}

#[tokio::test]
async fn history_excludes_new_user_message_and_empty_replies() {
    let provider = ScriptedProvider::new(Vec::<String>::new());
    let rt = Runtime::new(Arc::new(provider.clone()), RuntimeConfig::new());
    let mut session = ChatSession::new();

    // An empty reply stays in the transcript but is not sent back.
    session.send(&rt, "first", vec![]).await.unwrap();
    session.send(&rt, "second", vec![]).await.unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].contents.len(), 2);
    assert_eq!(requests[1].contents.len(), 3);
    assert_eq!(requests[1].last_user_text(), "second");
}
