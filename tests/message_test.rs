use nlpassist_cli::message::{AnswerMeta, Message, MessageKind, Role};

// ============================================
// Role Tests
// ============================================

#[test]
fn test_role_prefixes() {
    assert_eq!(Role::User.prefix(), "You: ");
    assert_eq!(Role::Bot.prefix(), "Bot: ");
}

#[test]
fn test_role_equality() {
    assert_eq!(Role::User, Role::User);
    assert_ne!(Role::User, Role::Bot);
}

// ============================================
// Message Construction Tests
// ============================================

#[test]
fn test_message_kind_default_is_chat() {
    let kind: MessageKind = Default::default();
    assert_eq!(kind, MessageKind::Chat);
}

#[test]
fn test_message_user_constructor() {
    let msg = Message::user("When do admissions open?".to_string());

    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.kind, MessageKind::Chat);
    assert!(msg.meta.is_none());
    assert!(!msg.is_error());
}

#[test]
fn test_message_bot_constructor() {
    let msg = Message::bot("Fall and Spring.".to_string());

    assert_eq!(msg.role, Role::Bot);
    assert_eq!(msg.kind, MessageKind::Chat);
    assert_eq!(msg.content, "Fall and Spring.");
}

#[test]
fn test_message_error_constructor() {
    let msg = Message::error("Error: backend unreachable".to_string());

    assert_eq!(msg.role, Role::Bot);
    assert_eq!(msg.kind, MessageKind::Error);
    assert!(msg.is_error());
}

#[test]
fn test_message_notice_constructor() {
    let msg = Message::notice("Welcome".to_string());
    assert_eq!(msg.kind, MessageKind::Notice);
}

#[test]
fn test_message_time_label_format() {
    let msg = Message::user("hi".to_string());
    let label = msg.time_label();
    assert_eq!(label.len(), 5);
    assert_eq!(&label[2..3], ":");
}

#[test]
fn test_message_unicode_content() {
    let content = "Hostel ki facility hai? 🏫 こんにちは".to_string();
    let msg = Message::user(content.clone());
    assert_eq!(msg.content, content);
}

// ============================================
// Answer Metadata Tests
// ============================================

#[test]
fn test_with_meta_drops_empty() {
    let msg = Message::bot("a".to_string()).with_meta(AnswerMeta::default());
    assert!(msg.meta.is_none());
}

#[test]
fn test_with_meta_keeps_details() {
    let meta = AnswerMeta {
        sources: vec!["Official University Database".to_string()],
        confidence: Some(0.92),
        response_time: Some(0.415),
        cached: false,
    };
    let msg = Message::bot("a".to_string()).with_meta(meta.clone());
    assert_eq!(msg.meta, Some(meta));
}

#[test]
fn test_meta_summary() {
    let meta = AnswerMeta {
        sources: vec!["A".to_string(), "B".to_string()],
        confidence: Some(0.92),
        response_time: Some(0.25),
        cached: true,
    };
    assert_eq!(meta.summary(), "sources: A, B · confidence 92% · 0.25s · cached");
}

#[test]
fn test_meta_summary_partial() {
    let meta = AnswerMeta {
        cached: true,
        ..Default::default()
    };
    assert_eq!(meta.summary(), "cached");
}
