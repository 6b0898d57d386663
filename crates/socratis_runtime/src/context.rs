//! Transcript messages to provider contents.

use socratis_core::{Message, Role as MessageRole};
use socratis_llms::{Content, Part, Role};

use crate::prompt::FALLBACK_PROMPT;

/// Images first, in attachment order, then the text. `None` for a message
/// with neither (e.g. a reply that failed before its first fragment).
pub fn to_content(message: &Message) -> Option<Content> {
    let mut parts: Vec<Part> = message
        .images
        .iter()
        .map(|img| Part::inline_data(img.mime_type.clone(), img.data.clone()))
        .collect();
    if !message.text.trim().is_empty() {
        parts.push(Part::text(message.text.clone()));
    }
    if parts.is_empty() {
        return None;
    }
    let role = match message.role {
        MessageRole::User => Role::User,
        MessageRole::Model => Role::Model,
    };
    Some(Content::new(role, parts))
}

/// Prior messages followed by the new user turn. The new turn is never
/// dropped: an empty one is sent as [`FALLBACK_PROMPT`].
pub fn build_contents(history: &[Message], user: &Message) -> Vec<Content> {
    let mut contents: Vec<Content> = history.iter().filter_map(to_content).collect();
    let current = to_content(user)
        .unwrap_or_else(|| Content::user(vec![Part::text(FALLBACK_PROMPT)]));
    contents.push(current);
    contents
}

#[cfg(test)]
mod tests {
    use socratis_core::ImageAttachment;

    use super::*;

    #[test]
    fn test_images_before_text_in_order() {
        let msg = Message::user("Is this right?").with_images(vec![
            ImageAttachment::new("image/png", b"one".to_vec()),
            ImageAttachment::new("image/jpeg", b"two".to_vec()),
        ]);
        let content = to_content(&msg).unwrap();
        assert_eq!(
            content.parts,
            vec![
                Part::inline_data("image/png", b"one".to_vec()),
                Part::inline_data("image/jpeg", b"two".to_vec()),
                Part::text("Is this right?"),
            ]
        );
    }

    #[test]
    fn test_image_only_message_has_no_text_part() {
        let msg = Message::user("")
            .with_images(vec![ImageAttachment::new("image/png", b"x".to_vec())]);
        assert_eq!(to_content(&msg).unwrap().parts.len(), 1);
    }

    #[test]
    fn test_empty_history_messages_skipped() {
        let history = vec![Message::model("Namaste!"), Message::model("")];
        let contents = build_contents(&history, &Message::user("hi"));
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0].role, Role::Model);
        assert_eq!(contents[1], Content::user(vec![Part::text("hi")]));
    }

    #[test]
    fn test_fallback_prompt() {
        let contents = build_contents(&[], &Message::user("   "));
        assert_eq!(contents, vec![Content::user(vec![Part::text(FALLBACK_PROMPT)])]);
    }
}
