//! Conversation shaping for the model API.
//!
//! The chat API requires turns that strictly alternate user/model, start on
//! a user turn, and never leave a user turn unanswered before the new
//! message. Stored history guarantees none of that (greetings, advisories and
//! errors are model messages with no user turn before them), so every request
//! is rebuilt from scratch here.

use secondbrain_core::chat::{Message, MessageRole};

use crate::types::{Part, Turn, TurnRole};

fn turn_role(role: MessageRole) -> TurnRole {
    match role {
        MessageRole::User => TurnRole::User,
        MessageRole::Model => TurnRole::Model,
    }
}

/// Normalizes stored history into a valid alternating sequence.
///
/// Skips everything before the first user message, then keeps each message
/// whose role is the one expected next, dropping the rest. A trailing
/// unanswered user turn is removed.
pub fn sanitize_history(history: &[Message]) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    let mut expecting = TurnRole::User;

    let start = history
        .iter()
        .position(|m| m.role == MessageRole::User)
        .unwrap_or(history.len());

    for message in &history[start..] {
        let role = turn_role(message.role);
        if role == expecting {
            turns.push(Turn {
                role,
                parts: vec![Part::Text(message.text.clone())],
            });
            expecting = expecting.next();
        }
    }

    if turns.last().is_some_and(|t| t.role == TurnRole::User) {
        turns.pop();
    }
    turns
}

/// Request contents: sanitized history followed by the new user message.
pub fn build_contents(history: &[Message], new_message: &str) -> Vec<Turn> {
    let mut turns = sanitize_history(history);
    turns.push(Turn::user_text(new_message));
    turns
}

/// True if `turns` alternates strictly, starting with a user turn.
pub fn is_alternating(turns: &[Turn]) -> bool {
    turns.iter().enumerate().all(|(i, t)| {
        let expected = if i % 2 == 0 {
            TurnRole::User
        } else {
            TurnRole::Model
        };
        t.role == expected
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: MessageRole, text: &str) -> Message {
        Message {
            id: text.to_string(),
            role,
            text: text.to_string(),
            timestamp: 0,
            is_error: false,
        }
    }

    fn texts(turns: &[Turn]) -> Vec<String> {
        turns
            .iter()
            .map(|t| match &t.parts[0] {
                Part::Text(text) => text.clone(),
                other => panic!("unexpected part {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_drops_leading_model_messages() {
        let history = vec![
            msg(MessageRole::Model, "greeting"),
            msg(MessageRole::User, "u1"),
            msg(MessageRole::Model, "m1"),
        ];
        let turns = sanitize_history(&history);
        assert_eq!(texts(&turns), vec!["u1", "m1"]);
    }

    #[test]
    fn test_drops_out_of_order_and_trailing_user() {
        let history = vec![
            msg(MessageRole::User, "u1"),
            msg(MessageRole::User, "u1-dup"),
            msg(MessageRole::Model, "m1"),
            msg(MessageRole::Model, "m1-error"),
            msg(MessageRole::User, "u2"),
        ];
        let turns = sanitize_history(&history);
        assert_eq!(texts(&turns), vec!["u1", "m1"]);
        assert!(is_alternating(&turns));
    }

    #[test]
    fn test_only_model_messages_yield_nothing() {
        let history = vec![msg(MessageRole::Model, "greeting")];
        assert!(sanitize_history(&history).is_empty());
        assert!(sanitize_history(&[]).is_empty());
    }

    #[test]
    fn test_build_contents_ends_with_new_message() {
        let history = vec![
            msg(MessageRole::Model, "greeting"),
            msg(MessageRole::User, "u1"),
        ];
        let turns = build_contents(&history, "hello");
        assert_eq!(texts(&turns), vec!["hello"]);
        assert_eq!(turns[0].role, TurnRole::User);
    }
}
