//! Chat message and completion request types.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking questions.
    User,

    /// The assistant's replies.
    Assistant,
}

/// A single turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author.
    pub role: Role,

    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a completion provider needs for one call.
///
/// The caller owns the conversation history; the request only carries a
/// snapshot of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instructions, including the retrieved context.
    pub system_prompt: String,

    /// Prior turns, oldest first.
    pub history: Vec<ChatMessage>,

    /// The message to answer.
    pub user_message: String,
}

impl CompletionRequest {
    /// Create a request with no history.
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history: Vec::new(),
            user_message: user_message.into(),
        }
    }

    /// Set the conversation history.
    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_constructors() {
        let question = ChatMessage::user("How hard was the Kai'Sa nerf?");
        let answer = ChatMessage::assistant("Her Q damage dropped by 15.");

        assert_eq!(question.role, Role::User);
        assert_eq!(answer.role, Role::Assistant);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_request_builder_keeps_history_order() {
        let request = CompletionRequest::new("system", "second question").with_history(vec![
            ChatMessage::user("first question"),
            ChatMessage::assistant("first answer"),
        ]);

        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].role, Role::User);
        assert_eq!(request.user_message, "second question");
    }
}
