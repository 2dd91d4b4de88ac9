use serde::Serialize;

use crate::domain::ChatMessage;

/// Chat log and input box of the assistant widget.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantFlow {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub is_loading: bool,
}

impl Default for AssistantFlow {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::greeting()],
            input: String::new(),
            is_loading: false,
        }
    }
}

impl AssistantFlow {
    /// Put a suggested question in the input box without sending it.
    pub fn suggest(&mut self, question: &str) {
        self.input = question.to_string();
    }

    /// Append the user's message and wait for a reply. Blank text or a
    /// pending reply makes this a no-op that keeps the typed text.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.is_loading {
            self.input = text.to_string();
            return None;
        }

        let message = ChatMessage::user(trimmed);
        self.input.clear();
        self.messages.push(message.clone());
        self.is_loading = true;
        Some(message)
    }

    pub fn finish_send(&mut self, reply: ChatMessage) {
        self.messages.push(reply);
        self.is_loading = false;
    }
}
