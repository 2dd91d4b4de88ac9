//! Reply sources for the assistant chat.

use rand::seq::SliceRandom;

use crate::domain::chat::CANNED_REPLIES;
use crate::domain::ChatMessage;

/// Produces the assistant's answer to a user message.
pub trait ResponseSource: Send + Sync {
    fn classify(&self, message: &ChatMessage) -> ChatMessage;
}

/// Picks one of the fixed replies uniformly at random, ignoring the
/// question. Stands in until a real chat backend is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedResponses;

impl ResponseSource for CannedResponses {
    fn classify(&self, _message: &ChatMessage) -> ChatMessage {
        let reply = CANNED_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(CANNED_REPLIES[0]);
        ChatMessage::assistant(reply)
    }
}
