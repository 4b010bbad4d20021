//! Room chat
//!
//! Lines are appended only when the server broadcasts them. The server echoes
//! the sender's own line back to the room, so nothing is recorded on send.

use crate::game::types::PlayerId;

/// Longest line the client will send
pub const MAX_CHAT_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Empty when the server did not say who wrote it
    pub author: PlayerId,
    pub text: String,
}

impl ChatLine {
    pub fn is_from(&self, player: &PlayerId) -> bool {
        &self.author == player
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    lines: Vec<ChatLine>,
}

impl ChatLog {
    pub fn record(&mut self, line: ChatLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[ChatLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&ChatLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
