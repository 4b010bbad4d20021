//! Game outcome recorded from terminal server events
//!
//! The client never decides that a game is over. `checkmate`, `stalemate`,
//! `timeout` and `game_over` all arrive from the server; the first one seen
//! while playing moves the phase to Over and is stored here for display.
//!
//! # Payload convention
//!
//! The terminal payload carries two player summaries. For checkmate and
//! timeout `player1` is the winner and `player2` the loser. A stalemate has no
//! winner, and a plain `game_over` says who won through its result text.

use shared::{EndReason, GameOverInfo, PlayerSummary};

/// How the finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub reason: EndReason,
    pub winner: Option<PlayerSummary>,
    pub loser: Option<PlayerSummary>,
    /// Result text from the server, empty when none was sent
    pub result: String,
}

impl GameOutcome {
    pub fn new(reason: EndReason, info: Option<GameOverInfo>) -> Self {
        let info = info.unwrap_or_default();
        let (winner, loser) = match reason {
            EndReason::Stalemate => (None, None),
            _ => (info.player1, info.player2),
        };
        Self {
            reason,
            winner,
            loser,
            result: info.result,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self.reason, EndReason::Stalemate)
    }

    /// Whether `player_id` won this game
    pub fn is_winner(&self, player_id: &str) -> bool {
        self.winner.as_ref().is_some_and(|w| w.id == player_id)
    }

    /// Headline for a game-over screen
    pub fn message(&self) -> String {
        let winner = self.winner.as_ref().map(|w| {
            if w.name.is_empty() {
                w.id.clone()
            } else {
                w.name.clone()
            }
        });
        match (self.reason, winner) {
            (EndReason::Stalemate, _) => "Draw by stalemate".to_string(),
            (EndReason::Checkmate, Some(w)) => format!("{w} wins by checkmate"),
            (EndReason::Timeout, Some(w)) => format!("{w} wins on time"),
            (_, Some(w)) => format!("{w} wins"),
            (_, None) if !self.result.is_empty() => self.result.clone(),
            (_, None) => "Game over".to_string(),
        }
    }
}
