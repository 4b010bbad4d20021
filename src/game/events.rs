//! Messages between the session and the presentation layer
//!
//! [`LocalAction`] carries player input into the session. [`SessionNotice`]
//! carries what the session wants shown; the session queues notices while
//! reconciling and [`crate::game::plugin::SessionPlugin`] forwards them every
//! frame.

use crate::game::resources::{GameOutcome, GamePhase, SelectionMode};
use bevy::prelude::*;
use shared::RejectionKind;

/// Player input, as the UI reports it
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum LocalAction {
    Move {
        from: String,
        to: String,
        promotion: Option<char>,
    },
    FlipTile { index: usize },
    SelectPiece { square: String },
    SendChat { text: String },
    RequestReset,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub enum SessionNotice {
    /// The local oracle refused a move before anything was sent
    LocalMoveRefused { reason: String },
    /// The server refused the move in flight and the board was rolled back
    MoveRejected {
        kind: RejectionKind,
        detail: Option<String>,
    },
    /// A match asks the local player to pick a piece to destroy
    SelectPiece { mode: SelectionMode },
    PieceDestroyed {
        square: String,
        piece: Option<String>,
    },
    /// The server would not clear the chosen square; selection stays open
    ClearFailed,
    PhaseChanged { from: GamePhase, to: GamePhase },
    OpponentDisconnected,
    GameOver { outcome: GameOutcome },
    TimeoutReported,
    ChatReceived { author: String, text: String },
    /// A confirmed server fact could not be applied locally and a resync was requested
    BoardDiverged { reason: String },
}
