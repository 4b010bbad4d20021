//! Error types for game logic
//!
//! Every variant is a local rejection: the action was refused before anything
//! was sent to the server and no state changed.

use crate::game::resources::GamePhase;

/// Errors that can occur when a local action is attempted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The local player does not hold the turn token
    #[error("It is not your turn")]
    NotYourTurn,

    /// The action is not accepted in the current phase
    #[error("Action not allowed while the game is {phase}")]
    WrongPhase { phase: GamePhase },

    /// A submitted move has not been confirmed or rejected yet
    #[error("A move is already awaiting the server")]
    MoveInFlight,

    /// The move for this turn was already sent
    #[error("A move was already played this turn")]
    MoveAlreadySent,

    /// Rejected by the local rules oracle
    #[error("Illegal move: {message}")]
    IllegalMove { message: String },

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid FEN: {message}")]
    InvalidFen { message: String },

    #[error("No piece selection is pending")]
    NoSelectionMode,

    #[error("No piece on {0}")]
    NoPieceAt(String),

    /// The clicked piece does not satisfy the active selection mode
    #[error("Piece on {square} cannot be selected for {mode}")]
    TargetMismatch { square: String, mode: String },

    #[error("Tile {index} cannot be flipped")]
    TileUnavailable { index: usize },

    #[error("Two tiles are already flipped")]
    FlipLimit,

    #[error("Chat message is empty")]
    EmptyChat,

    #[error("Chat message is longer than {max} characters")]
    ChatTooLong { max: usize },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
