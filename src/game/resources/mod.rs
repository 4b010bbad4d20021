//! Session state pieces
//!
//! Plain data types that [`crate::game::session::GameSession`] is assembled
//! from. None of them talks to the network; the session decides when each
//! one changes.
//!
//! # Categories
//!
//! ## Boards
//! - [`ChessPosition`] - Immutable chess position backed by `shakmaty`
//! - [`MemoryTiles`] - The 64 memory tiles
//! - [`BoardModel`] - What the client currently displays
//!
//! ## Reconciliation
//! - [`InFlightMove`] - The single move awaiting the server
//! - [`SelectionMode`] - Pending piece removal after a match
//!
//! ## Flow
//! - [`PhaseMachine`] - Waiting / Ready / Playing / Over
//! - [`TurnToken`] - Who may act
//! - [`ClockReconciler`] - Timed-room clocks
//!
//! ## Records
//! - [`HistoryLog`] - Event-derived history
//! - [`ChatLog`] - Room chat
//! - [`GameOutcome`] - How the game ended
//! - [`Players`] - Room roster

pub mod board;
pub mod chat;
pub mod game_over;
pub mod history;
pub mod pending;
pub mod players;
pub mod position;
pub mod selection;
pub mod timer;
pub mod turn;


pub use board::*;
pub use chat::*;
pub use game_over::*;
pub use history::*;
pub use pending::*;
pub use players::*;
pub use position::*;
pub use selection::*;
pub use timer::*;
pub use turn::*;
