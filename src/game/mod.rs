//! Game module - Client-side reconciliation for one memory chess game
//!
//! A memory chess client shows two boards: a chess position and a grid of 64
//! face-down memory tiles. The room server is authoritative for both. This
//! module keeps the client's copy consistent with it while still letting the
//! local player see their own move immediately.
//!
//! # Module Structure
//!
//! - [`types`] - Player ids, piece and tile codes, room kinds
//! - [`error`] - Local rejections ([`error::GameError`])
//! - [`resources`] - The data the session is built from
//! - [`session`] - [`session::GameSession`], the single resource holding it all
//! - [`systems`] - Local actions, server reconciliation, per-frame systems
//! - [`events`] - Input and notice messages
//! - [`plugin`] - [`plugin::SessionPlugin`]
//!
//! # Lifecycle of a move
//!
//! ```text
//! try_move --> displayed board updated, move_piece queued  (Sent)
//!   piece_moved   --> confirmed position advanced          (Confirmed)
//!   illegal_move  --> displayed board rolled back          (Rejected)
//! ```

pub mod error;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod session;
pub mod system_sets;
pub mod systems;
pub mod types;

pub use error::{GameError, GameResult};
pub use events::{LocalAction, SessionNotice};
pub use plugin::SessionPlugin;
pub use session::GameSession;
