//! Session systems module
//!
//! - [`speculative`] - Local actions: optimistic moves, tile flips, piece selection
//! - [`reconcile`] - Folding server events into the session
//! - [`session_flow`] - Bevy systems that tick the session and move messages

pub mod reconcile;
pub mod session_flow;
pub mod speculative;

pub use session_flow::*;
