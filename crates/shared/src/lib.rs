//! Wire protocol for the memchess room server.
//!
//! The server speaks socket.io-style events: a name plus positional JSON
//! arguments. [`protocol::WireEvent`] is that raw frame; [`protocol::InboundEvent`]
//! and [`protocol::OutboundEvent`] are the typed views the client core works with.

pub mod protocol;

pub use protocol::{
    ChatMessage, EndReason, GameOverInfo, InboundEvent, MatchedTiles, MovePayload, OutboundEvent,
    PlayerInfo, PlayerSummary, ProtocolError, RejectionKind, TileUpgrade, WireEvent,
};
