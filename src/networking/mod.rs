//! Link between the session and the room server
//!
//! - [`SessionLink`] - Channel pair carrying raw frames
//! - [`EventRouter`] - Decodes frames, applies them, notifies observers
//! - [`NetworkingPlugin`] - Pumps frames in before `Update` and out after it

pub mod client;
pub mod router;

pub use client::{
    flush_outbound_events, pump_inbound_events, LinkStatus, NetworkingPlugin, RemoteEnd,
    SessionLink, TransportError,
};
pub use router::{EventObserver, EventRouter, SubscriptionId};
