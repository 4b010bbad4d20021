//! System organization using SystemSets
//!
//! Within `Update` the session systems run in this order:
//! 1. **Actions** - Apply local actions sent as [`LocalAction`](crate::game::events::LocalAction) messages
//! 2. **Tick** - Advance the match countdown and clocks
//! 3. **Notify** - Forward queued notices to the presentation layer
//!
//! Inbound frames are routed in `PreUpdate` and the outbox is flushed in
//! `PostUpdate` by [`crate::networking::NetworkingPlugin`], so an action taken
//! this frame reaches the link this frame.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum SessionSystems {
    Actions,
    Tick,
    Notify,
}
