//! Inbound event routing
//!
//! The router decodes raw frames, hands each typed event to the session, and
//! then calls any observers registered for that event name. Observers see the
//! session after the event has been applied and cannot change it.

use crate::game::session::GameSession;
use bevy::prelude::*;
use shared::protocol::INBOUND_EVENTS;
use shared::{InboundEvent, ProtocolError, WireEvent};
use std::collections::HashMap;

pub type EventObserver = Box<dyn FnMut(&InboundEvent, &GameSession) + Send + Sync>;

/// Handle returned by [`EventRouter::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Resource, Default)]
pub struct EventRouter {
    observers: HashMap<&'static str, Vec<(SubscriptionId, EventObserver)>>,
    next_id: u64,
}

impl EventRouter {
    /// Register an observer for one inbound event name.
    pub fn subscribe<F>(&mut self, event: &str, observer: F) -> Result<SubscriptionId, ProtocolError>
    where
        F: FnMut(&InboundEvent, &GameSession) + Send + Sync + 'static,
    {
        let name = INBOUND_EVENTS
            .iter()
            .copied()
            .find(|known| *known == event)
            .ok_or_else(|| ProtocolError::UnknownEvent(event.to_string()))?;

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.entry(name).or_default().push((id, Box::new(observer)));
        debug!("[NETWORK] Observer {:?} subscribed to {}", id, name);
        Ok(id)
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for observers in self.observers.values_mut() {
            if let Some(pos) = observers.iter().position(|(sub, _)| *sub == id) {
                observers.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn observer_count(&self, event: &str) -> usize {
        self.observers.get(event).map_or(0, Vec::len)
    }

    /// Decode `frame` and apply it. Frames that fail to decode change nothing.
    pub fn dispatch(&mut self, session: &mut GameSession, frame: &WireEvent) -> Result<(), ProtocolError> {
        let event = match InboundEvent::decode(frame) {
            Ok(event) => event,
            Err(e) => {
                warn!("[NETWORK] Dropped inbound frame {:?}: {}", frame.event, e);
                return Err(e);
            }
        };
        self.deliver(session, &event);
        Ok(())
    }

    /// Apply an already decoded event, then notify observers
    pub fn deliver(&mut self, session: &mut GameSession, event: &InboundEvent) {
        session.handle_event(event);
        if let Some(observers) = self.observers.get_mut(event.name()) {
            for (_, observer) in observers.iter_mut() {
                observer(event, session);
            }
        }
    }
}
