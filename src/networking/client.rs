use crate::game::session::GameSession;
use crate::networking::router::EventRouter;
use bevy::prelude::*;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use shared::{OutboundEvent, ProtocolError, WireEvent};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Session link is closed")]
    Closed,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Link health, for a connection indicator
#[derive(Resource, Debug, Clone, Default)]
pub struct LinkStatus {
    pub is_connected: bool,
    pub frames_in: u64,
    pub frames_out: u64,
    pub dropped_frames: u64,
}

/// Client end of the message link to the room server
///
/// The socket itself lives outside the ECS; it feeds decoded-as-JSON frames
/// into `inbound` and drains `outbound`.
#[derive(Resource, Debug)]
pub struct SessionLink {
    outbound: Sender<WireEvent>,
    inbound: Receiver<WireEvent>,
}

/// Transport end of a [`SessionLink`]
#[derive(Debug, Clone)]
pub struct RemoteEnd {
    to_client: Sender<WireEvent>,
    from_client: Receiver<WireEvent>,
}

impl SessionLink {
    pub fn new(outbound: Sender<WireEvent>, inbound: Receiver<WireEvent>) -> Self {
        Self { outbound, inbound }
    }

    /// An in-memory link and the transport end that drives it
    pub fn pair() -> (Self, RemoteEnd) {
        let (to_client, inbound) = unbounded();
        let (outbound, from_client) = unbounded();
        (
            Self { outbound, inbound },
            RemoteEnd {
                to_client,
                from_client,
            },
        )
    }

    pub fn send(&self, event: &OutboundEvent) -> Result<(), TransportError> {
        self.outbound
            .send(event.to_wire())
            .map_err(|_| TransportError::Closed)
    }

    /// Everything received so far, in arrival order
    pub fn receive_all(&self) -> Result<Vec<WireEvent>, TransportError> {
        let mut frames = Vec::new();
        loop {
            match self.inbound.try_recv() {
                Ok(frame) => frames.push(frame),
                Err(TryRecvError::Empty) => return Ok(frames),
                Err(TryRecvError::Disconnected) if !frames.is_empty() => return Ok(frames),
                Err(TryRecvError::Disconnected) => return Err(TransportError::Closed),
            }
        }
    }
}

impl RemoteEnd {
    pub fn push(&self, frame: WireEvent) -> Result<(), TransportError> {
        self.to_client.send(frame).map_err(|_| TransportError::Closed)
    }

    /// Frames the client has sent so far
    pub fn drain_sent(&self) -> Vec<WireEvent> {
        self.from_client.try_iter().collect()
    }
}

pub struct NetworkingPlugin;

impl Plugin for NetworkingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EventRouter>();
        app.init_resource::<LinkStatus>();

        app.add_systems(
            PreUpdate,
            pump_inbound_events.run_if(resource_exists::<SessionLink>),
        );
        app.add_systems(
            PostUpdate,
            flush_outbound_events.run_if(resource_exists::<SessionLink>),
        );

        info!("NetworkingPlugin loaded");
    }
}

/// Route every frame that arrived since the last frame
pub fn pump_inbound_events(
    link: Res<SessionLink>,
    mut router: ResMut<EventRouter>,
    mut session: ResMut<GameSession>,
    mut status: ResMut<LinkStatus>,
) {
    let frames = match link.receive_all() {
        Ok(frames) => frames,
        Err(e) => {
            if status.is_connected {
                warn!("[NETWORK] {}", e);
                status.is_connected = false;
            }
            return;
        }
    };
    if frames.is_empty() {
        return;
    }

    status.is_connected = true;
    for frame in frames {
        status.frames_in += 1;
        if router.dispatch(&mut session, &frame).is_err() {
            status.dropped_frames += 1;
        }
    }
}

/// Send everything the session queued this frame
pub fn flush_outbound_events(
    link: Res<SessionLink>,
    mut session: ResMut<GameSession>,
    mut status: ResMut<LinkStatus>,
) {
    if session.pending_outbound().is_empty() {
        return;
    }
    for event in session.drain_outbox() {
        match link.send(&event) {
            Ok(()) => status.frames_out += 1,
            Err(e) => {
                error!("[NETWORK] Failed to send {}: {}", event.name(), e);
                status.is_connected = false;
            }
        }
    }
}
