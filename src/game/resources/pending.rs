//! Move awaiting server confirmation

use super::position::{ChessPosition, MoveRequest};

/// Lifecycle of a locally submitted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveLifecycle {
    Sent,
    Confirmed,
    Rejected,
}

#[derive(Debug, Clone)]
pub struct PendingMove {
    pub request: MoveRequest,
    /// Position displayed right before the optimistic apply
    pub snapshot: ChessPosition,
    /// What the local oracle expects the server to confirm
    pub expected: ChessPosition,
}

/// At most one move may be in flight at a time
#[derive(Debug, Default)]
pub struct InFlightMove {
    pending: Option<PendingMove>,
}

impl InFlightMove {
    pub fn request(&mut self, pending: PendingMove) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(pending);
        true
    }

    pub fn take(&mut self) -> Option<PendingMove> {
        self.pending.take()
    }

    pub fn get(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
