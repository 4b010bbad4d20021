//! Game phase machine and turn token
//!
//! ```text
//! Waiting --both players present--> Ready --first turn--> Playing --terminal--> Over
//!    ^                                |                      |                   |
//!    +------opponent disconnected-----+----------------------+-------------------+
//! Over / Playing / Ready --reset--> Ready
//! ```
//!
//! A room that is already mid-game when we join (`room_full` with state
//! `Playing`) goes straight from Waiting to Playing. Triggers that do not fit
//! the table leave the phase unchanged.

use crate::game::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Waiting,
    Ready,
    Playing,
    Over,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Waiting => "waiting",
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Over => "over",
        };
        f.write_str(name)
    }
}

/// Server facts that can move the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTrigger {
    /// `room_full`; `in_progress` when the room reports a running game
    RoomFull { in_progress: bool },
    TurnAssigned,
    Terminal,
    OpponentDisconnected,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: GamePhase,
    pub to: GamePhase,
}

#[derive(Debug, Default)]
pub struct PhaseMachine {
    phase: GamePhase,
}

impl PhaseMachine {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Target phase for `trigger`, or `None` when the trigger is ignored here
    pub fn next_phase(phase: GamePhase, trigger: PhaseTrigger) -> Option<GamePhase> {
        use GamePhase::*;
        use PhaseTrigger::*;
        match (phase, trigger) {
            (Waiting, RoomFull { in_progress: false }) => Some(Ready),
            (Waiting | Ready, RoomFull { in_progress: true }) => Some(Playing),
            (Ready, TurnAssigned) => Some(Playing),
            (Playing, Terminal) => Some(Over),
            (Ready | Playing | Over, OpponentDisconnected) => Some(Waiting),
            (Ready | Playing | Over, Reset) => Some(Ready),
            _ => None,
        }
    }

    /// Apply a trigger. Returns the change when the phase actually moved.
    pub fn apply(&mut self, trigger: PhaseTrigger) -> Option<PhaseChange> {
        let to = Self::next_phase(self.phase, trigger)?;
        if to == self.phase {
            return None;
        }
        let change = PhaseChange {
            from: self.phase,
            to,
        };
        self.phase = to;
        Some(change)
    }
}

/// Which player the server last said may act
#[derive(Debug, Clone, Default)]
pub struct TurnToken {
    holder: Option<PlayerId>,
}

impl TurnToken {
    pub fn holder(&self) -> Option<&PlayerId> {
        self.holder.as_ref()
    }

    pub fn is_held_by(&self, player: &PlayerId) -> bool {
        self.holder.as_ref() == Some(player)
    }

    /// Store the new holder and report whether it differs from the old one
    pub fn assign(&mut self, player: PlayerId) -> bool {
        let changed = self.holder.as_ref() != Some(&player);
        self.holder = Some(player);
        changed
    }

    pub fn clear(&mut self) {
        self.holder = None;
    }
}
