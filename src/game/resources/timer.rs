//! Player clocks for timed rooms
//!
//! The server owns the clocks. Locally the active player's clock counts down
//! one unit per tick for display, and every authoritative value overwrites
//! the local one.

/// Clock slot of a player, as ordered by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockSlot {
    Player1,
    Player2,
}

impl ClockSlot {
    pub fn index(self) -> usize {
        match self {
            ClockSlot::Player1 => 0,
            ClockSlot::Player2 => 1,
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    Idle,
    Decremented,
    /// A clock is at zero and the timeout has not been reported yet
    TimedOut,
}

#[derive(Debug, Default)]
pub struct ClockReconciler {
    enabled: bool,
    clocks: [u32; 2],
    /// No countdown before the first authoritative value
    synced: bool,
    timeout_reported: bool,
}

impl ClockReconciler {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn clocks(&self) -> [u32; 2] {
        self.clocks
    }

    pub fn timeout_reported(&self) -> bool {
        self.timeout_reported
    }

    /// Take the server's values and allow a new timeout report
    pub fn overwrite(&mut self, clocks: [u32; 2]) {
        self.clocks = clocks;
        self.synced = true;
        self.timeout_reported = false;
    }

    pub fn reset(&mut self) {
        self.clocks = [0, 0];
        self.synced = false;
        self.timeout_reported = false;
    }

    /// Count down the active clock. Once a timeout is reported the clocks hold
    /// still until the next authoritative value.
    pub fn tick(&mut self, running: bool, active: Option<ClockSlot>) -> ClockTick {
        if !self.enabled || !self.synced || !running || self.timeout_reported {
            return ClockTick::Idle;
        }
        if self.clocks.contains(&0) {
            self.timeout_reported = true;
            return ClockTick::TimedOut;
        }
        let Some(slot) = active else {
            return ClockTick::Idle;
        };
        let clock = &mut self.clocks[slot.index()];
        *clock = clock.saturating_sub(1);
        if *clock == 0 {
            self.timeout_reported = true;
            ClockTick::TimedOut
        } else {
            ClockTick::Decremented
        }
    }
}
