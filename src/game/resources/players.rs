//! Room roster from `player_info`

use super::timer::ClockSlot;
use crate::game::types::PlayerId;
use shared::{PlayerInfo, PlayerSummary};

/// Both seats as the server reported them. Seat order fixes the clock order.
#[derive(Debug, Clone, Default)]
pub struct Players {
    pub player1: Option<PlayerSummary>,
    pub player2: Option<PlayerSummary>,
}

impl Players {
    pub fn update(&mut self, info: PlayerInfo) {
        self.player1 = info.player1;
        self.player2 = info.player2;
    }

    pub fn slot_of(&self, player: &PlayerId) -> Option<ClockSlot> {
        let is = |seat: &Option<PlayerSummary>| seat.as_ref().is_some_and(|p| p.id == player.as_str());
        if is(&self.player1) {
            Some(ClockSlot::Player1)
        } else if is(&self.player2) {
            Some(ClockSlot::Player2)
        } else {
            None
        }
    }

    pub fn get(&self, player: &PlayerId) -> Option<&PlayerSummary> {
        [&self.player1, &self.player2]
            .into_iter()
            .flatten()
            .find(|p| p.id == player.as_str())
    }

    /// The other seat, from `player`'s point of view
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerSummary> {
        [&self.player1, &self.player2]
            .into_iter()
            .flatten()
            .find(|p| p.id != player.as_str())
    }
}
