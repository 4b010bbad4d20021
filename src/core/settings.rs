//! Client session settings

use super::error::{CoreError, CoreResult};
use crate::game::types::role_from_char;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use shakmaty::Role;

/// Tunables for one client session
///
/// Every field has a default so older settings files keep loading after new
/// fields are added.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Room server address, handed to whatever transport carries the link
    pub server_url: String,
    /// Promotion piece used when a move leaves the choice open
    pub default_promotion: char,
    /// Ticks between the second tile flip and the `match_tiles` request
    pub match_delay_ticks: u32,
    /// Seconds per session tick
    pub tick_seconds: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            default_promotion: 'q',
            match_delay_ticks: 1,
            tick_seconds: 1.0,
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> CoreResult<()> {
        self.promotion_role()?;
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(CoreError::InvalidSetting {
                field: "tick_seconds",
                message: format!("must be a positive number of seconds, got {}", self.tick_seconds),
            });
        }
        Ok(())
    }

    pub fn promotion_role(&self) -> CoreResult<Role> {
        role_from_char(self.default_promotion)
            .filter(|role| !matches!(role, Role::Pawn | Role::King))
            .ok_or_else(|| CoreError::InvalidSetting {
                field: "default_promotion",
                message: format!("'{}' is not a promotion piece", self.default_promotion),
            })
    }
}
