//! Session plugin
//!
//! Registers the [`GameSession`] resource, the tick timer, the action and
//! notice messages, and the systems that connect them. Adds
//! [`NetworkingPlugin`] when it is not already present; the link itself is a
//! [`crate::networking::SessionLink`] resource inserted by whoever owns the
//! socket.

use super::events::{LocalAction, SessionNotice};
use super::session::GameSession;
use super::system_sets::SessionSystems;
use super::systems::{apply_local_actions, forward_session_notices, tick_session, SessionTickTimer};
use super::types::PlayerId;
use crate::core::SessionSettings;
use crate::networking::NetworkingPlugin;
use bevy::prelude::*;

pub struct SessionPlugin {
    pub local_player: PlayerId,
    pub settings: SessionSettings,
}

impl SessionPlugin {
    pub fn new(local_player: impl Into<PlayerId>, settings: SessionSettings) -> Self {
        Self {
            local_player: local_player.into(),
            settings,
        }
    }
}

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        let tick_seconds = if self.settings.tick_seconds.is_finite() && self.settings.tick_seconds > 0.0 {
            self.settings.tick_seconds
        } else {
            warn!(
                "[SETTINGS] tick_seconds {} is not usable; using the default",
                self.settings.tick_seconds
            );
            SessionSettings::default().tick_seconds
        };

        app.insert_resource(GameSession::new(
            self.local_player.clone(),
            self.settings.clone(),
        ))
        .insert_resource(self.settings.clone())
        .insert_resource(SessionTickTimer::from_seconds(tick_seconds))
        .add_message::<LocalAction>()
        .add_message::<SessionNotice>();

        app.configure_sets(
            Update,
            (
                SessionSystems::Actions,
                SessionSystems::Tick,
                SessionSystems::Notify,
            )
                .chain(),
        );
        app.add_systems(
            Update,
            (
                apply_local_actions.in_set(SessionSystems::Actions),
                tick_session.in_set(SessionSystems::Tick),
                forward_session_notices.in_set(SessionSystems::Notify),
            ),
        );

        if !app.is_plugin_added::<NetworkingPlugin>() {
            app.add_plugins(NetworkingPlugin);
        }

        info!("SessionPlugin loaded for {}", self.local_player);
    }
}
