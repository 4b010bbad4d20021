//! Bevy systems that drive [`GameSession`] each frame

use crate::game::events::{LocalAction, SessionNotice};
use crate::game::session::GameSession;
use bevy::prelude::*;

/// Repeating timer behind the session tick
#[derive(Resource, Debug)]
pub struct SessionTickTimer(pub Timer);

impl SessionTickTimer {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Repeating))
    }
}

/// Apply queued player input. Refused actions are logged and dropped; the
/// session has already queued a notice where the player should see one.
pub fn apply_local_actions(mut actions: MessageReader<LocalAction>, mut session: ResMut<GameSession>) {
    for action in actions.read() {
        let result = match action {
            LocalAction::Move {
                from,
                to,
                promotion,
            } => session.try_move(from, to, *promotion),
            LocalAction::FlipTile { index } => session.try_flip_tile(*index),
            LocalAction::SelectPiece { square } => session.try_select_piece(square),
            LocalAction::SendChat { text } => session.send_chat(text),
            LocalAction::RequestReset => {
                session.request_reset();
                Ok(())
            }
        };
        if let Err(e) = result {
            debug!("[SPECULATIVE] {:?} refused: {}", action, e);
        }
    }
}

pub fn tick_session(time: Res<Time>, mut timer: ResMut<SessionTickTimer>, mut session: ResMut<GameSession>) {
    timer.0.tick(time.delta());
    for _ in 0..timer.0.times_finished_this_tick() {
        session.tick();
    }
}

pub fn forward_session_notices(mut session: ResMut<GameSession>, mut notices: MessageWriter<SessionNotice>) {
    for notice in session.drain_notices() {
        notices.write(notice);
    }
}
