//! Client session state
//!
//! [`GameSession`] owns everything one client knows about its game: the
//! displayed boards, the last confirmed position, the move in flight, the
//! selection mode, phase, turn token, clocks, history and room chat.
//!
//! Two kinds of input change it:
//! - local actions (`try_move`, `try_select_piece`, `try_flip_tile`), see
//!   [`crate::game::systems::speculative`]
//! - server events (`handle_event`), see [`crate::game::systems::reconcile`]
//!
//! Neither touches the network. Requests for the server go into an outbox
//! and UI notices into a notice queue; the plugin drains both.

use crate::core::SessionSettings;
use crate::game::error::{GameError, GameResult};
use crate::game::events::SessionNotice;
use crate::game::resources::{
    BoardModel, ChatLog, ChessPosition, ClockReconciler, ClockSlot, ClockTick, GameOutcome, GamePhase,
    HistoryLog, InFlightMove, MAX_CHAT_LEN, MemoryTiles, PhaseMachine, PhaseTrigger, Players, SelectionMode,
    TurnToken,
};
use crate::game::types::{PlayerId, RoomKind};
use bevy::prelude::*;
use shakmaty::{Role, Square};
use shared::OutboundEvent;

/// Tiles the local player flipped this turn, and the countdown to asking
/// the server to resolve them
#[derive(Debug, Default)]
pub struct FlipTracker {
    pub(crate) indices: Vec<usize>,
    pub(crate) match_countdown: Option<u32>,
}

impl FlipTracker {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn clear(&mut self) {
        self.indices.clear();
        self.match_countdown = None;
    }
}

#[derive(Resource, Debug)]
pub struct GameSession {
    pub(crate) settings: SessionSettings,
    pub(crate) promotion: Role,
    pub(crate) local_player: PlayerId,
    pub(crate) room_id: Option<String>,
    pub(crate) room_kind: RoomKind,
    pub(crate) board: BoardModel,
    /// Last position the server vouched for
    pub(crate) confirmed: ChessPosition,
    pub(crate) in_flight: InFlightMove,
    /// Set once the local move for the current turn has been sent
    pub(crate) move_spent: bool,
    pub(crate) selection: SelectionMode,
    pub(crate) phase: PhaseMachine,
    pub(crate) turn: TurnToken,
    pub(crate) clocks: ClockReconciler,
    pub(crate) history: HistoryLog,
    pub(crate) chat: ChatLog,
    pub(crate) players: Players,
    pub(crate) flips: FlipTracker,
    pub(crate) outcome: Option<GameOutcome>,
    outbox: Vec<OutboundEvent>,
    notices: Vec<SessionNotice>,
}

impl GameSession {
    pub fn new(local_player: PlayerId, settings: SessionSettings) -> Self {
        let promotion = settings.promotion_role().unwrap_or_else(|e| {
            warn!("[SETTINGS] {}. Promoting to queen.", e);
            Role::Queen
        });
        Self {
            settings,
            promotion,
            local_player,
            room_id: None,
            room_kind: RoomKind::default(),
            board: BoardModel::default(),
            confirmed: ChessPosition::initial(),
            in_flight: InFlightMove::default(),
            move_spent: false,
            selection: SelectionMode::None,
            phase: PhaseMachine::default(),
            turn: TurnToken::default(),
            clocks: ClockReconciler::default(),
            history: HistoryLog::default(),
            chat: ChatLog::default(),
            players: Players::default(),
            flips: FlipTracker::default(),
            outcome: None,
            outbox: Vec::new(),
            notices: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Read access for the presentation layer
    // ------------------------------------------------------------------

    pub fn local_player(&self) -> &PlayerId {
        &self.local_player
    }

    /// The socket id is only known once the link is up
    pub fn set_local_player(&mut self, player: PlayerId) {
        self.local_player = player;
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    pub fn turn_holder(&self) -> Option<&PlayerId> {
        self.turn.holder()
    }

    pub fn holds_token(&self) -> bool {
        self.turn.is_held_by(&self.local_player)
    }

    /// Whether a local move would be attempted right now
    pub fn can_move(&self) -> bool {
        self.phase() == GamePhase::Playing
            && self.holds_token()
            && !self.in_flight.is_pending()
            && !self.move_spent
    }

    pub fn position(&self) -> &ChessPosition {
        self.board.current_position()
    }

    pub fn confirmed_position(&self) -> &ChessPosition {
        &self.confirmed
    }

    pub fn tiles(&self) -> &MemoryTiles {
        self.board.current_tiles()
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn selection(&self) -> SelectionMode {
        self.selection
    }

    pub fn highlighted_squares(&self) -> Vec<Square> {
        self.selection.highlighted_squares(self.board.current_position())
    }

    /// King in check in the displayed position
    pub fn check_square(&self) -> Option<Square> {
        self.board.current_position().checked_king()
    }

    pub fn move_in_flight(&self) -> bool {
        self.in_flight.is_pending()
    }

    pub fn clocks(&self) -> [u32; 2] {
        self.clocks.clocks()
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn room_kind(&self) -> RoomKind {
        self.room_kind
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Chat survives resets; it belongs to the room, not the game
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn local_flips(&self) -> &[usize] {
        self.flips.indices()
    }

    pub fn pending_outbound(&self) -> &[OutboundEvent] {
        &self.outbox
    }

    pub fn drain_outbox(&mut self) -> Vec<OutboundEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn drain_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    // ------------------------------------------------------------------
    // Periodic work
    // ------------------------------------------------------------------

    /// Advance one session tick: the match countdown and the local clock.
    pub fn tick(&mut self) {
        if let Some(remaining) = self.flips.match_countdown {
            if remaining <= 1 {
                self.flips.match_countdown = None;
                self.emit(OutboundEvent::MatchTiles);
            } else {
                self.flips.match_countdown = Some(remaining - 1);
            }
        }

        let running = self.phase() == GamePhase::Playing;
        let active = self.active_clock_slot();
        match self.clocks.tick(running, active) {
            ClockTick::Idle => {}
            ClockTick::Decremented => debug!("[CLOCK] {:?}", self.clocks.clocks()),
            ClockTick::TimedOut => {
                info!("[CLOCK] Clock ran out at {:?}; reporting timeout", self.clocks.clocks());
                self.emit(OutboundEvent::Timeout);
                self.notify(SessionNotice::TimeoutReported);
            }
        }
    }

    /// Ask the server for both boards, and the clocks in timed rooms
    pub fn request_full_sync(&mut self) {
        self.emit(OutboundEvent::GetChessBoard);
        self.emit(OutboundEvent::GetMemoryBoard);
        if self.room_kind.is_timed() {
            self.emit(OutboundEvent::GetPlayerTimes);
        }
    }

    /// Ask the server to start a new game
    pub fn request_reset(&mut self) {
        self.emit(OutboundEvent::ResetGame);
    }

    /// Send a chat line to the room. It shows up in [`Self::chat`] once the
    /// server broadcasts it back.
    pub fn send_chat(&mut self, text: &str) -> GameResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GameError::EmptyChat);
        }
        if text.chars().count() > MAX_CHAT_LEN {
            return Err(GameError::ChatTooLong { max: MAX_CHAT_LEN });
        }
        self.emit(OutboundEvent::Chat(text.to_string()));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals shared by the speculative and reconcile paths
    // ------------------------------------------------------------------

    pub(crate) fn emit(&mut self, event: OutboundEvent) {
        debug!("[NETWORK] queued {}", event.name());
        self.outbox.push(event);
    }

    pub(crate) fn notify(&mut self, notice: SessionNotice) {
        self.notices.push(notice);
    }

    pub(crate) fn active_clock_slot(&self) -> Option<ClockSlot> {
        self.turn.holder().and_then(|p| self.players.slot_of(p))
    }

    /// Move the phase and run the side effects of entering the new one.
    pub(crate) fn apply_phase(&mut self, trigger: PhaseTrigger) -> bool {
        let Some(change) = self.phase.apply(trigger) else {
            if PhaseMachine::next_phase(self.phase(), trigger).is_none() {
                debug!("[PHASE] {:?} ignored while {}", trigger, self.phase());
            }
            return false;
        };

        info!("[PHASE] {} -> {}", change.from, change.to);
        if change.to != GamePhase::Playing && self.selection.is_active() {
            info!("[SELECTION] Selection mode {} closed by phase change", self.selection);
            self.selection = SelectionMode::None;
        }
        if change.to == GamePhase::Ready {
            self.request_full_sync();
        }
        self.notify(SessionNotice::PhaseChanged {
            from: change.from,
            to: change.to,
        });
        true
    }

    /// Throw away speculative state and show the last confirmed position.
    pub(crate) fn discard_speculation(&mut self) {
        if let Some(pending) = self.in_flight.take() {
            if pending.snapshot != self.confirmed {
                debug!("[RECONCILE] Confirmed position moved while {} was in flight", pending.request);
            }
        }
        self.board.replace_position(self.confirmed.clone());
        self.move_spent = false;
    }
}
