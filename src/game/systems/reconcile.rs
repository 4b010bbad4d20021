//! Server event reconciliation
//!
//! Every inbound event is a confirmed fact. `handle_event` folds it into the
//! session: authoritative boards replace local ones, confirmations promote
//! the optimistic position, rejections roll it back, and phase, turn, clock,
//! selection and history follow.

use crate::game::events::SessionNotice;
use crate::game::resources::{
    parse_square, ChatLine, ChessPosition, GameOutcome, GamePhase, HistoryEntry, MemoryTiles, MoveDetail,
    MoveLifecycle, MoveRequest, PhaseTrigger, SelectionMode,
};
use crate::game::session::GameSession;
use crate::game::types::{PlayerId, RoomKind, TileCode};
use bevy::prelude::*;
use shared::{
    ChatMessage, EndReason, GameOverInfo, InboundEvent, MatchedTiles, MovePayload, OutboundEvent,
    PlayerInfo, RejectionKind, TileUpgrade,
};

impl GameSession {
    /// Apply one server event.
    pub fn handle_event(&mut self, event: &InboundEvent) {
        trace!("[RECONCILE] {}", event.name());
        match event {
            InboundEvent::Turn { player, clocks } => self.on_turn(player, *clocks),
            InboundEvent::ChessBoard { fen } => self.on_chess_board(fen),
            InboundEvent::MemoryBoard { tiles } => self.on_memory_board(tiles),
            InboundEvent::PieceMoved {
                mv,
                piece,
                captured,
                player,
            } => self.on_piece_moved(mv, piece.clone(), captured.clone(), player.as_deref()),
            InboundEvent::MoveRejected { kind, detail } => self.on_move_rejected(*kind, detail.clone()),
            InboundEvent::TileFlipped {
                index,
                tile,
                player,
            } => self.on_tile_flipped(*index, tile.as_deref(), player.as_deref()),
            InboundEvent::SelectPiece { code } => self.on_select_piece(code),
            InboundEvent::SquareCleared {
                square,
                piece,
                player,
            } => self.on_square_cleared(square, piece.clone(), player.as_deref()),
            InboundEvent::ClearFailed => self.on_clear_failed(),
            InboundEvent::TilesMatched { matched, player } => {
                self.on_tiles_matched(matched, player.as_deref())
            }
            InboundEvent::UnflipTiles { indices } => self.on_unflip_tiles(indices),
            InboundEvent::RemoveTiles { indices } => self.on_remove_tiles(indices),
            InboundEvent::UpgradeTiles { upgrades } => self.on_upgrade_tiles(upgrades),
            InboundEvent::GameReset => self.on_game_reset(),
            InboundEvent::OpponentDisconnected => self.on_opponent_disconnected(),
            InboundEvent::GameEnded { reason, info } => self.on_game_ended(*reason, info.clone()),
            InboundEvent::PlayerTimes { times } => self.on_player_times(*times),
            InboundEvent::RoomFull { state } => self.on_room_full(state),
            InboundEvent::RoomJoined { room_id, room_type } => self.on_room_joined(room_id, room_type),
            InboundEvent::PlayerInfo(info) => self.on_player_info(info.clone()),
            InboundEvent::Chat(message) => self.on_chat(message),
        }
    }

    fn on_turn(&mut self, player: &str, clocks: Option<[u32; 2]>) {
        let player = PlayerId::from(player);
        let changed = self.turn.assign(player.clone());
        self.apply_phase(PhaseTrigger::TurnAssigned);

        if changed && self.selection.is_active() {
            info!("[SELECTION] Selection mode {} lapsed at turn change", self.selection);
            self.selection = SelectionMode::None;
        }
        if !self.holds_token() {
            self.flips.clear();
        }
        // A repeated turn for the same holder (a player rejoining) is not a new turn
        if changed {
            self.move_spent = false;
        }

        if let Some(clocks) = clocks {
            if self.room_kind.is_timed() {
                self.clocks.overwrite(clocks);
            }
        }
        self.history.record(HistoryEntry::Divider { player });
    }

    fn on_chess_board(&mut self, fen: &str) {
        match ChessPosition::from_fen(fen) {
            Ok(position) => {
                if self.in_flight.take().is_some() {
                    info!("[RECONCILE] Full board replaced the move in flight");
                }
                self.confirmed = position.clone();
                self.board.replace_position(position);
            }
            Err(e) => {
                error!("[RECONCILE] Server sent an unreadable board: {}", e);
                self.notify(SessionNotice::BoardDiverged {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn on_memory_board(&mut self, tiles: &[String]) {
        self.board.replace_tiles(MemoryTiles::from_codes(tiles));
        self.flips.clear();
    }

    fn on_piece_moved(
        &mut self,
        mv: &MovePayload,
        piece: Option<String>,
        captured: Option<String>,
        player: Option<&str>,
    ) {
        let pending = self.in_flight.take();
        let applied = MoveRequest::from_payload(mv)
            .and_then(|request| self.confirmed.apply_move(&request, self.promotion));

        match applied {
            Ok(next) => {
                if let Some(pending) = &pending {
                    if pending.expected != next {
                        info!(
                            "[RECONCILE] Server confirmed {}{} which differs from the optimistic {}",
                            mv.from, mv.to, pending.request
                        );
                    } else {
                        debug!("[RECONCILE] {} {:?}", pending.request, MoveLifecycle::Confirmed);
                    }
                }
                self.confirmed = next.clone();
                self.board.replace_position(next);
            }
            Err(e) => {
                warn!(
                    "[RECONCILE] Confirmed move {}->{} does not fit the local position ({}); resyncing",
                    mv.from, mv.to, e
                );
                self.board.replace_position(self.confirmed.clone());
                self.emit(OutboundEvent::GetChessBoard);
                self.notify(SessionNotice::BoardDiverged {
                    reason: e.to_string(),
                });
            }
        }

        let tiles = self.board.current_tiles().all_face_down();
        self.board.replace_tiles(tiles);
        self.flips.clear();

        self.history.record(HistoryEntry::Move {
            player: player.map(PlayerId::from),
            detail: MoveDetail {
                from: mv.from.clone(),
                to: mv.to.clone(),
                promotion: mv.promotion_char(),
                piece,
                captured,
            },
        });
    }

    fn on_move_rejected(&mut self, kind: RejectionKind, detail: Option<String>) {
        match self.in_flight.get() {
            Some(pending) => {
                warn!(
                    "[RECONCILE] {} {:?} ({:?}); rolling back",
                    pending.request,
                    MoveLifecycle::Rejected,
                    kind
                );
            }
            None => debug!("[RECONCILE] {:?} with no move in flight", kind),
        }
        self.discard_speculation();
        self.notify(SessionNotice::MoveRejected { kind, detail });
    }

    fn on_tile_flipped(&mut self, index: usize, tile: Option<&str>, player: Option<&str>) {
        let Some(current) = self.board.current_tiles().get(index) else {
            warn!("[RECONCILE] tile_flipped for out-of-range tile {}", index);
            return;
        };
        let value = tile.map(TileCode::new).unwrap_or_else(|| current.value.clone());

        let tiles = self.board.current_tiles().with_face_up(index, Some(value.clone()));
        if tiles.revealed_unmatched().len() > 2 {
            warn!("[RECONCILE] Server revealed a third unmatched tile ({})", index);
        }
        self.board.replace_tiles(tiles);
        self.history.record(HistoryEntry::Flip {
            player: player.map(PlayerId::from),
            index,
            tile: Some(value),
        });
    }

    fn on_select_piece(&mut self, code: &str) {
        if self.phase() != GamePhase::Playing {
            warn!("[SELECTION] select_piece({}) ignored while {}", code, self.phase());
            return;
        }
        let Some(mode) = SelectionMode::from_code(code) else {
            warn!("[SELECTION] select_piece with unknown code {:?}", code);
            return;
        };
        info!("[SELECTION] Choose a piece to destroy: {}", mode);
        self.selection = mode;
        self.notify(SessionNotice::SelectPiece { mode });
    }

    fn on_square_cleared(&mut self, square: &str, piece: Option<String>, player: Option<&str>) {
        let cleared = parse_square(square).and_then(|sq| {
            let confirmed = self.confirmed.without_piece(sq)?;
            Ok((sq, confirmed))
        });

        match cleared {
            Ok((sq, confirmed)) => {
                let displayed = if self.in_flight.is_pending() {
                    self.board
                        .current_position()
                        .without_piece(sq)
                        .unwrap_or_else(|_| confirmed.clone())
                } else {
                    confirmed.clone()
                };
                self.confirmed = confirmed;
                self.board.replace_position(displayed);
            }
            Err(e) => {
                warn!("[RECONCILE] square_cleared({}) does not fit the local position: {}", square, e);
                self.emit(OutboundEvent::GetChessBoard);
                self.notify(SessionNotice::BoardDiverged {
                    reason: e.to_string(),
                });
            }
        }

        self.selection = SelectionMode::None;
        self.history.record(HistoryEntry::Destroy {
            player: player.map(PlayerId::from),
            square: square.to_string(),
            piece: piece.clone(),
        });
        self.notify(SessionNotice::PieceDestroyed {
            square: square.to_string(),
            piece,
        });
    }

    fn on_clear_failed(&mut self) {
        info!("[SELECTION] Server refused the removal; selection {} stays open", self.selection);
        self.notify(SessionNotice::ClearFailed);
    }

    fn on_tiles_matched(&mut self, matched: &MatchedTiles, player: Option<&str>) {
        let tiles = self.board.current_tiles().with_matched(&matched.matches);
        self.board.replace_tiles(tiles);
        self.flips.clear();
        self.history.record(HistoryEntry::Match {
            player: player.map(PlayerId::from),
            tile: TileCode::new(matched.tile.as_str()),
            indices: matched.matches.clone(),
        });
    }

    fn on_unflip_tiles(&mut self, indices: &[usize]) {
        let tiles = self.board.current_tiles().with_face_down(indices);
        self.board.replace_tiles(tiles);
        self.flips.indices.retain(|i| !indices.contains(i));
        if self.flips.indices.len() < 2 {
            self.flips.match_countdown = None;
        }
    }

    fn on_remove_tiles(&mut self, indices: &[usize]) {
        let tiles = self.board.current_tiles().with_removed(indices);
        self.board.replace_tiles(tiles);
    }

    fn on_upgrade_tiles(&mut self, upgrades: &[TileUpgrade]) {
        let changes: Vec<(usize, TileCode)> = upgrades
            .iter()
            .map(|u| (u.index, TileCode::new(u.value.as_str())))
            .collect();
        let tiles = self.board.current_tiles().with_values(&changes);
        self.board.replace_tiles(tiles);
    }

    fn on_game_reset(&mut self) {
        info!("[RECONCILE] Game reset");
        self.in_flight.take();
        self.move_spent = false;
        self.confirmed = ChessPosition::initial();
        self.board.replace_position(ChessPosition::initial());
        self.board.replace_tiles(MemoryTiles::default());
        self.selection = SelectionMode::None;
        self.flips.clear();
        self.history.clear();
        self.outcome = None;
        self.turn.clear();
        self.clocks.reset();

        let entered_ready = self.apply_phase(PhaseTrigger::Reset);
        match self.phase() {
            GamePhase::Ready if !entered_ready => self.request_full_sync(),
            GamePhase::Waiting if self.room_kind.is_timed() => {
                self.emit(OutboundEvent::GetPlayerTimes)
            }
            _ => {}
        }
    }

    fn on_opponent_disconnected(&mut self) {
        info!("[RECONCILE] Opponent disconnected");
        self.discard_speculation();
        self.selection = SelectionMode::None;
        self.flips.clear();
        self.apply_phase(PhaseTrigger::OpponentDisconnected);
        self.notify(SessionNotice::OpponentDisconnected);
        self.emit(OutboundEvent::PlayerInfo);
    }

    fn on_game_ended(&mut self, reason: EndReason, info: Option<GameOverInfo>) {
        if self.phase() != GamePhase::Playing {
            warn!("[PHASE] {:?} ignored while {}", reason, self.phase());
            return;
        }
        self.discard_speculation();
        self.flips.clear();
        self.apply_phase(PhaseTrigger::Terminal);

        let outcome = GameOutcome::new(reason, info);
        info!("[PHASE] Game over: {}", outcome.message());
        self.outcome = Some(outcome.clone());
        self.notify(SessionNotice::GameOver { outcome });
    }

    fn on_player_times(&mut self, times: [u32; 2]) {
        if self.room_kind.is_timed() {
            debug!("[CLOCK] Server clocks {:?}", times);
            self.clocks.overwrite(times);
        }
    }

    fn on_room_full(&mut self, state: &str) {
        let in_progress = state.eq_ignore_ascii_case("playing");
        self.apply_phase(PhaseTrigger::RoomFull { in_progress });
    }

    fn on_room_joined(&mut self, room_id: &str, room_type: &str) {
        self.room_id = Some(room_id.to_string());
        self.room_kind = RoomKind::from_wire(room_type);
        self.clocks.set_enabled(self.room_kind.is_timed());
        info!("[NETWORK] Joined room {} ({:?})", room_id, self.room_kind);

        self.emit(OutboundEvent::PlayerInfo);
        if self.room_kind.is_timed() {
            self.emit(OutboundEvent::GetPlayerTimes);
        }
    }

    fn on_player_info(&mut self, info: PlayerInfo) {
        self.players.update(info);
    }

    fn on_chat(&mut self, message: &ChatMessage) {
        if message.chat.trim().is_empty() {
            debug!("[CHAT] Ignoring empty line from '{}'", message.author);
            return;
        }
        self.chat.record(ChatLine {
            author: PlayerId::from(message.author.as_str()),
            text: message.chat.clone(),
        });
        self.notify(SessionNotice::ChatReceived {
            author: message.author.clone(),
            text: message.chat.clone(),
        });
    }
}
