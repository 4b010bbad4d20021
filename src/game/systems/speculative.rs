//! Local actions
//!
//! Each action checks ownership and legality locally, then queues a request
//! for the server. Only `try_move` changes what is displayed before the
//! server answers; flips and piece selection wait for the server's event.

use crate::game::error::{GameError, GameResult};
use crate::game::events::SessionNotice;
use crate::game::resources::{
    parse_square, GamePhase, MoveRequest, PendingMove, SelectionMode, TILE_COUNT,
};
use crate::game::session::GameSession;
use crate::game::types::PieceKind;
use bevy::prelude::*;
use shared::OutboundEvent;

impl GameSession {
    /// Play a chess move optimistically and send it to the server.
    ///
    /// The displayed board changes at once. The server's `piece_moved`
    /// confirms it; any rejection rolls back to the position before the move.
    pub fn try_move(&mut self, from: &str, to: &str, promotion: Option<char>) -> GameResult<()> {
        self.ensure_turn()?;
        if self.in_flight.is_pending() {
            return Err(GameError::MoveInFlight);
        }
        if self.move_spent {
            return Err(GameError::MoveAlreadySent);
        }

        let request = MoveRequest::parse(from, to, promotion)?;
        let snapshot = self.board.current_position().clone();
        let expected = match snapshot.apply_move(&request, self.promotion) {
            Ok(next) => next,
            Err(e) => {
                debug!("[SPECULATIVE] {} refused locally: {}", request, e);
                self.notify(SessionNotice::LocalMoveRefused {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        self.board.replace_position(expected.clone());
        self.in_flight.request(PendingMove {
            request,
            snapshot,
            expected,
        });
        self.move_spent = true;
        if self.selection.is_active() {
            self.selection = SelectionMode::None;
        }
        info!("[SPECULATIVE] Sent {} ahead of confirmation", request);
        self.emit(OutboundEvent::MovePiece(request.to_payload()));
        Ok(())
    }

    /// Choose the piece to destroy while a selection mode is open.
    ///
    /// Nothing changes locally; the server answers with `square_cleared` or
    /// `clear_failed`.
    pub fn try_select_piece(&mut self, square: &str) -> GameResult<()> {
        if !self.selection.is_active() {
            return Err(GameError::NoSelectionMode);
        }
        let phase = self.phase();
        if phase != GamePhase::Playing {
            return Err(GameError::WrongPhase { phase });
        }

        let sq = parse_square(square)?;
        let piece = self
            .board
            .current_position()
            .piece_at(sq)
            .ok_or_else(|| GameError::NoPieceAt(sq.to_string()))?;
        if !self.selection.accepts(piece) {
            debug!(
                "[SELECTION] {} on {} does not satisfy {}",
                PieceKind::from(piece),
                sq,
                self.selection
            );
            return Err(GameError::TargetMismatch {
                square: sq.to_string(),
                mode: self.selection.to_string(),
            });
        }

        info!("[SELECTION] Requesting removal of {}", sq);
        self.emit(OutboundEvent::ClearSquare {
            square: sq.to_string(),
        });
        Ok(())
    }

    /// Flip a memory tile.
    ///
    /// Allowed while Ready (the first flip starts the game) or on the local
    /// player's turn. The tile turns over when the server echoes
    /// `tile_flipped`. After the second flip `match_tiles` is sent once the
    /// configured delay has passed.
    pub fn try_flip_tile(&mut self, index: usize) -> GameResult<()> {
        match self.phase() {
            GamePhase::Ready => {}
            GamePhase::Playing => {
                if !self.holds_token() {
                    return Err(GameError::NotYourTurn);
                }
                if self.move_spent {
                    return Err(GameError::MoveAlreadySent);
                }
            }
            phase => return Err(GameError::WrongPhase { phase }),
        }

        if self.flips.indices.len() >= 2 {
            return Err(GameError::FlipLimit);
        }
        let flippable = index < TILE_COUNT
            && !self.flips.indices.contains(&index)
            && self
                .board
                .current_tiles()
                .get(index)
                .is_some_and(|tile| tile.is_flippable());
        if !flippable {
            return Err(GameError::TileUnavailable { index });
        }

        self.flips.indices.push(index);
        self.emit(OutboundEvent::FlipTile { index });
        if self.flips.indices.len() == 2 {
            let delay = self.settings.match_delay_ticks;
            if delay == 0 {
                self.emit(OutboundEvent::MatchTiles);
            } else {
                self.flips.match_countdown = Some(delay);
            }
        }
        Ok(())
    }

    fn ensure_turn(&self) -> GameResult<()> {
        let phase = self.phase();
        if phase != GamePhase::Playing {
            return Err(GameError::WrongPhase { phase });
        }
        if !self.holds_token() {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }
}
