//! Piece-selection mode opened by a memory match

use super::position::ChessPosition;
use crate::game::types::{is_wildcard_code, PieceKind};
use shakmaty::{Piece, Role, Square};
use std::fmt;

/// Which pieces the local player may remove after a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    None,
    /// Any piece of exactly this kind
    TargetKind(PieceKind),
    /// Any piece that is not a king, from a wildcard pair
    AnyExceptKing,
}

impl SelectionMode {
    /// Mode requested by a `select_piece` code; `None` for codes that name no piece
    pub fn from_code(code: &str) -> Option<Self> {
        if is_wildcard_code(code) {
            return Some(SelectionMode::AnyExceptKing);
        }
        PieceKind::from_code(code).map(SelectionMode::TargetKind)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SelectionMode::None)
    }

    pub fn accepts(&self, piece: Piece) -> bool {
        match self {
            SelectionMode::None => false,
            SelectionMode::TargetKind(kind) => kind.matches(piece),
            SelectionMode::AnyExceptKing => piece.role != Role::King,
        }
    }

    /// Squares the player could click right now
    pub fn highlighted_squares(&self, position: &ChessPosition) -> Vec<Square> {
        if !self.is_active() {
            return Vec::new();
        }
        position
            .pieces()
            .into_iter()
            .filter(|(_, piece)| self.accepts(*piece))
            .map(|(sq, _)| sq)
            .collect()
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::None => f.write_str("none"),
            SelectionMode::TargetKind(kind) => write!(f, "{kind}"),
            SelectionMode::AnyExceptKing => f.write_str("any piece but a king"),
        }
    }
}
