//! Chess position and move legality
//!
//! [`ChessPosition`] wraps a [`shakmaty::Chess`] and is treated as an immutable
//! value: applying a move or removing a piece returns a new position and leaves
//! the original untouched. The session keeps a confirmed copy next to the
//! displayed one, and a rejected move rolls back by swapping copies.
//!
//! The oracle here is advisory. A move it accepts can still be rejected by
//! the server, and a move the server confirms is always applied.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{role_char, role_from_char, PieceKind};
use shakmaty::fen::Fen;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, FromSetup, Move, Piece, Position,
    PositionError, Role, Square,
};
use shared::MovePayload;
use std::fmt;

/// Fields appended when the server sends a placement-only FEN
const FEN_DEFAULT_FIELDS: [&str; 5] = ["w", "KQkq", "-", "0", "1"];

/// Immutable chess position
#[derive(Clone)]
pub struct ChessPosition {
    chess: Chess,
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self {
            chess: Chess::default(),
        }
    }
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChessPosition").field(&self.fen()).finish()
    }
}

impl PartialEq for ChessPosition {
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen()
    }
}

impl ChessPosition {
    /// Standard starting position
    pub fn initial() -> Self {
        Self::default()
    }

    /// Parse a FEN string.
    ///
    /// Missing trailing fields are filled with defaults, and castling rights or
    /// en passant squares that do not fit the placement are dropped rather than
    /// treated as errors.
    pub fn from_fen(text: &str) -> GameResult<Self> {
        let completed = complete_fen(text);
        let fen: Fen = completed.parse().map_err(|e| GameError::InvalidFen {
            message: format!("{e}: {text}"),
        })?;
        let chess = fen
            .into_position::<Chess>(CastlingMode::Standard)
            .or_else(tolerate_setup_errors)
            .map_err(|e| GameError::InvalidFen {
                message: format!("{e}: {text}"),
            })?;
        Ok(Self { chess })
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.chess, EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.chess.turn()
    }

    pub fn is_check(&self) -> bool {
        self.chess.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.chess.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.chess.is_stalemate()
    }

    /// Square of the king in check, derived from the position
    pub fn checked_king(&self) -> Option<Square> {
        if self.chess.is_check() {
            self.chess.board().king_of(self.chess.turn())
        } else {
            None
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.chess.board().piece_at(square)
    }

    /// Every occupied square with its piece
    pub fn pieces(&self) -> Vec<(Square, Piece)> {
        let board = self.chess.board();
        board
            .occupied()
            .into_iter()
            .filter_map(|sq| board.piece_at(sq).map(|piece| (sq, piece)))
            .collect()
    }

    /// Return the position after `request`, or an error if no legal move matches.
    ///
    /// A promotion that the request leaves open resolves to `default_promotion`.
    pub fn apply_move(&self, request: &MoveRequest, default_promotion: Role) -> GameResult<Self> {
        let wanted_promotion = request.promotion.unwrap_or(default_promotion);
        let chosen = self.chess.legal_moves().into_iter().find(|m| {
            m.from() == Some(request.from)
                && (landing_square(m) == request.to || m.to() == request.to)
                && m.promotion().is_none_or(|role| role == wanted_promotion)
        });

        let Some(mv) = chosen else {
            return Err(GameError::IllegalMove {
                message: format!("{} is not legal in {}", request, self.fen()),
            });
        };

        let mut next = self.chess.clone();
        next.play_unchecked(mv);
        Ok(Self { chess: next })
    }

    /// Return the position with the piece on `square` taken off the board.
    pub fn without_piece(&self, square: Square) -> GameResult<Self> {
        let mut setup = self.chess.to_setup(EnPassantMode::Legal);
        if setup.board.remove_piece_at(square).is_none() {
            return Err(GameError::NoPieceAt(square.to_string()));
        }
        let chess = Chess::from_setup(setup, CastlingMode::Standard)
            .or_else(tolerate_setup_errors)
            .map_err(|e| GameError::InvalidFen {
                message: e.to_string(),
            })?;
        Ok(Self { chess })
    }

    /// Squares holding a piece of `kind`
    pub fn squares_with(&self, kind: PieceKind) -> Vec<Square> {
        self.pieces()
            .into_iter()
            .filter(|(_, piece)| kind.matches(*piece))
            .map(|(sq, _)| sq)
            .collect()
    }
}

/// A locally requested move in square coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl MoveRequest {
    pub fn parse(from: &str, to: &str, promotion: Option<char>) -> GameResult<Self> {
        let promotion = match promotion {
            Some(c) => Some(
                role_from_char(c)
                    .filter(|role| !matches!(role, Role::Pawn | Role::King))
                    .ok_or_else(|| GameError::IllegalMove {
                        message: format!("cannot promote to '{c}'"),
                    })?,
            ),
            None => None,
        };
        Ok(Self {
            from: parse_square(from)?,
            to: parse_square(to)?,
            promotion,
        })
    }

    pub fn from_payload(payload: &MovePayload) -> GameResult<Self> {
        Self::parse(&payload.from, &payload.to, payload.promotion_char())
    }

    pub fn to_payload(&self) -> MovePayload {
        MovePayload::new(
            self.from.to_string(),
            self.to.to_string(),
            self.promotion.map(role_char),
        )
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role_char(role))?;
        }
        Ok(())
    }
}

pub fn parse_square(text: &str) -> GameResult<Square> {
    text.trim()
        .to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| GameError::InvalidSquare(text.to_string()))
}

/// Castling is stored king-takes-rook; players click the king's destination.
fn landing_square(m: &Move) -> Square {
    match *m {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Square::from_coords(file, king.rank())
        }
        _ => m.to(),
    }
}

fn tolerate_setup_errors(err: PositionError<Chess>) -> Result<Chess, PositionError<Chess>> {
    err.ignore_invalid_castling_rights()
        .or_else(PositionError::ignore_invalid_ep_square)
        .or_else(PositionError::ignore_impossible_check)
}

fn complete_fen(text: &str) -> String {
    let mut fields: Vec<&str> = text.split_whitespace().collect();
    let present = fields.len().clamp(1, FEN_DEFAULT_FIELDS.len() + 1);
    fields.extend_from_slice(&FEN_DEFAULT_FIELDS[present - 1..]);
    fields.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(from: &str, to: &str) -> MoveRequest {
        MoveRequest::parse(from, to, None).expect("valid squares")
    }

    #[test]
    fn test_apply_move_returns_new_position() {
        let start = ChessPosition::initial();
        let next = start.apply_move(&mv("e2", "e4"), Role::Queen).unwrap();

        assert_eq!(start, ChessPosition::initial(), "original must not change");
        assert_eq!(
            next.piece_at(Square::E4),
            Some(Piece { color: Color::White, role: Role::Pawn })
        );
        assert_eq!(next.turn(), Color::Black);
    }

    #[test]
    fn test_illegal_move_is_refused() {
        let start = ChessPosition::initial();
        let err = start.apply_move(&mv("e2", "e5"), Role::Queen).unwrap_err();
        assert!(matches!(err, GameError::IllegalMove { .. }));
    }

    #[test]
    fn test_placement_only_fen_is_completed() {
        let pos = ChessPosition::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        assert_eq!(pos, ChessPosition::initial());
    }

    #[test]
    fn test_garbage_fen_is_refused() {
        assert!(matches!(
            ChessPosition::from_fen("not a fen"),
            Err(GameError::InvalidFen { .. })
        ));
    }

    #[test]
    fn test_checked_king_is_derived() {
        // Fool's mate
        let pos =
            ChessPosition::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(pos.is_check());
        assert!(pos.is_checkmate());
        assert_eq!(pos.checked_king(), Some(Square::E1));
        assert_eq!(ChessPosition::initial().checked_king(), None);
    }

    #[test]
    fn test_castling_by_king_destination() {
        let pos = ChessPosition::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castled = pos.apply_move(&mv("e1", "g1"), Role::Queen).unwrap();
        assert_eq!(
            castled.piece_at(Square::G1),
            Some(Piece { color: Color::White, role: Role::King })
        );
        assert_eq!(
            castled.piece_at(Square::F1),
            Some(Piece { color: Color::White, role: Role::Rook })
        );
    }

    #[test]
    fn test_promotion_defaults_to_requested_role() {
        let pos = ChessPosition::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let queen = pos.apply_move(&mv("a7", "a8"), Role::Queen).unwrap();
        assert_eq!(queen.piece_at(Square::A8).map(|p| p.role), Some(Role::Queen));

        let knight = pos
            .apply_move(&MoveRequest::parse("a7", "a8", Some('n')).unwrap(), Role::Queen)
            .unwrap();
        assert_eq!(knight.piece_at(Square::A8).map(|p| p.role), Some(Role::Knight));
    }

    #[test]
    fn test_without_piece_removes_only_that_square() {
        let start = ChessPosition::initial();
        let cleared = start.without_piece(Square::B8).unwrap();
        assert_eq!(cleared.piece_at(Square::B8), None);
        assert_eq!(cleared.pieces().len(), 31);
        assert_eq!(start.pieces().len(), 32);

        assert_eq!(
            cleared.without_piece(Square::B8),
            Err(GameError::NoPieceAt("b8".to_string()))
        );
    }

    #[test]
    fn test_fen_written_after_move_and_removal() {
        assert_eq!(
            ChessPosition::initial().fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );

        let moved = ChessPosition::initial()
            .apply_move(&mv("e2", "e4"), Role::Queen)
            .unwrap();
        let cleared = moved.without_piece(Square::A8).unwrap();
        assert_eq!(cleared.turn(), Color::Black, "removal keeps the side to move");
        assert_eq!(
            cleared.fen(),
            "1nbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQk - 0 1"
        );
        assert_eq!(ChessPosition::from_fen(&cleared.fen()).unwrap(), cleared);
    }

    #[test]
    fn test_move_request_payload() {
        let request = MoveRequest::parse("E7", "e8", Some('Q')).unwrap();
        let payload = request.to_payload();
        assert_eq!(payload.from, "e7");
        assert_eq!(payload.to, "e8");
        assert_eq!(payload.promotion, "q");
        assert_eq!(MoveRequest::from_payload(&payload).unwrap(), request);
        assert!(MoveRequest::parse("z9", "e4", None).is_err());
        assert!(MoveRequest::parse("e7", "e8", Some('k')).is_err());
    }
}
