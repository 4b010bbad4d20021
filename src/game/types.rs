//! Type definitions shared by the session core
//!
//! Newtypes for the identifiers and codes the server speaks in, so raw strings
//! from the wire never get mixed up inside the core.

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Piece, Role};
use std::fmt;

/// Socket identifier of a player, as assigned by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        PlayerId(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        PlayerId(value)
    }
}

/// A colored chess piece kind, written on the wire as two letters (`wp`, `bq`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceKind {
    pub color: Color,
    pub role: Role,
}

impl PieceKind {
    pub fn new(color: Color, role: Role) -> Self {
        Self { color, role }
    }

    /// Parse a piece code. Case is ignored so both tiles of a pair map to the same kind.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = match chars.next()?.to_ascii_lowercase() {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return None,
        };
        let role = role_from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { color, role })
    }

    pub fn code(&self) -> String {
        let color = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{}{}", color, role_char(self.role))
    }

    pub fn matches(&self, piece: Piece) -> bool {
        piece.color == self.color && piece.role == self.role
    }
}

impl From<Piece> for PieceKind {
    fn from(piece: Piece) -> Self {
        Self {
            color: piece.color,
            role: piece.role,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

pub fn role_from_char(c: char) -> Option<Role> {
    match c.to_ascii_lowercase() {
        'p' => Some(Role::Pawn),
        'n' => Some(Role::Knight),
        'b' => Some(Role::Bishop),
        'r' => Some(Role::Rook),
        'q' => Some(Role::Queen),
        'k' => Some(Role::King),
        _ => None,
    }
}

pub fn role_char(role: Role) -> char {
    match role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    }
}

/// Code printed on one memory tile
///
/// Lowercase codes are the first tile of a pair, uppercase the second.
/// `x`/`X` are wildcards; the empty code marks a tile removed from play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCode(pub String);

impl TileCode {
    pub fn new(code: impl Into<String>) -> Self {
        TileCode(code.into())
    }

    pub fn removed() -> Self {
        TileCode(String::new())
    }

    pub fn is_removed(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_wildcard(&self) -> bool {
        is_wildcard_code(&self.0)
    }

    /// Piece kind pictured on the tile, `None` for wildcards and removed tiles
    pub fn kind(&self) -> Option<PieceKind> {
        PieceKind::from_code(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_wildcard_code(code: &str) -> bool {
    code.eq_ignore_ascii_case("x") || code.eq_ignore_ascii_case("wildcard")
}

/// Room flavour announced when joining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomKind {
    #[default]
    Casual,
    Timed,
}

impl RoomKind {
    /// The server sends `casual` or a timed descriptor such as `timed` / `Timed(300)`
    pub fn from_wire(room_type: &str) -> Self {
        if room_type.trim().to_ascii_lowercase().starts_with("timed") {
            RoomKind::Timed
        } else {
            RoomKind::Casual
        }
    }

    pub fn is_timed(self) -> bool {
        matches!(self, RoomKind::Timed)
    }
}
