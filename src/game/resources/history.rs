//! History log
//!
//! Append-only record of what happened on both boards, built purely from
//! server events. It is kept separate from the board model: the log can run
//! ahead of or behind the displayed position for a moment, and nothing reads
//! board state out of it.

use crate::game::types::{PieceKind, PlayerId, TileCode};
use serde::Serialize;

/// Which board an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardKind {
    Chess,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDetail {
    pub from: String,
    pub to: String,
    pub promotion: Option<char>,
    pub piece: Option<String>,
    pub captured: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HistoryEntry {
    Flip {
        player: Option<PlayerId>,
        index: usize,
        tile: Option<TileCode>,
    },
    Match {
        player: Option<PlayerId>,
        tile: TileCode,
        indices: Vec<usize>,
    },
    Move {
        player: Option<PlayerId>,
        detail: MoveDetail,
    },
    Destroy {
        player: Option<PlayerId>,
        square: String,
        piece: Option<String>,
    },
    /// Turn boundary
    Divider { player: PlayerId },
}

impl HistoryEntry {
    pub fn board(&self) -> BoardKind {
        match self {
            HistoryEntry::Flip { .. } | HistoryEntry::Match { .. } | HistoryEntry::Divider { .. } => {
                BoardKind::Memory
            }
            HistoryEntry::Move { .. } | HistoryEntry::Destroy { .. } => BoardKind::Chess,
        }
    }

    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            HistoryEntry::Flip { player, .. }
            | HistoryEntry::Match { player, .. }
            | HistoryEntry::Move { player, .. }
            | HistoryEntry::Destroy { player, .. } => player.as_ref(),
            HistoryEntry::Divider { player } => Some(player),
        }
    }

    /// One-line text for a log panel
    pub fn summary(&self) -> String {
        match self {
            HistoryEntry::Flip { index, tile, .. } => match tile {
                Some(tile) => format!("flipped tile {index} ({})", describe_tile(tile)),
                None => format!("flipped tile {index}"),
            },
            HistoryEntry::Match { tile, .. } => format!("matched {}", describe_tile(tile)),
            HistoryEntry::Move { detail, .. } => {
                let mut text = format!("{} -> {}", detail.from, detail.to);
                if let Some(captured) = &detail.captured {
                    text.push_str(&format!(" x{captured}"));
                }
                if let Some(promotion) = detail.promotion {
                    text.push_str(&format!(" ={promotion}"));
                }
                text
            }
            HistoryEntry::Destroy { square, piece, .. } => match piece {
                Some(piece) => format!("destroyed {piece} on {square}"),
                None => format!("destroyed piece on {square}"),
            },
            HistoryEntry::Divider { player } => format!("turn: {player}"),
        }
    }
}

fn describe_tile(tile: &TileCode) -> String {
    if tile.is_wildcard() {
        return "wildcard".to_string();
    }
    tile.kind()
        .map(|kind: PieceKind| kind.code())
        .unwrap_or_else(|| tile.to_string())
}

#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Newest first, the order a log panel shows
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
