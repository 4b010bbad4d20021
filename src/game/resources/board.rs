//! Dual-board model
//!
//! The chess position and the 64 memory tiles the client currently displays.
//! Both halves are only ever replaced wholesale; helpers on [`MemoryTiles`]
//! build the next value instead of editing tiles in place.

use super::position::ChessPosition;
use crate::game::types::TileCode;

/// Number of tiles on the memory board
pub const TILE_COUNT: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryTile {
    pub value: TileCode,
    pub face_up: bool,
}

impl MemoryTile {
    pub fn hidden(value: TileCode) -> Self {
        Self {
            value,
            face_up: false,
        }
    }

    /// Removed tiles and face-up tiles cannot be flipped
    pub fn is_flippable(&self) -> bool {
        !self.face_up && !self.value.is_removed()
    }
}

/// The 64 memory tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTiles(Vec<MemoryTile>);

impl Default for MemoryTiles {
    /// An empty board until the server sends the real one
    fn default() -> Self {
        Self(vec![MemoryTile::default(); TILE_COUNT])
    }
}

impl MemoryTiles {
    /// Build a face-down board from server codes. Missing entries stay empty and
    /// extra entries are ignored.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut tiles = Self::default();
        for (tile, code) in tiles.0.iter_mut().zip(codes) {
            tile.value = TileCode::new(code.as_ref());
        }
        tiles
    }

    pub fn get(&self, index: usize) -> Option<&MemoryTile> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryTile> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tiles showing their face that are still in play
    pub fn revealed_unmatched(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, t)| t.face_up && !t.value.is_removed())
            .map(|(i, _)| i)
            .collect()
    }

    /// Turn one tile face up, optionally learning its value
    pub fn with_face_up(&self, index: usize, value: Option<TileCode>) -> Self {
        let mut next = self.clone();
        if let Some(tile) = next.0.get_mut(index) {
            tile.face_up = true;
            if let Some(value) = value {
                tile.value = value;
            }
        }
        next
    }

    pub fn with_face_down(&self, indices: &[usize]) -> Self {
        let mut next = self.clone();
        for &index in indices {
            if let Some(tile) = next.0.get_mut(index) {
                tile.face_up = false;
            }
        }
        next
    }

    pub fn all_face_down(&self) -> Self {
        let mut next = self.clone();
        for tile in next.0.iter_mut() {
            tile.face_up = false;
        }
        next
    }

    /// Take tiles out of play without touching which way they face
    pub fn with_removed(&self, indices: &[usize]) -> Self {
        let mut next = self.clone();
        for &index in indices {
            if let Some(tile) = next.0.get_mut(index) {
                tile.value = TileCode::removed();
            }
        }
        next
    }

    /// Resolve a matched pair: the tiles leave play but stay face up,
    /// showing an empty slot
    pub fn with_matched(&self, indices: &[usize]) -> Self {
        let mut next = self.clone();
        for &index in indices {
            if let Some(tile) = next.0.get_mut(index) {
                tile.value = TileCode::removed();
                tile.face_up = true;
            }
        }
        next
    }

    pub fn with_values(&self, changes: &[(usize, TileCode)]) -> Self {
        let mut next = self.clone();
        for (index, value) in changes {
            if let Some(tile) = next.0.get_mut(*index) {
                tile.value = value.clone();
            }
        }
        next
    }
}

/// What the client shows: one chess position and one memory board
#[derive(Debug, Clone, Default)]
pub struct BoardModel {
    position: ChessPosition,
    tiles: MemoryTiles,
}

impl BoardModel {
    pub fn current_position(&self) -> &ChessPosition {
        &self.position
    }

    pub fn current_tiles(&self) -> &MemoryTiles {
        &self.tiles
    }

    pub fn replace_position(&mut self, position: ChessPosition) {
        self.position = position;
    }

    pub fn replace_tiles(&mut self, tiles: MemoryTiles) {
        self.tiles = tiles;
    }
}
