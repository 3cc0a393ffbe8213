//! Snapshot module - read-only view of a game for renderers and observers
//!
//! Filled by [`GameState::snapshot_into`](crate::game_state::GameState::snapshot_into),
//! which reuses the board buffer between frames.

use serde::{Deserialize, Serialize};

use crate::game_state::Piece;
use crate::types::{Cell, Phase};

/// Read-only view of the game for renderers.
///
/// `board` is row-major, `columns * rows` cells, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    pub board: Vec<Cell>,
    /// FNV-1a hash of `board` (one byte per cell: 0 or the opacity token);
    /// unchanged hash means unchanged locked grid
    pub board_hash: u64,
    pub active: Option<Piece>,
    pub next: Piece,
    pub score: u32,
    pub phase: Phase,
    /// Monotonic-clock deadline (ms) of the exit notice
    pub notice_active_until: Option<u64>,
    /// Number of starts and restarts so far
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Cell at (x, y); None if out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.columns as i32 || y >= self.rows as i32 {
            return None;
        }
        self.board
            .get(y as usize * self.columns as usize + x as usize)
            .copied()
    }

    pub fn notice_visible(&self, now_ms: u64) -> bool {
        self.notice_active_until.is_some_and(|until| now_ms < until)
    }
}
