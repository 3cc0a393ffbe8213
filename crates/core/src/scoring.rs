//! Scoring module - line clear points
//!
//! Score is a flat lookup: `table[cleared]` points per lock, with no level
//! multiplier, combo or back-to-back bonus. The default table is
//! `[0, 100, 300, 500, 800]`. A lock touches at most four rows, so entries past
//! index 4 are never reached with the default shapes; anything beyond the end
//! of the table is worth nothing.

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_SCORE_TABLE;

/// Points awarded per number of simultaneously cleared rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(Vec<u32>);

impl ScoreTable {
    pub fn new(points: Vec<u32>) -> Self {
        Self(points)
    }

    /// Points for clearing `lines` rows at once
    pub fn points_for(&self, lines: usize) -> u32 {
        self.0.get(lines).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self(DEFAULT_SCORE_TABLE.to_vec())
    }
}

/// Apply a line clear to a running score, saturating at `u32::MAX`
pub fn apply_line_clear(score: u32, table: &ScoreTable, lines: usize) -> u32 {
    score.saturating_add(table.points_for(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_scores() {
        let table = ScoreTable::default();
        assert_eq!(table.points_for(0), 0);
        assert_eq!(table.points_for(1), 100);
        assert_eq!(table.points_for(2), 300);
        assert_eq!(table.points_for(3), 500);
        assert_eq!(table.points_for(4), 800);
    }

    #[test]
    fn test_beyond_table_is_worth_nothing() {
        let table = ScoreTable::default();
        assert_eq!(table.points_for(5), 0);
        assert_eq!(ScoreTable::new(vec![0, 10]).points_for(2), 0);
    }

    #[test]
    fn test_apply_line_clear_saturates() {
        let table = ScoreTable::default();
        assert_eq!(apply_line_clear(250, &table, 2), 550);
        assert_eq!(apply_line_clear(u32::MAX - 1, &table, 1), u32::MAX);
    }
}
