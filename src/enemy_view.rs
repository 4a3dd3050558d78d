//! Fog-of-war knowledge a shooter has of the opposing fleet.

use crate::bitboard::Mask;
use crate::board::Grid;
use crate::common::CellState;
use crate::config::BOARD_SIZE;

/// 8×8 grid of what the shooter has learned. Only `Miss`, `Hit` and `Sunk`
/// are ever written; a `Sunk` cell is never overwritten until the view is
/// reset for a new match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyView {
    cells: Grid,
}

impl Default for EnemyView {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyView {
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Water; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// State at (`row`, `col`); out-of-grid cells read as `Water`.
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(CellState::Water)
    }

    /// Writes `state` unless the cell already reads `Sunk`. Returns whether the
    /// cell changed.
    pub fn mark(&mut self, row: usize, col: usize, state: CellState) -> bool {
        if state == CellState::Ship {
            return false;
        }
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if *cell != CellState::Sunk && *cell != state => {
                *cell = state;
                true
            }
            _ => false,
        }
    }

    /// Cells currently reading `Sunk`.
    pub fn sunk_cells(&self) -> Mask {
        Mask::from_fn(|r, c| self.cells[r][c] == CellState::Sunk)
    }

    /// Forget everything except the cells in `keep_sunk`, which read `Sunk`
    /// afterwards.
    pub(crate) fn clear_except(&mut self, keep_sunk: &Mask) {
        for (r, row) in self.cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = if keep_sunk.contains(r, c) {
                    CellState::Sunk
                } else {
                    CellState::Water
                };
            }
        }
    }

    /// Back to all `Water`, for a new match.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Copy of the grid.
    pub fn cells(&self) -> Grid {
        self.cells
    }
}
