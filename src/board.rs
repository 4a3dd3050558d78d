//! A player's physical board: the fleet and the cells it occupies.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::Mask;
use crate::common::{CellState, PlacementError};
use crate::config::BOARD_SIZE;
use crate::ship::{footprint, Orientation, Ship, ShipCode};

/// Square grid of cell states, row-major.
pub type Grid = [[CellState; BOARD_SIZE]; BOARD_SIZE];

/// Ships placed on an 8×8 grid. No two ships ever share a cell and every
/// ship lies fully inside the grid.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Board {
    ships: Vec<Ship>,
    occupied: Mask,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed ships, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, index: usize) -> Option<&Ship> {
        self.ships.get(index)
    }

    /// Damage segment `segment` of ship `index`. Returns `false` if the ship
    /// does not exist or the segment was already hit.
    pub fn hit_segment(&mut self, index: usize, segment: usize) -> bool {
        self.ships
            .get_mut(index)
            .is_some_and(|ship| ship.hit_segment(segment))
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Union of all ship footprints.
    pub fn occupancy(&self) -> Mask {
        self.occupied
    }

    /// Number of placed ships with `code`.
    pub fn count_code(&self, code: ShipCode) -> usize {
        self.ships.iter().filter(|s| s.code() == code).count()
    }

    /// `true` when the fleet is non-empty and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Whether a ship of `code` fits at (`row`, `col`) without leaving the grid
    /// or touching another ship.
    pub fn can_place(&self, code: ShipCode, row: usize, col: usize, orientation: Orientation) -> bool {
        self.check(None, code, row, col, orientation).is_ok()
    }

    /// Validates a target position, ignoring the cells of ship `skip`.
    fn check(
        &self,
        skip: Option<usize>,
        code: ShipCode,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Mask, PlacementError> {
        let mask = footprint(code, row, col, orientation).ok_or(PlacementError::OutOfBounds)?;
        let others = match skip {
            Some(i) => self
                .ships
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Mask::new(), |acc, (_, s)| acc | s.mask()),
            None => self.occupied,
        };
        if mask.intersects(&others) {
            return Err(PlacementError::Overlap);
        }
        Ok(mask)
    }

    /// Place a new undamaged ship. Returns its index in the fleet.
    pub fn place(
        &mut self,
        code: ShipCode,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<usize, PlacementError> {
        self.insert(Ship::new(code, orientation, row, col))
    }

    /// Adds an existing ship at its current position, keeping its damage.
    pub(crate) fn insert(&mut self, ship: Ship) -> Result<usize, PlacementError> {
        let (row, col) = ship.origin();
        let mask = self.check(None, ship.code(), row, col, ship.orientation())?;
        self.occupied |= mask;
        self.ships.push(ship);
        Ok(self.ships.len() - 1)
    }

    /// Move ship `index` to a new anchor. The new cells may overlap the
    /// ship's own current cells.
    pub fn relocate(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let code = self.ships.get(index).ok_or(PlacementError::ShipNotFound)?.code();
        self.check(Some(index), code, row, col, orientation)?;
        self.ships[index].set_position(row, col, orientation);
        self.recompute();
        Ok(())
    }

    /// Remove ship `index`, freeing its cells.
    pub fn remove(&mut self, index: usize) -> Result<Ship, PlacementError> {
        if index >= self.ships.len() {
            return Err(PlacementError::ShipNotFound);
        }
        let ship = self.ships.remove(index);
        self.recompute();
        Ok(ship)
    }

    /// Remove the first ship with `code`.
    pub fn remove_code(&mut self, code: ShipCode) -> Result<Ship, PlacementError> {
        let index = self
            .ships
            .iter()
            .position(|s| s.code() == code)
            .ok_or(PlacementError::ShipNotFound)?;
        self.remove(index)
    }

    /// Index of the ship covering (`row`, `col`).
    pub fn ship_at(&self, row: usize, col: usize) -> Option<usize> {
        if !self.occupied.contains(row, col) {
            return None;
        }
        self.ships.iter().position(|s| s.mask().contains(row, col))
    }

    /// Drop every ship.
    pub fn clear(&mut self) {
        self.ships.clear();
        self.occupied.clear_all();
    }

    /// Replace the whole fleet with `ships` as positioned. Callers guarantee
    /// the layout is legal.
    pub(crate) fn set_fleet(&mut self, ships: Vec<Ship>) {
        self.ships = ships;
        self.recompute();
        debug_assert_eq!(
            self.occupied.count_ones(),
            self.ships.iter().map(Ship::size).sum::<usize>(),
            "fleet layout overlaps"
        );
    }

    fn recompute(&mut self) {
        self.occupied = self.ships.iter().fold(Mask::new(), |acc, s| acc | s.mask());
    }

    /// Returns a random free (row, col, orientation) for a ship of `code`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        code: ShipCode,
        attempts: usize,
    ) -> Result<(usize, usize, Orientation), PlacementError> {
        random_anchor(rng, code, &self.occupied, attempts).ok_or(PlacementError::UnableToPlaceShip)
    }

    /// The owner's view of this board: undamaged segments as `Ship`, damaged
    /// ones as `Hit`, sunk ships as `Sunk`.
    pub fn cell_states(&self) -> Grid {
        let mut grid = [[CellState::Water; BOARD_SIZE]; BOARD_SIZE];
        for ship in &self.ships {
            for (i, (r, c)) in ship.cells().enumerate() {
                grid[r][c] = if ship.is_sunk() {
                    CellState::Sunk
                } else if ship.is_segment_hit(i) {
                    CellState::Hit
                } else {
                    CellState::Ship
                };
            }
        }
        grid
    }
}

/// Draws up to `attempts` random in-bounds anchors for `code` and returns the
/// first that does not touch `occupied`.
pub(crate) fn random_anchor<R: Rng + ?Sized>(
    rng: &mut R,
    code: ShipCode,
    occupied: &Mask,
    attempts: usize,
) -> Option<(usize, usize, Orientation)> {
    let len = code.size();
    for _ in 0..attempts {
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let max_r = if orient == Orientation::Vertical {
            BOARD_SIZE - len
        } else {
            BOARD_SIZE - 1
        };
        let max_c = if orient == Orientation::Horizontal {
            BOARD_SIZE - len
        } else {
            BOARD_SIZE - 1
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        if let Some(mask) = footprint(code, r, c, orient) {
            if !mask.intersects(occupied) {
                return Some((r, c, orient));
            }
        }
    }
    None
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupied: {:?},\n  ships: {:?}\n}}",
            self.occupied, self.ships
        )
    }
}
