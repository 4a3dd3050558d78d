//! Ship codes, orientation and per-segment damage.
//!
//! Damage is tracked by segment index, never by grid cell: moving a ship
//! keeps exactly the same wounds, only the mapping from segment to cell
//! changes.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::Mask;
use crate::config::BOARD_SIZE;

/// Ship type. The size is fixed by the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipCode {
    /// Aircraft carrier, 5 cells.
    PA,
    /// Battleship, 4 cells.
    AZ,
    /// Submarine, 3 cells.
    SM,
    /// Destroyer, 2 cells.
    DT,
}

impl ShipCode {
    pub const fn size(self) -> usize {
        match self {
            ShipCode::PA => 5,
            ShipCode::AZ => 4,
            ShipCode::SM => 3,
            ShipCode::DT => 2,
        }
    }

    /// Two-letter code.
    pub const fn as_str(self) -> &'static str {
        match self {
            ShipCode::PA => "PA",
            ShipCode::AZ => "AZ",
            ShipCode::SM => "SM",
            ShipCode::DT => "DT",
        }
    }

    /// Full display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipCode::PA => "PORTAVIONES",
            ShipCode::AZ => "ACORAZADO",
            ShipCode::SM => "SUBMARINO",
            ShipCode::DT => "DESTRUCTOR",
        }
    }
}

impl fmt::Display for ShipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four ship codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownShipCode;

impl fmt::Display for UnknownShipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown ship code (expected PA, AZ, SM or DT)")
    }
}

impl FromStr for ShipCode {
    type Err = UnknownShipCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            c if c.eq_ignore_ascii_case("PA") => Ok(ShipCode::PA),
            c if c.eq_ignore_ascii_case("AZ") => Ok(ShipCode::AZ),
            c if c.eq_ignore_ascii_case("SM") => Ok(ShipCode::SM),
            c if c.eq_ignore_ascii_case("DT") => Ok(ShipCode::DT),
            _ => Err(UnknownShipCode),
        }
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Vertical, Orientation::Horizontal];

    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Cell of segment `index` for a ship whose first segment sits at
    /// (`row`, `col`).
    #[inline]
    pub fn step(self, row: usize, col: usize, index: usize) -> (usize, usize) {
        match self {
            Orientation::Vertical => (row.saturating_add(index), col),
            Orientation::Horizontal => (row, col.saturating_add(index)),
        }
    }
}

/// Cells covered by a ship of `code` anchored at (`row`, `col`), or `None`
/// when any segment would fall outside the grid.
pub fn footprint(code: ShipCode, row: usize, col: usize, orientation: Orientation) -> Option<Mask> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return None;
    }
    let room = match orientation {
        Orientation::Vertical => BOARD_SIZE - row,
        Orientation::Horizontal => BOARD_SIZE - col,
    };
    if code.size() > room {
        return None;
    }
    Mask::from_cells((0..code.size()).map(|i| orientation.step(row, col, i))).ok()
}

/// A ship with its current position and accumulated damage.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    code: ShipCode,
    orientation: Orientation,
    row: usize,
    col: usize,
    /// Bit `i` set when segment `i` has been hit.
    hit_segments: u8,
}

impl Ship {
    /// An undamaged ship. Bounds are checked by the board on placement.
    pub fn new(code: ShipCode, orientation: Orientation, row: usize, col: usize) -> Self {
        Ship {
            code,
            orientation,
            row,
            col,
            hit_segments: 0,
        }
    }

    pub fn code(&self) -> ShipCode {
        self.code
    }

    pub fn size(&self) -> usize {
        self.code.size()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Cell of the first segment.
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub(crate) fn set_position(&mut self, row: usize, col: usize, orientation: Orientation) {
        self.row = row;
        self.col = col;
        self.orientation = orientation;
    }

    /// Grid cells in segment order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size()).map(move |i| self.orientation.step(self.row, self.col, i))
    }

    /// Occupancy of the ship at its current position.
    pub fn mask(&self) -> Mask {
        footprint(self.code, self.row, self.col, self.orientation).unwrap_or_default()
    }

    /// Segment index covering (`row`, `col`), if the ship sits there.
    pub fn segment_at(&self, row: usize, col: usize) -> Option<usize> {
        self.cells().position(|cell| cell == (row, col))
    }

    pub fn is_segment_hit(&self, index: usize) -> bool {
        index < self.size() && self.hit_segments & (1 << index) != 0
    }

    /// Records damage on segment `index`. Returns `false` when the segment was
    /// already hit or is not part of this ship.
    pub fn hit_segment(&mut self, index: usize) -> bool {
        if index >= self.size() || self.is_segment_hit(index) {
            return false;
        }
        self.hit_segments |= 1 << index;
        true
    }

    /// Indices of damaged segments, ascending.
    pub fn hit_segments(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).filter(move |&i| self.is_segment_hit(i))
    }

    pub fn hit_count(&self) -> usize {
        self.hit_segments.count_ones() as usize
    }

    pub fn is_sunk(&self) -> bool {
        self.hit_count() == self.size()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ code: {}, origin: ({}, {}), orientation: {:?}, hits: {}/{} }}",
            self.code,
            self.row,
            self.col,
            self.orientation,
            self.hit_count(),
            self.size(),
        )
    }
}
