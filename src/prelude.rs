//! Commonly used types and utilities for ease of import.

pub use crate::{
    CellState, Difficulty, GameEngine, Mode, Orientation, Phase, PlacementError, Ship, ShipCode,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, MatchSnapshot};
