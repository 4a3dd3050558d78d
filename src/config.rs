//! Fixed game parameters and the per-match settings.

use core::fmt;

use crate::ship::ShipCode;

/// Side length of the square battle grid.
pub const BOARD_SIZE: usize = 8;

/// Ship codes in roster order, largest first.
pub const ROSTER: [ShipCode; 4] = [ShipCode::PA, ShipCode::AZ, ShipCode::SM, ShipCode::DT];

/// Random placement attempts per ship before a regeneration falls back to
/// the ship's previous coordinates and then to an exhaustive scan.
pub const REGEN_ATTEMPTS: usize = 500;

/// Random placement attempts used when auto-filling a fleet.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Points awarded to the winner of a match, by victory or surrender.
pub const WIN_POINTS: u32 = 3;

/// Entries kept in each player's rolling match history.
pub const HISTORY_CAPACITY: usize = 10;

/// How many ships each player must place, and whether codes may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Expert,
    Genius,
}

impl Difficulty {
    /// Ships each player has to place before being ready.
    pub const fn required_ships(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 4,
            Difficulty::Expert => 2,
            Difficulty::Genius => 1,
        }
    }

    /// Maximum number of ships sharing `code` in one fleet.
    pub const fn max_per_code(self, code: ShipCode) -> usize {
        match (self, code) {
            (_, ShipCode::DT) => 1,
            (Difficulty::Easy, _) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Expert => "EXPERT",
            Difficulty::Genius => "GENIUS",
        };
        f.write_str(name)
    }
}

/// Whether the presentation layer may reveal the opponent's ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Mode {
    #[default]
    Tutorial,
    Arcade,
}

impl Mode {
    pub const fn reveals_enemy(self) -> bool {
        matches!(self, Mode::Tutorial)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Tutorial => "TUTORIAL",
            Mode::Arcade => "ARCADE",
        })
    }
}
