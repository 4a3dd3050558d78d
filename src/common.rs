//! Common types: cell states and the errors returned by engine operations.

use core::fmt;

use crate::ship::ShipCode;

/// State of one grid cell as shown to a player.
///
/// `Ship` only ever appears on a player's own board, never in the fog-of-war
/// view of an opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Water,
    Ship,
    Hit,
    Miss,
    Sunk,
}

impl CellState {
    /// Whether a shot at a cell in this state still has to be resolved.
    pub fn is_unresolved(self) -> bool {
        matches!(self, CellState::Water | CellState::Ship)
    }
}

/// Reasons a ship placement, move or removal is rejected. The board is left
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// No match has been started.
    NoMatch,
    /// Ships can only be changed before the battle starts.
    NotPlacementPhase,
    /// Some segment would fall outside the grid.
    OutOfBounds,
    /// Some segment would cover a cell owned by another ship.
    Overlap,
    /// The fleet already holds the number of ships the difficulty requires.
    QuotaReached { required: usize },
    /// The difficulty does not allow another ship with this code.
    DuplicateCode(ShipCode),
    /// No placed ship matches the request.
    ShipNotFound,
    /// Random placement found no free position.
    UnableToPlaceShip,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::NoMatch => write!(f, "No match in progress"),
            PlacementError::NotPlacementPhase => {
                write!(f, "Ships can only be placed before the battle")
            }
            PlacementError::OutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::QuotaReached { required } => {
                write!(f, "Fleet already has the {} ships required", required)
            }
            PlacementError::DuplicateCode(code) => {
                write!(f, "No more {} ships allowed at this difficulty", code)
            }
            PlacementError::ShipNotFound => write!(f, "Ship not found"),
            PlacementError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

/// Errors from match lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// No session is logged in.
    NotLoggedIn,
    /// The opponent username is not registered.
    UnknownPlayer,
    /// A player cannot play against themself.
    SelfMatch,
    /// No match has been started.
    NoMatch,
    /// The operation is only valid during placement.
    NotPlacementPhase,
    /// Settings are locked once either player has placed a ship.
    ShipsPlaced,
    /// The acting player has not placed the ships the difficulty requires.
    QuotaNotMet { placed: usize, required: usize },
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotLoggedIn => write!(f, "No player is logged in"),
            MatchError::UnknownPlayer => write!(f, "Opponent does not exist"),
            MatchError::SelfMatch => write!(f, "A player cannot play against themself"),
            MatchError::NoMatch => write!(f, "No match in progress"),
            MatchError::NotPlacementPhase => write!(f, "Only allowed during placement"),
            MatchError::ShipsPlaced => {
                write!(f, "Difficulty cannot change once ships are placed")
            }
            MatchError::QuotaNotMet { placed, required } => {
                write!(f, "{} of {} required ships placed", placed, required)
            }
        }
    }
}

/// Errors from account registration and login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    EmptyUsername,
    EmptyPassword,
    UsernameTaken,
    UnknownPlayer,
    WrongPassword,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::EmptyUsername => write!(f, "Username must not be empty"),
            AccountError::EmptyPassword => write!(f, "Password must not be empty"),
            AccountError::UsernameTaken => write!(f, "Username is already registered"),
            AccountError::UnknownPlayer => write!(f, "No such player"),
            AccountError::WrongPassword => write!(f, "Wrong password"),
        }
    }
}

/// Regeneration could not find any legal cell for a ship. Only reachable if
/// the roster no longer fits the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenerationError {
    Exhausted { code: ShipCode },
}

impl fmt::Display for RegenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegenerationError::Exhausted { code } => {
                write!(f, "No legal position left for {} during regeneration", code)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
#[cfg(feature = "std")]
impl std::error::Error for AccountError {}
#[cfg(feature = "std")]
impl std::error::Error for RegenerationError {}
