//! Formatting of the history entries recorded when a match ends.

use alloc::format;
use alloc::string::String;

/// Produces the strings pushed onto both players' histories.
pub trait MatchLog {
    /// `loser` conceded to `winner`.
    fn surrender(&self, loser: &str, winner: &str) -> String;

    /// `winner` sank every ship of `loser`.
    fn victory(&self, winner: &str, loser: &str) -> String;
}

/// Default one-line entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLog;

impl MatchLog for PlainLog {
    fn surrender(&self, loser: &str, winner: &str) -> String {
        format!("{} surrendered, {} wins", loser, winner)
    }

    fn victory(&self, winner: &str, loser: &str) -> String {
        format!("{} sank every ship of {}", winner, loser)
    }
}
