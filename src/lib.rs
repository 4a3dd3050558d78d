#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitboard;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod enemy_view;
mod game;
#[cfg(feature = "std")]
mod logging;
mod match_log;
mod player;
pub mod prelude;
pub mod regen;
mod ship;

pub use bitboard::{BitBoard, BitBoardError, Mask};
pub use board::*;
pub use common::*;
pub use config::*;
pub use enemy_view::EnemyView;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use match_log::{MatchLog, PlainLog};
pub use player::*;
pub use ship::*;
