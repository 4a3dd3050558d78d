#![cfg(feature = "std")]

//! Terminal rendering and input parsing shared by the binaries.

use std::fmt::Write as _;

use crate::board::Grid;
use crate::common::CellState;
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Ship, ShipCode};

/// `(row, col)` as shown to players, e.g. `(0, 2)` → `C1`.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a coordinate like `C1` into `(row, col)`.
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-H", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-H", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-8", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-8", row));
    }
    Ok((row - 1, col))
}

/// Parse a placement command: `<CODE> <COORD> [H|V]`, e.g. `AZ B2 V`.
/// Orientation defaults to horizontal.
pub fn parse_placement(input: &str) -> Result<(ShipCode, usize, usize, Orientation), String> {
    let mut parts = input.split_whitespace();
    let code: ShipCode = parts
        .next()
        .ok_or("Enter a ship code (PA, AZ, SM, DT)")?
        .parse()
        .map_err(|e| format!("{}", e))?;
    let (r, c) = parse_coord(parts.next().ok_or("Missing coordinate (e.g., A5)")?)?;
    let orientation = match parts.next().map(|s| s.to_ascii_uppercase()) {
        None => Orientation::Horizontal,
        Some(s) if s.starts_with('H') => Orientation::Horizontal,
        Some(s) if s.starts_with('V') => Orientation::Vertical,
        Some(s) => return Err(format!("Invalid orientation '{}' - use H or V", s)),
    };
    Ok((code, r, c, orientation))
}

fn symbol(state: CellState) -> char {
    match state {
        CellState::Water => '.',
        CellState::Ship => 'S',
        CellState::Hit => 'X',
        CellState::Miss => 'o',
        CellState::Sunk => '#',
    }
}

/// Grid framed with column letters and row numbers.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in grid.iter().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for cell in row {
            let _ = write!(out, " {}", symbol(*cell));
        }
        out.push('\n');
    }
    out
}

/// Overlay ship positions onto a fog-of-war grid, for tutorial mode.
pub fn reveal(view: &Grid, ships: &[Ship]) -> Grid {
    let mut grid = *view;
    for ship in ships {
        for (r, c) in ship.cells() {
            if grid[r][c] == CellState::Water {
                grid[r][c] = CellState::Ship;
            }
        }
    }
    grid
}

/// One line per ship: code, size, damage.
pub fn render_fleet(ships: &[Ship]) -> String {
    let mut out = String::new();
    for ship in ships {
        let status = if ship.is_sunk() {
            "SUNK".to_string()
        } else {
            format!("{}/{} hit", ship.hit_count(), ship.size())
        };
        let (r, c) = ship.origin();
        let _ = writeln!(
            out,
            "  {} {:<11} at {} {:?}: {}",
            ship.code(),
            ship.code().name(),
            coord_to_string(r, c),
            ship.orientation(),
            status
        );
    }
    out
}

pub const LEGEND: &str = "Legend: S=Ship  X=Hit  o=Miss  #=Sunk  .=Water";

/// A random unresolved cell of `view`, if any remain.
pub fn pick_unresolved<R: rand::Rng + ?Sized>(view: &Grid, rng: &mut R) -> Option<(usize, usize)> {
    let open: Vec<(usize, usize)> = (0..BOARD_SIZE)
        .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
        .filter(|&(r, c)| view[r][c].is_unresolved())
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

/// Registers two players, places both fleets at random and lets random
/// shooters fire until one side wins or `max_shots` shots have been resolved.
pub fn autoplay(
    seed: u64,
    difficulty: crate::Difficulty,
    mode: crate::Mode,
    max_shots: usize,
) -> anyhow::Result<crate::GameEngine> {
    use rand::SeedableRng;

    let mut engine = crate::GameEngine::with_seed(seed);
    let mut shooter_rng = rand::rngs::SmallRng::seed_from_u64(seed.wrapping_add(1));
    engine.register("player2", "player2")?;
    engine.register("player1", "player1")?;
    engine.set_difficulty(difficulty)?;
    engine.set_mode(mode);
    engine.start_match("player2")?;
    while engine.is_placement_phase() {
        engine.place_fleet_randomly()?;
        engine.continue_to_next_turn()?;
    }
    let mut shots = 0;
    while engine.winner().is_none() && shots < max_shots {
        let view = engine
            .enemy_board()
            .ok_or_else(|| anyhow::anyhow!("match ended unexpectedly"))?;
        let (r, c) = pick_unresolved(&view, &mut shooter_rng)
            .ok_or_else(|| anyhow::anyhow!("no open cell left to shoot"))?;
        engine
            .shoot(r, c)
            .ok_or_else(|| anyhow::anyhow!("shot at {} rejected", coord_to_string(r, c)))?;
        shots += 1;
    }
    Ok(engine)
}
