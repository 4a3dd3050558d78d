//! Post-hit regeneration: every surviving ship of a fleet is scattered to a
//! new legal position while sunk ships stay frozen.
//!
//! Damage lives on the ships' segment indices, so relocation never changes how
//! many wounds a ship carries. The shooter's view keeps only its `Sunk` cells;
//! misses and hits are wiped because the ships under them may have moved.

use alloc::vec::Vec;
use rand::Rng;

use crate::bitboard::Mask;
use crate::board::{random_anchor, Board};
use crate::common::RegenerationError;
use crate::config::{BOARD_SIZE, REGEN_ATTEMPTS};
use crate::enemy_view::EnemyView;
use crate::ship::{footprint, Orientation, Ship, ShipCode};

/// How a ship found its new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Sunk ship, left where it was.
    Frozen,
    /// One of the random draws fit.
    Random,
    /// Random draws ran out; the previous position was still free.
    Previous,
    /// First legal position of the row-major scan.
    Scanned,
}

/// Re-lays `board`'s fleet and resets `view` to its `Sunk` cells.
///
/// Returns the slot kind chosen for each ship, in fleet order. On error both
/// `board` and `view` are left untouched.
pub fn regenerate<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    view: &mut EnemyView,
) -> Result<Vec<Slot>, RegenerationError> {
    let sunk_cells = view.sunk_cells();
    let mut fleet: Vec<Ship> = board.ships().to_vec();
    let mut slots = alloc::vec![Slot::Frozen; fleet.len()];
    let mut occupied = Mask::new();

    let (sunk, mut active): (Vec<usize>, Vec<usize>) =
        (0..fleet.len()).partition(|&i| fleet[i].is_sunk());
    for &i in &sunk {
        occupied |= fleet[i].mask();
    }

    // Largest first: the long hulls are the hard ones to fit.
    active.sort_by(|&a, &b| fleet[b].size().cmp(&fleet[a].size()));

    for i in active {
        let ship = &mut fleet[i];
        let (slot, (row, col, orientation)) = find_slot(rng, ship, &occupied)
            .ok_or(RegenerationError::Exhausted { code: ship.code() })?;
        ship.set_position(row, col, orientation);
        occupied |= ship.mask();
        slots[i] = slot;
    }

    board.set_fleet(fleet);
    view.clear_except(&sunk_cells);
    log::debug!("regenerated fleet: {:?}", slots);
    Ok(slots)
}

fn find_slot<R: Rng + ?Sized>(
    rng: &mut R,
    ship: &Ship,
    occupied: &Mask,
) -> Option<(Slot, (usize, usize, Orientation))> {
    let code = ship.code();
    if let Some(anchor) = random_anchor(rng, code, occupied, REGEN_ATTEMPTS) {
        return Some((Slot::Random, anchor));
    }
    let (row, col) = ship.origin();
    if fits(code, row, col, ship.orientation(), occupied) {
        log::debug!("{} kept its previous position after {} draws", code, REGEN_ATTEMPTS);
        return Some((Slot::Previous, (row, col, ship.orientation())));
    }
    scan(code, occupied).map(|anchor| {
        log::debug!("{} placed by exhaustive scan", code);
        (Slot::Scanned, anchor)
    })
}

/// First legal anchor for `code` in row-major order, vertical before horizontal.
pub fn scan(code: ShipCode, occupied: &Mask) -> Option<(usize, usize, Orientation)> {
    (0..BOARD_SIZE)
        .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
        .flat_map(|(r, c)| Orientation::BOTH.into_iter().map(move |o| (r, c, o)))
        .find(|&(r, c, o)| fits(code, r, c, o, occupied))
}

fn fits(code: ShipCode, row: usize, col: usize, orientation: Orientation, occupied: &Mask) -> bool {
    footprint(code, row, col, orientation).is_some_and(|m| !m.intersects(occupied))
}
