use dynamic_battleship::{CellState, Difficulty, GameEngine, Ship, BOARD_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn battle_engine(seed: u64, difficulty: Difficulty) -> GameEngine {
    let mut engine = GameEngine::with_seed(seed);
    engine.register("player2", "pw2").unwrap();
    engine.register("player1", "pw1").unwrap();
    engine.set_difficulty(difficulty).unwrap();
    engine.start_match("player2").unwrap();
    while engine.is_placement_phase() {
        engine.place_fleet_randomly().unwrap();
        engine.continue_to_next_turn().unwrap();
    }
    engine
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Normal),
        Just(Difficulty::Expert),
        Just(Difficulty::Genius),
    ]
}

fn assert_no_overlap(ships: &[Ship]) -> Result<(), TestCaseError> {
    let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];
    for ship in ships {
        for (r, c) in ship.cells() {
            prop_assert!(!seen[r][c], "overlap at ({}, {})", r, c);
            seen[r][c] = true;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Random shots never break the fleet: no overlap, damage only grows,
    /// sunk ships never move and never float again.
    #[test]
    fn random_play_keeps_fleet_invariants(seed in any::<u64>(), difficulty in difficulty()) {
        let mut engine = battle_engine(seed, difficulty);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);

        for _ in 0..300 {
            if engine.winner().is_some() {
                break;
            }
            let snap = engine.snapshot().unwrap();
            let target = usize::from(snap.current_turn == snap.players[0]);
            let before = &snap.fleets[target];
            let r = rng.random_range(0..BOARD_SIZE);
            let c = rng.random_range(0..BOARD_SIZE);
            let result = engine.shoot(r, c);
            prop_assert!(result.is_some());

            let report = *engine.last_shot().unwrap();
            let snap_after = engine.snapshot().unwrap();
            let after = &snap_after.fleets[target];
            prop_assert_eq!(before.len(), after.len());
            assert_no_overlap(after)?;
            for (old, new) in before.iter().zip(after) {
                prop_assert_eq!(old.code(), new.code());
                prop_assert!(new.hit_count() >= old.hit_count());
                if old.is_sunk() {
                    prop_assert!(new.is_sunk());
                    prop_assert_eq!(old.origin(), new.origin());
                }
            }
            let damage = |fleet: &[Ship]| fleet.iter().map(Ship::hit_count).sum::<usize>();
            if report.regenerated {
                prop_assert!(matches!(result, Some(CellState::Hit | CellState::Sunk)));
                prop_assert_eq!(damage(after), damage(before) + 1);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    /// A resolved cell can be fired at again without changing anything.
    #[test]
    fn resolved_shots_are_idempotent(seed in any::<u64>()) {
        let mut engine = battle_engine(seed, Difficulty::Normal);
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..50 {
            if engine.winner().is_some() {
                break;
            }
            let view = engine.enemy_board().unwrap();
            let resolved: Vec<(usize, usize)> = (0..BOARD_SIZE)
                .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
                .filter(|&(r, c)| !view[r][c].is_unresolved())
                .collect();
            if let Some(&(r, c)) = resolved.first() {
                let ships = engine.enemy_ships().to_vec();
                let turn = engine.current_turn_username().map(str::to_string);
                let shots = engine.shots_fired();
                prop_assert_eq!(engine.shoot(r, c), Some(view[r][c]));
                prop_assert_eq!(engine.enemy_ships(), &ships[..]);
                prop_assert_eq!(engine.current_turn_username().map(str::to_string), turn);
                prop_assert_eq!(engine.shots_fired(), shots);
                prop_assert_eq!(engine.enemy_board().unwrap(), view);
            }
            let r = rng.random_range(0..BOARD_SIZE);
            let c = rng.random_range(0..BOARD_SIZE);
            prop_assert!(engine.shoot(r, c).is_some());
        }
    }
}
