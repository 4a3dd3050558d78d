use dynamic_battleship::{Board, Orientation, ShipCode, BOARD_SIZE, ROSTER};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    for code in ROSTER {
        let (r, c, o) = board.random_placement(&mut rng, code, 100).unwrap();
        board.place(code, r, c, o).unwrap();
    }
    board
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn code() -> impl Strategy<Value = ShipCode> {
    prop_oneof![
        Just(ShipCode::PA),
        Just(ShipCode::AZ),
        Just(ShipCode::SM),
        Just(ShipCode::DT)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleet_never_overlaps(seed in any::<u64>()) {
        let board = random_board(seed);
        let total: usize = board.ships().iter().map(|s| s.size()).sum();
        prop_assert_eq!(board.occupancy().count_ones(), total);
    }

    #[test]
    fn place_agrees_with_can_place(
        seed in any::<u64>(),
        code in code(),
        row in 0..BOARD_SIZE,
        col in 0..BOARD_SIZE,
        o in orientation(),
    ) {
        let mut board = random_board(seed);
        board.remove(3).unwrap();
        let before = board.clone();
        let allowed = board.can_place(code, row, col, o);
        let placed = board.place(code, row, col, o);
        prop_assert_eq!(allowed, placed.is_ok());
        if !allowed {
            prop_assert_eq!(board, before);
        } else {
            let total: usize = board.ships().iter().map(|s| s.size()).sum();
            prop_assert_eq!(board.occupancy().count_ones(), total);
        }
    }
}
