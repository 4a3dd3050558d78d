use dynamic_battleship::{
    Difficulty, GameEngine, MatchError, Orientation, Phase, PlacementError, ShipCode,
};

/// `player1` logged in with a match against `player2` in placement.
fn engine_with_match(difficulty: Difficulty) -> GameEngine {
    let mut engine = GameEngine::with_seed(1);
    engine.register("player2", "pw2").unwrap();
    engine.register("player1", "pw1").unwrap();
    engine.set_difficulty(difficulty).unwrap();
    engine.start_match("player2").unwrap();
    engine
}

#[test]
fn test_start_match_failures() {
    let mut engine = GameEngine::with_seed(1);
    assert_eq!(engine.start_match("player2"), Err(MatchError::NotLoggedIn));
    engine.register("player1", "pw1").unwrap();
    assert_eq!(engine.start_match("ghost"), Err(MatchError::UnknownPlayer));
    assert_eq!(engine.start_match("player1"), Err(MatchError::SelfMatch));
    assert!(!engine.is_match_active());

    engine.register("player2", "pw2").unwrap();
    engine.login("player1", "pw1").unwrap();
    engine.start_match(" player2 ").unwrap();
    assert_eq!(engine.phase(), Some(Phase::Placement));
    assert_eq!(engine.current_turn_username(), Some("player1"));
    assert_eq!(engine.next_turn_username(), Some("player2"));
}

#[test]
fn test_placement_without_match() {
    let mut engine = GameEngine::with_seed(1);
    assert_eq!(
        engine.add_ship(ShipCode::DT, 0, 0, Orientation::Horizontal),
        Err(PlacementError::NoMatch)
    );
    assert!(!engine.all_ships_placed());
    assert!(engine.placed_ships().is_empty());
}

#[test]
fn test_normal_rejects_duplicate_codes() {
    let mut engine = engine_with_match(Difficulty::Normal);
    engine.add_ship(ShipCode::AZ, 0, 0, Orientation::Vertical).unwrap();
    assert_eq!(
        engine.add_ship(ShipCode::AZ, 3, 3, Orientation::Vertical),
        Err(PlacementError::DuplicateCode(ShipCode::AZ))
    );
    assert_eq!(engine.current_turn_ship_count(), 1);
}

#[test]
fn test_easy_allows_pairs_but_one_destroyer() {
    let mut engine = engine_with_match(Difficulty::Easy);
    engine.add_ship(ShipCode::AZ, 0, 0, Orientation::Vertical).unwrap();
    engine.add_ship(ShipCode::AZ, 4, 4, Orientation::Vertical).unwrap();
    engine.add_ship(ShipCode::DT, 6, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        engine.add_ship(ShipCode::DT, 6, 5, Orientation::Horizontal),
        Err(PlacementError::DuplicateCode(ShipCode::DT))
    );
    engine.add_ship(ShipCode::PA, 0, 2, Orientation::Horizontal).unwrap();
    engine.add_ship(ShipCode::SM, 2, 1, Orientation::Horizontal).unwrap();
    assert!(engine.all_ships_placed());
    assert_eq!(
        engine.add_ship(ShipCode::SM, 3, 1, Orientation::Horizontal),
        Err(PlacementError::QuotaReached { required: 5 })
    );
}

#[test]
fn test_illegal_positions_rejected() {
    let mut engine = engine_with_match(Difficulty::Normal);
    assert_eq!(
        engine.add_ship(ShipCode::PA, 0, 4, Orientation::Horizontal),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        engine.add_ship(ShipCode::PA, 0, usize::MAX, Orientation::Horizontal),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        engine.add_ship(ShipCode::SM, usize::MAX - 1, 0, Orientation::Vertical),
        Err(PlacementError::OutOfBounds)
    );
    engine.add_ship(ShipCode::PA, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        engine.add_ship(ShipCode::SM, 0, 2, Orientation::Vertical),
        Err(PlacementError::Overlap)
    );
    assert_eq!(
        engine.relocate_ship(0, usize::MAX, 0, Orientation::Vertical),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(engine.current_turn_ship_count(), 1);
}

#[test]
fn test_remove_and_relocate() {
    let mut engine = engine_with_match(Difficulty::Normal);
    engine.add_ship(ShipCode::AZ, 0, 0, Orientation::Vertical).unwrap();
    engine.add_ship(ShipCode::DT, 7, 0, Orientation::Horizontal).unwrap();
    engine.relocate_ship(0, 1, 0, Orientation::Vertical).unwrap();
    assert_eq!(engine.placed_ships()[0].origin(), (1, 0));
    assert_eq!(
        engine.relocate_ship(0, 4, 0, Orientation::Vertical),
        Err(PlacementError::Overlap)
    );

    let removed = engine.remove_ship(ShipCode::DT).unwrap();
    assert_eq!(removed.code(), ShipCode::DT);
    assert_eq!(engine.remove_ship(ShipCode::DT), Err(PlacementError::ShipNotFound));
    engine.remove_ship_at(0).unwrap();
    assert_eq!(engine.current_turn_ship_count(), 0);
}

#[test]
fn test_ready_needs_full_quota() {
    let mut engine = engine_with_match(Difficulty::Normal);
    engine.add_ship(ShipCode::PA, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        engine.set_player_ready(true),
        Err(MatchError::QuotaNotMet { placed: 1, required: 4 })
    );
    assert_eq!(
        engine.continue_to_next_turn(),
        Err(MatchError::QuotaNotMet { placed: 1, required: 4 })
    );
    assert_eq!(engine.current_turn_username(), Some("player1"));
}

#[test]
fn test_both_ready_starts_battle_with_player_one() {
    let mut engine = engine_with_match(Difficulty::Genius);
    engine.add_ship(ShipCode::DT, 0, 0, Orientation::Horizontal).unwrap();
    engine.continue_to_next_turn().unwrap();
    assert_eq!(engine.phase(), Some(Phase::Placement));
    assert_eq!(engine.current_turn_username(), Some("player2"));
    assert!(engine.placed_ships().is_empty());
    assert!(!engine.are_both_players_ready());

    engine.add_ship(ShipCode::SM, 5, 5, Orientation::Vertical).unwrap();
    engine.continue_to_next_turn().unwrap();
    assert!(engine.are_both_players_ready());
    assert_eq!(engine.phase(), Some(Phase::Battle));
    assert_eq!(engine.current_turn_username(), Some("player1"));
    assert_eq!(
        engine.add_ship(ShipCode::PA, 0, 0, Orientation::Vertical),
        Err(PlacementError::NotPlacementPhase)
    );
    assert_eq!(
        engine.set_difficulty(Difficulty::Easy),
        Err(MatchError::NotPlacementPhase)
    );
}

#[test]
fn test_random_fill_respects_difficulty() {
    for difficulty in [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Expert,
        Difficulty::Genius,
    ] {
        let mut engine = engine_with_match(difficulty);
        engine.add_ship(ShipCode::DT, 0, 0, Orientation::Horizontal).unwrap();
        engine.place_fleet_randomly().unwrap();
        let ships = engine.placed_ships();
        assert_eq!(ships.len(), difficulty.required_ships());
        for code in dynamic_battleship::ROSTER {
            let count = ships.iter().filter(|s| s.code() == code).count();
            assert!(count <= difficulty.max_per_code(code), "{:?} {:?}", difficulty, code);
        }
        let total: usize = ships.iter().map(|s| s.size()).sum();
        let occupied: usize = engine
            .own_board()
            .unwrap()
            .iter()
            .flatten()
            .filter(|c| **c != dynamic_battleship::CellState::Water)
            .count();
        assert_eq!(occupied, total);
    }
}

#[test]
fn test_difficulty_locked_once_ships_placed() {
    let mut engine = engine_with_match(Difficulty::Easy);
    engine.set_difficulty(Difficulty::Normal).unwrap();
    engine.set_difficulty(Difficulty::Easy).unwrap();

    engine.add_ship(ShipCode::AZ, 0, 0, Orientation::Vertical).unwrap();
    engine.add_ship(ShipCode::AZ, 4, 4, Orientation::Vertical).unwrap();
    engine.add_ship(ShipCode::PA, 0, 2, Orientation::Horizontal).unwrap();
    engine.add_ship(ShipCode::SM, 2, 1, Orientation::Horizontal).unwrap();
    engine.add_ship(ShipCode::DT, 6, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        engine.set_difficulty(Difficulty::Genius),
        Err(MatchError::ShipsPlaced)
    );
    assert_eq!(engine.difficulty(), Difficulty::Easy);

    // the opponent's fleet counts too
    engine.continue_to_next_turn().unwrap();
    assert_eq!(
        engine.set_difficulty(Difficulty::Genius),
        Err(MatchError::ShipsPlaced)
    );
    assert_eq!(
        engine.set_player_ready(true),
        Err(MatchError::QuotaNotMet { placed: 0, required: 5 })
    );

    engine.reset_game();
    engine.set_difficulty(Difficulty::Genius).unwrap();
    assert_eq!(engine.difficulty(), Difficulty::Genius);
}

#[test]
fn test_session_is_not_the_turn() {
    let mut engine = engine_with_match(Difficulty::Genius);
    assert!(engine.is_my_turn());
    engine.login("player2", "pw2").unwrap();
    assert!(!engine.is_my_turn());
    assert_eq!(engine.current_user().unwrap().username(), "player2");
    assert_eq!(engine.current_turn_username(), Some("player1"));

    engine.add_ship(ShipCode::DT, 0, 0, Orientation::Horizontal).unwrap();
    engine.continue_to_next_turn().unwrap();
    assert!(engine.is_my_turn());
    assert_eq!(engine.current_user().unwrap().username(), "player2");
}

#[test]
fn test_logout_discards_match() {
    let mut engine = engine_with_match(Difficulty::Normal);
    engine.logout();
    assert!(!engine.is_match_active());
    assert!(engine.current_user().is_none());
    assert_eq!(engine.accounts().players().len(), 2);
}
