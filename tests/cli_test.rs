#[cfg(feature = "std")]
mod cli_tests {
    use dynamic_battleship::cli::{
        coord_to_string, parse_coord, parse_placement, pick_unresolved, render_grid, reveal,
    };
    use dynamic_battleship::{CellState, EnemyView, Orientation, Ship, ShipCode};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("C1"), Ok((0, 2)));
        assert_eq!(parse_coord(" h8 "), Ok((7, 7)));
        assert!(parse_coord("I1").is_err());
        assert!(parse_coord("A9").is_err());
        assert!(parse_coord("A0").is_err());
        assert!(parse_coord("1A").is_err());
        assert!(parse_coord("B").is_err());
        assert_eq!(coord_to_string(7, 7), "H8");
    }

    #[test]
    fn test_parse_placement() {
        assert_eq!(
            parse_placement("AZ B2 V"),
            Ok((ShipCode::AZ, 1, 1, Orientation::Vertical))
        );
        assert_eq!(
            parse_placement("sm a1"),
            Ok((ShipCode::SM, 0, 0, Orientation::Horizontal))
        );
        assert!(parse_placement("XX A1").is_err());
        assert!(parse_placement("DT A1 D").is_err());
        assert!(parse_placement("DT").is_err());
    }

    #[test]
    fn test_render_and_reveal() {
        let mut view = EnemyView::new();
        view.mark(0, 0, CellState::Sunk);
        view.mark(3, 3, CellState::Miss);
        let ships = [
            Ship::new(ShipCode::DT, Orientation::Horizontal, 0, 0),
            Ship::new(ShipCode::SM, Orientation::Vertical, 4, 7),
        ];
        let shown = reveal(&view.cells(), &ships);
        assert_eq!(shown[0][0], CellState::Sunk);
        assert_eq!(shown[0][1], CellState::Ship);
        assert_eq!(shown[6][7], CellState::Ship);
        assert_eq!(shown[3][3], CellState::Miss);

        let text = render_grid(&shown);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].ends_with("A B C D E F G H"));
        assert!(lines[1].trim_start().starts_with("1 # S"));
        assert!(lines[4].contains('o'));
    }

    #[test]
    fn test_pick_unresolved_skips_resolved_cells() {
        let mut view = EnemyView::new();
        for r in 0..8 {
            for c in 0..8 {
                if (r, c) != (5, 2) {
                    view.mark(r, c, CellState::Miss);
                }
            }
        }
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(pick_unresolved(&view.cells(), &mut rng), Some((5, 2)));
        view.mark(5, 2, CellState::Miss);
        assert_eq!(pick_unresolved(&view.cells(), &mut rng), None);
    }
}
