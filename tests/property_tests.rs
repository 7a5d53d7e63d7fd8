//! Property tests for the engine invariants.
//!
//! - Four clockwise turns restore any shape.
//! - `is_valid_placement` agrees with a direct cell-by-cell check.
//! - Random play keeps the score monotonic and the level derived from it,
//!   never leaves a full row behind, and game over is permanent.

use proptest::prelude::*;

use blockfall::core::{level_for_score, Game, GameConfig, PieceCatalog, Playfield, Shape};
use blockfall::types::{GameAction, PieceName};

fn shape_strategy() -> impl Strategy<Value = Shape> {
    (1usize..=4)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0u8..=1, n), n))
        .prop_filter_map("needs an occupied cell", |rows| Shape::from_rows(&rows).ok())
}

fn action_strategy() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        Just(GameAction::MoveLeft),
        Just(GameAction::MoveRight),
        Just(GameAction::SoftDrop),
        Just(GameAction::Rotate),
    ]
}

proptest! {
    #[test]
    fn four_rotations_are_identity(shape in shape_strategy()) {
        let turned = shape.rotated().rotated().rotated().rotated();
        prop_assert_eq!(turned, shape);
    }

    #[test]
    fn rotation_preserves_cell_count(shape in shape_strategy()) {
        prop_assert_eq!(shape.rotated().occupied().count(), shape.occupied().count());
    }

    #[test]
    fn placement_matches_cell_check(
        name_idx in 0usize..7,
        turns in 0usize..4,
        row in -3i32..22,
        col in -4i32..12,
        filled in prop::collection::vec((0i32..20, 0i32..10), 0..40),
    ) {
        let mut shape = PieceCatalog::standard()
            .shape(PieceName::ALL[name_idx])
            .unwrap()
            .clone();
        for _ in 0..turns {
            shape = shape.rotated();
        }
        let mut field = Playfield::new(10, 20).unwrap();
        for &(r, c) in &filled {
            field.set(r, c, Some(PieceName::Z));
        }

        let expected = shape.occupied().all(|(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            (0..10).contains(&c) && r < 20 && (r < 0 || !filled.contains(&(r, c)))
        });
        prop_assert_eq!(field.is_valid_placement(&shape, row, col), expected);
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..400),
    ) {
        let mut game = Game::with_seed(GameConfig::default(), seed).unwrap();
        let mut last_score = 0;
        let mut over = false;

        for action in actions {
            let changed = game.apply(action);
            if over {
                prop_assert!(!changed);
            }
            over = game.is_game_over();

            prop_assert!(game.score() >= last_score);
            last_score = game.score();
            prop_assert_eq!(game.level(), level_for_score(game.score()));

            let field = game.playfield();
            for row in 0..field.height() {
                prop_assert!(!field.is_row_full(row));
            }
            if !over {
                let active = game.active();
                prop_assert!(field.is_valid_placement(active.shape(), active.row, active.col));
            }
        }
    }
}
