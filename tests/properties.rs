//! Property tests: random action sequences against the rules engine.

use proptest::prelude::*;

use morris_rust::ai::Opponent;
use morris_rust::board::{Board, Color, Variant};
use morris_rust::rules::{Action, Phase, RulesEngine};

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::SIX), Just(Variant::NINE), Just(Variant::TWELVE)]
}

/// Raw actions; points may be off the board to exercise `OutOfRange`.
fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..26).prop_map(Action::Place),
        (0usize..26, 0usize..26).prop_map(|(a, b)| Action::Move(a, b)),
        (0usize..26).prop_map(Action::Remove),
    ]
}

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Red), Just(Color::Blue)]
}

fn check_invariants(engine: &RulesEngine) {
    let variant = engine.variant();
    let board = engine.board();
    assert_eq!(board.len(), variant.points());
    for color in Color::ALL {
        assert!(engine.pieces_remaining(color) <= variant.pieces());
    }
    assert!(board.count(Color::Red) + board.count(Color::Blue) <= board.len());
    if let Phase::AwaitingRemoval { by, .. } = engine.phase() {
        assert!(!engine.removable_points(by).is_empty());
    }
}

proptest! {
    #[test]
    fn neighbors_symmetric(layers in 1usize..6) {
        let board = Board::new(layers);
        for i in 0..board.len() {
            let ns = board.neighbors(i);
            prop_assert!(!ns.contains(&i));
            for &j in &ns {
                prop_assert_eq!(ns.iter().filter(|&&n| n == j).count(), 1);
                prop_assert!(board.neighbors(j).contains(&i));
            }
        }
    }

    #[test]
    fn failed_actions_change_nothing(
        variant in variant(),
        first in color(),
        steps in prop::collection::vec((action(), color()), 0..300),
    ) {
        let mut engine = RulesEngine::new(variant, first);
        for (action, player) in steps {
            let before = engine.clone();
            match engine.apply(action, player) {
                Ok(_) => check_invariants(&engine),
                Err(_) => prop_assert_eq!(&engine, &before),
            }
        }
    }

    #[test]
    fn opponent_actions_always_legal(
        variant in variant(),
        first in color(),
        seed in any::<u64>(),
    ) {
        let mut engine = RulesEngine::new(variant, first);
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..200 {
            let Some(player) = engine.current_player() else {
                break;
            };
            let action = Opponent::new(player).decide(&engine, &mut rng);
            prop_assert!(action.is_some());
            prop_assert!(engine.apply(action.unwrap(), player).is_ok());
            check_invariants(&engine);
        }
    }
}
