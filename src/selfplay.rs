//! Computer-vs-computer games.
//!
//! Both sides are driven by [`Opponent`], and every decision goes through
//! [`RulesEngine::apply`] exactly like a human action would. Two copies of
//! the heuristic can shuffle pieces back and forth forever, so games stop at
//! a ply cap and are then reported as unfinished.

use crate::ai::Opponent;
use crate::board::{Board, Color};
use crate::error::MoveError;
use crate::rules::{Action, Advance, RulesEngine};

/// One applied action and its effect.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ply {
    pub player: Color,
    pub action: Action,
    pub advance: Advance,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Color),
    /// The ply cap was reached, or the side to act had nothing to play.
    Unfinished,
}

/// Full history of a finished (or abandoned) game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub plies: Vec<Ply>,
    pub outcome: Outcome,
    pub board: Board,
}

/// Play the game in `engine` to the end, at most `max_plies` actions.
///
/// Returns an error only if the engine rejects an opponent decision, which
/// means the two disagree about the rules.
pub fn play_game(
    engine: &mut RulesEngine,
    rng: &mut fastrand::Rng,
    max_plies: usize,
    verbose: bool,
) -> Result<GameRecord, MoveError> {
    let mut plies = Vec::new();

    while plies.len() < max_plies {
        let Some(player) = engine.current_player() else {
            break;
        };
        let Some(action) = Opponent::new(player).decide(engine, rng) else {
            break;
        };
        let advance = engine.apply(action, player)?;
        if verbose {
            eprintln!(
                "{:>4} {:<4} {:<12} {}",
                plies.len(),
                player.name(),
                action.to_string(),
                advance
            );
        }
        plies.push(Ply {
            player,
            action,
            advance,
        });
    }

    let outcome = match engine.winner() {
        Some(winner) => Outcome::Winner(winner),
        None => Outcome::Unfinished,
    };
    if verbose {
        eprintln!("{:?} after {} plies\n{}", outcome, plies.len(), engine.board());
    }

    Ok(GameRecord {
        plies,
        outcome,
        board: engine.board().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Variant;
    use crate::constants::MAX_GAME_PLIES;

    #[test]
    fn test_game_is_reproducible() {
        let run = |seed| {
            let mut engine = RulesEngine::new(Variant::SIX, Color::Red);
            let mut rng = fastrand::Rng::with_seed(seed);
            play_game(&mut engine, &mut rng, MAX_GAME_PLIES, false).unwrap()
        };
        let a = run(42);
        let b = run(42);
        assert_eq!(a.plies, b.plies);
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.board, b.board);
    }

    #[test]
    fn test_opening_follows_scan_order() {
        let mut engine = RulesEngine::new(Variant::SIX, Color::Red);
        let mut rng = fastrand::Rng::with_seed(0);
        let record = play_game(&mut engine, &mut rng, 4, false).unwrap();
        let actions: Vec<Action> = record.plies.iter().map(|p| p.action).collect();
        assert_eq!(
            actions,
            vec![Action::Place(0), Action::Place(2), Action::Place(4), Action::Place(6)]
        );
        assert_eq!(record.outcome, Outcome::Unfinished);
    }

    #[test]
    fn test_ply_cap() {
        let mut engine = RulesEngine::new(Variant::NINE, Color::Blue);
        let mut rng = fastrand::Rng::with_seed(5);
        let record = play_game(&mut engine, &mut rng, 10, false).unwrap();
        assert!(record.plies.len() <= 10);
        assert_eq!(record.plies[0].player, Color::Blue);
    }

    #[test]
    fn test_setup_engine_does_not_play() {
        let mut engine = RulesEngine::setup(Variant::SIX);
        let mut rng = fastrand::Rng::with_seed(1);
        let record = play_game(&mut engine, &mut rng, 10, false).unwrap();
        assert!(record.plies.is_empty());
    }
}
