//! Heuristic computer opponent.
//!
//! The opponent keeps no state between calls apart from its own color and
//! the color it plays against. Each decision is a fixed scan over the board:
//!
//! - Placement: first empty joint (even point), then first empty mid-edge point
//! - Removal: first opposing piece outside a mill, or the first opposing piece
//!   at all when every one of them is in a mill
//! - Movement: first own piece (ascending) with an empty neighbour; ties
//!   between several empty neighbours are broken with the supplied RNG
//!
//! There is no look-ahead. Randomness comes only from the `fastrand::Rng`
//! passed in, so a seeded generator makes every decision reproducible.

use crate::board::{Board, Color, Point};
use crate::rules::{Action, Phase, RulesEngine};

/// Computer player for one side of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opponent {
    color: Color,
    opponent: Color,
}

impl Opponent {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            opponent: color.other(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Pick an action for the current phase, or `None` when it is not this
    /// player's turn or nothing is legal.
    pub fn decide(&self, engine: &RulesEngine, rng: &mut fastrand::Rng) -> Option<Action> {
        let board = engine.board();
        match engine.phase() {
            Phase::Placement if engine.current_player() == Some(self.color) => {
                self.choose_placement(board).map(Action::Place)
            }
            Phase::Movement if engine.current_player() == Some(self.color) => self
                .choose_move(board, rng)
                .map(|(from, to)| Action::Move(from, to)),
            Phase::AwaitingRemoval { by, .. } if by == self.color => {
                self.choose_removal(board).map(Action::Remove)
            }
            _ => None,
        }
    }

    /// First empty even point, then first empty odd point.
    pub fn choose_placement(&self, board: &Board) -> Option<Point> {
        let evens = (0..board.len()).step_by(2);
        let odds = (1..board.len()).step_by(2);
        evens.chain(odds).find(|&pt| board.at(pt).is_none())
    }

    /// Lowest opposing piece that may be taken.
    pub fn choose_removal(&self, board: &Board) -> Option<Point> {
        if board.all_in_mills(self.opponent) {
            return board.points_of(self.opponent).next();
        }
        board
            .points_of(self.opponent)
            .find(|&pt| !board.in_mill(pt))
    }

    /// Slide for the lowest own piece that has an empty neighbour.
    pub fn choose_move(&self, board: &Board, rng: &mut fastrand::Rng) -> Option<(Point, Point)> {
        for from in board.points_of(self.color) {
            if from % 2 == 0 {
                // Joint: up to four neighbours, any empty one is fine.
                let open = board.empty_neighbors(from);
                if open.is_empty() {
                    continue;
                }
                return Some((from, open[rng.usize(..open.len())]));
            }

            let (prev, next) = board.ring_neighbors(from);
            let to = match (board.at(prev).is_none(), board.at(next).is_none()) {
                (false, false) => continue,
                (true, false) => prev,
                (false, true) => next,
                (true, true) => {
                    if rng.bool() {
                        prev
                    } else {
                        next
                    }
                }
            };
            return Some((from, to));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Variant;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_placement_prefers_even_points() {
        let ai = Opponent::new(Color::Red);
        assert_eq!(ai.choose_placement(&board("........ ........")), Some(0));
        assert_eq!(ai.choose_placement(&board("R.B..... ........")), Some(4));
        assert_eq!(ai.choose_placement(&board("R.B.R.B. R.B.R.B.")), Some(1));
        assert_eq!(ai.choose_placement(&board("RBRBRBRB BRBRBRB.")), Some(15));
        assert_eq!(ai.choose_placement(&board("RBRBRBRB BRBRBRBR")), None);
    }

    #[test]
    fn test_removal_skips_mills() {
        let ai = Opponent::new(Color::Red);
        assert_eq!(ai.choose_removal(&board("BBB..... ..B.....")), Some(10));
        assert_eq!(ai.choose_removal(&board("BBB..... ........")), Some(0));
        assert_eq!(ai.choose_removal(&board("RRR..... ........")), None);
    }

    #[test]
    fn test_move_odd_point_single_empty_neighbor() {
        let ai = Opponent::new(Color::Red);
        let b = board("..BR.... ........");
        for seed in 0..16 {
            let mut rng = fastrand::Rng::with_seed(seed);
            assert_eq!(ai.choose_move(&b, &mut rng), Some((3, 4)));
        }
    }

    #[test]
    fn test_move_odd_point_both_empty_is_seeded() {
        let ai = Opponent::new(Color::Red);
        let b = board("...R.... ........");
        let mut seen = Vec::new();
        for seed in 0..64 {
            let mut a = fastrand::Rng::with_seed(seed);
            let mut b2 = fastrand::Rng::with_seed(seed);
            let first = ai.choose_move(&b, &mut a);
            assert_eq!(first, ai.choose_move(&b, &mut b2));
            let (from, to) = first.unwrap();
            assert_eq!(from, 3);
            assert!(to == 2 || to == 4);
            if !seen.contains(&to) {
                seen.push(to);
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_move_joint_picks_empty_neighbor() {
        let ai = Opponent::new(Color::Red);
        let b = board("RB...... ........");
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..32 {
            let (from, to) = ai.choose_move(&b, &mut rng).unwrap();
            assert_eq!(from, 0);
            assert!(to == 7 || to == 8, "unexpected target {to}");
        }
    }

    #[test]
    fn test_move_skips_blocked_pieces() {
        let ai = Opponent::new(Color::Red);
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            ai.choose_move(&board("RBBR...B B......."), &mut rng),
            Some((3, 4))
        );
        assert_eq!(ai.choose_move(&board("RB.....B B......."), &mut rng), None);
    }

    #[test]
    fn test_decide_follows_phase() {
        let mut rng = fastrand::Rng::with_seed(9);
        let red = Opponent::new(Color::Red);
        let blue = Opponent::new(Color::Blue);

        let mut engine = RulesEngine::new(Variant::SIX, Color::Red);
        assert_eq!(blue.decide(&engine, &mut rng), None);
        assert_eq!(red.decide(&engine, &mut rng), Some(Action::Place(0)));

        for (color, pt) in [(Color::Red, 0), (Color::Blue, 9), (Color::Red, 1), (Color::Blue, 11)] {
            engine.attempt_place(pt, color).unwrap();
        }
        engine.attempt_place(2, Color::Red).unwrap();
        assert_eq!(red.decide(&engine, &mut rng), Some(Action::Remove(9)));
        assert_eq!(blue.decide(&engine, &mut rng), None);
    }
}
