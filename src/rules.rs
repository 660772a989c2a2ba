//! Turn and phase state machine for men's morris.
//!
//! [`RulesEngine`] owns the [`Board`] and is the only thing that mutates it
//! during a game. A game runs through these phases:
//!
//! - `Setup`: free editing of the starting position, no player to move
//! - `Placement`: players drop pieces from their hand onto empty points
//! - `Movement`: players slide a piece to an adjacent empty point
//! - `AwaitingRemoval`: the last placement or slide closed a mill, and the
//!   same player must now remove one opposing piece
//! - `GameOver`: a player fell below three pieces or cannot move
//!
//! Every `attempt_*` call validates fully before writing, so a returned
//! [`MoveError`] leaves the engine exactly as it was.

use std::fmt;

use crate::board::{Board, Color, Point, Variant};
use crate::constants::MIN_PIECES;
use crate::error::MoveError;

/// The phase a capture returns to once the removal is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Placement,
    Movement,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Placement,
    Movement,
    AwaitingRemoval { by: Color, resume: Stage },
    GameOver { winner: Color },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => f.write_str("setup"),
            Phase::Placement => f.write_str("placement"),
            Phase::Movement => f.write_str("movement"),
            Phase::AwaitingRemoval { by, .. } => write!(f, "removal by {by}"),
            Phase::GameOver { winner } => write!(f, "game over, {winner} wins"),
        }
    }
}

/// A single player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Place(Point),
    Move(Point, Point),
    Remove(Point),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(pt) => write!(f, "place {pt}"),
            Action::Move(from, to) => write!(f, "move {from} {to}"),
            Action::Remove(pt) => write!(f, "remove {pt}"),
        }
    }
}

/// What happened after a successful action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The given player acts next.
    Turn(Color),
    /// The action closed `mills` mills; `by` must now remove one piece.
    /// Closing two mills at once still grants a single removal.
    MillClosed { by: Color, mills: usize },
    GameOver { winner: Color },
}

impl fmt::Display for Advance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advance::Turn(color) => write!(f, "{color} to play"),
            Advance::MillClosed { by, mills } => write!(f, "{by} closed {mills} mill(s)"),
            Advance::GameOver { winner } => write!(f, "{winner} wins"),
        }
    }
}

/// Rules state for one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesEngine {
    variant: Variant,
    board: Board,
    phase: Phase,
    /// Player to act; ignored during setup and after the game ends.
    turn: Color,
    /// Pieces not yet placed, indexed by [`Color::index`].
    in_hand: [usize; 2],
    /// Placements and slides played so far.
    ply: usize,
}

impl RulesEngine {
    /// Start a game in the placement phase with `first` to play.
    pub fn new(variant: Variant, first: Color) -> Self {
        Self {
            variant,
            board: Board::new(variant.layers()),
            phase: Phase::Placement,
            turn: first,
            in_hand: [variant.pieces(); 2],
            ply: 0,
        }
    }

    /// Start in setup mode, where the position can be edited freely before
    /// [`start`](Self::start) hands the board to the players.
    pub fn setup(variant: Variant) -> Self {
        Self {
            phase: Phase::Setup,
            ..Self::new(variant, Color::Red)
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player expected to act, or `None` during setup and after the game.
    pub fn current_player(&self) -> Option<Color> {
        match self.phase {
            Phase::Setup | Phase::GameOver { .. } => None,
            Phase::AwaitingRemoval { by, .. } => Some(by),
            Phase::Placement | Phase::Movement => Some(self.turn),
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Pieces `color` still has to place.
    pub fn in_hand(&self, color: Color) -> usize {
        self.in_hand[color.index()]
    }

    pub fn pieces_on_board(&self, color: Color) -> usize {
        self.board.count(color)
    }

    /// Pieces on the board plus pieces in hand.
    pub fn pieces_remaining(&self, color: Color) -> usize {
        self.pieces_on_board(color) + self.in_hand(color)
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Put a piece from `color`'s hand on an empty point.
    pub fn setup_place(&mut self, pt: Point, color: Color) -> Result<(), MoveError> {
        self.board.check(pt)?;
        if self.phase != Phase::Setup {
            return Err(MoveError::WrongPhase);
        }
        if self.board.at(pt).is_some() {
            return Err(MoveError::Occupied);
        }
        if self.in_hand[color.index()] == 0 {
            return Err(MoveError::NoPiecesInHand);
        }
        self.board.set(pt, Some(color));
        self.in_hand[color.index()] -= 1;
        Ok(())
    }

    /// Take the piece on `pt` back into its owner's hand. Returns the owner,
    /// or `None` if the point was already empty.
    pub fn setup_clear(&mut self, pt: Point) -> Result<Option<Color>, MoveError> {
        self.board.check(pt)?;
        if self.phase != Phase::Setup {
            return Err(MoveError::WrongPhase);
        }
        let owner = self.board.at(pt);
        if let Some(color) = owner {
            self.board.set(pt, None);
            self.in_hand[color.index()] += 1;
        }
        Ok(owner)
    }

    /// Set how many pieces `color` still has to place.
    pub fn setup_in_hand(&mut self, color: Color, count: usize) -> Result<(), MoveError> {
        if self.phase != Phase::Setup {
            return Err(MoveError::WrongPhase);
        }
        if count + self.board.count(color) > self.variant.pieces() {
            return Err(MoveError::TooManyPieces);
        }
        self.in_hand[color.index()] = count;
        Ok(())
    }

    /// Leave setup mode with `first` to play. Mills already on the board
    /// grant nothing.
    pub fn start(&mut self, first: Color) -> Result<Advance, MoveError> {
        if self.phase != Phase::Setup {
            return Err(MoveError::WrongPhase);
        }
        if self.in_hand == [0, 0] {
            self.phase = Phase::Movement;
            self.turn = first;
            return Ok(self.check_blocked());
        }
        self.phase = Phase::Placement;
        self.turn = if self.in_hand(first) > 0 {
            first
        } else {
            first.other()
        };
        Ok(Advance::Turn(self.turn))
    }

    // =========================================================================
    // Play
    // =========================================================================

    /// Dispatch an [`Action`] to the matching `attempt_*` call.
    pub fn apply(&mut self, action: Action, player: Color) -> Result<Advance, MoveError> {
        match action {
            Action::Place(pt) => self.attempt_place(pt, player),
            Action::Move(from, to) => self.attempt_move(from, to, player),
            Action::Remove(pt) => self.attempt_remove(pt, player),
        }
    }

    /// Place a piece from `player`'s hand on `pt`.
    pub fn attempt_place(&mut self, pt: Point, player: Color) -> Result<Advance, MoveError> {
        self.board.check(pt)?;
        if self.phase != Phase::Placement {
            return Err(MoveError::WrongPhase);
        }
        if player != self.turn {
            return Err(MoveError::WrongPlayer);
        }
        if self.in_hand(player) == 0 {
            return Err(MoveError::NoPiecesInHand);
        }
        if self.board.at(pt).is_some() {
            return Err(MoveError::Occupied);
        }

        self.board.set(pt, Some(player));
        self.in_hand[player.index()] -= 1;
        self.ply += 1;
        Ok(self.after_landing(pt, player, Stage::Placement))
    }

    /// Slide `player`'s piece from `from` to the adjacent empty point `to`.
    pub fn attempt_move(
        &mut self,
        from: Point,
        to: Point,
        player: Color,
    ) -> Result<Advance, MoveError> {
        self.board.check(from)?;
        self.board.check(to)?;
        if self.phase != Phase::Movement {
            return Err(MoveError::WrongPhase);
        }
        if player != self.turn {
            return Err(MoveError::WrongPlayer);
        }
        if self.board.at(from) != Some(player) {
            return Err(MoveError::NotOwner);
        }
        if !self.board.is_adjacent(from, to) {
            return Err(MoveError::NotAdjacent);
        }
        if self.board.at(to).is_some() {
            return Err(MoveError::Occupied);
        }

        self.board.set(from, None);
        self.board.set(to, Some(player));
        self.ply += 1;
        Ok(self.after_landing(to, player, Stage::Movement))
    }

    /// Remove the opposing piece on `pt` after `requester` closed a mill.
    ///
    /// Pieces inside a mill are protected unless every opposing piece is in
    /// one.
    pub fn attempt_remove(&mut self, pt: Point, requester: Color) -> Result<Advance, MoveError> {
        self.board.check(pt)?;
        let Phase::AwaitingRemoval { by, resume } = self.phase else {
            return Err(MoveError::WrongPhase);
        };
        if by != requester {
            return Err(MoveError::WrongPhase);
        }
        let victim = requester.other();
        if self.board.at(pt) != Some(victim) {
            return Err(MoveError::NotOwner);
        }
        if self.board.in_mill(pt) && !self.board.all_in_mills(victim) {
            return Err(MoveError::ProtectedByMill);
        }

        self.board.set(pt, None);
        if self.pieces_remaining(victim) < MIN_PIECES {
            self.phase = Phase::GameOver { winner: requester };
            return Ok(Advance::GameOver { winner: requester });
        }
        Ok(self.pass_turn(requester, resume))
    }

    /// Whether `player` has a piece that can slide to an empty neighbour.
    pub fn has_legal_move(&self, player: Color) -> bool {
        self.board.has_slide(player)
    }

    /// Every slide available to `player`, ordered by origin then neighbour.
    pub fn legal_moves(&self, player: Color) -> Vec<(Point, Point)> {
        self.board
            .points_of(player)
            .flat_map(|from| {
                self.board
                    .empty_neighbors(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Points `requester` may currently remove. Empty outside a capture.
    pub fn removable_points(&self, requester: Color) -> Vec<Point> {
        match self.phase {
            Phase::AwaitingRemoval { by, .. } if by == requester => {
                let victim = requester.other();
                let only_mills = self.board.all_in_mills(victim);
                self.board
                    .points_of(victim)
                    .filter(|&pt| only_mills || !self.board.in_mill(pt))
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Check for mills through the point a piece just landed on.
    fn after_landing(&mut self, pt: Point, mover: Color, stage: Stage) -> Advance {
        let mills = self.board.mills_at(pt);
        // Nothing to take if the opponent has no piece on the board yet.
        if mills > 0 && self.board.count(mover.other()) > 0 {
            self.phase = Phase::AwaitingRemoval { by: mover, resume: stage };
            return Advance::MillClosed { by: mover, mills };
        }
        self.pass_turn(mover, stage)
    }

    fn pass_turn(&mut self, mover: Color, stage: Stage) -> Advance {
        let opp = mover.other();
        match stage {
            Stage::Placement if self.in_hand == [0, 0] => {
                self.phase = Phase::Movement;
                self.turn = opp;
                self.check_blocked()
            }
            Stage::Placement => {
                self.phase = Phase::Placement;
                // A player whose hand is empty sits out the rest of placement.
                self.turn = if self.in_hand(opp) > 0 { opp } else { mover };
                Advance::Turn(self.turn)
            }
            Stage::Movement => {
                self.phase = Phase::Movement;
                self.turn = opp;
                self.check_blocked()
            }
        }
    }

    /// End the game if the player to move cannot slide any piece.
    fn check_blocked(&mut self) -> Advance {
        if self.board.has_slide(self.turn) {
            Advance::Turn(self.turn)
        } else {
            let winner = self.turn.other();
            self.phase = Phase::GameOver { winner };
            Advance::GameOver { winner }
        }
    }
}
