use crate::board::Point;

/// Reasons the rules engine rejects an action.
///
/// Every variant is recoverable: the engine state is untouched when one is
/// returned, so the caller can report the message and ask again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Illegal move: point not empty")]
    Occupied,

    #[error("Illegal move: point {0} is off the board")]
    OutOfRange(Point),

    #[error("Illegal move: not allowed in the current phase")]
    WrongPhase,

    #[error("Illegal move: it is not this player's turn")]
    WrongPlayer,

    #[error("Illegal move: piece belongs to the wrong player")]
    NotOwner,

    #[error("Illegal move: points are not adjacent")]
    NotAdjacent,

    #[error("Illegal move: piece is protected by a mill")]
    ProtectedByMill,

    #[error("Illegal move: no pieces left to place")]
    NoPiecesInHand,

    #[error("Illegal setup: more pieces than the variant allows")]
    TooManyPieces,
}

/// Errors from parsing a variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("unknown variant '{0}' (expected six, nine or twelve)")]
    Unknown(String),

    #[error("invalid variant: {0}")]
    Invalid(String),
}

/// Errors from parsing a textual board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("board length {0} is not a positive multiple of 8")]
    BadLength(usize),

    #[error("unexpected character '{0}' in board")]
    BadChar(char),
}
