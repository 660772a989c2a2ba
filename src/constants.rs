//! Constants for board geometry, game rules, and engine parameters.
//!
//! The board is a set of concentric rings laid out in one flat array.
//! Every ring holds [`RING_SIZE`] points; the ring count is chosen at
//! runtime through [`crate::board::Variant`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of points on one ring.
pub const RING_SIZE: usize = 8;

/// Number of points on a line that forms a mill.
pub const MILL_LEN: usize = 3;

// =============================================================================
// Rules
// =============================================================================

/// A player holding fewer pieces than this (on board plus in hand) has lost.
pub const MIN_PIECES: usize = 3;

/// Ring count of the six men's morris board.
pub const SIX_LAYERS: usize = 2;

/// Pieces per player in six men's morris.
pub const SIX_PIECES: usize = 6;

/// Ring count of the nine and twelve men's morris boards.
pub const NINE_LAYERS: usize = 3;

/// Pieces per player in nine men's morris.
pub const NINE_PIECES: usize = 9;

/// Pieces per player in twelve men's morris.
pub const TWELVE_PIECES: usize = 12;

// =============================================================================
// Engine Parameters
// =============================================================================

/// Default ply cap for computer-vs-computer games. The move heuristic has no
/// notion of progress, so games between two copies of it may cycle forever.
pub const MAX_GAME_PLIES: usize = 400;

/// Engine name reported by the text protocol.
pub const ENGINE_NAME: &str = "morris-rust";

/// Version of the text protocol framing.
pub const PROTOCOL_VERSION: &str = "1";
