//! Board representation for the men's morris family.
//!
//! The board is a flat array of `layers * 8` points. Point `i` lies on ring
//! `i / 8`; within a ring, even offsets are joints (they sit on a spoke that
//! links neighbouring rings) and odd offsets are mid-edge points reachable
//! only along their own ring. Every line of three is either a ring edge
//! (`2k, 2k+1, 2k+2` on one ring) or three joints on consecutive rings.
//!
//! The board stores pieces only. Turn order, phases and legality live in
//! [`crate::rules`].

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    MIN_PIECES, MILL_LEN, NINE_LAYERS, NINE_PIECES, RING_SIZE, SIX_LAYERS, SIX_PIECES,
    TWELVE_PIECES,
};
use crate::error::{BoardParseError, MoveError, VariantError};

/// A point on the board, as an index into the flat array.
pub type Point = usize;

/// A line of three points.
pub type Line = [Point; MILL_LEN];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    /// Both colors, in index order.
    pub const ALL: [Color; 2] = [Color::Red, Color::Blue];

    /// Get the other color
    pub fn other(self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Draw a color uniformly from `rng`.
    pub fn random(rng: &mut fastrand::Rng) -> Color {
        if rng.bool() { Color::Red } else { Color::Blue }
    }

    /// Index for per-color arrays.
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }

    fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Ok(Color::Red),
            "blue" | "b" => Ok(Color::Blue),
            _ => Err(format!("invalid color '{s}'")),
        }
    }
}

/// Board size and piece count of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    layers: usize,
    pieces: usize,
}

impl Variant {
    pub const SIX: Variant = Variant {
        layers: SIX_LAYERS,
        pieces: SIX_PIECES,
    };
    pub const NINE: Variant = Variant {
        layers: NINE_LAYERS,
        pieces: NINE_PIECES,
    };
    pub const TWELVE: Variant = Variant {
        layers: NINE_LAYERS,
        pieces: TWELVE_PIECES,
    };

    /// Build a custom variant. Both players' pieces must fit on the board and
    /// each player needs enough pieces to be able to lose them.
    pub fn new(layers: usize, pieces: usize) -> Result<Self, VariantError> {
        if layers == 0 {
            return Err(VariantError::Invalid("board needs at least one ring".into()));
        }
        if pieces < MIN_PIECES {
            return Err(VariantError::Invalid(format!(
                "each player needs at least {MIN_PIECES} pieces"
            )));
        }
        if 2 * pieces > layers * RING_SIZE {
            return Err(VariantError::Invalid(format!(
                "{pieces} pieces per player do not fit on {layers} rings"
            )));
        }
        Ok(Variant { layers, pieces })
    }

    /// Number of rings.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Pieces each player starts with.
    pub fn pieces(&self) -> usize {
        self.pieces
    }

    /// Total number of points on the board.
    pub fn points(&self) -> usize {
        self.layers * RING_SIZE
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::SIX
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Variant::SIX => f.write_str("six"),
            Variant::NINE => f.write_str("nine"),
            Variant::TWELVE => f.write_str("twelve"),
            Variant { layers, pieces } => write!(f, "{layers}x{pieces}"),
        }
    }
}

impl FromStr for Variant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "six" | "6" => Ok(Variant::SIX),
            "nine" | "9" => Ok(Variant::NINE),
            "twelve" | "12" => Ok(Variant::TWELVE),
            other => Err(VariantError::Unknown(other.to_string())),
        }
    }
}

/// Piece positions on a ring board. Each point is empty or holds one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    layers: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Create an empty board with the given number of rings.
    pub fn new(layers: usize) -> Self {
        Self {
            layers,
            cells: vec![None; layers * RING_SIZE],
        }
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Number of points on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Check that a point lies on the board.
    pub fn check(&self, pt: Point) -> Result<(), MoveError> {
        if pt < self.cells.len() {
            Ok(())
        } else {
            Err(MoveError::OutOfRange(pt))
        }
    }

    /// Owner of a point, or `OutOfRange` for points off the board.
    pub fn get(&self, pt: Point) -> Result<Option<Color>, MoveError> {
        self.check(pt)?;
        Ok(self.cells[pt])
    }

    /// Owner of a point known to be on the board.
    #[inline]
    pub fn at(&self, pt: Point) -> Option<Color> {
        self.cells[pt]
    }

    /// Overwrite a point. No rules are checked here.
    ///
    /// # Panics
    /// Panics if `pt` is off the board.
    pub fn set(&mut self, pt: Point, owner: Option<Color>) {
        self.cells[pt] = owner;
    }

    /// All points in ascending order with their owners.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Option<Color>)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    /// Points held by `color`, ascending.
    pub fn points_of(&self, color: Color) -> impl Iterator<Item = Point> + '_ {
        self.cells()
            .filter(move |&(_, c)| c == Some(color))
            .map(|(pt, _)| pt)
    }

    pub fn count(&self, color: Color) -> usize {
        self.points_of(color).count()
    }

    /// Same-ring neighbours `(prev, next)`, wrapping around the ring.
    pub fn ring_neighbors(&self, pt: Point) -> (Point, Point) {
        let prev = if pt % RING_SIZE == 0 {
            pt + RING_SIZE - 1
        } else {
            pt - 1
        };
        let next = if (pt + 1) % RING_SIZE == 0 {
            pt + 1 - RING_SIZE
        } else {
            pt + 1
        };
        (prev, next)
    }

    /// Cross-ring neighbours `(out, in)` of a joint. Mid-edge points and
    /// the missing side of the outermost and innermost rings give `None`.
    pub fn spoke_neighbors(&self, pt: Point) -> (Option<Point>, Option<Point>) {
        if pt % 2 != 0 {
            return (None, None);
        }
        let out = pt.checked_sub(RING_SIZE);
        let inner = Some(pt + RING_SIZE).filter(|&p| p < self.cells.len());
        (out, inner)
    }

    /// All neighbours of a point, ordered prev, next, out, in.
    pub fn neighbors(&self, pt: Point) -> Vec<Point> {
        let (prev, next) = self.ring_neighbors(pt);
        let (out, inner) = self.spoke_neighbors(pt);
        let mut v = vec![prev, next];
        v.extend(out);
        v.extend(inner);
        v
    }

    pub fn is_adjacent(&self, a: Point, b: Point) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Empty neighbours of a point.
    pub fn empty_neighbors(&self, pt: Point) -> Vec<Point> {
        self.neighbors(pt)
            .into_iter()
            .filter(|&n| self.cells[n].is_none())
            .collect()
    }

    /// Every line of three that passes through `pt`.
    pub fn lines_through(&self, pt: Point) -> Vec<Line> {
        let base = pt - pt % RING_SIZE;
        let off = pt % RING_SIZE;
        let at = |o: usize| base + o % RING_SIZE;

        let mut lines = Vec::new();
        if off % 2 == 1 {
            lines.push([at(off - 1), pt, at(off + 1)]);
        } else {
            lines.push([pt, at(off + 1), at(off + 2)]);
            lines.push([at(off + RING_SIZE - 2), at(off + RING_SIZE - 1), pt]);

            // Spokes: three joints on consecutive rings.
            let ring = pt / RING_SIZE;
            let first = ring.saturating_sub(MILL_LEN - 1);
            for start in first..=ring {
                if start + MILL_LEN > self.layers {
                    break;
                }
                lines.push(std::array::from_fn(|k| (start + k) * RING_SIZE + off));
            }
        }
        lines
    }

    /// Number of complete mills through `pt`, counted for its current owner.
    pub fn mills_at(&self, pt: Point) -> usize {
        let Some(color) = self.cells[pt] else {
            return 0;
        };
        self.lines_through(pt)
            .iter()
            .filter(|line| line.iter().all(|&p| self.cells[p] == Some(color)))
            .count()
    }

    /// Whether the piece on `pt` is part of a mill.
    pub fn in_mill(&self, pt: Point) -> bool {
        self.mills_at(pt) > 0
    }

    /// Whether every piece of `color` sits in a mill. True for no pieces.
    pub fn all_in_mills(&self, color: Color) -> bool {
        self.points_of(color).all(|pt| self.in_mill(pt))
    }

    /// Whether any piece of `color` can slide to an empty neighbour.
    pub fn has_slide(&self, color: Color) -> bool {
        self.points_of(color)
            .any(|pt| self.neighbors(pt).iter().any(|&n| self.cells[n].is_none()))
    }
}

/// Rings are printed one per row, outermost first: `R`, `B`, or `.`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ring in self.cells.chunks(RING_SIZE) {
            let row: Vec<String> = ring
                .iter()
                .map(|c| c.map_or('.', Color::symbol).to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// Parse the [`Display`](fmt::Display) form. Whitespace is ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'R' | 'r' => Ok(Some(Color::Red)),
                'B' | 'b' => Ok(Some(Color::Blue)),
                '.' => Ok(None),
                other => Err(BoardParseError::BadChar(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if cells.is_empty() || cells.len() % RING_SIZE != 0 {
            return Err(BoardParseError::BadLength(cells.len()));
        }
        Ok(Board {
            layers: cells.len() / RING_SIZE,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<Point>) -> Vec<Point> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(2);
        assert_eq!(board.len(), 16);
        assert!(board.is_empty());
        assert_eq!(board.count(Color::Red), 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new(2);
        assert_eq!(board.get(15), Ok(None));
        assert_eq!(board.get(16), Err(MoveError::OutOfRange(16)));
    }

    #[test]
    fn test_ring_wraparound() {
        let board = Board::new(2);
        assert_eq!(board.ring_neighbors(0), (7, 1));
        assert_eq!(board.ring_neighbors(7), (6, 0));
        assert_eq!(board.ring_neighbors(8), (15, 9));
        assert_eq!(board.ring_neighbors(15), (14, 8));
        assert_eq!(board.ring_neighbors(3), (2, 4));
    }

    #[test]
    fn test_neighbors_six_board() {
        let board = Board::new(2);
        assert_eq!(board.neighbors(0), vec![7, 1, 8]);
        assert_eq!(board.neighbors(8), vec![15, 9, 0]);
        assert_eq!(board.neighbors(3), vec![2, 4]);
        assert_eq!(board.neighbors(9), vec![8, 10]);
    }

    #[test]
    fn test_neighbors_middle_ring_has_four() {
        let board = Board::new(3);
        assert_eq!(sorted(board.neighbors(10)), vec![2, 9, 11, 18]);
        assert_eq!(board.neighbors(11).len(), 2);
    }

    #[test]
    fn test_lines_through_ring_points() {
        let board = Board::new(2);
        assert_eq!(board.lines_through(9), vec![[8, 9, 10]]);
        assert_eq!(board.lines_through(7), vec![[6, 7, 0]]);
        assert_eq!(board.lines_through(0), vec![[0, 1, 2], [6, 7, 0]]);
        // Two rings are too few for a spoke line.
        assert_eq!(board.lines_through(8).len(), 2);
    }

    #[test]
    fn test_lines_through_spokes() {
        let board = Board::new(3);
        assert!(board.lines_through(2).contains(&[2, 10, 18]));
        assert!(board.lines_through(10).contains(&[2, 10, 18]));
        assert!(board.lines_through(18).contains(&[2, 10, 18]));
        assert_eq!(board.lines_through(11), vec![[10, 11, 12]]);

        let deep = Board::new(4);
        let spokes: Vec<Line> = deep
            .lines_through(12)
            .into_iter()
            .filter(|l| l[1] - l[0] == RING_SIZE)
            .collect();
        assert_eq!(spokes, vec![[4, 12, 20], [12, 20, 28]]);
    }

    #[test]
    fn test_mills() {
        let board: Board = "RRR.B... BBB.....".parse().unwrap();
        assert_eq!(board.mills_at(1), 1);
        assert!(board.in_mill(0));
        assert!(!board.in_mill(4));
        assert!(board.in_mill(9));
        assert!(!board.all_in_mills(Color::Blue));
        assert!(board.all_in_mills(Color::Red));
        assert_eq!(board.mills_at(3), 0);
    }

    #[test]
    fn test_double_mill() {
        let board: Board = "RRRRR... ........".parse().unwrap();
        assert_eq!(board.mills_at(2), 2);
    }

    #[test]
    fn test_random_color_follows_seed() {
        let draw = |seed| {
            let mut rng = fastrand::Rng::with_seed(seed);
            (0..32).map(|_| Color::random(&mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(5), draw(5));
        let colors = draw(5);
        assert!(colors.contains(&Color::Red));
        assert!(colors.contains(&Color::Blue));
    }

    #[test]
    fn test_parse_display() {
        let board: Board = "R.B..... ........".parse().unwrap();
        assert_eq!(board.at(0), Some(Color::Red));
        assert_eq!(board.at(2), Some(Color::Blue));
        assert_eq!(board.to_string(), "R . B . . . . .\n. . . . . . . .\n");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("R.B".parse::<Board>(), Err(BoardParseError::BadLength(3)));
        assert_eq!("X.......".parse::<Board>(), Err(BoardParseError::BadChar('X')));
    }

    #[test]
    fn test_has_slide() {
        let board: Board = "RBRB.... ........".parse().unwrap();
        assert!(board.has_slide(Color::Blue));
        assert!(board.has_slide(Color::Red));
        let blocked: Board = "BRB..... B.......".parse().unwrap();
        assert!(!blocked.has_slide(Color::Red));
    }

    #[test]
    fn test_variants() {
        assert_eq!("six".parse::<Variant>(), Ok(Variant::SIX));
        assert_eq!("9".parse::<Variant>(), Ok(Variant::NINE));
        assert_eq!(Variant::TWELVE.points(), 24);
        assert_eq!(Variant::SIX.to_string(), "six");
        assert!("seven".parse::<Variant>().is_err());
        assert!(Variant::new(0, 6).is_err());
        assert!(Variant::new(2, 2).is_err());
        assert!(Variant::new(2, 9).is_err());
        assert_eq!(Variant::new(2, 6), Ok(Variant::SIX));
    }
}
