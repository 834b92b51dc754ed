//! The board map: one slot per coordinate, always all 64 of them.

use crate::coord::{Coord, CELL_COUNT};
use crate::piece::{Color, Piece};

/// Contents of the 64 squares.
///
/// The fixed-size array makes "exactly one entry per coordinate" hold by
/// construction; squares are emptied or overwritten, never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    cells: [Option<Piece>; CELL_COUNT],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    pub fn empty() -> Self {
        Self { cells: [None; CELL_COUNT] }
    }

    /// Builds an empty board, then overlays each placement in order.
    pub fn from_placements<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (Coord, Piece)>,
    {
        let mut board = Self::empty();
        for (at, piece) in placements {
            board.place(at, piece);
        }
        board
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn get(&self, at: Coord) -> Option<Piece> {
        self.cells[at.index()]
    }

    pub fn is_occupied(&self, at: Coord) -> bool {
        self.cells[at.index()].is_some()
    }

    pub fn color_at(&self, at: Coord) -> Option<Color> {
        self.get(at).map(|p| p.color)
    }

    /// Puts a piece on a square and returns whatever was there.
    pub fn place(&mut self, at: Coord, piece: Piece) -> Option<Piece> {
        self.cells[at.index()].replace(piece)
    }

    pub fn take(&mut self, at: Coord) -> Option<Piece> {
        self.cells[at.index()].take()
    }

    /// Moves the occupant of `from` onto `to`. Returns the captured piece, if any.
    ///
    /// An empty origin leaves the board untouched.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let moving = self.take(from)?;
        self.place(to, moving)
    }

    /// Every square with its occupant, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Option<Piece>)> + '_ {
        Coord::all().map(move |at| (at, self.get(at)))
    }

    /// Occupied squares only.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.iter().filter_map(|(at, p)| p.map(|p| (at, p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_every_coordinate_has_a_slot() {
        let board = BoardState::from_placements([(c(0, 4), Piece::new(PieceKind::King, Color::Black))]);
        assert_eq!(board.len(), 64);
        assert_eq!(board.iter().count(), 64);
        for key in ["0-0", "0-4", "3-5", "7-7"] {
            let at: Coord = key.parse().unwrap();
            assert_eq!(board.get(at).is_some(), key == "0-4", "unexpected occupant at {key}");
        }
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_later_placement_wins() {
        let board = BoardState::from_placements([
            (c(1, 1), Piece::new(PieceKind::Pawn, Color::White)),
            (c(1, 1), Piece::new(PieceKind::Rook, Color::Black)),
        ]);
        assert_eq!(board.get(c(1, 1)), Some(Piece::new(PieceKind::Rook, Color::Black)));
    }

    #[test]
    fn test_apply_move_reports_capture() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let mut board = BoardState::from_placements([(c(7, 1), knight), (c(5, 2), pawn)]);

        assert_eq!(board.apply_move(c(7, 1), c(5, 2)), Some(pawn));
        assert_eq!(board.get(c(7, 1)), None);
        assert_eq!(board.get(c(5, 2)), Some(knight));

        assert_eq!(board.apply_move(c(5, 2), c(3, 3)), None);
        assert_eq!(board.get(c(3, 3)), Some(knight));
    }

    #[test]
    fn test_apply_move_from_empty_square_is_noop() {
        let mut board = BoardState::empty();
        assert_eq!(board.apply_move(c(0, 0), c(1, 1)), None);
        assert!(board.is_empty());
    }
}
