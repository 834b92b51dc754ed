//! Per-cell render data derived from a `Session`.
//!
//! Renderers stay stateless: they draw whatever `CellView` says and forward
//! clicks back to the session.

use crate::coord::Coord;
use crate::icons::{self, PieceIcon};
use crate::piece::Piece;
use crate::session::{MovingPiece, Session};

pub const DOT_RADIUS: f32 = 0.15;
pub const RING_RADIUS: f32 = 0.45;
pub const RING_WIDTH: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

/// Marker shown on a legal destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMarker {
    /// Empty destination.
    Dot,
    /// Occupied destination, i.e. a capture.
    Ring,
}

impl MoveMarker {
    /// Radius in pixels for a cell of the given size.
    pub fn radius(self, cell_size: f32) -> f32 {
        match self {
            MoveMarker::Dot => cell_size * DOT_RADIUS,
            MoveMarker::Ring => cell_size * RING_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub coord: Coord,
    pub occupant: Option<Piece>,
    pub icon: Option<PieceIcon>,
    pub shade: Shade,
    pub selected: bool,
    pub marker: Option<MoveMarker>,
    pub in_check: bool,
    pub last_move: bool,
    /// Pixel offset of the occupant while it is animating away from this cell.
    pub offset: Option<(f32, f32)>,
}

impl CellView {
    /// `progress` is the fraction of the animation window already elapsed.
    pub fn derive(session: &Session, coord: Coord, cell_size: f32, progress: f32) -> Self {
        let occupant = session.board().get(coord);
        let marker = session.available_moves().contains(&coord).then(|| {
            if occupant.is_some() {
                MoveMarker::Ring
            } else {
                MoveMarker::Dot
            }
        });
        let in_check = session.check() == Some(coord) && occupant.is_some_and(Piece::is_king);
        let last_move = session
            .last_move()
            .is_some_and(|(from, to)| from == coord || to == coord);
        let offset = session
            .moving_piece()
            .filter(|m| m.start == coord)
            .map(|m| translate(m, cell_size, progress));

        Self {
            coord,
            occupant,
            icon: occupant.map(icons::icon),
            shade: if coord.is_light() { Shade::Light } else { Shade::Dark },
            selected: session.selection() == Some(coord),
            marker,
            in_check,
            last_move,
            offset,
        }
    }
}

/// All 64 cells in row-major order.
pub fn board_view(session: &Session, cell_size: f32, progress: f32) -> Vec<CellView> {
    Coord::all()
        .map(|at| CellView::derive(session, at, cell_size, progress))
        .collect()
}

/// Translation that carries a piece from its start cell toward its end cell.
pub fn translate(moving: &MovingPiece, cell_size: f32, progress: f32) -> (f32, f32) {
    let progress = progress.clamp(0.0, 1.0);
    let dx = (moving.end.col() as f32 - moving.start.col() as f32) * cell_size;
    let dy = (moving.end.row() as f32 - moving.start.row() as f32) * cell_size;
    (dx * progress, dy * progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MatchCreated, MatchId, MoveOutcome, Placement};
    use crate::piece::{Color, PieceKind};
    use std::time::Duration;

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn session_with(white: Vec<Placement>, black: Vec<Placement>) -> Session {
        let mut session = Session::new(Duration::from_millis(100));
        session.load_match(&MatchCreated {
            match_id: MatchId::new("v"),
            white_pieces: white,
            black_pieces: black,
            turn: Color::White,
        });
        session
    }

    fn p(row: u8, col: u8, name: PieceKind, color: Color) -> Placement {
        Placement { row, col, name, color }
    }

    #[test]
    fn test_empty_destination_gets_dot() {
        let mut session = session_with(vec![p(5, 3, PieceKind::Rook, Color::White)], vec![]);
        session.click(c(5, 3));
        session.legal_moves_received(&MatchId::new("v"), c(5, 3), vec![c(3, 3)]);

        let cell = CellView::derive(&session, c(3, 3), 92.0, 0.0);
        assert_eq!(cell.marker, Some(MoveMarker::Dot));
        assert!(!cell.selected);
        assert!(CellView::derive(&session, c(5, 3), 92.0, 0.0).selected);
    }

    #[test]
    fn test_occupied_destination_gets_ring() {
        let mut session = session_with(
            vec![p(5, 3, PieceKind::Rook, Color::White)],
            vec![p(3, 3, PieceKind::Knight, Color::Black)],
        );
        session.click(c(5, 3));
        session.legal_moves_received(&MatchId::new("v"), c(5, 3), vec![c(3, 3)]);

        let cell = CellView::derive(&session, c(3, 3), 92.0, 0.0);
        assert_eq!(cell.marker, Some(MoveMarker::Ring));
        assert_eq!(cell.icon.map(|i| i.glyph), Some('♞'));
    }

    #[test]
    fn test_marker_sizes_scale_with_cell() {
        assert!((MoveMarker::Dot.radius(100.0) - 15.0).abs() < 1e-4);
        assert!((MoveMarker::Ring.radius(100.0) - 45.0).abs() < 1e-4);
        assert!(MoveMarker::Ring.radius(64.0) > MoveMarker::Dot.radius(64.0));
    }

    #[test]
    fn test_board_view_covers_every_cell() {
        let session = session_with(vec![], vec![]);
        let cells = board_view(&session, 50.0, 0.0);
        assert_eq!(cells.len(), 64);
        assert_eq!(cells[0].shade, Shade::Dark);
        assert_eq!(cells[1].shade, Shade::Light);
        assert_eq!(cells[8].shade, Shade::Light);
        assert_eq!(cells[63].shade, Shade::Dark);
    }

    #[test]
    fn test_only_origin_cell_is_offset() {
        let mut session = session_with(vec![p(6, 4, PieceKind::Pawn, Color::White)], vec![]);
        session.click(c(6, 4));
        session.click(c(4, 4));
        session.move_accepted(&MatchId::new("v"), c(6, 4), c(4, 4), MoveOutcome::default());

        let origin = CellView::derive(&session, c(6, 4), 80.0, 1.0);
        assert_eq!(origin.offset, Some((0.0, -160.0)));
        let halfway = CellView::derive(&session, c(6, 4), 80.0, 0.5);
        assert_eq!(halfway.offset, Some((0.0, -80.0)));
        assert_eq!(CellView::derive(&session, c(4, 4), 80.0, 1.0).offset, None);
    }

    #[test]
    fn test_translate_clamps_progress() {
        let moving = MovingPiece {
            start: c(7, 1),
            end: c(5, 2),
            piece: Piece::new(PieceKind::Knight, Color::White),
        };
        assert_eq!(translate(&moving, 10.0, 2.0), (10.0, -20.0));
        assert_eq!(translate(&moving, 10.0, -1.0), (0.0, 0.0));
    }

    #[test]
    fn test_check_glow_only_on_king() {
        let mut session = session_with(
            vec![p(6, 4, PieceKind::Queen, Color::White)],
            vec![p(0, 4, PieceKind::King, Color::Black)],
        );
        session.click(c(6, 4));
        session.click(c(1, 4));
        session.move_accepted(&MatchId::new("v"), c(6, 4), c(1, 4), MoveOutcome { check: Some(c(0, 4)) });

        assert!(CellView::derive(&session, c(0, 4), 50.0, 0.0).in_check);
        assert!(!CellView::derive(&session, c(1, 4), 50.0, 0.0).in_check);
    }
}
