//! Canvas drawing of the 8x8 board.
//!
//! The canvas is a pure renderer: each square is drawn from its `CellView`,
//! and left clicks are turned into `Message::CellClicked`.

use iced::{
    mouse,
    widget::canvas::{self, event, Frame, Geometry, Path, Program, Stroke},
    Color, Font, Pixels, Point, Rectangle, Renderer, Size, Theme,
};

use board::{
    coord::{Coord, BOARD_DIM},
    icons,
    piece::{self, Piece},
    session::Session,
    view::{board_view, CellView, MoveMarker, Shade, RING_WIDTH},
};

use crate::gui::Message;

const PIECE_FONT: Font = Font::with_name("DejaVu Sans");

const LIGHT_SQUARE: Color = Color { r: 0.871, g: 0.722, b: 0.529, a: 1.0 };
const DARK_SQUARE: Color = Color { r: 0.545, g: 0.353, b: 0.169, a: 1.0 };
const SELECTED_TINT: Color = Color { r: 1.0, g: 0.9, b: 0.2, a: 0.45 };
const LAST_MOVE_TINT: Color = Color { r: 0.6, g: 0.8, b: 0.2, a: 0.35 };
const MARKER: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.25 };
const CHECK_GLOW: Color = Color { r: 0.9, g: 0.1, b: 0.1, a: 0.55 };
const GLYPH_INK: Color = Color { r: 0.08, g: 0.08, b: 0.08, a: 1.0 };

pub struct BoardCanvas<'a> {
    session: &'a Session,
    progress: f32,
}

impl<'a> BoardCanvas<'a> {
    pub fn new(session: &'a Session, progress: f32) -> Self {
        Self { session, progress }
    }
}

fn cell_size(bounds: Rectangle) -> f32 {
    bounds.width.min(bounds.height) / BOARD_DIM as f32
}

impl<'a> Program<Message> for BoardCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let cell = cell_size(bounds);
        let cells = board_view(self.session, cell, self.progress);

        for view in &cells {
            draw_square(&mut frame, view, cell);
        }
        for view in cells.iter().filter(|v| v.offset.is_none()) {
            draw_marker(&mut frame, view, cell);
            draw_occupant(&mut frame, view, cell, (0.0, 0.0));
        }
        // Travelling pieces go last so they pass over everything else.
        for view in &cells {
            if let Some(offset) = view.offset {
                draw_marker(&mut frame, view, cell);
                draw_occupant(&mut frame, view, cell, offset);
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: event::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if let event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(pos) = cursor.position_in(bounds) {
                let cell = cell_size(bounds);
                let col = (pos.x / cell).floor();
                let row = (pos.y / cell).floor();
                if (0.0..BOARD_DIM as f32).contains(&row) && (0.0..BOARD_DIM as f32).contains(&col) {
                    if let Some(at) = Coord::new(row as u8, col as u8) {
                        return (event::Status::Captured, Some(Message::CellClicked(at)));
                    }
                }
            }
        }
        (event::Status::Ignored, None)
    }
}

// --- Cell Drawing Helper Functions ---

fn origin(coord: Coord, cell: f32) -> Point {
    Point::new(coord.col() as f32 * cell, coord.row() as f32 * cell)
}

fn center(coord: Coord, cell: f32) -> Point {
    let top_left = origin(coord, cell);
    Point::new(top_left.x + cell / 2.0, top_left.y + cell / 2.0)
}

fn draw_square(frame: &mut Frame, view: &CellView, cell: f32) {
    let square = Path::rectangle(origin(view.coord, cell), Size::new(cell, cell));
    let base = match view.shade {
        Shade::Light => LIGHT_SQUARE,
        Shade::Dark => DARK_SQUARE,
    };
    frame.fill(&square, base);

    if view.last_move {
        frame.fill(&square, LAST_MOVE_TINT);
    }
    if view.selected {
        frame.fill(&square, SELECTED_TINT);
    }
    if view.in_check {
        let glow = Path::circle(center(view.coord, cell), cell * 0.48);
        frame.fill(&glow, CHECK_GLOW);
    }
}

fn draw_marker(frame: &mut Frame, view: &CellView, cell: f32) {
    let Some(marker) = view.marker else {
        return;
    };
    let at = center(view.coord, cell);
    match marker {
        MoveMarker::Dot => {
            frame.fill(&Path::circle(at, marker.radius(cell)), MARKER);
        }
        MoveMarker::Ring => {
            let width = cell * RING_WIDTH;
            let ring = Path::circle(at, marker.radius(cell) - width / 2.0);
            frame.stroke(&ring, Stroke::default().with_width(width).with_color(MARKER));
        }
    }
}

/// Draws the occupant's glyph. White pieces get a solid white body under the
/// outline glyph so they read as white on both square shades.
fn draw_occupant(frame: &mut Frame, view: &CellView, cell: f32, (dx, dy): (f32, f32)) {
    let (Some(occupant), Some(icon)) = (view.occupant, view.icon) else {
        return;
    };
    let at = center(view.coord, cell);
    let at = Point::new(at.x + dx, at.y + dy);

    if occupant.color == piece::Color::White {
        let body = icons::icon(Piece::new(occupant.kind, piece::Color::Black)).glyph;
        frame.fill_text(glyph_text(body, at, cell, Color::WHITE));
    }
    frame.fill_text(glyph_text(icon.glyph, at, cell, GLYPH_INK));
}

fn glyph_text(glyph: char, position: Point, cell: f32, color: Color) -> canvas::Text {
    canvas::Text {
        content: glyph.to_string(),
        position,
        color,
        size: Pixels(cell * 0.75),
        font: PIECE_FONT,
        horizontal_alignment: iced::alignment::Horizontal::Center,
        vertical_alignment: iced::alignment::Vertical::Center,
        line_height: iced::widget::text::LineHeight::default(),
        shaping: iced::widget::text::Shaping::Advanced,
    }
}
