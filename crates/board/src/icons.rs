//! Piece artwork: an SVG per colour and kind, plus a Unicode glyph for text renderers.

use crate::piece::{Color, Piece, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceIcon {
    pub glyph: char,
    pub svg: &'static str,
}

macro_rules! svg_asset {
    ($name:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/pieces/", $name, ".svg"))
    };
}

/// Icon lookup for a piece. Every colour/kind pair has artwork.
pub fn icon(piece: Piece) -> PieceIcon {
    PieceIcon { glyph: glyph(piece), svg: svg(piece) }
}

fn glyph(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

fn svg(piece: Piece) -> &'static str {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => svg_asset!("white_king"),
        (Color::White, PieceKind::Queen) => svg_asset!("white_queen"),
        (Color::White, PieceKind::Rook) => svg_asset!("white_rook"),
        (Color::White, PieceKind::Bishop) => svg_asset!("white_bishop"),
        (Color::White, PieceKind::Knight) => svg_asset!("white_knight"),
        (Color::White, PieceKind::Pawn) => svg_asset!("white_pawn"),
        (Color::Black, PieceKind::King) => svg_asset!("black_king"),
        (Color::Black, PieceKind::Queen) => svg_asset!("black_queen"),
        (Color::Black, PieceKind::Rook) => svg_asset!("black_rook"),
        (Color::Black, PieceKind::Bishop) => svg_asset!("black_bishop"),
        (Color::Black, PieceKind::Knight) => svg_asset!("black_knight"),
        (Color::Black, PieceKind::Pawn) => svg_asset!("black_pawn"),
    }
}
