//! Piece identities as the match service spells them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Side of a piece. Serialized as `WHITE` / `BLACK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    White,
    Black,
}

/// An occupant of a square. Replaced as a whole, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "name")]
    pub kind: PieceKind,
    pub color: Color,
}

impl Color {
    /// Get the side that moves after this one.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling() {
        let piece: Piece = serde_json::from_str(r#"{"name":"Knight","color":"BLACK"}"#).unwrap();
        assert_eq!(piece, Piece::new(PieceKind::Knight, Color::Black));

        let json = serde_json::to_string(&Piece::new(PieceKind::Queen, Color::White)).unwrap();
        assert_eq!(json, r#"{"name":"Queen","color":"WHITE"}"#);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent().opponent(), Color::Black);
    }
}
