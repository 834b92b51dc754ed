//! Board coordinates and the "row-col" keys the board map is indexed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const BOARD_DIM: u8 = 8;
pub const CELL_COUNT: usize = 64;

/// A square on the 8x8 grid. Row and column are both in `0..8`.
///
/// On the wire a coordinate travels as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[i64; 2]", into = "[i64; 2]")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Creates a coordinate, or `None` when either component is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_DIM && col < BOARD_DIM).then_some(Self { row, col })
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self {
            row: (index / BOARD_DIM as usize) as u8,
            col: (index % BOARD_DIM as usize) as u8,
        })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major index in `0..64`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_DIM as usize + self.col as usize
    }

    /// The `"row-col"` key used by the board map.
    pub fn key(self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Squares with an even `row + col` are the dark ones, so the corner at 0-0 is dark.
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// All 64 coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).filter_map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for Coord {
    type Err = Error;

    /// Parses a `"row-col"` key.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (row, col) = key
            .split_once('-')
            .ok_or_else(|| Error::InvalidCoord(key.to_string()))?;
        let row: u8 = row.trim().parse().map_err(|_| Error::InvalidCoord(key.to_string()))?;
        let col: u8 = col.trim().parse().map_err(|_| Error::InvalidCoord(key.to_string()))?;
        Coord::new(row, col).ok_or_else(|| Error::InvalidCoord(key.to_string()))
    }
}

impl TryFrom<[i64; 2]> for Coord {
    type Error = Error;

    fn try_from([row, col]: [i64; 2]) -> Result<Self, Self::Error> {
        u8::try_from(row)
            .ok()
            .zip(u8::try_from(col).ok())
            .and_then(|(r, c)| Coord::new(r, c))
            .ok_or_else(|| Error::InvalidCoord(format!("[{row}, {col}]")))
    }
}

impl From<Coord> for [i64; 2] {
    fn from(coord: Coord) -> Self {
        [coord.row as i64, coord.col as i64]
    }
}
