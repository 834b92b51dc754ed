//! Board state, view derivation and match-service client for the chessboard front-ends.
//!
//! The crate owns no chess rules. Legality, check detection and turn order come
//! from the remote match service; this crate mirrors what the service reports and
//! turns player clicks into service calls.

pub mod api;
pub mod board_state;
pub mod config;
pub mod coord;
pub mod error;
pub mod icons;
pub mod piece;
pub mod session;
pub mod sound;
pub mod view;

pub use error::{Error, Result};
