//! `othello-engine` is a rules engine for two-player Othello on a fixed 8x8 board.
//!
//! This package is split into a few layers:
//!
//!  - [`BoardState`] owns the grid of [`Cell`]s and nothing else.
//!  - [`validator`] holds the pure move rules: legality, captures, and mobility.
//!  - [`Game`] drives turns, detects the end of the game, and is the surface a UI talks to.
//!    [`SharedGame`] wraps it for use across threads.
//!  - [`persistence`] reads and writes the plain-text save format.

pub mod persistence;
pub mod test_utils;
pub mod validator;

mod board;
mod error;
mod game;
mod location;
mod shared;

pub use board::*;
pub use error::*;
pub use game::*;
pub use location::*;
pub use shared::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
