//! A terminal front end for `othello-engine`.
//!
//!  - [`config`] loads console settings from TOML.
//!  - [`console`] parses commands and draws the game.

pub mod config;
pub mod console;
