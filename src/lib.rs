//! Catch-the-raindrops arcade game.
//!
//! The library holds the frame-driven simulation and the mode state machine.
//! Drawing, audio, input and time all come in through small traits so the
//! whole core can be driven deterministically from tests. The terminal front
//! end (`terminal` here, plus `main.rs`) is one implementation of those
//! collaborators.

pub mod audio;
pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod modes;
pub mod render;
pub mod terminal;
