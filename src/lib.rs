//! # gridbot
//!
//! An engine-agnostic state machine for a robot steered across a fixed 5×5 grid.
//!
//! The core is [`RobotState::apply`]: a total, pure transition from a
//! `(Position, Direction)` pair and a [`Command`] to the next pair. Moves
//! saturate at the walls and rotations cycle `N -> E -> S -> W`.
//!
//! Around it sit the pieces a host wires to its UI: an [`InputAdapter`] that
//! turns key presses and button activations into commands, a [`Session`] that
//! owns the live state, and a [`DisplayModel`] projection that renderers read.
//! Scripted runs go through [`ProgramInterpreter`], which reads a
//! [Symbios](https://crates.io/crates/symbios) symbol string like a turtle.

pub mod display;
pub mod error;
pub mod grid;
pub mod input;
pub mod program;
pub mod robot;
pub mod session;

pub use display::*;
pub use error::*;
pub use grid::*;
pub use input::*;
pub use program::*;
pub use robot::*;
pub use session::*;
