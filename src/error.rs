//! Errors raised at the fallible edges of the crate.
//!
//! The transition function itself never fails; these only surface when
//! parsing text, validating configuration, or building programs.

/// Errors produced while parsing input or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridbotError {
    /// Text did not name a heading.
    #[error("unknown direction '{0}' (expected one of N, E, S, W)")]
    UnknownDirection(String),

    /// Text did not name a command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Coordinates fell outside the grid.
    #[error("position ({x}, {y}) lies outside the {size}x{size} grid")]
    PositionOutOfBounds { x: i32, y: i32, size: i32 },

    /// A session was configured to keep no history.
    #[error("history limit must be at least 1")]
    EmptyHistory,

    /// Symbios refused to intern or store a program symbol.
    #[error("failed to register program symbol '{0}'")]
    SymbolRegistration(String),

    /// Program text could not be parsed; `offset` is a byte index.
    #[error("malformed program at offset {offset}: {message}")]
    MalformedProgram { offset: usize, message: String },
}
