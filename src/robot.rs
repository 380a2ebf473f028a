//! Robot state and the transition function that drives it.

use crate::error::GridbotError;
use crate::grid::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operations the robot understands.
///
/// The set is closed: every command applies to every state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Advance one cell along the current heading, stopping at the walls.
    MoveForward,
    /// Turn a quarter turn in place.
    Rotate { clockwise: bool },
}

impl Command {
    /// Quarter turn clockwise.
    pub const ROTATE_CW: Command = Command::Rotate { clockwise: true };
    /// Quarter turn counter-clockwise.
    pub const ROTATE_CCW: Command = Command::Rotate { clockwise: false };

    /// Every distinct command, in the order the controls are laid out.
    pub const ALL: [Command; 3] = [
        Command::MoveForward,
        Command::ROTATE_CW,
        Command::ROTATE_CCW,
    ];

    /// Stable snake-case name, accepted back by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Command::MoveForward => "move",
            Command::Rotate { clockwise: true } => "rotate_cw",
            Command::Rotate { clockwise: false } => "rotate_ccw",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the names from [`Command::name`] plus a few aliases (`cw`, `left`, ...).
impl FromStr for Command {
    type Err = GridbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" | "forward" | "move_forward" => Ok(Command::MoveForward),
            "rotate_cw" | "cw" | "right" => Ok(Command::ROTATE_CW),
            "rotate_ccw" | "ccw" | "left" => Ok(Command::ROTATE_CCW),
            _ => Err(GridbotError::UnknownCommand(s.to_string())),
        }
    }
}

/// The complete robot model: which cell it stands on and where it faces.
///
/// `apply` returns a fresh value; a state is never modified in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotState {
    /// Cell the robot stands on.
    pub position: Position,
    /// Heading the robot faces.
    pub direction: Direction,
}

impl RobotState {
    /// Creates a state from its two parts.
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Computes the state that follows `command`.
    ///
    /// Total and deterministic. A move into a wall leaves the position unchanged.
    #[must_use]
    pub fn apply(self, command: Command) -> Self {
        match command {
            Command::MoveForward => Self {
                position: self.position.step(self.direction),
                ..self
            },
            Command::Rotate { clockwise } => Self {
                direction: self.direction.rotated(clockwise),
                ..self
            },
        }
    }

    /// Folds a sequence of commands over this state, in order.
    #[must_use]
    pub fn apply_all<I>(self, commands: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        commands.into_iter().fold(self, Self::apply)
    }

    /// True when moving forward from here would not change the position.
    pub fn facing_wall(self) -> bool {
        self.apply(Command::MoveForward).position == self.position
    }

    /// Iterates all 100 reachable states.
    pub fn all() -> impl Iterator<Item = RobotState> {
        Position::all()
            .flat_map(|p| Direction::ALL.map(|d| RobotState::new(p, d)))
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.position, self.direction)
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Cell the robot occupies when a session starts.
    pub initial_position: Position,
    /// Heading when a session starts. Defaults to north.
    pub initial_direction: Direction,
    /// Upper bound on the repeat parameter of a program symbol.
    pub max_repeat: u32,
    /// Number of past states a session keeps for undo.
    pub history_limit: usize,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            initial_position: Position::ORIGIN,
            initial_direction: Direction::N,
            max_repeat: 64,
            history_limit: 256,
        }
    }
}

impl RobotConfig {
    /// Default configuration with a different starting heading.
    pub fn facing(direction: Direction) -> Self {
        Self {
            initial_direction: direction,
            ..Default::default()
        }
    }

    /// Rejects settings a session cannot run with.
    pub fn validate(&self) -> Result<(), GridbotError> {
        if self.history_limit == 0 {
            return Err(GridbotError::EmptyHistory);
        }
        Ok(())
    }

    /// The state a session starts in.
    pub fn initial_state(&self) -> RobotState {
        RobotState::new(self.initial_position, self.initial_direction)
    }
}
