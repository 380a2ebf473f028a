//! Grid geometry: the bounded cell coordinates and the four compass headings.

use crate::error::GridbotError;
use bevy_math::CompassQuadrant;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells along each side of the square grid.
pub const GRID_SIZE: i32 = 5;

/// Largest valid coordinate on either axis.
pub const GRID_MAX: i32 = GRID_SIZE - 1;

/// Total number of cells on the grid.
pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// A cell on the grid.
///
/// Origin is the top-left cell, `x` grows rightward and `y` grows downward.
/// Both coordinates always lie in `0..=GRID_MAX`. Every constructor keeps
/// that bound: [`Position::new`] and `TryFrom<IVec2>` reject off-grid input,
/// [`Position::clamped`] saturates it, deserialization fails on it, and
/// `Default` is the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    x: i32,
    y: i32,
}

#[derive(Serialize, Deserialize)]
struct RawPosition {
    x: i32,
    y: i32,
}

impl TryFrom<RawPosition> for Position {
    type Error = GridbotError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.x, raw.y).ok_or(GridbotError::PositionOutOfBounds {
            x: raw.x,
            y: raw.y,
            size: GRID_SIZE,
        })
    }
}

impl From<Position> for RawPosition {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Returns the position at `(x, y)`, or `None` if either coordinate is off the grid.
    pub fn new(x: i32, y: i32) -> Option<Self> {
        if Self::in_bounds(x, y) {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Returns the position at `(x, y)` with each axis saturated into `0..=GRID_MAX`.
    pub fn clamped(x: i32, y: i32) -> Self {
        Self::from_ivec2_clamped(IVec2::new(x, y))
    }

    /// Clamps an arbitrary vector onto the grid, axis by axis.
    pub fn from_ivec2_clamped(v: IVec2) -> Self {
        let c = v.clamp(IVec2::ZERO, IVec2::splat(GRID_MAX));
        Self { x: c.x, y: c.y }
    }

    /// True when `(x, y)` names a cell on the grid.
    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..=GRID_MAX).contains(&x) && (0..=GRID_MAX).contains(&y)
    }

    /// Column, counted from the left edge.
    pub fn x(self) -> i32 {
        self.x
    }

    /// Row, counted from the top edge.
    pub fn y(self) -> i32 {
        self.y
    }

    /// This cell as a `glam` vector.
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Row-major index of this cell, `y * GRID_SIZE + x`.
    pub fn cell_index(self) -> usize {
        (self.y * GRID_SIZE + self.x) as usize
    }

    /// Inverse of [`cell_index`](Self::cell_index).
    pub fn from_cell_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let i = index as i32;
        Self::new(i % GRID_SIZE, i / GRID_SIZE)
    }

    /// The neighbouring cell one step towards `direction`, saturated at the walls.
    pub fn step(self, direction: Direction) -> Self {
        Self::from_ivec2_clamped(self.as_ivec2() + direction.delta())
    }

    /// Iterates every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Position { x, y }))
    }
}

/// Checked conversion; off-grid vectors yield [`GridbotError::PositionOutOfBounds`].
impl TryFrom<IVec2> for Position {
    type Error = GridbotError;

    fn try_from(v: IVec2) -> Result<Self, Self::Error> {
        RawPosition { x: v.x, y: v.y }.try_into()
    }
}

impl From<Position> for IVec2 {
    fn from(p: Position) -> Self {
        p.as_ivec2()
    }
}

/// Formats as `(x, y)`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Robot heading.
///
/// The headings form the cycle `N -> E -> S -> W -> N`; clockwise rotation
/// walks it forwards, counter-clockwise backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// North, towards row 0.
    #[default]
    N,
    /// East, towards the last column.
    E,
    /// South, towards the last row.
    S,
    /// West, towards column 0.
    W,
}

impl Direction {
    /// All headings in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Position of this heading in [`Direction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Direction::N => 0,
            Direction::E => 1,
            Direction::S => 2,
            Direction::W => 3,
        }
    }

    /// Heading at `index` in the clockwise cycle, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The heading one quarter turn away.
    pub fn rotated(self, clockwise: bool) -> Self {
        // +4 keeps the operand non-negative for the counter-clockwise case.
        let offset: isize = if clockwise { 1 } else { -1 };
        let idx = (self.index() as isize + offset + 4) % 4;
        Self::from_index(idx as usize)
    }

    /// The heading a half turn away.
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Unit displacement in grid space (y grows downward).
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::N => IVec2::new(0, -1),
            Direction::E => IVec2::new(1, 0),
            Direction::S => IVec2::new(0, 1),
            Direction::W => IVec2::new(-1, 0),
        }
    }

    /// Single-letter name, as shown in the robot's cell.
    pub fn letter(self) -> char {
        match self {
            Direction::N => 'N',
            Direction::E => 'E',
            Direction::S => 'S',
            Direction::W => 'W',
        }
    }

    /// Clockwise rotation of a north-pointing glyph, in degrees.
    pub fn degrees(self) -> u16 {
        self.index() as u16 * 90
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Accepts a letter or full name in any case, e.g. `"N"` or `"north"`.
impl FromStr for Direction {
    type Err = GridbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::N),
            "e" | "east" => Ok(Direction::E),
            "s" | "south" => Ok(Direction::S),
            "w" | "west" => Ok(Direction::W),
            _ => Err(GridbotError::UnknownDirection(s.to_string())),
        }
    }
}

/// Maps each heading onto the quadrant of the same name.
impl From<Direction> for CompassQuadrant {
    fn from(d: Direction) -> Self {
        match d {
            Direction::N => CompassQuadrant::North,
            Direction::E => CompassQuadrant::East,
            Direction::S => CompassQuadrant::South,
            Direction::W => CompassQuadrant::West,
        }
    }
}

/// Inverse of the `Direction` to `CompassQuadrant` mapping.
impl From<CompassQuadrant> for Direction {
    fn from(q: CompassQuadrant) -> Self {
        match q {
            CompassQuadrant::North => Direction::N,
            CompassQuadrant::East => Direction::E,
            CompassQuadrant::South => Direction::S,
            CompassQuadrant::West => Direction::W,
        }
    }
}
