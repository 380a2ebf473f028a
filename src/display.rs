//! Read-only projection of the robot state for renderers.
//!
//! [`DisplayModel::project`] derives everything a view needs (highlighted
//! cell, heading glyph rotation) from a [`RobotState`] without touching it.
//! A [`Renderer`] turns the model into its own output type.

use crate::grid::{CELL_COUNT, Direction, GRID_SIZE, Position};
use crate::robot::RobotState;
use serde::{Deserialize, Serialize};

/// What a view needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    /// Cell the robot occupies.
    pub robot_cell: Position,
    /// Row-major index of `robot_cell` among the 25 cells.
    pub robot_index: usize,
    /// Heading shown in the robot's cell.
    pub heading: Direction,
    /// Clockwise rotation applied to a north-pointing heading glyph.
    pub glyph_degrees: u16,
}

/// One grid cell as seen by a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    /// Coordinates of this cell.
    pub position: Position,
    /// Row-major index of this cell.
    pub index: usize,
    /// Heading of the robot if it stands on this cell.
    pub robot: Option<Direction>,
}

impl DisplayModel {
    /// Derives the view data for `state`.
    pub fn project(state: &RobotState) -> Self {
        Self {
            robot_cell: state.position,
            robot_index: state.position.cell_index(),
            heading: state.direction,
            glyph_degrees: state.direction.degrees(),
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        Position::all().map(move |position| CellView {
            position,
            index: position.cell_index(),
            robot: (position == self.robot_cell).then_some(self.heading),
        })
    }
}

impl From<&RobotState> for DisplayModel {
    fn from(state: &RobotState) -> Self {
        Self::project(state)
    }
}

/// Draws a [`DisplayModel`].
pub trait Renderer {
    /// What a rendered frame looks like to the host.
    type Output;

    /// Draws one frame.
    fn render(&mut self, model: &DisplayModel) -> Self::Output;
}

/// Renders the grid as text, one line per row.
///
/// The robot's cell shows its heading letter, every other cell shows `empty`.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Glyph for cells without the robot.
    pub empty: char,
    /// Placed between cells of a row; `None` packs them together.
    pub separator: Option<char>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            empty: '.',
            separator: Some(' '),
        }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&mut self, model: &DisplayModel) -> String {
        let width = GRID_SIZE as usize;
        let mut out = String::with_capacity(CELL_COUNT * 2 + width);
        for cell in model.cells() {
            let col = cell.index % width;
            if col > 0
                && let Some(sep) = self.separator
            {
                out.push(sep);
            }
            out.push(cell.robot.map(Direction::letter).unwrap_or(self.empty));
            if col == width - 1 {
                out.push('\n');
            }
        }
        out
    }
}
