//! Mapping raw UI input onto robot commands.
//!
//! A host forwards key presses and button activations as [`InputEvent`]s. An
//! [`InputAdapter`] turns each one into at most one [`Command`]; anything it
//! does not recognise is dropped without error.

use crate::robot::Command;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A keyboard key, named the way browsers report `KeyboardEvent.key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// `"ArrowUp"`.
    ArrowUp,
    /// `"ArrowDown"`.
    ArrowDown,
    /// `"ArrowLeft"`.
    ArrowLeft,
    /// `"ArrowRight"`.
    ArrowRight,
    /// A printable key; case is significant.
    Char(char),
    /// Any other named key (`"Enter"`, `"Shift"`, ...).
    Other(String),
}

impl Key {
    /// Parses a key name such as `"ArrowUp"` or `"w"`.
    ///
    /// Single characters become [`Key::Char`]; unrecognised names are kept
    /// as [`Key::Other`] so they can still be bound.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

/// On-screen buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    /// The "move forward" button.
    MoveForward,
    /// The "rotate clockwise" button.
    RotateClockwise,
    /// The "rotate counter-clockwise" button.
    RotateCounterClockwise,
}

impl Control {
    /// Every button, in display order.
    pub const ALL: [Control; 3] = [
        Control::MoveForward,
        Control::RotateClockwise,
        Control::RotateCounterClockwise,
    ];

    /// Button caption, including its keyboard shortcuts.
    pub fn label(self) -> &'static str {
        match self {
            Control::MoveForward => "Move Forward (↑/W)",
            Control::RotateClockwise => "Rotate CW (→/D)",
            Control::RotateCounterClockwise => "Rotate CCW (←/A)",
        }
    }

    /// The command this button always issues.
    pub fn command(self) -> Command {
        match self {
            Control::MoveForward => Command::MoveForward,
            Control::RotateClockwise => Command::ROTATE_CW,
            Control::RotateCounterClockwise => Command::ROTATE_CCW,
        }
    }
}

/// A single raw interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key press.
    Key(Key),
    /// A button activation.
    Control(Control),
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        InputEvent::Key(key)
    }
}

impl From<Control> for InputEvent {
    fn from(control: Control) -> Self {
        InputEvent::Control(control)
    }
}

/// Turns raw input into commands.
pub trait InputAdapter {
    /// Returns the command for `event`, or `None` to ignore it.
    fn translate(&self, event: &InputEvent) -> Option<Command>;
}

/// Table-driven adapter from keys to commands.
///
/// Buttons always map to their fixed command; keys are looked up in the table.
#[derive(Clone, Debug, Default)]
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl KeyMap {
    /// Creates an empty map. Every key is ignored until bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard bindings: arrows plus `W`/`A`/`D` in either case.
    pub fn standard() -> Self {
        let mappings = [
            (Key::ArrowUp, Command::MoveForward),
            (Key::Char('w'), Command::MoveForward),
            (Key::Char('W'), Command::MoveForward),
            (Key::ArrowRight, Command::ROTATE_CW),
            (Key::Char('d'), Command::ROTATE_CW),
            (Key::Char('D'), Command::ROTATE_CW),
            (Key::ArrowLeft, Command::ROTATE_CCW),
            (Key::Char('a'), Command::ROTATE_CCW),
            (Key::Char('A'), Command::ROTATE_CCW),
        ];

        let mut map = Self::new();
        for (key, command) in mappings {
            map.bind(key, command);
        }
        map
    }

    /// Binds `key` to `command`, returning the previous binding if any.
    pub fn bind(&mut self, key: Key, command: Command) -> Option<Command> {
        self.bindings.insert(key, command)
    }

    /// Removes the binding for `key`, returning it if there was one.
    pub fn unbind(&mut self, key: &Key) -> Option<Command> {
        self.bindings.remove(key)
    }

    /// The command bound to `key`, if any.
    pub fn get(&self, key: &Key) -> Option<Command> {
        self.bindings.get(key).copied()
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no key is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl InputAdapter for KeyMap {
    fn translate(&self, event: &InputEvent) -> Option<Command> {
        let command = match event {
            InputEvent::Key(key) => self.get(key),
            InputEvent::Control(control) => Some(control.command()),
        };
        if command.is_none() {
            tracing::trace!(?event, "input ignored");
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse() {
        assert_eq!(Key::from_name("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_name("w"), Key::Char('w'));
        assert_eq!(Key::from_name("Enter"), Key::Other("Enter".into()));
    }

    #[test]
    fn arrow_down_is_unbound_by_default() {
        let map = KeyMap::standard();
        assert_eq!(map.translate(&Key::ArrowDown.into()), None);
        assert_eq!(map.translate(&Key::Char('s').into()), None);
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn controls_ignore_the_table() {
        let map = KeyMap::new();
        assert!(map.is_empty());
        assert_eq!(
            map.translate(&Control::RotateClockwise.into()),
            Some(Command::ROTATE_CW)
        );
    }

    #[test]
    fn rebinding_replaces() {
        let mut map = KeyMap::standard();
        let w = Key::Char('w');
        let previous = map.bind(w.clone(), Command::ROTATE_CW);
        assert_eq!(previous, Some(Command::MoveForward));
        assert_eq!(map.get(&w), Some(Command::ROTATE_CW));
        assert_eq!(map.unbind(&w), Some(Command::ROTATE_CW));
        assert_eq!(map.translate(&w.into()), None);
    }
}
