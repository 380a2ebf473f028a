//! The host-side owner of the robot state.

use crate::display::DisplayModel;
use crate::error::GridbotError;
use crate::input::{InputAdapter, InputEvent};
use crate::robot::{Command, RobotConfig, RobotState};
use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

/// Holds the single live [`RobotState`] and applies commands to it in order.
///
/// Each call to [`submit`](Self::submit) completes before the next one is
/// accepted. Hosts that receive commands on several threads funnel them
/// through one channel and call [`drain`](Self::drain) on the owning thread.
#[derive(Clone, Debug)]
pub struct Session {
    config: RobotConfig,
    state: RobotState,
    history: VecDeque<RobotState>,
}

impl Session {
    /// Starts a session in the configured initial state.
    pub fn new(config: RobotConfig) -> Result<Self, GridbotError> {
        config.validate()?;
        let state = config.initial_state();
        tracing::debug!(%state, "session started");
        Ok(Self {
            history: VecDeque::with_capacity(config.history_limit.min(64)),
            config,
            state,
        })
    }

    /// Current state snapshot.
    pub fn state(&self) -> RobotState {
        self.state
    }

    /// Configuration the session was started with.
    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Projection of the current state for renderers.
    pub fn display(&self) -> DisplayModel {
        DisplayModel::project(&self.state)
    }

    /// Applies `command` and returns the new state.
    pub fn submit(&mut self, command: Command) -> RobotState {
        let before = self.state;
        let after = before.apply(command);
        if command == Command::MoveForward && after == before {
            tracing::debug!(state = %before, "move blocked by wall");
        }
        tracing::trace!(%command, %before, %after, "command applied");

        if self.history.len() == self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(before);
        self.state = after;
        after
    }

    /// Routes a raw input event through `adapter`.
    ///
    /// Returns the new state, or `None` when the adapter ignored the event.
    pub fn handle<A>(&mut self, adapter: &A, event: &InputEvent) -> Option<RobotState>
    where
        A: InputAdapter + ?Sized,
    {
        adapter.translate(event).map(|command| self.submit(command))
    }

    /// Applies every command from `commands` in arrival order until the
    /// channel is closed. Returns the number applied.
    pub fn drain(&mut self, commands: &Receiver<Command>) -> usize {
        let mut applied = 0;
        for command in commands.iter() {
            self.submit(command);
            applied += 1;
        }
        applied
    }

    /// Like [`drain`](Self::drain) but returns as soon as the channel is empty.
    pub fn drain_pending(&mut self, commands: &Receiver<Command>) -> usize {
        let mut applied = 0;
        for command in commands.try_iter() {
            self.submit(command);
            applied += 1;
        }
        applied
    }

    /// Steps back to the state before the last command.
    pub fn undo(&mut self) -> Option<RobotState> {
        let previous = self.history.pop_back()?;
        tracing::trace!(from = %self.state, to = %previous, "undo");
        self.state = previous;
        Some(previous)
    }

    /// Number of states available to [`undo`](Self::undo).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns to the configured starting state and forgets history.
    pub fn reset(&mut self) -> RobotState {
        self.history.clear();
        self.state = self.config.initial_state();
        tracing::debug!(state = %self.state, "session reset");
        self.state
    }
}
