//! Interpreter that drives the robot from a Symbios symbol string.
//!
//! The entry point is [`ProgramInterpreter`]. Register symbol-to-operation
//! mappings via [`ProgramInterpreter::set_op`] or
//! [`ProgramInterpreter::populate_standard_symbols`], then call
//! [`ProgramInterpreter::run`] or [`ProgramInterpreter::trace`] with a
//! [`symbios::SymbiosState`]. [`ProgramBuilder`] assembles such a state from
//! compact text like `f(3)+f-f`.

use crate::error::GridbotError;
use crate::robot::{Command, RobotConfig, RobotState};
use std::iter;
use symbios::{SymbiosState, SymbolTable};

/// What a single program symbol does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramOp {
    /// Move forward (`f`).
    Move,
    /// Quarter turn (`+` clockwise, `-` counter-clockwise).
    Turn { clockwise: bool },
    /// Half turn (`|`).
    TurnAround,
    /// Symbol has no registered meaning.
    Ignore,
}

impl ProgramOp {
    fn commands(self) -> &'static [Command] {
        match self {
            ProgramOp::Move => &[Command::MoveForward],
            ProgramOp::Turn { clockwise: true } => &[Command::ROTATE_CW],
            ProgramOp::Turn { clockwise: false } => &[Command::ROTATE_CCW],
            ProgramOp::TurnAround => &[Command::ROTATE_CW, Command::ROTATE_CW],
            ProgramOp::Ignore => &[],
        }
    }
}

/// Standard symbol table used by [`ProgramInterpreter::populate_standard_symbols`].
pub const STANDARD_SYMBOLS: [(&str, ProgramOp); 4] = [
    ("f", ProgramOp::Move),
    ("+", ProgramOp::Turn { clockwise: true }),
    ("-", ProgramOp::Turn { clockwise: false }),
    ("|", ProgramOp::TurnAround),
];

/// Interprets a symbol string as a sequence of robot commands.
pub struct ProgramInterpreter {
    op_map: Vec<ProgramOp>,
    config: RobotConfig,
}

impl ProgramInterpreter {
    /// Creates an interpreter with an empty symbol map.
    pub fn new(config: RobotConfig) -> Self {
        Self {
            op_map: Vec::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-operation map (builder pattern).
    ///
    /// `map` is indexed by symbol ID; IDs past its end are [`ProgramOp::Ignore`].
    pub fn with_map(mut self, map: Vec<ProgramOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns an operation to a symbol ID, growing the map with
    /// [`ProgramOp::Ignore`] as needed.
    pub fn set_op(&mut self, sym_id: u16, op: ProgramOp) {
        let idx = sym_id as usize;
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, ProgramOp::Ignore);
        }
        self.op_map[idx] = op;
    }

    /// Registers [`STANDARD_SYMBOLS`] for every one present in `interner`.
    pub fn populate_standard_symbols(&mut self, interner: &SymbolTable) {
        for (sym, op) in STANDARD_SYMBOLS {
            if let Some(id) = interner.resolve_id(sym) {
                self.set_op(id, op);
            }
        }
    }

    /// Expands `program` into the flat command sequence it denotes.
    ///
    /// The first parameter of a symbol, if any, is a repeat count. It is
    /// rounded, capped at `max_repeat`, and a count of zero or less drops
    /// the symbol. Unmapped symbols are ignored. Commands are produced one
    /// at a time, so large repeat counts never materialize in memory.
    pub fn commands<'a>(
        &'a self,
        program: &'a SymbiosState,
    ) -> impl Iterator<Item = Command> + 'a {
        (0..program.len())
            .map_while(move |i| program.get_view(i))
            .flat_map(move |view| {
                let op = self
                    .op_map
                    .get(view.sym as usize)
                    .copied()
                    .unwrap_or(ProgramOp::Ignore);

                let repeat = view
                    .params
                    .first()
                    .map(|&x| x.round() as i64)
                    .unwrap_or(1)
                    .clamp(0, i64::from(self.config.max_repeat));

                iter::repeat_n(op.commands(), repeat as usize)
                    .flatten()
                    .copied()
            })
    }

    /// Runs `program` from `start` and returns the final state.
    pub fn run(&self, start: RobotState, program: &SymbiosState) -> RobotState {
        start.apply_all(self.commands(program))
    }

    /// Runs `program` from `start`, yielding every state visited.
    ///
    /// The first item is `start`; one more follows per executed command.
    pub fn trace<'a>(
        &'a self,
        start: RobotState,
        program: &'a SymbiosState,
    ) -> impl Iterator<Item = RobotState> + 'a {
        let steps = self.commands(program).scan(start, |state, command| {
            *state = state.apply(command);
            Some(*state)
        });
        iter::once(start).chain(steps)
    }
}

/// Assembles a [`SymbiosState`] and its [`SymbolTable`] from symbols.
pub struct ProgramBuilder {
    interner: SymbolTable,
    state: SymbiosState,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    /// Starts an empty program.
    pub fn new() -> Self {
        Self {
            interner: SymbolTable::new(),
            state: SymbiosState::new(),
        }
    }

    /// Appends `symbol` with `params`, interning it on first use.
    pub fn push(&mut self, symbol: &str, params: &[f64]) -> Result<&mut Self, GridbotError> {
        let id = match self.interner.resolve_id(symbol) {
            Some(id) => id,
            None => {
                self.interner
                    .intern(symbol)
                    .map_err(|_| GridbotError::SymbolRegistration(symbol.to_string()))?;
                self.interner
                    .resolve_id(symbol)
                    .ok_or_else(|| GridbotError::SymbolRegistration(symbol.to_string()))?
            }
        };
        self.state
            .push(id, 0.0, params)
            .map_err(|_| GridbotError::SymbolRegistration(symbol.to_string()))?;
        Ok(self)
    }

    /// Parses compact program text.
    ///
    /// Each non-whitespace character is a symbol, optionally followed by a
    /// parenthesised repeat count: `f(3)+f-f`.
    pub fn parse(text: &str) -> Result<Self, GridbotError> {
        let mut builder = Self::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c.is_whitespace() {
                continue;
            }
            if c == '(' || c == ')' {
                return Err(GridbotError::MalformedProgram {
                    offset,
                    message: format!("unexpected '{c}'"),
                });
            }

            let mut params = Vec::new();
            if let Some(&(open, '(')) = chars.peek() {
                chars.next();
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, ')')) => break,
                        Some((_, d)) => digits.push(d),
                        None => {
                            return Err(GridbotError::MalformedProgram {
                                offset: open,
                                message: "unclosed '('".to_string(),
                            });
                        }
                    }
                }
                let value: f64 = digits.trim().parse().map_err(|_| {
                    GridbotError::MalformedProgram {
                        offset: open,
                        message: format!("invalid parameter '{digits}'"),
                    }
                })?;
                params.push(value);
            }

            let mut buf = [0u8; 4];
            builder.push(c.encode_utf8(&mut buf), &params)?;
        }

        Ok(builder)
    }

    /// Symbols interned so far.
    pub fn interner(&self) -> &SymbolTable {
        &self.interner
    }

    /// The assembled symbol string.
    pub fn state(&self) -> &SymbiosState {
        &self.state
    }

    /// Builds an interpreter with the standard symbols of this program registered.
    pub fn interpreter(&self, config: RobotConfig) -> ProgramInterpreter {
        let mut interpreter = ProgramInterpreter::new(config);
        interpreter.populate_standard_symbols(&self.interner);
        interpreter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, Position};

    fn run(text: &str) -> RobotState {
        let program = ProgramBuilder::parse(text).unwrap();
        program
            .interpreter(RobotConfig::default())
            .run(RobotState::default(), program.state())
    }

    #[test]
    fn turn_then_move() {
        let end = run("+f");
        assert_eq!(end.position, Position::new(1, 0).unwrap());
        assert_eq!(end.direction, Direction::E);
    }

    #[test]
    fn repeat_parameter_saturates_at_wall() {
        let end = run("+f(9)");
        assert_eq!(end.position, Position::new(4, 0).unwrap());
    }

    #[test]
    fn zero_repeat_drops_symbol() {
        let expected = RobotState::new(Position::ORIGIN, Direction::E);
        assert_eq!(run("+f(0)"), expected);
    }

    #[test]
    fn turn_around_and_unknown_symbols() {
        let end = run("|x f f");
        let expected = RobotState::new(Position::new(0, 2).unwrap(), Direction::S);
        assert_eq!(end, expected);
    }

    #[test]
    fn custom_map_replaces_standard_symbols() {
        let program = ProgramBuilder::parse("f").unwrap();
        let f = program.interner().resolve_id("f").unwrap() as usize;
        let mut map = vec![ProgramOp::Ignore; f + 1];
        map[f] = ProgramOp::TurnAround;

        let config = RobotConfig::default();
        let interpreter = ProgramInterpreter::new(config).with_map(map);
        let end = interpreter.run(RobotState::default(), program.state());
        assert_eq!(end, RobotState::new(Position::ORIGIN, Direction::S));
    }

    #[test]
    fn repeat_is_capped() {
        let program = ProgramBuilder::parse("+(1000)").unwrap();
        let config = RobotConfig {
            max_repeat: 5,
            ..Default::default()
        };
        let interpreter = program.interpreter(config);
        assert_eq!(interpreter.commands(program.state()).count(), 5);
    }

    #[test]
    fn huge_repeat_is_streamed() {
        let program = ProgramBuilder::parse("f(4e9)").unwrap();
        let config = RobotConfig {
            max_repeat: u32::MAX,
            ..Default::default()
        };
        let interpreter = program.interpreter(config);
        let mut commands = interpreter.commands(program.state());
        assert_eq!(commands.next(), Some(Command::MoveForward));
        assert_eq!(commands.take(99).count(), 99);
    }

    #[test]
    fn trace_includes_start() {
        let program = ProgramBuilder::parse("f(2)").unwrap();
        let start = RobotState::new(Position::new(2, 4).unwrap(), Direction::N);
        let interpreter = program.interpreter(RobotConfig::default());
        let states: Vec<_> = interpreter.trace(start, program.state()).collect();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], start);
        assert_eq!(states[2].position, Position::new(2, 2).unwrap());
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            ProgramBuilder::parse("f(2"),
            Err(GridbotError::MalformedProgram { .. })
        ));
        assert!(matches!(
            ProgramBuilder::parse("f(x)"),
            Err(GridbotError::MalformedProgram { .. })
        ));
        assert!(matches!(
            ProgramBuilder::parse(")"),
            Err(GridbotError::MalformedProgram { offset: 0, .. })
        ));
    }
}
