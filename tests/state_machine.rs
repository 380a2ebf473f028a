// tests/state_machine.rs
use gridbot::{Command, Direction, GRID_MAX, Position, RobotState};
use std::collections::{HashSet, VecDeque};

fn at(x: i32, y: i32, d: Direction) -> RobotState {
    RobotState::new(Position::new(x, y).unwrap(), d)
}

#[test]
fn test_every_state_is_reachable() {
    assert_eq!(RobotState::all().count(), 100);
    assert_eq!(RobotState::all().collect::<HashSet<_>>().len(), 100);
}

#[test]
fn test_transitions_stay_on_grid() {
    for state in RobotState::all() {
        for command in Command::ALL {
            let next = state.apply(command).position;
            let on_grid = (0..=GRID_MAX).contains(&next.x())
                && (0..=GRID_MAX).contains(&next.y());
            assert!(on_grid, "{state} -> {next}");
        }
    }
}

#[test]
fn test_long_walk_stays_on_grid() {
    // Fixed pseudo-random command stream (LCG) so the walk is reproducible.
    let mut seed: u32 = 0x2545_f491;
    let mut state = RobotState::default();
    for _ in 0..10_000 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let command = Command::ALL[(seed >> 16) as usize % 3];
        state = state.apply(command);
        assert!(Position::in_bounds(state.position.x(), state.position.y()));
    }
}

#[test]
fn test_move_north_at_origin_is_clamped() {
    let start = at(0, 0, Direction::N);
    assert_eq!(start.apply(Command::MoveForward), start);
}

#[test]
fn test_move_east_from_center() {
    let start = at(2, 2, Direction::E);
    assert_eq!(start.apply(Command::MoveForward), at(3, 2, Direction::E));
}

#[test]
fn test_four_clockwise_turns_are_identity() {
    for state in RobotState::all() {
        let end = state.apply_all([Command::ROTATE_CW; 4]);
        assert_eq!(end, state);
    }
}

#[test]
fn test_counter_rotation_undoes_rotation() {
    for state in RobotState::all() {
        let there_and_back = [Command::ROTATE_CW, Command::ROTATE_CCW];
        assert_eq!(state.apply_all(there_and_back), state);

        let back_and_there = [Command::ROTATE_CCW, Command::ROTATE_CW];
        assert_eq!(state.apply_all(back_and_there), state);
    }
}

#[test]
fn test_apply_is_deterministic() {
    for state in RobotState::all() {
        for command in Command::ALL {
            assert_eq!(state.apply(command), state.apply(command));
        }
    }
}

#[test]
fn test_command_order_matters() {
    let start = at(0, 0, Direction::N);
    assert_eq!(
        start.apply_all([Command::ROTATE_CW, Command::MoveForward]),
        at(1, 0, Direction::E)
    );
    assert_eq!(
        start.apply_all([Command::MoveForward, Command::ROTATE_CW]),
        at(0, 0, Direction::E)
    );
}

#[test]
fn test_state_graph_is_strongly_connected() {
    for start in RobotState::all() {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            for command in Command::ALL {
                let next = state.apply(command);
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(seen.len(), 100, "not everything reachable from {start}");
    }
}
