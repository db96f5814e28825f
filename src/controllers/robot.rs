// src/controllers/robot.rs

use std::collections::HashSet;

use tracing::debug;

use super::{render_grid, ControllerError, Position};
use crate::vm::VirtualMachine;
use crate::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub fn turn_left(self) -> Self {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    fn delta(self) -> Position {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }
}

/// Hull painting robot.
///
/// Protocol: the VM reads the camera (0 black, 1 white) for the panel under
/// the robot, then emits pairs of (colour to paint, turn) where turn 0 is
/// left and 1 is right. After each pair the robot moves one panel forward.
#[derive(Debug, Clone)]
pub struct PaintingRobot {
    vm: VirtualMachine,
    position: Position,
    heading: Heading,
    white: HashSet<Position>,
    painted: HashSet<Position>,
}

impl PaintingRobot {
    /// Robot on an all-black hull, facing up.
    pub fn new(vm: VirtualMachine) -> Self {
        PaintingRobot {
            vm,
            position: (0, 0),
            heading: Heading::Up,
            white: HashSet::new(),
            painted: HashSet::new(),
        }
    }

    /// Same as [`PaintingRobot::new`] but the starting panel is white.
    pub fn starting_on_white(vm: VirtualMachine) -> Self {
        let mut robot = Self::new(vm);
        robot.white.insert(robot.position);
        robot
    }

    /// Drives the VM until it halts.
    pub fn run(&mut self) -> Result<(), ControllerError> {
        while !self.vm.is_terminated() {
            let camera = Value::from(self.white.contains(&self.position));
            self.vm.feed_input(camera)?;
            let output = self.vm.process()?;
            if output.len() % 2 != 0 {
                return Err(ControllerError::UnexpectedOutput { expected: 2, got: output.len() });
            }
            for command in output.chunks_exact(2) {
                self.apply(command[0], command[1])?;
            }
        }
        debug!(painted = self.painted.len(), white = self.white.len(), "robot finished");
        Ok(())
    }

    fn apply(&mut self, colour: Value, turn: Value) -> Result<(), ControllerError> {
        match colour {
            0 => self.white.remove(&self.position),
            1 => self.white.insert(self.position),
            other => return Err(ControllerError::InvalidColor(other)),
        };
        self.painted.insert(self.position);

        self.heading = match turn {
            0 => self.heading.turn_left(),
            1 => self.heading.turn_right(),
            other => return Err(ControllerError::InvalidTurn(other)),
        };
        let (dx, dy) = self.heading.delta();
        self.position = (self.position.0 + dx, self.position.1 + dy);
        Ok(())
    }

    /// Distinct panels painted at least once, whatever the colour.
    pub fn panels_painted(&self) -> usize {
        self.painted.len()
    }

    pub fn is_white(&self, position: Position) -> bool {
        self.white.contains(&position)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// White panels as `#`, everything else as `.`.
    pub fn render(&self) -> String {
        render_grid(self.white.iter(), |p| if self.white.contains(&p) { '#' } else { '.' })
    }
}
