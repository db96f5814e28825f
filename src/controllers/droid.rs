// src/controllers/droid.rs

use std::collections::{HashMap, HashSet, VecDeque};
use std::convert::TryFrom;

use tracing::debug;

use super::{render_grid, ControllerError, Position};
use crate::vm::VirtualMachine;
use crate::Value;

const START: Position = (0, 0);

/// Movement commands understood by the droid program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum Direction {
    North = 1,
    South = 2,
    West = 3,
    East = 4,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::West, Direction::East];

    pub fn command(self) -> Value {
        self as Value
    }

    pub fn step(self, (x, y): Position) -> Position {
        match self {
            Direction::North => (x, y - 1),
            Direction::South => (x, y + 1),
            Direction::West => (x - 1, y),
            Direction::East => (x + 1, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Wall,
    Moved,
    FoundOxygen,
}

impl TryFrom<Value> for Status {
    type Error = ControllerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::Wall),
            1 => Ok(Status::Moved),
            2 => Ok(Status::FoundOxygen),
            other => Err(ControllerError::UnknownStatus(other)),
        }
    }
}

/// Everything the droid learned about the area around its start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipMap {
    pub walls: HashSet<Position>,
    pub open: HashSet<Position>,
    pub oxygen: Option<Position>,
}

impl ShipMap {
    /// Length of the shortest path from the start to the oxygen system.
    pub fn steps_to_oxygen(&self) -> Option<usize> {
        let oxygen = self.oxygen?;
        self.distances(START).get(&oxygen).copied()
    }

    /// Minutes for oxygen to spread from the system to every open cell.
    pub fn fill_minutes(&self) -> Option<usize> {
        let oxygen = self.oxygen?;
        self.distances(oxygen).into_values().max()
    }

    /// Breadth-first distances over open cells.
    fn distances(&self, from: Position) -> HashMap<Position, usize> {
        let mut distances = HashMap::from([(from, 0)]);
        let mut frontier = VecDeque::from([from]);
        while let Some(position) = frontier.pop_front() {
            let distance = distances[&position];
            for direction in Direction::ALL {
                let next = direction.step(position);
                if self.open.contains(&next) && !distances.contains_key(&next) {
                    distances.insert(next, distance + 1);
                    frontier.push_back(next);
                }
            }
        }
        distances
    }

    pub fn render(&self) -> String {
        let known = self.walls.iter().chain(self.open.iter());
        render_grid(known, |p| {
            if self.walls.contains(&p) {
                '#'
            } else if Some(p) == self.oxygen {
                'O'
            } else if p == START {
                'S'
            } else if self.open.contains(&p) {
                '.'
            } else {
                ' '
            }
        })
    }
}

/// Remote-controlled repair droid.
///
/// Each movement command yields exactly one status code. Exploration forks
/// the VM at every open cell, so no backtracking moves are ever sent.
#[derive(Debug, Clone)]
pub struct RepairDroid {
    vm: VirtualMachine,
}

impl RepairDroid {
    pub fn new(vm: VirtualMachine) -> Self {
        RepairDroid { vm }
    }

    /// Maps every cell reachable from the start.
    pub fn explore(&self) -> Result<ShipMap, ControllerError> {
        let mut map = ShipMap::default();
        map.open.insert(START);
        let mut queue = VecDeque::from([(START, self.vm.clone())]);

        while let Some((position, vm)) = queue.pop_front() {
            for direction in Direction::ALL {
                let next = direction.step(position);
                if map.open.contains(&next) || map.walls.contains(&next) {
                    continue;
                }

                let mut forked = vm.clone();
                forked.feed_input(direction.command())?;
                let status = match forked.process()?.as_slice() {
                    &[status] => Status::try_from(status)?,
                    other => {
                        return Err(ControllerError::UnexpectedOutput { expected: 1, got: other.len() })
                    }
                };

                match status {
                    Status::Wall => {
                        map.walls.insert(next);
                    }
                    Status::Moved | Status::FoundOxygen => {
                        if status == Status::FoundOxygen {
                            debug!(?next, "oxygen system located");
                            map.oxygen = Some(next);
                        }
                        map.open.insert(next);
                        queue.push_back((next, forked));
                    }
                }
            }
        }

        debug!(open = map.open.len(), walls = map.walls.len(), "exploration finished");
        Ok(map)
    }
}
