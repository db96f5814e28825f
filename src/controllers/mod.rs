// src/controllers/mod.rs

//! Interactive controllers layered on raw VM output.
//!
//! The VM only hands back flat batches of integers. Each controller here owns
//! one [`VirtualMachine`](crate::vm::VirtualMachine), answers the input it is
//! blocked on, and reads the output batch in its own record shape: colour and
//! turn pairs for the robot, tile triples for the arcade, one status code per
//! move for the droid.

pub mod arcade;
pub mod droid;
pub mod robot;

use itertools::Itertools;
use thiserror::Error;

use crate::error::VmError;
use crate::Value;

pub use arcade::{Arcade, Joystick, Tile};
pub use droid::{Direction, RepairDroid, ShipMap};
pub use robot::{Heading, PaintingRobot};

/// Grid coordinate, `y` growing downwards.
pub type Position = (Value, Value);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Vm(#[from] VmError),

    /// The batch length does not split into whole records.
    #[error("expected output in records of {expected} values, got {got} values")]
    UnexpectedOutput { expected: usize, got: usize },

    #[error("unknown tile id {0}")]
    UnknownTile(Value),

    #[error("unknown droid status {0}")]
    UnknownStatus(Value),

    #[error("invalid turn instruction {0}")]
    InvalidTurn(Value),

    #[error("invalid paint colour {0}")]
    InvalidColor(Value),

    #[error("no {0} on screen")]
    MissingTile(&'static str),
}

/// Draws the bounding box of `cells`, one text row per `y`.
pub(crate) fn render_grid<'a>(
    cells: impl Iterator<Item = &'a Position> + Clone,
    glyph: impl Fn(Position) -> char,
) -> String {
    let xs = cells.clone().map(|&(x, _)| x).minmax().into_option();
    let ys = cells.map(|&(_, y)| y).minmax().into_option();
    let (Some((min_x, max_x)), Some((min_y, max_y))) = (xs, ys) else {
        return String::new();
    };

    (min_y..=max_y)
        .map(|y| (min_x..=max_x).map(|x| glyph((x, y))).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
