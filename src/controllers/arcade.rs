// src/controllers/arcade.rs

use std::collections::HashMap;
use std::convert::TryFrom;

use tracing::debug;

use super::{render_grid, ControllerError, Position};
use crate::vm::VirtualMachine;
use crate::Value;

/// Output triple `(-1, 0, n)` carries the score instead of a tile.
const SCORE_POSITION: Position = (-1, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Block,
    Paddle,
    Ball,
}

impl TryFrom<Value> for Tile {
    type Error = ControllerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Tile::Empty),
            1 => Ok(Tile::Wall),
            2 => Ok(Tile::Block),
            3 => Ok(Tile::Paddle),
            4 => Ok(Tile::Ball),
            other => Err(ControllerError::UnknownTile(other)),
        }
    }
}

impl Tile {
    fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '|',
            Tile::Block => '#',
            Tile::Paddle => '=',
            Tile::Ball => 'o',
        }
    }
}

/// How the joystick is moved whenever the game waits for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Joystick {
    /// Move the paddle towards the ball's column.
    #[default]
    Track,
    /// Never move.
    Neutral,
}

/// Arcade cabinet: draws `(x, y, tile)` triples and feeds joystick positions
/// (-1 left, 0 neutral, 1 right) back to the game.
#[derive(Debug, Clone)]
pub struct Arcade {
    vm: VirtualMachine,
    tiles: HashMap<Position, Tile>,
    score: Value,
}

impl Arcade {
    pub fn new(vm: VirtualMachine) -> Self {
        Arcade { vm, tiles: HashMap::new(), score: 0 }
    }

    /// Inserts quarters (address 0 set to 2) so the game can be played.
    pub fn free_play(mut vm: VirtualMachine) -> Result<Self, ControllerError> {
        vm.write(0, 2)?;
        Ok(Self::new(vm))
    }

    /// Plays until the game halts and returns the final score.
    pub fn run(&mut self, joystick: Joystick) -> Result<Value, ControllerError> {
        loop {
            let output = self.vm.process()?;
            self.draw(&output)?;
            if self.vm.is_terminated() {
                break;
            }
            let tilt = self.tilt(joystick)?;
            self.vm.feed_input(tilt)?;
        }
        debug!(score = self.score, blocks = self.block_count(), "game over");
        Ok(self.score)
    }

    fn draw(&mut self, output: &[Value]) -> Result<(), ControllerError> {
        if output.len() % 3 != 0 {
            return Err(ControllerError::UnexpectedOutput { expected: 3, got: output.len() });
        }
        for record in output.chunks_exact(3) {
            let position = (record[0], record[1]);
            if position == SCORE_POSITION {
                self.score = record[2];
            } else {
                self.tiles.insert(position, Tile::try_from(record[2])?);
            }
        }
        Ok(())
    }

    fn tilt(&self, joystick: Joystick) -> Result<Value, ControllerError> {
        match joystick {
            Joystick::Neutral => Ok(0),
            Joystick::Track => {
                let ball = self.find(Tile::Ball).ok_or(ControllerError::MissingTile("ball"))?;
                let paddle = self.find(Tile::Paddle).ok_or(ControllerError::MissingTile("paddle"))?;
                Ok((ball.0 - paddle.0).signum())
            }
        }
    }

    fn find(&self, tile: Tile) -> Option<Position> {
        self.tiles.iter().find(|(_, t)| **t == tile).map(|(&position, _)| position)
    }

    pub fn tile(&self, position: Position) -> Tile {
        self.tiles.get(&position).copied().unwrap_or(Tile::Empty)
    }

    pub fn block_count(&self) -> usize {
        self.tiles.values().filter(|&&tile| tile == Tile::Block).count()
    }

    pub fn score(&self) -> Value {
        self.score
    }

    pub fn render(&self) -> String {
        render_grid(self.tiles.keys(), |p| self.tile(p).glyph())
    }
}
