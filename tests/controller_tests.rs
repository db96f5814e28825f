// tests/controller_tests.rs

use intcode::controllers::{Arcade, ControllerError, Heading, Joystick, PaintingRobot, RepairDroid, Tile};
use intcode::{Value, VirtualMachine};

fn vm(program: &[Value]) -> VirtualMachine {
    VirtualMachine::new(program.to_vec())
}

// --- Painting robot ---

// Seven camera reads, each answered with a fixed (colour, turn) pair.
const SCRIPTED_PAINTER: [Value; 43] = [
    3, 100, 104, 1, 104, 0, //
    3, 100, 104, 0, 104, 0, //
    3, 100, 104, 1, 104, 0, //
    3, 100, 104, 1, 104, 0, //
    3, 100, 104, 0, 104, 1, //
    3, 100, 104, 1, 104, 0, //
    3, 100, 104, 1, 104, 0, //
    99,
];

#[test]
fn test_robot_follows_paint_commands() {
    let mut robot = PaintingRobot::new(vm(&SCRIPTED_PAINTER));
    robot.run().unwrap();

    assert_eq!(robot.panels_painted(), 6);
    assert_eq!(robot.position(), (0, -1));
    assert_eq!(robot.heading(), Heading::Left);
    assert!(!robot.is_white((0, 0)), "start panel was repainted black");
    assert!(robot.is_white((1, 0)));
    assert_eq!(robot.render(), "..#\n..#\n##.");
}

#[test]
fn test_robot_camera_reports_panel_colour() {
    // Paint whatever the camera sees, then turn left.
    let copy_camera = [3, 100, 4, 100, 104, 0, 99];

    let mut robot = PaintingRobot::starting_on_white(vm(&copy_camera));
    robot.run().unwrap();
    assert!(robot.is_white((0, 0)));
    assert_eq!(robot.panels_painted(), 1);
    assert_eq!(robot.render(), "#");

    let mut robot = PaintingRobot::new(vm(&copy_camera));
    robot.run().unwrap();
    assert!(!robot.is_white((0, 0)));
    assert_eq!(robot.panels_painted(), 1);
    assert_eq!(robot.render(), "");
}

#[test]
fn test_robot_rejects_odd_output() {
    let mut robot = PaintingRobot::new(vm(&[3, 100, 104, 1, 99]));
    assert_eq!(robot.run(), Err(ControllerError::UnexpectedOutput { expected: 2, got: 1 }));
}

#[test]
fn test_robot_rejects_bad_turn() {
    let mut robot = PaintingRobot::new(vm(&[3, 100, 104, 1, 104, 7, 99]));
    assert_eq!(robot.run(), Err(ControllerError::InvalidTurn(7)));
}

#[test]
fn test_heading_turns() {
    assert_eq!(Heading::Up.turn_left(), Heading::Left);
    assert_eq!(Heading::Up.turn_right(), Heading::Right);
    assert_eq!(Heading::Left.turn_left().turn_left(), Heading::Right);
}

// --- Arcade ---

#[test]
fn test_arcade_draws_tiles() {
    let screen = [104, 1, 104, 2, 104, 2, 104, 3, 104, 2, 104, 2, 104, 0, 104, 0, 104, 1, 99];
    let mut arcade = Arcade::new(vm(&screen));
    arcade.run(Joystick::Neutral).unwrap();

    assert_eq!(arcade.block_count(), 2);
    assert_eq!(arcade.tile((0, 0)), Tile::Wall);
    assert_eq!(arcade.tile((1, 2)), Tile::Block);
    assert_eq!(arcade.tile((2, 2)), Tile::Empty);
    assert_eq!(arcade.render(), "|...\n....\n.#.#");
}

// Ball at x=5, paddle at x=3; the joystick reading becomes the score.
const JOYSTICK_ECHO: [Value; 21] = [
    104, 5, 104, 1, 104, 4, //
    104, 3, 104, 1, 104, 3, //
    3, 100, //
    104, -1, 104, 0, 4, 100, //
    99,
];

#[test]
fn test_arcade_joystick_tracks_ball() {
    let mut arcade = Arcade::new(vm(&JOYSTICK_ECHO));
    assert_eq!(arcade.run(Joystick::Track), Ok(1));
    assert_eq!(arcade.score(), 1);

    let mut arcade = Arcade::new(vm(&JOYSTICK_ECHO));
    assert_eq!(arcade.run(Joystick::Neutral), Ok(0));
}

#[test]
fn test_arcade_free_play_patches_address_zero() {
    // add [0] + [0] into [100], report it as the score.
    let program = [1, 0, 0, 100, 104, -1, 104, 0, 4, 100, 99];

    let mut arcade = Arcade::new(vm(&program));
    assert_eq!(arcade.run(Joystick::Neutral), Ok(2));

    // With quarters inserted the first word becomes a multiply: 2 * 2.
    let mut arcade = Arcade::free_play(vm(&program)).unwrap();
    assert_eq!(arcade.run(Joystick::Neutral), Ok(4));
}

#[test]
fn test_arcade_missing_ball() {
    let mut arcade = Arcade::new(vm(&[104, 3, 104, 1, 104, 3, 3, 100, 99]));
    assert_eq!(arcade.run(Joystick::Track), Err(ControllerError::MissingTile("ball")));
}

#[test]
fn test_arcade_unknown_tile() {
    let mut arcade = Arcade::new(vm(&[104, 0, 104, 0, 104, 9, 99]));
    assert_eq!(arcade.run(Joystick::Neutral), Err(ControllerError::UnknownTile(9)));
}

// --- Repair droid ---

// A two-cell corridor: west of the start is the oxygen system, everything
// else is wall. [101] remembers which cell the droid is on.
const CORRIDOR: [Value; 45] = [
    3, 100, //
    1008, 100, 3, 102, //
    1005, 102, 21, //
    1008, 100, 4, 102, //
    1005, 102, 33, //
    104, 0, //
    1105, 1, 0, //
    1005, 101, 16, //
    1101, 0, 1, 101, //
    104, 2, //
    1105, 1, 0, //
    1006, 101, 16, //
    1101, 0, 0, 101, //
    104, 1, //
    1105, 1, 0,
];

#[test]
fn test_droid_maps_corridor() {
    let map = RepairDroid::new(vm(&CORRIDOR)).explore().unwrap();

    assert_eq!(map.oxygen, Some((-1, 0)));
    assert_eq!(map.open.len(), 2);
    assert_eq!(map.walls.len(), 6);
    assert!(map.walls.contains(&(1, 0)));
    assert!(map.walls.contains(&(-2, 0)));
    assert_eq!(map.steps_to_oxygen(), Some(1));
    assert_eq!(map.fill_minutes(), Some(1));
    assert_eq!(map.render(), " ## \n#OS#\n ## ");
}

#[test]
fn test_droid_without_oxygen() {
    // Every move hits a wall.
    let walled_in = [3, 100, 104, 0, 1105, 1, 0];
    let map = RepairDroid::new(vm(&walled_in)).explore().unwrap();

    assert_eq!(map.oxygen, None);
    assert_eq!(map.walls.len(), 4);
    assert_eq!(map.steps_to_oxygen(), None);
    assert_eq!(map.fill_minutes(), None);
}

#[test]
fn test_droid_rejects_unknown_status() {
    let confused = [3, 100, 104, 7, 1105, 1, 0];
    let err = RepairDroid::new(vm(&confused)).explore().unwrap_err();
    assert_eq!(err, ControllerError::UnknownStatus(7));
}
