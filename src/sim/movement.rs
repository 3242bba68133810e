//! Camera motion on the grid: keyboard turn / look, mouse look and
//! per-axis sliding collision against wall cells.

use glam::Vec2;

use super::{InputCmd, tic::DT};
use crate::world::{Camera, Map};

pub const MOVE_SPEED: f32 = 2.5; // cells / second
pub const RUN_FACTOR: f32 = 1.8;
pub const TURN_RATE: f32 = std::f32::consts::PI; // rad / second (180°/s)
pub const LOOK_RATE: f32 = std::f32::consts::FRAC_PI_2; // rad / second

/// Apply one tic of `cmd` to `camera`, sliding along walls of `map`.
pub fn player_input(camera: &mut Camera, map: &Map, cmd: &InputCmd) {
    /* 1. orientation */
    if cmd.turn != 0.0 {
        camera.turn(cmd.turn * TURN_RATE * DT);
    }
    if cmd.look != 0.0 {
        camera.look(cmd.look * LOOK_RATE * DT);
    }

    /* 2. translation, rotated into world space */
    let wish = cmd.wish();
    if wish == Vec2::ZERO {
        return;
    }
    let speed = if cmd.run {
        MOVE_SPEED * RUN_FACTOR
    } else {
        MOVE_SPEED
    };
    let delta = (camera.forward() * wish.x + camera.right() * wish.y) * speed * DT;
    camera.pos = slide(map, camera.pos, delta);
}

/// Move `pos` by `delta` one axis at a time; an axis step that would end
/// inside a wall cell is dropped, the other axis still applies.
pub fn slide(map: &Map, pos: Vec2, delta: Vec2) -> Vec2 {
    let mut out = pos;
    let try_x = Vec2::new(out.x + delta.x, out.y);
    if !map.is_wall_at(try_x) {
        out = try_x;
    }
    let try_y = Vec2::new(out.x, out.y + delta.y);
    if !map.is_wall_at(try_y) {
        out = try_y;
    }
    out
}

/// Pointer motion → yaw / pitch. A larger `sensitivity` turns slower.
pub fn mouse_look(camera: &mut Camera, delta: Vec2, sensitivity: f32) {
    if delta == Vec2::ZERO || sensitivity <= 0.0 {
        return;
    }
    camera.turn(delta.x / sensitivity);
    camera.look(delta.y / sensitivity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PITCH_LIMIT;

    fn room() -> Map {
        Map::from_ascii(&["#####", "#P..#", "#...#", "#...#", "#####"]).unwrap()
    }

    fn fwd() -> InputCmd {
        InputCmd {
            forward: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn forward_moves_along_yaw() {
        let map = room();
        let mut cam = Camera::new(Vec2::new(1.5, 2.5), 0.0, 1.0);
        player_input(&mut cam, &map, &fwd());
        assert!((cam.pos.x - (1.5 + MOVE_SPEED * DT)).abs() < 1e-6);
        assert!((cam.pos.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn running_is_faster() {
        let map = room();
        let mut walk = Camera::new(Vec2::new(1.5, 2.5), 0.0, 1.0);
        let mut run = walk;
        player_input(&mut walk, &map, &fwd());
        player_input(&mut run, &map, &InputCmd { run: true, ..fwd() });
        assert!(run.pos.x - 1.5 > walk.pos.x - 1.5);
    }

    #[test]
    fn strafe_goes_right_of_forward() {
        let map = room();
        // facing +x, right is +y (y grows downward on the grid)
        let mut cam = Camera::new(Vec2::new(2.5, 2.5), 0.0, 1.0);
        let cmd = InputCmd {
            strafe: 1.0,
            ..Default::default()
        };
        player_input(&mut cam, &map, &cmd);
        assert!(cam.pos.y > 2.5);
        assert!((cam.pos.x - 2.5).abs() < 1e-6);
    }

    #[test]
    fn wall_blocks_one_axis_and_slides_the_other() {
        let map = room();
        let pos = Vec2::new(3.9, 2.5);
        let out = slide(&map, pos, Vec2::new(0.3, 0.2));
        assert_eq!(out.x, 3.9);
        assert!((out.y - 2.7).abs() < 1e-6);
    }

    #[test]
    fn never_walks_into_walls() {
        let map = room();
        let mut cam = Camera::new(Vec2::new(2.5, 2.5), 0.7, 1.0);
        for _ in 0..500 {
            player_input(&mut cam, &map, &InputCmd { run: true, ..fwd() });
            assert!(!map.is_wall_at(cam.pos));
        }
    }

    #[test]
    fn mouse_look_scales_and_clamps() {
        let mut cam = Camera::new(Vec2::new(2.5, 2.5), 0.0, 1.0);
        mouse_look(&mut cam, Vec2::new(50.0, 0.0), 500.0);
        assert!((cam.yaw - 0.1).abs() < 1e-6);
        mouse_look(&mut cam, Vec2::new(0.0, 10_000.0), 500.0);
        assert_eq!(cam.pitch, PITCH_LIMIT);
    }

    #[test]
    fn keyboard_turn_wraps() {
        let map = room();
        let mut cam = Camera::new(Vec2::new(2.5, 2.5), 0.0, 1.0);
        let cmd = InputCmd {
            turn: -1.0,
            ..Default::default()
        };
        player_input(&mut cam, &map, &cmd);
        assert!(cam.yaw > 0.0 && cam.yaw < std::f32::consts::TAU);
    }
}
