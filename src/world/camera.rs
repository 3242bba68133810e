use glam::Vec2;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, TAU};

use super::map::Map;

/// Pitch is clamped to `±PITCH_LIMIT` radians.
pub const PITCH_LIMIT: f32 = FRAC_PI_4;

/// Default horizontal field of view (60°).
pub const DEFAULT_FOV: f32 = FRAC_PI_3;

/// Player view-point on the map plane.
///
/// * `yaw` = 0 looks along +X; increasing yaw turns toward +Y, which is
///   also the direction screen columns sweep from left to right.
/// * `pitch` does not rotate anything: the renderer turns it into a
///   vertical shear of every column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,  // map units
    pub yaw: f32,   // radians
    pub pitch: f32, // radians, within ±PITCH_LIMIT
    pub fov: f32,   // horizontal FoV (radians)
}

impl Camera {
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        Self {
            pos,
            yaw,
            pitch: 0.0,
            fov,
        }
    }

    /// Level-start camera: at the map spawn, looking along +X.
    pub fn at_spawn(map: &Map, fov: f32) -> Self {
        Self::new(map.spawn(), 0.0, fov)
    }

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        Vec2::from_angle(self.yaw)
    }

    /// Unit vector pointing to the camera's right (toward higher columns).
    #[inline(always)]
    pub fn right(self) -> Vec2 {
        self.forward().perp()
    }

    /// Rotate the heading, keeping yaw in `[0, 2π)`.
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(TAU);
    }

    /// Tilt the view up / down within the pitch limit.
    pub fn look(&mut self, delta_pitch: f32) {
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Ray angle for screen column `x` of a `width`-column frame.
    #[inline]
    pub fn column_angle(self, x: usize, width: usize) -> f32 {
        let step = self.fov / width as f32;
        self.yaw - self.fov * 0.5 + x as f32 * step
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
