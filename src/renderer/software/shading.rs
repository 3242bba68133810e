//! Constants and helpers shared by the wall and floor stages.
//!
//! The corner values are hand-tuned visual approximations of the shadow a
//! perpendicular wall casts into a corner, not physically derived.

use glam::{IVec2, Vec2};

use crate::world::Map;

/// Textures tile this many times per map unit.
pub const TEXTURE_REPEAT: f32 = 3.0;

/// Wall brightness factor when the cell diagonally behind the hit is solid.
pub const DIAGONAL_SHADE: f32 = 0.6;

/// Brightness factor inside a corner shadow (walls and floor).
pub const CORNER_SHADOW: f32 = 0.4;

/// Width of the corner shadow band at floor level, in map units.
pub const CORNER_SLOPE: f32 = 0.33;

/// Fractional part of `coord * TEXTURE_REPEAT` mapped onto `0 .. size`.
#[inline]
pub fn tile_coord(coord: f32, size: usize) -> usize {
    let f = (coord * TEXTURE_REPEAT).rem_euclid(1.0);
    ((f * size as f32) as usize).min(size.saturating_sub(1))
}

/// `1` at the eye, falling linearly to `0` one map-width away.
#[inline]
pub fn distance_shade(distance: f32, map_size: usize) -> f32 {
    (1.0 - distance / map_size as f32).max(0.0)
}

/// Near floor is bright, far floor keeps a 0.2 ambient floor.
#[inline]
pub fn floor_shade(distance: f32) -> f32 {
    (0.2 + 0.8 / distance).min(1.0)
}

/// Is the floor point `p` inside one of the corner wedges the wall stage
/// darkens?
///
/// The floor cell needs a wall to its west. With a wall north of it the
/// west wall's `Right` face is occluded; with a wall south of it that
/// wall's `Top` face is. Either way the wedge is the triangle of legs
/// `CORNER_SLOPE` in the corner between the two walls, continuing the wall
/// wedge at `t = 1` onto the floor.
pub fn floor_in_corner_shadow(map: &Map, p: Vec2) -> bool {
    let cell = p.floor().as_ivec2();
    if !map.is_wall(cell - IVec2::X) {
        return false;
    }
    let f = p - p.floor();
    let north = map.is_wall(cell - IVec2::Y);
    let south = map.is_wall(cell + IVec2::Y);

    (north && f.x + f.y < CORNER_SLOPE) || (south && f.x + (1.0 - f.y) < CORNER_SLOPE)
}
