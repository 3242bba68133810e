//! Grid DDA: walk a ray through successive grid-line crossings until it
//! enters a wall cell.

use glam::{IVec2, Vec2};

use crate::world::Map;

/// Face of the struck cell the ray crossed.
///
/// `Left`/`Right` are the low-x / high-x faces, `Top`/`Bottom` the
/// low-y / high-y faces, so a ray travelling +x always hits `Left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSide {
    Left,
    Top,
    Right,
    Bottom,
}

impl HitSide {
    /// The ray crossed a vertical grid line (x = const).
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, HitSide::Left | HitSide::Right)
    }

    /// The ray crossed a horizontal grid line (y = const).
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, HitSide::Top | HitSide::Bottom)
    }
}

/// Result of one ray cast. Lives for a single column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32, // along the ray, >= 0
    pub pos: Vec2,     // world-space intersection (hit_x, hit_y)
    pub cell: IVec2,   // struck cell (map_x, map_y)
    pub side: HitSide,
    pub step: IVec2, // ±1 per axis, sign of the ray direction
}

/// Cast a ray from `origin` at `angle` and return the first wall crossing.
///
/// `origin` must lie in an empty cell; starting inside a wall yields a
/// zero-distance hit on that cell. A ray that leaves the grid stops on the
/// first out-of-bounds cell, which every `Map` lookup treats as solid.
pub fn cast(map: &Map, origin: Vec2, angle: f32) -> RayHit {
    let (sin, cos) = angle.sin_cos();
    let dir = Vec2::new(cos, sin);

    let mut cell = origin.floor().as_ivec2();
    let step = IVec2::new(
        if dir.x < 0.0 { -1 } else { 1 },
        if dir.y < 0.0 { -1 } else { 1 },
    );

    // ray length between two x (resp. y) grid lines
    let delta = Vec2::new(axis_delta(dir.x), axis_delta(dir.y));

    // ray length to the first x (resp. y) grid line
    let mut side_dist = Vec2::new(
        if dir.x < 0.0 {
            origin.x - cell.x as f32
        } else {
            cell.x as f32 + 1.0 - origin.x
        } * delta.x,
        if dir.y < 0.0 {
            origin.y - cell.y as f32
        } else {
            cell.y as f32 + 1.0 - origin.y
        } * delta.y,
    );

    // distance of the last grid line crossed; stays 0 when the origin is
    // already inside a wall
    let mut distance = 0.0;
    let mut side = HitSide::Left;
    while map.in_bounds(cell) && !map.is_wall(cell) {
        if side_dist.x < side_dist.y {
            distance = side_dist.x;
            side_dist.x += delta.x;
            cell.x += step.x;
            side = if step.x > 0 { HitSide::Left } else { HitSide::Right };
        } else {
            distance = side_dist.y;
            side_dist.y += delta.y;
            cell.y += step.y;
            side = if step.y > 0 { HitSide::Top } else { HitSide::Bottom };
        }
    }

    RayHit {
        distance,
        pos: origin + dir * distance,
        cell,
        side,
        step,
    }
}

#[inline]
fn axis_delta(component: f32) -> f32 {
    if component == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / component).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    /// 5×5 room with a single pillar at (2, 2).
    fn pillar() -> Map {
        Map::from_ascii(&["#####", "#P..#", "#.#.#", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn east_ray_hits_left_face_exactly() {
        let hit = cast(&pillar(), Vec2::new(1.5, 2.5), 0.0);
        assert_eq!(hit.distance, 0.5);
        assert_eq!(hit.pos, Vec2::new(2.0, 2.5));
        assert_eq!(hit.cell, IVec2::new(2, 2));
        assert_eq!(hit.side, HitSide::Left);
        assert!(hit.side.is_vertical());
    }

    #[test]
    fn west_ray_hits_right_face() {
        let hit = cast(&pillar(), Vec2::new(3.5, 2.5), PI);
        assert_eq!(hit.distance, 0.5);
        assert_eq!(hit.cell, IVec2::new(2, 2));
        assert_eq!(hit.side, HitSide::Right);
        assert!((hit.pos - Vec2::new(3.0, 2.5)).length() < 1e-5);
    }

    #[test]
    fn south_ray_hits_top_face() {
        let hit = cast(&pillar(), Vec2::new(2.5, 1.5), FRAC_PI_2);
        assert_eq!(hit.cell, IVec2::new(2, 2));
        assert_eq!(hit.side, HitSide::Top);
        assert!(hit.side.is_horizontal());
        assert!((hit.distance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn north_ray_hits_bottom_face() {
        let hit = cast(&pillar(), Vec2::new(2.5, 3.5), -FRAC_PI_2);
        assert_eq!(hit.cell, IVec2::new(2, 2));
        assert_eq!(hit.side, HitSide::Bottom);
        assert!((hit.distance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn diagonal_ray_reaches_pillar_corner() {
        let origin = Vec2::new(1.5, 1.5);
        let hit = cast(&pillar(), origin, FRAC_PI_4);

        // the ray passes exactly through the grid corner (2, 2)
        assert_eq!(hit.cell, IVec2::new(2, 2));
        assert!((hit.distance - 0.5f32.hypot(0.5)).abs() < 1e-5);
        assert!((hit.pos - Vec2::splat(2.0)).length() < 1e-5);
        assert!(matches!(hit.side, HitSide::Left | HitSide::Top));
        assert_eq!(hit.distance, reference_trace(&pillar(), origin, FRAC_PI_4));
    }

    #[test]
    fn far_wall_on_border() {
        let hit = cast(&pillar(), Vec2::new(1.5, 1.5), 0.0);
        assert_eq!(hit.cell, IVec2::new(4, 1));
        assert_eq!(hit.distance, 2.5);
    }

    #[test]
    fn origin_inside_wall_gives_zero_distance() {
        let hit = cast(&pillar(), Vec2::new(2.5, 2.5), 0.3);
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.cell, IVec2::new(2, 2));
        assert_eq!(hit.pos, Vec2::new(2.5, 2.5));
    }

    #[test]
    fn distance_matches_euclid_to_hit_point() {
        let map = pillar();
        let origin = Vec2::new(1.3, 3.6);
        for i in 0..64 {
            let angle = i as f32 * std::f32::consts::TAU / 64.0;
            let hit = cast(&map, origin, angle);
            assert!(hit.distance > 0.0);
            assert!(((hit.pos - origin).length() - hit.distance).abs() < 1e-4);
            assert!(map.is_wall(hit.cell));
            assert_eq!(hit.distance, reference_trace(&map, origin, angle));
        }
    }

    /// Step-by-step DDA trace written independently: march along the ray
    /// crossing one grid line at a time, comparing the parametric `t` of the
    /// next x and y lines directly.
    fn reference_trace(map: &Map, origin: Vec2, angle: f32) -> f32 {
        let (sin, cos) = angle.sin_cos();
        let (mut cx, mut cy) = (origin.x.floor() as i32, origin.y.floor() as i32);
        let inv_x = if cos == 0.0 { f32::INFINITY } else { (1.0 / cos).abs() };
        let inv_y = if sin == 0.0 { f32::INFINITY } else { (1.0 / sin).abs() };
        let mut tx = if cos < 0.0 {
            (origin.x - cx as f32) * inv_x
        } else {
            (cx as f32 + 1.0 - origin.x) * inv_x
        };
        let mut ty = if sin < 0.0 {
            (origin.y - cy as f32) * inv_y
        } else {
            (cy as f32 + 1.0 - origin.y) * inv_y
        };
        loop {
            let t;
            if tx < ty {
                t = tx;
                tx += inv_x;
                cx += if cos < 0.0 { -1 } else { 1 };
            } else {
                t = ty;
                ty += inv_y;
                cy += if sin < 0.0 { -1 } else { 1 };
            }
            if map.is_wall(IVec2::new(cx, cy)) {
                return t;
            }
        }
    }
}
