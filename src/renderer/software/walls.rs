use glam::IVec2;

use crate::{
    engine::{HitSide, RayHit},
    renderer::{
        Rgb,
        software::{
            pipeline::{ColumnCtx, Stage},
            shading::{CORNER_SHADOW, CORNER_SLOPE, DIAGONAL_SHADE, distance_shade, tile_coord},
        },
    },
    world::Map,
};

/// Textured, shaded wall slice plus its mirrored copy below the wall, which
/// the floor stage later blends in as a reflection.
pub struct WallStage {
    pub textured: bool,
    pub shaded: bool,
    pub reflect: bool,
}

/// Horizontal wall texel for `hit`.
///
/// Uses whichever world coordinate runs along the struck face and mirrors
/// it on `Left` / `Top` faces.
#[inline]
pub fn wall_u(hit: &RayHit, tex_w: usize) -> usize {
    let along = if hit.side.is_horizontal() {
        hit.pos.x
    } else {
        hit.pos.y
    };
    let u = tile_coord(along.rem_euclid(1.0), tex_w);
    match hit.side {
        HitSide::Left | HitSide::Top => tex_w - 1 - u,
        HitSide::Right | HitSide::Bottom => u,
    }
}

/// Cell one step back along both ray axes from the struck cell.
#[inline]
pub fn diagonal_neighbor(hit: &RayHit) -> IVec2 {
    hit.cell - hit.step
}

/// Diagonal neighbour whose wall casts a corner shadow onto the struck
/// face; only `Right` and `Top` faces receive one.
#[inline]
pub fn corner_occluder(hit: &RayHit) -> Option<IVec2> {
    match hit.side {
        HitSide::Right => Some(hit.cell + IVec2::new(1, -1)),
        HitSide::Top => Some(hit.cell + IVec2::new(-1, -1)),
        HitSide::Left | HitSide::Bottom => None,
    }
}

/// Distance falloff, darkened further when the diagonal cell is solid.
pub fn wall_shade(hit: &RayHit, map: &Map) -> f32 {
    let shade = distance_shade(hit.distance, map.size());
    if map.is_wall(diagonal_neighbor(hit)) {
        shade * DIAGONAL_SHADE
    } else {
        shade
    }
}

/// Shadow wedge: empty at the top of the wall, `CORNER_SLOPE` wide at the
/// floor. `t` is the vertical progress down the wall.
#[inline]
pub fn in_corner_shadow(hit: &RayHit, t: f32) -> bool {
    let offset = match hit.side {
        HitSide::Right => hit.pos.y.rem_euclid(1.0),
        HitSide::Top => hit.pos.x.rem_euclid(1.0),
        HitSide::Left | HitSide::Bottom => return false,
    };
    offset < CORNER_SLOPE * t
}

impl Stage for WallStage {
    fn name(&self) -> &'static str {
        "walls"
    }

    fn draw_column(&self, col: &ColumnCtx<'_>, pixels: &mut [Rgb]) {
        let map = col.frame.map;
        let tex = &col.frame.textures.wall;
        let hit = &col.hit;
        let span = &col.span;

        let tint = map.color(hit.cell);
        let u = wall_u(hit, tex.w);
        let (shade, occluded) = if self.shaded {
            let occluded = corner_occluder(hit).is_some_and(|c| map.is_wall(c));
            (wall_shade(hit, map), occluded)
        } else {
            (1.0, false)
        };

        let span_h = span.span_height() as f32;
        let rows = 0..pixels.len() as i32;

        // rows clipped off the top still have their reflection on screen
        // once `reflected_row(y)` drops below the bottom edge
        let first = if self.reflect {
            let mirrors_last_row = span.reflected_row(rows.end - 1);
            span.start.max(mirrors_last_row.min(span.draw_start as i32))
        } else {
            span.draw_start as i32
        };

        for y in first..span.draw_end as i32 {
            let t = (y - span.start) as f32 / span_h;

            let base = if self.textured {
                tint * tex.texel(u, tile_coord(t, tex.h))
            } else {
                tint
            };
            let shade = if occluded && in_corner_shadow(hit, t) {
                shade * CORNER_SHADOW
            } else {
                shade
            };
            let color = base * shade;
            if y >= 0 {
                pixels[y as usize] = color;
            }

            if self.reflect {
                let mirror = span.reflected_row(y);
                if rows.contains(&mirror) {
                    pixels[mirror as usize] = color;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{Screen, cast},
        renderer::{Scene, software::pipeline::FrameCtx},
        world::{Camera, PITCH_LIMIT, Texture, TextureSet},
    };
    use glam::{Vec2, Vec3};
    use proptest::prelude::*;

    fn pillar() -> Map {
        Map::from_ascii(&["#####", "#P..#", "#.#.#", "#...#", "#####"]).unwrap()
    }

    fn ramp_textures(w: usize, h: usize) -> TextureSet {
        TextureSet {
            wall: Texture::from_fn("RAMP", 8, 8, |u, v| {
                Vec3::new(u as f32 / 8.0, v as f32 / 8.0, 1.0)
            }),
            ..TextureSet::procedural(w, h)
        }
    }

    #[test]
    fn facing_sides_mirror_texture() {
        let map = pillar();
        // same world y on both faces, opposite directions of travel
        let left = cast(&map, Vec2::new(1.5, 2.1), 0.0);
        let right = cast(&map, Vec2::new(3.5, 2.1), std::f32::consts::PI);
        assert_eq!(left.side, HitSide::Left);
        assert_eq!(right.side, HitSide::Right);
        let (ul, ur) = (wall_u(&left, 64), wall_u(&right, 64));
        assert_eq!(ul, 63 - ur);
    }

    #[test]
    fn horizontal_hit_uses_x_coordinate() {
        let map = pillar();
        let hit = cast(&map, Vec2::new(2.25, 3.5), -std::f32::consts::FRAC_PI_2);
        assert_eq!(hit.side, HitSide::Bottom);
        // fract(2.25) * 3 = 0.75 → texel 7 of 10, not mirrored
        assert_eq!(wall_u(&hit, 10), 7);
    }

    #[test]
    fn diagonal_neighbor_steps_back() {
        let map = pillar();
        let hit = cast(&map, Vec2::new(1.5, 2.5), 0.0);
        // ray steps +x, +y; one back on both axes is (1, 1)
        assert_eq!(diagonal_neighbor(&hit), IVec2::new(1, 1));
        assert!(!map.is_wall(diagonal_neighbor(&hit)));
        let shade = wall_shade(&hit, &map);
        assert!((shade - (1.0 - 0.5 / 5.0)).abs() < 1e-6);
    }

    #[test]
    fn border_corner_darkens_wall() {
        let map = pillar();
        // ray from (1.5, 1.5) east hits the border at (4, 1); (3, 0) is wall
        let hit = cast(&map, Vec2::new(1.5, 1.5), 0.0);
        assert_eq!(diagonal_neighbor(&hit), IVec2::new(3, 0));
        let expected = (1.0 - 2.5 / 5.0) * DIAGONAL_SHADE;
        assert!((wall_shade(&hit, &map) - expected).abs() < 1e-6);
    }

    #[test]
    fn corner_wedge_grows_toward_floor() {
        let map = pillar();
        let hit = cast(&map, Vec2::new(3.5, 2.2), std::f32::consts::PI);
        assert_eq!(hit.side, HitSide::Right);
        assert_eq!(corner_occluder(&hit), Some(IVec2::new(3, 1)));
        assert!(!in_corner_shadow(&hit, 0.0));
        assert!(!in_corner_shadow(&hit, 0.5)); // 0.2 < 0.165 is false
        assert!(in_corner_shadow(&hit, 0.9)); // 0.2 < 0.297
    }

    #[test]
    fn flat_walls_use_cell_tint() {
        let map = pillar();
        let textures = ramp_textures(8, 20);
        let scene = Scene {
            camera: Camera::new(Vec2::new(1.5, 2.5), 0.0, 0.001),
            map: &map,
            textures: &textures,
        };
        let frame = FrameCtx::new(&scene, Screen::new(1, 20));
        let col = frame.column(0);
        let mut pixels = vec![Vec3::ZERO; 20];
        WallStage {
            textured: false,
            shaded: false,
            reflect: false,
        }
        .draw_column(&col, &mut pixels);

        // distance 0.5 → wall covers the whole column
        assert_eq!(col.span.wall_height, 40);
        assert!(pixels.iter().all(|&p| p == Vec3::ONE));
    }

    #[test]
    fn shaded_column_darkens_corner_wedge() {
        // (1, 2) sits diagonally behind the west wall, (1, 0) occludes its
        // Right face
        let map = Map::from_ascii(&["#####", "#...#", "##..#", "#...#", "#####"]).unwrap();
        let h = 40;
        let textures = TextureSet {
            wall: Texture::solid("WHITE", 8, 8, Vec3::ONE),
            ..TextureSet::procedural(1, h)
        };
        let scene = Scene {
            camera: Camera::new(Vec2::new(3.5, 1.35), std::f32::consts::PI + 0.1, 0.001),
            map: &map,
            textures: &textures,
        };
        let frame = FrameCtx::new(&scene, Screen::new(1, h));
        let col = frame.column(0);
        let hit = col.hit;
        assert_eq!(hit.side, HitSide::Right);
        assert_eq!(hit.cell, IVec2::new(0, 1));
        assert!(map.is_wall(diagonal_neighbor(&hit)));
        assert_eq!(corner_occluder(&hit), Some(IVec2::new(1, 0)));

        let mut pixels = vec![Vec3::ZERO; h];
        WallStage {
            textured: true,
            shaded: true,
            reflect: false,
        }
        .draw_column(&col, &mut pixels);

        let lit = (1.0 - hit.distance / 5.0) * DIAGONAL_SHADE;
        let dark = lit * CORNER_SHADOW;
        assert!((lit - 0.2985).abs() < 1e-3, "lit = {lit}");

        let span = col.span;
        for y in span.draw_start..span.draw_end {
            let t = (y as i32 - span.start) as f32 / span.span_height() as f32;
            let in_wedge = hit.pos.y.rem_euclid(1.0) < CORNER_SLOPE * t;
            let expected = if in_wedge { dark } else { lit };
            assert!(
                (pixels[y] - Vec3::splat(expected)).length() < 1e-6,
                "row {y}: {:?} vs {expected}",
                pixels[y]
            );
        }
        // wedge is empty at the top of the wall and covers its base
        assert!((pixels[span.draw_start].x - lit).abs() < 1e-6);
        assert!((pixels[span.draw_end - 1].x - dark).abs() < 1e-6);
    }

    #[test]
    fn clipped_top_rows_are_still_reflected() {
        let map = pillar();
        let h = 60;
        let textures = ramp_textures(1, h);
        let mut camera = Camera::new(Vec2::new(1.5, 1.5), 0.0, 0.001);
        camera.pitch = PITCH_LIMIT;
        let scene = Scene {
            camera,
            map: &map,
            textures: &textures,
        };
        let frame = FrameCtx::new(&scene, Screen::new(1, h));
        let col = frame.column(0);
        let span = col.span;
        assert!(span.start < 0, "wall top must be off screen: {span:?}");

        let mut pixels = vec![Vec3::ZERO; h];
        WallStage {
            textured: true,
            shaded: false,
            reflect: true,
        }
        .draw_column(&col, &mut pixels);

        let tex = &textures.wall;
        let u = wall_u(&col.hit, tex.w);
        for y in span.start..0 {
            let mirror = span.reflected_row(y);
            assert!((0..h as i32).contains(&mirror));
            let t = (y - span.start) as f32 / span.span_height() as f32;
            assert_eq!(pixels[mirror as usize], tex.texel(u, tile_coord(t, tex.h)), "row {y}");
        }
    }

    fn wall_column(camera: Camera, h: usize) -> (Vec<Vec3>, crate::engine::ColumnSpan) {
        let map = pillar();
        let textures = ramp_textures(8, h);
        let scene = Scene {
            camera,
            map: &map,
            textures: &textures,
        };
        let frame = FrameCtx::new(&scene, Screen::new(1, h));
        let col = frame.column(0);
        let mut pixels = vec![Vec3::ZERO; h];
        WallStage {
            textured: true,
            shaded: true,
            reflect: true,
        }
        .draw_column(&col, &mut pixels);
        (pixels, col.span)
    }

    proptest! {
        #[test]
        fn reflection_rows_copy_wall_rows(
            x in 1.1f32..1.9,
            y in 1.1f32..3.9,
            yaw in 0.0f32..std::f32::consts::TAU,
            pitch in -0.7f32..0.7,
            h in 8usize..200,
        ) {
            let mut camera = Camera::new(Vec2::new(x, y), yaw, 0.001);
            camera.pitch = pitch;
            let (pixels, span) = wall_column(camera, h);
            for j in span.draw_start..span.draw_end {
                let mirror = span.reflected_row(j as i32);
                prop_assert!(mirror >= span.end);
                if (0..h as i32).contains(&mirror) {
                    prop_assert_eq!(pixels[mirror as usize], pixels[j]);
                }
            }
        }
    }
}
