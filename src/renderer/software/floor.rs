use glam::{Vec2, Vec3};

use crate::{
    engine::Screen,
    renderer::{
        Rgb,
        software::{
            pipeline::{ColumnCtx, Stage},
            shading::{CORNER_SHADOW, floor_in_corner_shadow, floor_shade, tile_coord},
        },
    },
};

/// Weight of the floor texture itself.
const DIRECT: f32 = 0.7;
/// Weight of the floor texture tinted by whatever is mirrored above it.
const REFLECTED: f32 = 0.3;
/// Floor colour when texturing is off.
const FLAT_FLOOR: Vec3 = Vec3::splat(0.5);

/// Floor below the wall, inverse-projected back onto the map plane and
/// blended with the reflection the wall stage left behind.
pub struct FloorStage {
    pub textured: bool,
    pub shaded: bool,
    pub reflect: bool,
}

/// Distance along the column's ray to the floor point seen at `row`, or
/// `None` at / above the horizon.
#[inline]
pub fn floor_distance(row: usize, screen: &Screen, shear: i32) -> Option<f32> {
    let below = row as f32 - screen.half_h - shear as f32;
    (below > 0.0).then(|| screen.half_h / below)
}

impl Stage for FloorStage {
    fn name(&self) -> &'static str {
        "floor"
    }

    fn draw_column(&self, col: &ColumnCtx<'_>, pixels: &mut [Rgb]) {
        let frame = col.frame;
        let tex = &frame.textures.floor;
        let dir = Vec2::from_angle(col.angle);

        for row in col.span.draw_end..pixels.len() {
            let Some(distance) = floor_distance(row, &frame.screen, frame.shear) else {
                continue;
            };
            let p = frame.camera.pos + dir * distance;

            let sample = if self.textured {
                tex.texel(tile_coord(p.x, tex.w), tile_coord(p.y, tex.h))
            } else {
                FLAT_FLOOR
            };

            let shade = if self.shaded {
                let shade = floor_shade(distance);
                if floor_in_corner_shadow(frame.map, p) {
                    shade * CORNER_SHADOW
                } else {
                    shade
                }
            } else {
                1.0
            };

            let color = if self.reflect {
                DIRECT * sample + REFLECTED * sample * pixels[row]
            } else {
                sample
            };
            pixels[row] = color * shade;
        }
    }
}
