use std::f32::consts::TAU;

use crate::renderer::{
    Rgb,
    software::pipeline::{ColumnCtx, Stage},
};

/// Panoramic sky, drawn first so walls and floor occlude it.
pub struct SkyStage;

/// Sky texture column for a view `angle`: the angle modulo 2π spread
/// linearly over `0 ..= sky_w - 1`.
#[inline]
pub fn sky_column(angle: f32, sky_w: usize) -> usize {
    let t = angle.rem_euclid(TAU) / TAU;
    ((t * (sky_w - 1) as f32) as usize).min(sky_w - 1)
}

impl Stage for SkyStage {
    fn name(&self) -> &'static str {
        "sky"
    }

    fn draw_column(&self, col: &ColumnCtx<'_>, pixels: &mut [Rgb]) {
        let sky = &col.frame.textures.sky;
        let u = sky_column(col.angle, sky.w);

        // the slice moves with the shear so the horizon stays level
        let top = col.frame.screen.h as i32 - col.frame.shear;
        let last = sky.h as i32 - 1;
        for (y, px) in pixels.iter_mut().enumerate() {
            let v = (top + y as i32).clamp(0, last) as usize;
            *px = sky.texel(u, v);
        }
    }
}
