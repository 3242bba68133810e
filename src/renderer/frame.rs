use glam::Vec3;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::renderer::{Rgb, Rgba};

/// Normalized RGB frame, column-major: pixel `(x, y)` lives at `x * h + y`,
/// so each screen column is one contiguous slice.
#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; width * height],
        }
    }

    /// Reallocate if the resolution changed. Contents are unspecified
    /// afterwards; call [`FrameBuffer::clear`].
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, Vec3::ZERO);
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Black.
    pub fn clear(&mut self) {
        self.pixels.fill(Vec3::ZERO);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[x * self.height + y]
    }

    #[inline]
    pub fn column(&self, x: usize) -> &[Rgb] {
        &self.pixels[x * self.height..(x + 1) * self.height]
    }

    /// Columns as disjoint mutable slices, handed out in parallel.
    pub fn par_columns_mut(&mut self) -> rayon::slice::ChunksMut<'_, Rgb> {
        self.pixels.par_chunks_mut(self.height.max(1))
    }

    /// Pack into row-major `0x00RRGGBB` for presentation.
    pub fn pack_into(&self, dst: &mut Vec<Rgba>) {
        dst.resize(self.width * self.height, 0);
        if self.width == 0 || self.height == 0 {
            return;
        }
        let h = self.height;
        // rows are processed in parallel for cache friendly writes
        dst.par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, dst_row)| {
                for (x, px) in dst_row.iter_mut().enumerate() {
                    *px = pack_rgb(self.pixels[x * h + y]);
                }
            });
    }

    /// Mean colour of the whole frame; used by the viewer's debug log.
    pub fn mean(&self) -> Rgb {
        if self.pixels.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .pixels
            .par_chunks(self.height.max(1))
            .map(|col| col.iter().copied().sum::<Vec3>())
            .sum::<Vec3>();
        sum / self.pixels.len() as f32
    }
}

/// `[0, 1]` RGB → `0x00RRGGBB`, saturating out-of-range channels.
#[inline]
pub fn pack_rgb(c: Rgb) -> Rgba {
    let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    ((c.x as u32) << 16) | ((c.y as u32) << 8) | (c.z as u32)
}
