use crate::engine::types::Screen;

/// Distances below this are treated as this; keeps `H / d` finite.
pub const MIN_DISTANCE: f32 = 1e-4;

/// Vertical extent of the wall in one screen column.
///
/// `start`, `end` and `wall_height` are unclamped and drive texture
/// coordinates; `draw_start .. draw_end` is the half-open row range that is
/// actually written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: i32,
    pub end: i32,
    pub wall_height: i32,
    pub draw_start: usize,
    pub draw_end: usize,
}

impl ColumnSpan {
    /// Rows covered by the unclamped span; never zero.
    #[inline]
    pub fn span_height(&self) -> i32 {
        (self.end - self.start).max(1)
    }

    /// Row that receives the floor reflection of wall row `y`.
    #[inline]
    pub fn reflected_row(&self, y: i32) -> i32 {
        self.end + self.wall_height - (y - self.start)
    }
}

/// Vertical pixel offset that stands in for looking up / down.
#[inline]
pub fn y_shear(height: usize, pitch: f32) -> i32 {
    -((height as f32 * 0.5 * pitch).round() as i32)
}

/// Project a wall at `distance` into a column of `screen`, shifted by
/// `shear` rows.
pub fn project_column(screen: &Screen, distance: f32, shear: i32) -> ColumnSpan {
    let distance = distance.max(MIN_DISTANCE);
    let wall_height = (screen.h as f32 / distance).round() as i32;

    let mid = (screen.h / 2) as i32;
    let start = mid - wall_height / 2 + shear;
    let end = mid + wall_height / 2 + shear;

    let rows = screen.h as i32;
    ColumnSpan {
        start,
        end,
        wall_height,
        draw_start: start.clamp(0, rows) as usize,
        draw_end: end.clamp(0, rows) as usize,
    }
}
