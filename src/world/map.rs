// Square occupancy grid the camera walks through.
// Cells and colours are stored column-major (`x * size + y`), the same
// order the renderer uses for its frame-buffer.

use glam::{IVec2, Vec2, Vec3};
use rand::Rng;

/// Smallest map that still has an interior cell.
pub const MIN_MAP_SIZE: usize = 3;

/// Occupancy of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
}

/// Things that can go wrong when building a map from explicit data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    #[error("map size {0} is below the minimum of {min}", min = MIN_MAP_SIZE)]
    TooSmall(usize),

    #[error("expected {expected} cells, got {got}")]
    BadLength { expected: usize, got: usize },

    #[error("border cell ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },

    #[error("spawn point ({0}, {1}) is not inside an empty interior cell")]
    BadSpawn(f32, f32),

    #[error("unknown map glyph `{glyph}` at row {row}, column {col}")]
    BadGlyph { glyph: char, row: usize, col: usize },

    #[error("ascii map is not square ({rows} rows, row {row} has {len} columns)")]
    NotSquare { rows: usize, row: usize, len: usize },
}

/// Immutable level: occupancy, per-cell tint and the player spawn.
#[derive(Clone, Debug)]
pub struct Map {
    size: usize,
    cells: Vec<Cell>,
    colors: Vec<Vec3>,
    spawn: Vec2,
}

impl Map {
    /// Random level: interior cells are walls with probability 1/3, the
    /// border is always solid and the spawn cell is always walkable.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let size = size.max(MIN_MAP_SIZE);

        // 2 of 3 outcomes are empty
        let mut cells: Vec<Cell> = (0..size * size)
            .map(|_| {
                if rng.random_range(0..3) == 2 {
                    Cell::Wall
                } else {
                    Cell::Empty
                }
            })
            .collect();
        let colors = (0..size * size)
            .map(|_| Vec3::new(rng.random(), rng.random(), rng.random()))
            .collect();

        let spawn_x = rng.random_range(1..size - 1);
        let spawn_y = rng.random_range(1..size - 1);

        for i in 0..size {
            cells[i * size] = Cell::Wall;
            cells[i * size + size - 1] = Cell::Wall;
            cells[i] = Cell::Wall;
            cells[(size - 1) * size + i] = Cell::Wall;
        }
        cells[spawn_x * size + spawn_y] = Cell::Empty;

        Self {
            size,
            cells,
            colors,
            spawn: Vec2::new(spawn_x as f32 + 0.5, spawn_y as f32 + 0.5),
        }
    }

    /// Build a map from explicit column-major data and check its invariants.
    pub fn from_cells(
        size: usize,
        cells: Vec<Cell>,
        colors: Vec<Vec3>,
        spawn: Vec2,
    ) -> Result<Self, MapError> {
        if size < MIN_MAP_SIZE {
            return Err(MapError::TooSmall(size));
        }
        for len in [cells.len(), colors.len()] {
            if len != size * size {
                return Err(MapError::BadLength {
                    expected: size * size,
                    got: len,
                });
            }
        }

        let map = Self {
            size,
            cells,
            colors,
            spawn,
        };

        for i in 0..size {
            for (x, y) in [(i, 0), (i, size - 1), (0, i), (size - 1, i)] {
                if map.cells[x * size + y] != Cell::Wall {
                    return Err(MapError::OpenBorder { x, y });
                }
            }
        }

        let cell = spawn.floor().as_ivec2();
        let interior = 1..size as i32 - 1;
        if !(interior.contains(&cell.x) && interior.contains(&cell.y)) || map.is_wall(cell) {
            return Err(MapError::BadSpawn(spawn.x, spawn.y));
        }

        Ok(map)
    }

    /// Parse a square ascii map: `#` wall, `.` empty, `P` empty + spawn.
    ///
    /// Row index is `y`, column index is `x`. Every cell is tinted white.
    /// Without a `P` glyph the spawn is the first empty interior cell.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, MapError> {
        let size = rows.len();
        if size < MIN_MAP_SIZE {
            return Err(MapError::TooSmall(size));
        }

        let mut cells = vec![Cell::Empty; size * size];
        let mut spawn = None;
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != size {
                return Err(MapError::NotSquare {
                    rows: size,
                    row: y,
                    len,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                cells[x * size + y] = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Empty,
                    'P' => {
                        spawn = Some(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                        Cell::Empty
                    }
                    _ => {
                        return Err(MapError::BadGlyph {
                            glyph,
                            row: y,
                            col: x,
                        });
                    }
                };
            }
        }

        let spawn = spawn
            .or_else(|| {
                (1..size - 1)
                    .flat_map(|y| (1..size - 1).map(move |x| (x, y)))
                    .find(|&(x, y)| cells[x * size + y] == Cell::Empty)
                    .map(|(x, y)| Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
            })
            .unwrap_or(Vec2::new(1.5, 1.5));

        Self::from_cells(size, cells, vec![Vec3::ONE; size * size], spawn)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Centre of the spawn cell.
    #[inline]
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        let range = 0..self.size as i32;
        range.contains(&cell.x) && range.contains(&cell.y)
    }

    /// Occupancy of `cell`; anything outside the grid reads as a wall.
    #[inline]
    pub fn cell(&self, cell: IVec2) -> Cell {
        if self.in_bounds(cell) {
            self.cells[cell.x as usize * self.size + cell.y as usize]
        } else {
            Cell::Wall
        }
    }

    #[inline]
    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.cell(cell) == Cell::Wall
    }

    /// Is the cell containing world point `p` solid?
    #[inline]
    pub fn is_wall_at(&self, p: Vec2) -> bool {
        self.is_wall(p.floor().as_ivec2())
    }

    /// Tint of `cell`, with the coordinates clamped into the grid.
    #[inline]
    pub fn color(&self, cell: IVec2) -> Vec3 {
        let max = self.size as i32 - 1;
        let c = cell.clamp(IVec2::ZERO, IVec2::splat(max));
        self.colors[c.x as usize * self.size + c.y as usize]
    }
}
