//! Minimal top-down grid map viewer.
//!
//! Draws every cell in its tint, the spawn point and the fan of rays the
//! first-person view would cast from it.
//!
//! ```bash
//! cargo run --release --bin gridcaster -- --map-size 32 --seed 7
//! ```

use anyhow::Context;
use clap::Parser;
use glam::{IVec2, Vec2};
use minifb::{Key, Window, WindowOptions};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use gridcaster::{
    config::Opts,
    engine::cast,
    renderer::pack_rgb,
    world::{Camera, Map},
};

const WIDTH: usize = 768;
const HEIGHT: usize = 768;
/// Rays drawn in the fan; every n-th column of the 3-D view.
const FAN_RAYS: usize = 64;

const EMPTY_COL: u32 = 0x00_202020;
const GRID_COL: u32 = 0x00_101010;
const RAY_COL: u32 = 0x00_FFD040;
const SPAWN_COL: u32 = 0x00_FF3030;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // ─────────── parse CLI ────────────
    let opts = Opts::parse();
    opts.validate().context("invalid options")?;

    let seed = opts.seed.unwrap_or_else(rand::random);
    let map = Map::generate(opts.map_size, &mut Pcg32::seed_from_u64(seed));
    log::info!("map {0}x{0}, seed {seed}, spawn {1:?}", map.size(), map.spawn());

    let camera = Camera::at_spawn(&map, opts.fov_radians());
    let buffer = draw_map(&map, &camera);

    // ─────────── show window ────────────
    let mut window = Window::new("gridcaster map", WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(30);
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

/// Rasterise cells, grid lines, the ray fan and the spawn marker.
fn draw_map(map: &Map, camera: &Camera) -> Vec<u32> {
    let cell_px = (WIDTH.min(HEIGHT) / map.size()).max(1) as i32;
    let to_screen = |p: Vec2| -> (i32, i32) {
        ((p.x * cell_px as f32) as i32, (p.y * cell_px as f32) as i32)
    };

    let mut buffer = vec![0u32; WIDTH * HEIGHT];

    // ─────────── cells ────────────
    for cy in 0..map.size() as i32 {
        for cx in 0..map.size() as i32 {
            let cell = IVec2::new(cx, cy);
            let colour = if map.is_wall(cell) {
                pack_rgb(map.color(cell))
            } else {
                EMPTY_COL
            };
            fill_rect(
                &mut buffer,
                cx * cell_px,
                cy * cell_px,
                cell_px - 1,
                cell_px - 1,
                colour,
            );
        }
    }
    let extent = map.size() as i32 * cell_px;
    for i in 0..=map.size() as i32 {
        let at = i * cell_px;
        draw_line(&mut buffer, WIDTH, HEIGHT, at, 0, at, extent, GRID_COL);
        draw_line(&mut buffer, WIDTH, HEIGHT, 0, at, extent, at, GRID_COL);
    }

    // ─────────── ray fan ────────────
    let (x0, y0) = to_screen(camera.pos);
    for i in 0..FAN_RAYS {
        let hit = cast(map, camera.pos, camera.column_angle(i, FAN_RAYS));
        let (x1, y1) = to_screen(hit.pos);
        draw_line(&mut buffer, WIDTH, HEIGHT, x0, y0, x1, y1, RAY_COL);
    }

    // ─────────── spawn ────────────
    let r = (cell_px / 4).max(1);
    fill_rect(&mut buffer, x0 - r, y0 - r, 2 * r, 2 * r, SPAWN_COL);

    buffer
}

fn fill_rect(buf: &mut [u32], x: i32, y: i32, w: i32, h: i32, colour: u32) {
    for py in y.max(0)..(y + h).min(HEIGHT as i32) {
        for px in x.max(0)..(x + w).min(WIDTH as i32) {
            buf[py as usize * WIDTH + px as usize] = colour;
        }
    }
}

/// Integer Bresenham line‑drawing algorithm.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            if x0 == x1 {
                break;
            }
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            if y0 == y1 {
                break;
            }
            err += dx;
            y0 += sy;
        }
    }
}
