//! First-person viewer for a generated grid map.
//!
//! Controls  W/S forward · A/D strafe · ←/→ turn · ↑/↓ look · mouse look
//!           Shift run · F floor · R reflection · L shading · T textures · Esc quit
//!
//! ```bash
//! RUST_LOG=info cargo run --release --bin view_sw -- --map-size 32 --seed 7
//! ```

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, MouseMode, Scale, Window, WindowOptions};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::time::{Duration, Instant};

use gridcaster::{
    config::Opts,
    renderer::{RenderFeatures, RendererExt, Scene, Software},
    sim::{InputCmd, TicRunner, mouse_look},
    world::{Camera, Map, TextureSet},
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    opts.validate().context("invalid options")?;

    if let Some(n) = opts.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("cannot configure render threads")?;
    }

    let (w, h) = opts.buffer_size();

    let seed = opts.seed.unwrap_or_else(rand::random);
    log::info!("map {0}x{0}, seed {seed}", opts.map_size);
    let map = Map::generate(opts.map_size, &mut Pcg32::seed_from_u64(seed));

    let textures = load_textures(&opts, w, h);

    let mut camera = Camera::at_spawn(&map, opts.fov_radians());
    let mut sim = TicRunner::new();
    let mut renderer = Software::new(opts.features());

    let mut win = Window::new(
        "gridcaster",
        w,
        h,
        WindowOptions {
            scale: window_scale(opts.scale),
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(opts.fps);
    win.set_cursor_visibility(false);

    log::info!(
        "buffer {w}x{h} (x{}), features {:?}",
        opts.scale,
        renderer.features()
    );

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    let mut last_mouse: Option<Vec2> = None;

    while win.is_open() && !win.is_key_down(Key::Escape) {
        /* --------------- build one InputCmd per frame --------------------- */
        sim.set_input(read_input(&win));

        /* mouse look: buffer-pixel motion since the previous frame --------- */
        let mouse = win
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| Vec2::new(x, y));
        if let (Some(now), Some(prev)) = (mouse, last_mouse) {
            mouse_look(&mut camera, now - prev, opts.look_sensitivity());
        }
        last_mouse = mouse;

        /* runtime feature toggles ------------------------------------------ */
        let mut features = renderer.features();
        for (key, flag) in [
            (Key::F, RenderFeatures::FLOOR),
            (Key::R, RenderFeatures::REFLECTION),
            (Key::L, RenderFeatures::SHADING),
            (Key::T, RenderFeatures::TEXTURES),
        ] {
            if win.is_key_pressed(key, KeyRepeat::No) {
                features.toggle(flag);
                log::info!("{flag:?} {}", if features.contains(flag) { "on" } else { "off" });
            }
        }
        renderer.set_features(features);

        sim.pump(&mut camera, &map);

        /* draw */
        let t0 = Instant::now(); // ┌─ frame timer start
        let scene = Scene {
            camera,
            map: &map,
            textures: &textures,
        };
        let mut presented = Ok(());
        renderer.draw_frame(w, h, &scene, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(fb, w, h);
        });
        presented.context("cannot present frame")?;

        // ─────────── report every ~3 s ─────────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            log::info!("avg render: {avg_ms:.2} ms  ({fps:.1} FPS)");
            log::debug!(
                "camera {:?} yaw {:.2} pitch {:.2}, frame mean {:?}",
                camera.pos,
                camera.yaw,
                camera.pitch,
                renderer.frame().mean()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Image textures when all three paths were given and load cleanly,
/// procedural ones otherwise.
fn load_textures(opts: &Opts, w: usize, h: usize) -> TextureSet {
    let Some((sky, wall, floor)) = opts.texture_paths() else {
        log::info!("no texture images given, using procedural textures");
        return TextureSet::procedural(w, h);
    };
    match TextureSet::load(sky, wall, floor, w, h) {
        Ok(set) => {
            log::info!(
                "textures: sky {}x{}, wall {}, floor {}",
                set.sky.w,
                set.sky.h,
                set.wall.name,
                set.floor.name
            );
            set
        }
        Err(e) => {
            log::warn!("{e:#}; falling back to procedural textures");
            TextureSet::procedural(w, h)
        }
    }
}

fn read_input(win: &Window) -> InputCmd {
    let down = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k));
    let axis = |neg: &[Key], pos: &[Key]| down(pos) as i32 as f32 - down(neg) as i32 as f32;

    InputCmd {
        forward: axis(&[Key::S], &[Key::W]),
        strafe: axis(&[Key::A], &[Key::D]),
        turn: axis(&[Key::Left], &[Key::Right]),
        look: axis(&[Key::Up], &[Key::Down]),
        run: down(&[Key::LeftShift, Key::RightShift]),
    }
}

fn window_scale(scale: usize) -> Scale {
    match scale {
        2 => Scale::X2,
        4 => Scale::X4,
        8 => Scale::X8,
        _ => Scale::X1,
    }
}
