use std::time::{Duration, Instant};

use super::{InputCmd, movement};
use crate::world::{Camera, Map};

pub const SIM_FPS: u32 = 35;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Upper bound on catch-up tics per pump, so a stalled frame does not
/// fast-forward the player through the level.
const MAX_CATCH_UP: u32 = 8;

/// Drives camera movement at a fixed rate independent of frame rate.
pub struct TicRunner {
    last: Instant,
    cmd: InputCmd,
    tics: u64,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            cmd: InputCmd::default(),
            tics: 0,
        }
    }

    /// Command applied on every tic until the next call.
    #[inline]
    pub fn set_input(&mut self, cmd: InputCmd) {
        self.cmd = cmd;
    }

    /// Tics run since creation.
    #[inline]
    pub fn tics(&self) -> u64 {
        self.tics
    }

    /// Advance enough tics to synchronise simulation with real time.
    /// Returns how many ran.
    pub fn pump(&mut self, camera: &mut Camera, map: &Map) -> u32 {
        self.pump_at(Instant::now(), camera, map)
    }

    fn pump_at(&mut self, now: Instant, camera: &mut Camera, map: &Map) -> u32 {
        let mut ran = 0;
        while now.saturating_duration_since(self.last) >= TIC {
            if ran == MAX_CATCH_UP {
                // drop the backlog
                self.last = now;
                break;
            }
            self.tick(camera, map);
            self.last += TIC;
            ran += 1;
        }
        ran
    }

    /* ---------------------------------------------------------------- */
    /* run one fixed‑rate game tic                                       */
    /* ---------------------------------------------------------------- */
    pub fn tick(&mut self, camera: &mut Camera, map: &Map) {
        movement::player_input(camera, map, &self.cmd);
        self.tics += 1;
    }
}
