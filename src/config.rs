//! Command-line configuration shared by the viewers.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::{renderer::RenderFeatures, world::MIN_MAP_SIZE};

/// Render quality tiers; switches below refine the chosen tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Quality {
    /// Sky and flat-coloured walls.
    Flat,
    /// Textured, shaded walls.
    Textured,
    /// Textured walls plus the reflective floor.
    #[default]
    Full,
}

impl Quality {
    pub fn features(self) -> RenderFeatures {
        match self {
            Quality::Flat => RenderFeatures::FLAT,
            Quality::Textured => RenderFeatures::TEXTURED,
            Quality::Full => RenderFeatures::FULL,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("window must be at least {min}x{min} pixels, got {w}x{h}")]
    WindowTooSmall { w: usize, h: usize, min: usize },

    #[error("pixel scale must be 1, 2, 4 or 8, got {0}")]
    BadScale(usize),

    #[error("map size must be at least {min}, got {size}")]
    MapTooSmall { size: usize, min: usize },

    #[error("field of view must be within (0, 180) degrees, got {0}")]
    BadFov(f32),

    #[error("mouse sensitivity must be positive, got {0}")]
    BadSensitivity(f32),

    #[error("texture paths must be given all together (sky, wall, floor) or not at all")]
    PartialTextures,
}

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Opts {
    /// Window width in pixels
    #[arg(long, default_value_t = 1600)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 900)]
    pub height: usize,

    /// Window pixels per rendered pixel (1, 2, 4 or 8)
    #[arg(long, default_value_t = 4)]
    pub scale: usize,

    /// Edge length of the generated square map, in cells
    #[arg(long, default_value_t = 24)]
    pub map_size: usize,

    /// RNG seed for map generation (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub fov: f32,

    /// Window pixels of pointer travel per radian of yaw / pitch
    #[arg(long, default_value_t = 500.0)]
    pub mouse_sensitivity: f32,

    /// Frame-rate cap for the window
    #[arg(long, default_value_t = 60)]
    pub fps: usize,

    /// Sky panorama image
    #[arg(long, value_name = "FILE")]
    pub sky: Option<PathBuf>,

    /// Wall texture image
    #[arg(long, value_name = "FILE")]
    pub wall: Option<PathBuf>,

    /// Floor texture image
    #[arg(long, value_name = "FILE")]
    pub floor: Option<PathBuf>,

    /// Render quality preset
    #[arg(long, value_enum, default_value_t = Quality::Full)]
    pub quality: Quality,

    /// Disable distance and corner shading
    #[arg(long)]
    pub no_shading: bool,

    /// Disable the floor reflection
    #[arg(long)]
    pub no_reflection: bool,

    /// Worker threads for rendering (rayon default when omitted)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl Default for Opts {
    fn default() -> Self {
        Self::parse_from(["gridcaster"])
    }
}

/// Smallest window edge accepted, in window pixels.
const MIN_WINDOW: usize = 16;

impl Opts {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WINDOW || self.height < MIN_WINDOW {
            return Err(ConfigError::WindowTooSmall {
                w: self.width,
                h: self.height,
                min: MIN_WINDOW,
            });
        }
        if !matches!(self.scale, 1 | 2 | 4 | 8) {
            return Err(ConfigError::BadScale(self.scale));
        }
        if self.map_size < MIN_MAP_SIZE {
            return Err(ConfigError::MapTooSmall {
                size: self.map_size,
                min: MIN_MAP_SIZE,
            });
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::BadFov(self.fov));
        }
        if !(self.mouse_sensitivity > 0.0) {
            return Err(ConfigError::BadSensitivity(self.mouse_sensitivity));
        }
        if self.texture_paths().is_none()
            && (self.sky.is_some() || self.wall.is_some() || self.floor.is_some())
        {
            return Err(ConfigError::PartialTextures);
        }
        Ok(())
    }

    /// Preset refined by the `--no-*` switches.
    pub fn features(&self) -> RenderFeatures {
        let mut features = self.quality.features();
        if self.no_shading {
            features.remove(RenderFeatures::SHADING);
        }
        if self.no_reflection {
            features.remove(RenderFeatures::REFLECTION);
        }
        features
    }

    /// Internal frame-buffer resolution (window size divided by the scale).
    pub fn buffer_size(&self) -> (usize, usize) {
        let scale = self.scale.max(1);
        ((self.width / scale).max(1), (self.height / scale).max(1))
    }

    /// Sensitivity in frame-buffer pixels, the unit minifb reports the
    /// pointer in once the window is scaled.
    pub fn look_sensitivity(&self) -> f32 {
        self.mouse_sensitivity / self.scale.max(1) as f32
    }

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    /// `(sky, wall, floor)` when all three images were given.
    pub fn texture_paths(&self) -> Option<(&PathBuf, &PathBuf, &PathBuf)> {
        match (&self.sky, &self.wall, &self.floor) {
            (Some(s), Some(w), Some(f)) => Some((s, w, f)),
            _ => None,
        }
    }
}
