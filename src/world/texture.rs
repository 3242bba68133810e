// Normalized-colour textures shared read-only by every column and frame.
// The loader (file or procedural) fills the pixels once; the renderer only
// ever reads them through `texel`.

use glam::Vec3;
use std::path::Path;

/// CPU-side storage: linear RGB in `[0, 1]`, row-major (`v * w + u`).
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Vec3>,
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Vec3 = Vec3::splat(0.75);
        const DARK: Vec3 = Vec3::splat(0.25);
        let mut pix = vec![Vec3::ZERO; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

/// Things that can go wrong when building or loading a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture `{0}` has no pixels")]
    Empty(String),

    #[error("texture `{name}` expects {expected} pixels, got {got}")]
    SizeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// The sky slice is taken from rows `H - shear .. 2H - shear`.
    #[error("sky texture is {got} rows tall, needs at least {need}")]
    SkyTooShort { need: usize, got: usize },

    #[error("cannot load texture `{path}`")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl Texture {
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<Vec3>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if w == 0 || h == 0 {
            return Err(TextureError::Empty(name));
        }
        if pixels.len() != w * h {
            return Err(TextureError::SizeMismatch {
                name,
                expected: w * h,
                got: pixels.len(),
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// Single-colour texture; handy for tests and flat shading.
    pub fn solid<S: Into<String>>(name: S, w: usize, h: usize, color: Vec3) -> Self {
        Self {
            name: name.into(),
            w: w.max(1),
            h: h.max(1),
            pixels: vec![color; w.max(1) * h.max(1)],
        }
    }

    /// Build a texture by evaluating `f(u, v)` for every texel.
    pub fn from_fn<S, F>(name: S, w: usize, h: usize, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(usize, usize) -> Vec3,
    {
        let (w, h) = (w.max(1), h.max(1));
        let pixels = (0..h)
            .flat_map(|v| (0..w).map(move |u| (u, v)))
            .map(|(u, v)| f(u, v))
            .collect();
        Self {
            name: name.into(),
            w,
            h,
            pixels,
        }
    }

    /// Decode an image file, resize it to `w × h` and normalize to `[0, 1]`.
    pub fn from_file(path: &Path, w: usize, h: usize) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Image {
            path: path.display().to_string(),
            source,
        })?;
        let rgb = img
            .resize_exact(
                w.max(1) as u32,
                h.max(1) as u32,
                image::imageops::FilterType::Triangle,
            )
            .to_rgb32f();

        let pixels = rgb.pixels().map(|p| Vec3::from(p.0)).collect();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name, rgb.width() as usize, rgb.height() as usize, pixels)
    }

    /// Nearest-sample lookup; out-of-range coordinates are clamped.
    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> Vec3 {
        let u = u.min(self.w - 1);
        let v = v.min(self.h - 1);
        self.pixels[v * self.w + u]
    }
}

/// The three fixed images the renderer samples.
#[derive(Clone, Debug)]
pub struct TextureSet {
    pub sky: Texture,
    pub wall: Texture,
    pub floor: Texture,
}

/// Edge length of the procedural wall / floor tiles.
const TILE: usize = 64;

impl TextureSet {
    /// Generated textures sized for a `screen_w × screen_h` buffer.
    pub fn procedural(screen_w: usize, screen_h: usize) -> Self {
        Self {
            sky: procedural_sky(screen_w * 4, sky_height(screen_h)),
            wall: procedural_bricks(TILE),
            floor: procedural_tiles(TILE),
        }
    }

    /// Load all three images; the sky is resized to cover a full turn and
    /// the maximum pitch shear.
    pub fn load(
        sky: &Path,
        wall: &Path,
        floor: &Path,
        screen_w: usize,
        screen_h: usize,
    ) -> Result<Self, TextureError> {
        let set = Self {
            sky: Texture::from_file(sky, screen_w * 4, sky_height(screen_h))?,
            wall: Texture::from_file(wall, TILE, TILE)?,
            floor: Texture::from_file(floor, TILE, TILE)?,
        };
        set.validate(screen_h)?;
        Ok(set)
    }

    /// Check the sky is tall enough for a `screen_h`-row buffer.
    pub fn validate(&self, screen_h: usize) -> Result<(), TextureError> {
        let need = 2 * screen_h;
        if self.sky.h < need {
            return Err(TextureError::SkyTooShort {
                need,
                got: self.sky.h,
            });
        }
        Ok(())
    }
}

/// Three buffer heights leave room for the shear at maximum pitch.
fn sky_height(screen_h: usize) -> usize {
    3 * screen_h.max(1)
}

fn procedural_sky(w: usize, h: usize) -> Texture {
    let zenith = Vec3::new(0.10, 0.22, 0.55);
    let horizon = Vec3::new(0.85, 0.65, 0.55);
    Texture::from_fn("SKY", w, h, |u, v| {
        let t = v as f32 / h as f32;
        let base = zenith.lerp(horizon, t);
        // soft cloud bands that wrap seamlessly around the panorama
        let a = u as f32 / w as f32 * std::f32::consts::TAU;
        let cloud = ((a * 3.0).sin() * (t * 25.0).sin()).max(0.0) * (1.0 - t) * 0.3;
        (base + Vec3::splat(cloud)).min(Vec3::ONE)
    })
}

fn procedural_bricks(n: usize) -> Texture {
    let brick = Vec3::new(0.85, 0.80, 0.75);
    let mortar = Vec3::splat(0.35);
    let rows = n / 4;
    Texture::from_fn("BRICK", n, n, |u, v| {
        let row = v / rows;
        let shift = if row % 2 == 0 { 0 } else { n / 4 };
        let joint = v % rows == 0 || (u + shift) % (n / 2) == 0;
        if joint { mortar } else { brick }
    })
}

fn procedural_tiles(n: usize) -> Texture {
    let light = Vec3::splat(0.9);
    let dark = Vec3::splat(0.55);
    let half = n / 2;
    Texture::from_fn("TILES", n, n, |u, v| {
        if (u / half + v / half) % 2 == 0 { light } else { dark }
    })
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
