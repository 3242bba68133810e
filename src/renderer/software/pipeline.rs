//! Per-column stage pipeline.
//!
//! Every column casts one ray and projects it once; the resulting
//! [`ColumnCtx`] is then handed to each enabled [`Stage`] in order
//! (sky → walls → floor), so later stages occlude earlier ones.

use bitflags::bitflags;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};

use crate::{
    engine::{ColumnSpan, RayHit, Screen, cast, project_column, y_shear},
    renderer::{
        FrameBuffer, Rgb, Scene,
        software::{floor::FloorStage, sky::SkyStage, walls::WallStage},
    },
    world::{Camera, Map, TextureSet},
};

bitflags! {
    /// Optional parts of the pipeline.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderFeatures: u8 {
        const SKY        = 1 << 0;
        const WALLS      = 1 << 1;
        const TEXTURES   = 1 << 2;
        const SHADING    = 1 << 3;
        const FLOOR      = 1 << 4;
        const REFLECTION = 1 << 5;
    }
}

impl RenderFeatures {
    /// Sky and flat-coloured walls, no floor.
    pub const FLAT: Self = Self::SKY.union(Self::WALLS);
    /// Textured, shaded walls, no floor.
    pub const TEXTURED: Self = Self::FLAT.union(Self::TEXTURES).union(Self::SHADING);
    /// Everything, including the reflective floor.
    pub const FULL: Self = Self::all();
}

impl Default for RenderFeatures {
    fn default() -> Self {
        Self::FULL
    }
}

/// Per-frame values shared read-only by every column.
pub struct FrameCtx<'a> {
    pub camera: Camera,
    pub map: &'a Map,
    pub textures: &'a TextureSet,
    pub screen: Screen,
    pub shear: i32,
}

impl<'a> FrameCtx<'a> {
    pub fn new(scene: &Scene<'a>, screen: Screen) -> Self {
        Self {
            camera: scene.camera,
            map: scene.map,
            textures: scene.textures,
            screen,
            shear: y_shear(screen.h, scene.camera.pitch),
        }
    }

    /// Cast and project the ray of column `x`.
    pub fn column(&self, x: usize) -> ColumnCtx<'_> {
        let angle = self.camera.column_angle(x, self.screen.w);
        let hit = cast(self.map, self.camera.pos, angle);
        let span = project_column(&self.screen, hit.distance, self.shear);
        ColumnCtx {
            frame: self,
            x,
            angle,
            hit,
            span,
        }
    }
}

/// One column's ray and wall extent, computed once and shared by stages.
pub struct ColumnCtx<'a> {
    pub frame: &'a FrameCtx<'a>,
    pub x: usize,
    pub angle: f32,
    pub hit: RayHit,
    pub span: ColumnSpan,
}

/// A render stage fills (part of) one column given the shared context.
///
/// Stages only ever write the `pixels` slice of their own column, which is
/// what lets the pipeline run columns in parallel.
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    fn draw_column(&self, col: &ColumnCtx<'_>, pixels: &mut [Rgb]);
}

/// Ordered list of stages selected by [`RenderFeatures`].
pub struct Pipeline {
    features: RenderFeatures,
    stages: Vec<Box<dyn Stage>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(RenderFeatures::default())
    }
}

impl Pipeline {
    pub fn new(features: RenderFeatures) -> Self {
        let textured = features.contains(RenderFeatures::TEXTURES);
        let shaded = features.contains(RenderFeatures::SHADING);
        // mirrored wall rows are only ever consumed by the floor blend
        let reflect = features.contains(RenderFeatures::REFLECTION | RenderFeatures::FLOOR);

        let mut stages: Vec<Box<dyn Stage>> = Vec::new();
        if features.contains(RenderFeatures::SKY) {
            stages.push(Box::new(SkyStage));
        }
        if features.contains(RenderFeatures::WALLS) {
            stages.push(Box::new(WallStage {
                textured,
                shaded,
                reflect,
            }));
        }
        if features.contains(RenderFeatures::FLOOR) {
            stages.push(Box::new(FloorStage {
                textured,
                shaded,
                reflect,
            }));
        }

        Self { features, stages }
    }

    #[inline]
    pub fn features(&self) -> RenderFeatures {
        self.features
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over every column of `buffer`, in parallel.
    ///
    /// The buffer is expected to be cleared already.
    pub fn run(&self, buffer: &mut FrameBuffer, scene: &Scene<'_>) {
        let screen = Screen::new(buffer.width(), buffer.height());
        if screen.w == 0 || screen.h == 0 {
            return;
        }
        let frame = FrameCtx::new(scene, screen);

        buffer
            .par_columns_mut()
            .enumerate()
            .for_each(|(x, pixels)| {
                let col = frame.column(x);
                for stage in &self.stages {
                    stage.draw_column(&col, pixels);
                }
            });
    }
}

/// Render one frame into `buffer`: clear to black, then run the pipeline
/// built from `features`.
pub fn render(
    buffer: &mut FrameBuffer,
    camera: &Camera,
    map: &Map,
    textures: &TextureSet,
    features: RenderFeatures,
) {
    buffer.clear();
    let scene = Scene {
        camera: *camera,
        map,
        textures,
    };
    Pipeline::new(features).run(buffer, &scene);
}
