//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Renders into a column-major [`FrameBuffer`] of normalized colours, one
//!   rayon task per screen column.
//! * Packs the finished frame into **0x00RRGGBB** in `end_frame`, ready for
//!   `minifb::Window::update_with_buffer`.
//! ---------------------------------------------------------------------------

pub mod floor;
pub mod pipeline;
pub mod shading;
pub mod sky;
pub mod walls;

pub use pipeline::{ColumnCtx, FrameCtx, Pipeline, RenderFeatures, Stage, render};

use crate::renderer::{FrameBuffer, Renderer, Rgba, Scene};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Ray-casting column renderer.
pub struct Software {
    frame: FrameBuffer,
    packed: Vec<Rgba>,
    pipeline: Pipeline,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(RenderFeatures::default())
    }
}

impl Software {
    pub fn new(features: RenderFeatures) -> Self {
        Self {
            frame: FrameBuffer::new(0, 0),
            packed: Vec::new(),
            pipeline: Pipeline::new(features),
        }
    }

    #[inline]
    pub fn features(&self) -> RenderFeatures {
        self.pipeline.features()
    }

    /// Rebuild the stage list; a no-op when nothing changed.
    pub fn set_features(&mut self, features: RenderFeatures) {
        if features != self.pipeline.features() {
            log::debug!("render features: {features:?}");
            self.pipeline = Pipeline::new(features);
        }
    }

    /// Last rendered frame, before packing.
    #[inline]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.frame.width() || h != self.frame.height() {
            log::debug!("software renderer resized to {w}x{h}");
            self.frame.resize(w, h);
        }
        self.frame.clear();
    }

    fn draw_scene(&mut self, scene: &Scene<'_>) {
        self.pipeline.run(&mut self.frame, scene);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.frame.pack_into(&mut self.packed);
        submit(&self.packed, self.frame.width(), self.frame.height());
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
