//! Rendering abstraction layer.
//!
//! *The game loop never touches a pixel buffer directly.*
//! It hands a [`Scene`] snapshot (camera, map, textures) to a type that
//! implements [`Renderer`] and receives the finished frame in `end_frame`.
//!
//! * Back-ends can be swapped without changing the game loop.
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use glam::Vec3;

use crate::world::{Camera, Map, TextureSet};

mod frame;
pub mod software;

pub use frame::{FrameBuffer, pack_rgb};
pub use software::{Pipeline, RenderFeatures, Software, render};

/// Normalized colour used inside the pipeline, each channel in `[0, 1]`.
pub type Rgb = Vec3;

/// Pixel format handed to the window (0x00RRGGBB).
pub type Rgba = u32;

/// Everything one frame is rendered from. The camera is copied so input
/// handling cannot move it while columns are in flight.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub camera: Camera,
    pub map: &'a Map,
    pub textures: &'a TextureSet,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Render every column of `scene` into the internal buffer.
    fn draw_scene(&mut self, scene: &Scene<'_>);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, width: usize, height: usize, scene: &Scene<'_>, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_scene(scene);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
