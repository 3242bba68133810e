//! Grid ray-casting renderer.
//!
//! A camera walks a square grid of walled / empty cells; every frame the
//! software back-end casts one ray per screen column and shades sky, wall
//! and a reflective floor into a column-major frame-buffer.

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
