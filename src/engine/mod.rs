//! Geometry shared by every render stage: grid traversal and per-column
//! projection. Nothing in here touches a pixel.

pub mod projection;
pub mod raycast;
pub mod types;

pub use projection::{ColumnSpan, MIN_DISTANCE, project_column, y_shear};
pub use raycast::{HitSide, RayHit, cast};
pub use types::Screen;
