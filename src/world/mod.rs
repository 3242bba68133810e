mod camera;
mod map;
mod texture;

pub use camera::{Camera, DEFAULT_FOV, PITCH_LIMIT};

pub use map::{Cell, MIN_MAP_SIZE, Map, MapError};

pub use texture::{Texture, TextureError, TextureSet};
