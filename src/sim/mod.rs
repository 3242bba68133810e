mod components;
pub mod movement;
mod tic;

pub use components::InputCmd;
pub use movement::{mouse_look, player_input};
pub use tic::{DT, SIM_FPS, TicRunner};
