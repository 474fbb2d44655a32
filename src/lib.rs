//! Gecko Jump - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `driver`: Frame loop that ticks, renders and forwards side effects
//! - `renderer`: Drawing-surface abstraction and the frame painter
//! - `audio`: Clip playback abstraction (background loop, jump, collision)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (mute, volume)

pub mod audio;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{GameLoop, LoopControl};
pub use settings::Settings;
pub use tuning::Tuning;

/// Fixed game geometry
pub mod consts {
    /// Canvas dimensions (logical units)
    pub const CANVAS_WIDTH: f32 = 900.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Player box and starting column
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Lowest point the player can reach (top edge of the player box)
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - PLAYER_HEIGHT;

    /// Obstacle box
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
}
