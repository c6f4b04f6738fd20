//! Canvas Breakout - a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels)
//! - `driver`: Frame driver state machine and scheduler abstraction
//! - `render`: Drawing surface contract and entity drawing
//! - `input`: Pointer/keyboard adapter producing per-tick input
//! - `config`: Data-driven game tuning

pub mod config;
pub mod driver;
pub mod input;
pub mod render;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::{FrameDriver, FrameRequest, FrameScheduler};
pub use input::InputState;

/// Game configuration defaults
pub mod consts {
    /// Drawing surface dimensions
    pub const SURFACE_WIDTH: f32 = 480.0;
    pub const SURFACE_HEIGHT: f32 = 320.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis speed at level 0 (pixels/tick)
    pub const BALL_BASE_SPEED: f32 = 2.0;
    pub const BALL_SPEED_PER_LEVEL: f32 = 1.0;
    /// Cap keeps per-tick travel below the paddle and brick thickness
    pub const BALL_MAX_SPEED: f32 = 10.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_MIN_WIDTH: f32 = 45.0;
    pub const PADDLE_SHRINK_PER_LEVEL: f32 = 5.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Keyboard movement per tick
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Brick grid defaults
    pub const BRICK_BASE_WIDTH: f32 = 75.0;
    pub const BRICK_MIN_WIDTH: f32 = 30.0;
    pub const BRICK_SHRINK_PER_LEVEL: f32 = 5.0;
    pub const BRICK_WIDTH_JITTER: f32 = 4.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BASE_ROWS: u32 = 3;
    pub const BASE_COLUMNS: u32 = 5;
    /// Bricks never extend below this fraction of the surface height
    pub const BRICK_AREA_FRACTION: f32 = 0.6;

    /// Moving bricks
    pub const MOVING_BRICKS_FROM_LEVEL: u32 = 4;
    pub const BRICK_SPEED_PER_LEVEL: f32 = 0.5;
    pub const BRICK_MAX_SPEED: f32 = 3.0;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const POINTS_PER_BRICK: u64 = 10;

    /// Presentation
    pub const ENTITY_COLOR: &str = "#0095DD";
    pub const HUD_FONT: &str = "16px Arial";
    pub const BRICK_PALETTE: [&str; 6] = [
        "#FF5733", "#33FF57", "#3357FF", "#FF33A1", "#A133FF", "#FFC733",
    ];
}
