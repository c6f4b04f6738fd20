//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (column-major bricks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Resolution, resolve};
pub use grid::{Grid, GridLayout, generate};
pub use rect::Rect;
pub use state::{
    Advance, Axis, Ball, Brick, BrickStatus, GameEvent, GamePhase, GameState, Lives, Paddle, Score,
};
pub use tick::{TickInput, tick};
