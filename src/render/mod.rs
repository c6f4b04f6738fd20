//! Rendering module
//!
//! The simulation never draws. Entities implement `Draw` against the
//! `Surface` contract, which the host backs with a 2D canvas.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::consts::{BRICK_PALETTE, ENTITY_COLOR, HUD_FONT};
use crate::sim::{Ball, Brick, GameState, Grid, Paddle, Rect};

/// Host-provided 2D drawing surface
pub trait Surface {
    fn clear(&mut self, region: Rect);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
}

/// Anything that knows how to put itself on a surface
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

impl Draw for Ball {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, ENTITY_COLOR);
    }
}

impl Draw for Paddle {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, ENTITY_COLOR);
    }
}

impl Draw for Brick {
    /// Destroyed bricks are not drawn
    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_alive() {
            return;
        }
        surface.fill_rect(self.rect, brick_color(self));
    }
}

/// Palette entry for a brick, shifting every level
pub fn brick_color(brick: &Brick) -> &'static str {
    let index = (brick.column + brick.row + brick.level) as usize % BRICK_PALETTE.len();
    BRICK_PALETTE[index]
}

impl Draw for Grid {
    fn draw(&self, surface: &mut dyn Surface) {
        for brick in self.iter() {
            brick.draw(surface);
        }
    }
}

/// Score, lives and level indicators
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub surface_width: f32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score.value(),
            lives: state.lives.value(),
            level: state.level,
            surface_width: state.config.surface_width,
        }
    }
}

impl Draw for Hud {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_text(
            &format!("Score: {}", self.score),
            Vec2::new(8.0, 20.0),
            HUD_FONT,
            ENTITY_COLOR,
        );
        surface.fill_text(
            &format!("Lives: {}", self.lives),
            Vec2::new(self.surface_width - 65.0, 20.0),
            HUD_FONT,
            ENTITY_COLOR,
        );
        surface.fill_text(
            &format!("Level: {}", self.level),
            Vec2::new(self.surface_width / 2.0 - 30.0, 20.0),
            HUD_FONT,
            ENTITY_COLOR,
        );
    }
}

/// Draw every entity of the session (the caller clears first)
pub fn draw_scene(state: &GameState, surface: &mut dyn Surface) {
    state.ball.draw(surface);
    state.paddle.draw(surface);
    state.grid.draw(surface);
    Hud::from_state(state).draw(surface);
}
