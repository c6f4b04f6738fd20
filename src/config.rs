//! Game tuning configuration
//!
//! Every balance constant lives here so a host can override any subset of
//! them with a JSON document. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Ball;

/// Errors raised while loading a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_speed_per_level: f32,
    pub ball_max_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_min_width: f32,
    pub paddle_shrink_per_level: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    // === Bricks ===
    pub brick_base_width: f32,
    pub brick_min_width: f32,
    pub brick_shrink_per_level: f32,
    /// Random +/- spread applied to the brick width of each generated grid
    pub brick_width_jitter: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
    pub base_rows: u32,
    pub base_columns: u32,
    pub brick_area_fraction: f32,
    pub moving_bricks_from_level: u32,
    pub brick_speed_per_level: f32,
    pub brick_max_speed: f32,

    // === Session ===
    pub starting_lives: u8,
    pub points_per_brick: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_per_level: BALL_SPEED_PER_LEVEL,
            ball_max_speed: BALL_MAX_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_min_width: PADDLE_MIN_WIDTH,
            paddle_shrink_per_level: PADDLE_SHRINK_PER_LEVEL,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            brick_base_width: BRICK_BASE_WIDTH,
            brick_min_width: BRICK_MIN_WIDTH,
            brick_shrink_per_level: BRICK_SHRINK_PER_LEVEL,
            brick_width_jitter: BRICK_WIDTH_JITTER,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,
            base_rows: BASE_ROWS,
            base_columns: BASE_COLUMNS,
            brick_area_fraction: BRICK_AREA_FRACTION,
            moving_bricks_from_level: MOVING_BRICKS_FROM_LEVEL,
            brick_speed_per_level: BRICK_SPEED_PER_LEVEL,
            brick_max_speed: BRICK_MAX_SPEED,

            starting_lives: STARTING_LIVES,
            points_per_brick: POINTS_PER_BRICK,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !(self.surface_width > 0.0 && self.surface_height > 0.0) {
            return invalid("surface", "must have positive dimensions");
        }
        if !(self.ball_radius > 0.0) {
            return invalid("ball_radius", "must be positive");
        }
        if self.ball_radius * 2.0 >= self.surface_width.min(self.surface_height) {
            return invalid("ball_radius", "does not fit on the surface");
        }
        if self.ball_base_speed < 0.0 || self.ball_speed_per_level < 0.0 {
            return invalid("ball_speed", "must not be negative");
        }
        if !(self.ball_max_speed > 0.0) {
            return invalid("ball_max_speed", "must be positive");
        }
        if !(Ball::speed_for_level(1, self) > 0.0) {
            return invalid("ball_speed", "ball would never move");
        }
        if !(self.paddle_min_width > 0.0) || self.paddle_min_width > self.paddle_width {
            return invalid("paddle_min_width", "must be positive and at most paddle_width");
        }
        if self.paddle_width > self.surface_width {
            return invalid("paddle_width", "is wider than the surface");
        }
        if !(self.paddle_height > 0.0) || self.paddle_height >= self.surface_height {
            return invalid("paddle_height", "must be positive and fit on the surface");
        }
        // Per-tick travel must stay below the span in which the ball touches
        // the paddle or a brick, otherwise it can step over them.
        let diameter = self.ball_radius * 2.0;
        if self.ball_max_speed >= self.paddle_height + diameter {
            return invalid("ball_max_speed", "lets the ball pass through the paddle");
        }
        if self.ball_max_speed >= self.brick_height + diameter {
            return invalid("ball_max_speed", "lets the ball pass through bricks");
        }
        if !(self.brick_min_width > 0.0) || self.brick_min_width > self.brick_base_width {
            return invalid("brick_min_width", "must be positive and at most brick_base_width");
        }
        if !(self.brick_height > 0.0) || self.brick_padding < 0.0 || self.brick_width_jitter < 0.0 {
            return invalid("brick_geometry", "must not be negative");
        }
        if self.base_rows == 0 || self.base_columns == 0 {
            return invalid("grid", "needs at least one row and one column");
        }
        if !(self.brick_area_fraction > 0.0 && self.brick_area_fraction <= 1.0) {
            return invalid("brick_area_fraction", "must be within (0, 1]");
        }
        // The base grid must fit, later levels only grow up to what fits.
        let base_bottom = self.brick_offset_top
            + self.base_rows as f32 * (self.brick_height + self.brick_padding)
            - self.brick_padding;
        if base_bottom > self.surface_height * self.brick_area_fraction {
            return invalid("base_rows", "do not fit in the brick area");
        }
        let base_right = self.brick_offset_left
            + self.base_columns as f32 * (self.brick_base_width + self.brick_width_jitter + self.brick_padding)
            - self.brick_padding;
        if base_right > self.surface_width {
            return invalid("base_columns", "do not fit across the surface");
        }
        if self.brick_speed_per_level < 0.0 || self.brick_max_speed < 0.0 {
            return invalid("brick_speed", "must not be negative");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least one");
        }
        Ok(())
    }

    /// Load overrides from the canvas `data-config` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let Some(json) = canvas.get_attribute("data-config") else {
            log::info!("Using default config");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from data-config attribute");
                config
            }
            Err(e) => {
                log::warn!("Ignoring data-config: {}", e);
                Self::default()
            }
        }
    }

    /// Load overrides from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
