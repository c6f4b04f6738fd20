//! Brick grid layout and generation
//!
//! Row/column counts, brick width and brick speed are linear in the level,
//! clamped so the grid always fits inside the brick area of the surface.

use rand::Rng;

use super::rect::Rect;
use super::state::{Brick, BrickStatus};
use crate::config::GameConfig;

/// Grid dimensions for a level, before randomization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    /// Nominal brick width (jitter is applied on top)
    pub brick_width: f32,
    /// Horizontal brick speed (0 = stationary)
    pub brick_speed: f32,
}

impl GridLayout {
    pub fn for_level(level: u32, config: &GameConfig) -> Self {
        let brick_width = (config.brick_base_width - level as f32 * config.brick_shrink_per_level)
            .max(config.brick_min_width);

        // Rows grow by one per level until the brick area is full
        let row_pitch = config.brick_height + config.brick_padding;
        let area_bottom = config.surface_height * config.brick_area_fraction;
        let max_rows =
            ((area_bottom - config.brick_offset_top + config.brick_padding) / row_pitch).floor();
        let max_rows = (max_rows.max(0.0) as u32).max(config.base_rows);
        let rows = (config.base_rows + level.saturating_sub(1)).min(max_rows);

        // Columns grow every other level; leave room for the widest jitter
        let col_pitch = brick_width + config.brick_width_jitter + config.brick_padding;
        let max_columns =
            ((config.surface_width - config.brick_offset_left + config.brick_padding) / col_pitch)
                .floor();
        let max_columns = (max_columns.max(0.0) as u32).max(config.base_columns);
        let columns = (config.base_columns + level / 2).min(max_columns);

        let brick_speed = if level >= config.moving_bricks_from_level {
            let steps = (level - config.moving_bricks_from_level + 1) as f32;
            (steps * config.brick_speed_per_level).min(config.brick_max_speed)
        } else {
            0.0
        };

        Self {
            columns,
            rows,
            brick_width,
            brick_speed,
        }
    }
}

/// The bricks of one level, stored column-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub columns: u32,
    pub rows: u32,
    pub bricks: Vec<Brick>,
}

impl Grid {
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, column: u32, row: u32) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get((column * self.rows + row) as usize)
    }

    /// Bricks in column-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    /// True once every brick is destroyed
    pub fn is_cleared(&self) -> bool {
        !self.bricks.iter().any(Brick::is_alive)
    }
}

/// Generate a fully populated grid for `level`
pub fn generate<R: Rng>(level: u32, config: &GameConfig, rng: &mut R) -> Grid {
    let layout = GridLayout::for_level(level, config);

    let jitter = if config.brick_width_jitter > 0.0 {
        rng.random_range(-config.brick_width_jitter..=config.brick_width_jitter)
    } else {
        0.0
    };
    let brick_width = (layout.brick_width + jitter).max(config.brick_min_width);

    let mut bricks = Vec::with_capacity((layout.columns * layout.rows) as usize);
    for column in 0..layout.columns {
        for row in 0..layout.rows {
            let x = config.brick_offset_left + column as f32 * (brick_width + config.brick_padding);
            let y = config.brick_offset_top
                + row as f32 * (config.brick_height + config.brick_padding);
            bricks.push(Brick {
                column,
                row,
                rect: Rect::new(x, y, brick_width, config.brick_height),
                status: BrickStatus::Alive,
                speed: layout.brick_speed,
                direction: 1.0,
                level,
            });
        }
    }

    log::debug!(
        "Level {} grid: {}x{} bricks, width {:.1}, speed {:.1}",
        level,
        layout.columns,
        layout.rows,
        brick_width,
        layout.brick_speed
    );

    Grid {
        columns: layout.columns,
        rows: layout.rows,
        bricks,
    }
}
