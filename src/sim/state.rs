//! Game state and core simulation types
//!
//! The whole session lives in one `GameState`, owned by the frame driver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{self, Grid};
use super::rect::Rect;
use crate::config::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, waiting for the start command
    Idle,
    /// Active gameplay
    Running,
    /// A level was just cleared; folds back into `Running` on the next tick
    LevelTransition,
    /// Lives exhausted (terminal)
    GameOver,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelUp { level: u32 },
    LifeLost { remaining: u8 },
    GameOver { score: u64, level: u32 },
}

/// Velocity axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Entities that move on their own once per tick
///
/// The paddle is not one of them: it only moves in response to input.
/// `bounds` is for entities that bounce off the surface edges themselves.
pub trait Advance {
    fn advance(&mut self, bounds: &Rect);
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Per-axis speed for a level (non-decreasing, capped)
    pub fn speed_for_level(level: u32, config: &GameConfig) -> f32 {
        (config.ball_base_speed + level as f32 * config.ball_speed_per_level)
            .min(config.ball_max_speed)
    }

    /// Put the ball on top of the paddle, centered, heading upward
    pub fn reset<R: Rng>(
        &mut self,
        level: u32,
        paddle: &Paddle,
        config: &GameConfig,
        rng: &mut R,
    ) {
        let speed = Self::speed_for_level(level, config);
        let dir_x = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        self.pos = Vec2::new(config.surface_width / 2.0, paddle.rect.top() - self.radius);
        self.vel = Vec2::new(speed * dir_x, -speed);
    }

    /// Negate the velocity component on `axis`
    pub fn reflect(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.vel.x = -self.vel.x,
            Axis::Y => self.vel.y = -self.vel.y,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

impl Advance for Ball {
    fn advance(&mut self, _bounds: &Rect) {
        self.pos += self.vel;
    }
}

/// The player's paddle, resting on the bottom edge of the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub rect: Rect,
    /// Keyboard movement per tick
    pub speed: f32,
}

impl Paddle {
    /// Build a centered paddle; width shrinks with level down to a floor
    pub fn for_level(level: u32, config: &GameConfig) -> Self {
        let shrink = level.saturating_sub(1) as f32 * config.paddle_shrink_per_level;
        let width = (config.paddle_width - shrink).max(config.paddle_min_width);
        let x = (config.surface_width - width) / 2.0;
        let y = config.surface_height - config.paddle_height;
        Self {
            rect: Rect::new(x, y, width, config.paddle_height),
            speed: config.paddle_speed,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.rect.pos.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.size.x
    }

    /// Center the paddle under the pointer
    pub fn follow_pointer(&mut self, pointer_x: f32, surface_width: f32) {
        self.rect.pos.x = pointer_x - self.width() / 2.0;
        self.clamp(surface_width);
    }

    /// Move by the keyboard speed; opposing keys cancel out
    pub fn follow_keys(&mut self, left_held: bool, right_held: bool, surface_width: f32) {
        let dir = right_held as i8 - left_held as i8;
        self.rect.pos.x += dir as f32 * self.speed;
        self.clamp(surface_width);
    }

    /// Keep the paddle fully on the surface
    pub fn clamp(&mut self, surface_width: f32) {
        let max_x = (surface_width - self.width()).max(0.0);
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, max_x);
    }
}

/// Brick status (alive -> destroyed only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrickStatus {
    #[default]
    Alive,
    Destroyed,
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub column: u32,
    pub row: u32,
    pub rect: Rect,
    pub status: BrickStatus,
    /// Horizontal speed in pixels/tick (0 = stationary)
    pub speed: f32,
    /// +1 (rightward) or -1 (leftward)
    pub direction: f32,
    /// Level whose grid this brick belongs to
    pub level: u32,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Mark destroyed; returns true if the brick was alive
    pub fn destroy(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.status = BrickStatus::Destroyed;
        was_alive
    }
}

impl Advance for Brick {
    /// Slide horizontally, bouncing off either surface edge
    fn advance(&mut self, bounds: &Rect) {
        if !self.is_alive() || self.speed <= 0.0 {
            return;
        }

        self.rect.pos.x += self.speed * self.direction;
        if self.rect.left() <= bounds.left() {
            self.rect.pos.x = bounds.left();
            self.direction = 1.0;
        } else if self.rect.right() >= bounds.right() {
            self.rect.pos.x = bounds.right() - self.rect.size.x;
            self.direction = -1.0;
        }
    }
}

/// Score counter (never decreases)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Score(u64);

impl Score {
    pub fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Lives counter (never increases, floor 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lives(u8);

impl Lives {
    pub fn new(lives: u8) -> Self {
        Self(lives)
    }

    /// Lose one life; returns the remaining count
    pub fn lose(&mut self) -> u8 {
        self.0 = self.0.saturating_sub(1);
        self.0
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 == 0
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility; `None` when the RNG was injected
    pub seed: Option<u64>,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: Score,
    pub lives: Lives,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: Grid,
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self::with_rng(config, Pcg32::seed_from_u64(seed));
        state.seed = Some(seed);
        state
    }

    /// Create a new session drawing randomness from `rng`
    pub fn with_rng(config: GameConfig, mut rng: Pcg32) -> Self {
        let level = 1;
        let paddle = Paddle::for_level(level, &config);
        let grid = grid::generate(level, &config, &mut rng);
        let mut ball = Ball::new(config.ball_radius);
        ball.reset(level, &paddle, &config, &mut rng);

        Self {
            seed: None,
            lives: Lives::new(config.starting_lives),
            config,
            phase: GamePhase::Idle,
            level,
            score: Score::default(),
            time_ticks: 0,
            ball,
            paddle,
            grid,
            events: Vec::new(),
            rng,
        }
    }

    /// Surface bounds as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.surface_width, self.config.surface_height)
    }

    /// Recenter the paddle and put the ball back on it
    pub fn reset_ball(&mut self) {
        self.paddle = Paddle::for_level(self.level, &self.config);
        self.ball
            .reset(self.level, &self.paddle, &self.config, &mut self.rng);
    }

    /// Build the next level: new grid, new paddle, fresh ball
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.grid = grid::generate(self.level, &self.config, &mut self.rng);
        self.reset_ball();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_new_state_is_idle_with_full_grid() {
        let state = GameState::new(config(), 12345);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives.value(), 3);
        assert_eq!(state.score.value(), 0);
        assert!(state.grid.alive_count() > 0);
        assert_eq!(state.grid.alive_count(), state.grid.len());
    }

    #[test]
    fn test_ball_reset_sits_on_paddle_moving_up() {
        let cfg = config();
        let paddle = Paddle::for_level(1, &cfg);
        let mut ball = Ball::new(cfg.ball_radius);
        let mut rng = Pcg32::seed_from_u64(7);
        ball.reset(1, &paddle, &cfg, &mut rng);

        assert_eq!(ball.pos.x, cfg.surface_width / 2.0);
        assert_eq!(ball.bottom(), paddle.rect.top());
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.vel.x.abs(), 3.0);
        assert_eq!(ball.vel.y, -3.0);
    }

    #[test]
    fn test_ball_speed_grows_with_level() {
        let cfg = config();
        let mut last = 0.0;
        for level in 1..20 {
            let speed = Ball::speed_for_level(level, &cfg);
            assert!(speed >= last);
            assert!(speed <= cfg.ball_max_speed);
            last = speed;
        }
        assert_eq!(Ball::speed_for_level(2, &cfg), 4.0);
        assert_eq!(Ball::speed_for_level(50, &cfg), cfg.ball_max_speed);
    }

    #[test]
    fn test_ball_advance_and_reflect() {
        let mut ball = Ball::new(10.0);
        ball.pos = Vec2::new(100.0, 100.0);
        ball.vel = Vec2::new(3.0, -3.0);
        ball.advance(&Rect::new(0.0, 0.0, 300.0, 300.0));
        assert_eq!(ball.pos, Vec2::new(103.0, 97.0));

        ball.reflect(Axis::X);
        assert_eq!(ball.vel, Vec2::new(-3.0, -3.0));
        ball.reflect(Axis::Y);
        assert_eq!(ball.vel, Vec2::new(-3.0, 3.0));
    }

    #[test]
    fn test_paddle_width_shrinks_to_floor() {
        let cfg = config();
        assert_eq!(Paddle::for_level(1, &cfg).width(), cfg.paddle_width);
        assert_eq!(Paddle::for_level(2, &cfg).width(), cfg.paddle_width - 5.0);
        assert_eq!(Paddle::for_level(100, &cfg).width(), cfg.paddle_min_width);
    }

    #[test]
    fn test_paddle_follow_pointer_clamps() {
        let cfg = config();
        let mut paddle = Paddle::for_level(1, &cfg);

        paddle.follow_pointer(200.0, cfg.surface_width);
        assert_eq!(paddle.x(), 200.0 - cfg.paddle_width / 2.0);

        paddle.follow_pointer(-50.0, cfg.surface_width);
        assert_eq!(paddle.x(), 0.0);

        paddle.follow_pointer(10_000.0, cfg.surface_width);
        assert_eq!(paddle.x(), cfg.surface_width - paddle.width());
    }

    #[test]
    fn test_paddle_follow_keys() {
        let cfg = config();
        let mut paddle = Paddle::for_level(1, &cfg);
        let start = paddle.x();

        paddle.follow_keys(false, true, cfg.surface_width);
        assert_eq!(paddle.x(), start + cfg.paddle_speed);

        paddle.follow_keys(true, false, cfg.surface_width);
        assert_eq!(paddle.x(), start);

        paddle.follow_keys(true, true, cfg.surface_width);
        assert_eq!(paddle.x(), start);

        for _ in 0..200 {
            paddle.follow_keys(true, false, cfg.surface_width);
        }
        assert_eq!(paddle.x(), 0.0);
    }

    #[test]
    fn test_brick_bounces_off_edges() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut brick = Brick {
            column: 0,
            row: 0,
            rect: Rect::new(55.0, 10.0, 40.0, 20.0),
            status: BrickStatus::Alive,
            speed: 3.0,
            direction: 1.0,
            level: 1,
        };

        brick.advance(&bounds);
        assert_eq!(brick.rect.left(), 58.0);
        brick.advance(&bounds);
        assert_eq!(brick.rect.right(), 100.0);
        assert_eq!(brick.direction, -1.0);
        brick.advance(&bounds);
        assert_eq!(brick.rect.left(), 57.0);
    }

    #[test]
    fn test_destroyed_brick_stays_put() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut brick = Brick {
            column: 0,
            row: 0,
            rect: Rect::new(10.0, 10.0, 40.0, 20.0),
            status: BrickStatus::Alive,
            speed: 3.0,
            direction: 1.0,
            level: 1,
        };

        assert!(brick.destroy());
        assert!(!brick.destroy());
        brick.advance(&bounds);
        assert_eq!(brick.rect.left(), 10.0);
    }

    #[test]
    fn test_lives_floor_at_zero() {
        let mut lives = Lives::new(1);
        assert_eq!(lives.lose(), 0);
        assert_eq!(lives.lose(), 0);
        assert!(lives.is_exhausted());
    }

    #[test]
    fn test_seed_is_known_only_when_given() {
        assert_eq!(GameState::new(config(), 77).seed, Some(77));
        let injected = GameState::with_rng(config(), Pcg32::seed_from_u64(77));
        assert_eq!(injected.seed, None);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(config(), 1);
        state.push_event(GameEvent::LevelUp { level: 2 });
        assert_eq!(state.drain_events(), vec![GameEvent::LevelUp { level: 2 }]);
        assert!(state.drain_events().is_empty());
    }
}
