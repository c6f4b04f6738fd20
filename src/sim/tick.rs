//! Simulation tick
//!
//! Advances the session by one frame. Order: ball, moving bricks, paddle
//! input, collisions, level controller.

use super::collision;
use super::level;
use super::state::{Advance, GamePhase, GameState};

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer x relative to the surface; takes priority over keys when set
    pub pointer_x: Option<f32>,
    pub left: bool,
    pub right: bool,
    /// Demo mode - the paddle tracks the ball
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => return,
        GamePhase::LevelTransition => state.phase = GamePhase::Running,
        GamePhase::Running => {}
    }

    state.time_ticks += 1;
    let bounds = state.bounds();

    state.ball.advance(&bounds);
    for brick in state.grid.iter_mut() {
        brick.advance(&bounds);
    }

    apply_paddle_input(state, input);

    collision::resolve(state);
    level::settle(state);
}

fn apply_paddle_input(state: &mut GameState, input: &TickInput) {
    let width = state.config.surface_width;
    let pointer_x = if input.autopilot {
        Some(state.ball.pos.x)
    } else {
        input.pointer_x
    };

    match pointer_x {
        Some(x) => state.paddle.follow_pointer(x, width),
        None => state.paddle.follow_keys(input.left, input.right, width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grid::Grid;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Brick, BrickStatus, GameEvent};
    use glam::Vec2;

    /// Running session with a single stationary brick out of the ball's way
    fn quiet_state(config: GameConfig) -> GameState {
        let mut state = GameState::new(config, 12345);
        state.phase = GamePhase::Running;
        state.grid = Grid {
            columns: 1,
            rows: 1,
            bricks: vec![Brick {
                column: 0,
                row: 0,
                rect: Rect::new(0.0, 20.0, 20.0, 10.0),
                status: BrickStatus::Alive,
                speed: 0.0,
                direction: 1.0,
                level: 1,
            }],
        };
        state
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let before = state.ball.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_free_flight() {
        let config = GameConfig {
            surface_width: 300.0,
            surface_height: 300.0,
            ..GameConfig::default()
        };
        let mut state = quiet_state(config);
        state.ball.pos = Vec2::new(100.0, 100.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, Vec2::new(103.0, 97.0));
        assert_eq!(state.ball.vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_brick_scenario() {
        let mut state = quiet_state(GameConfig::default());
        state.grid.bricks.push(Brick {
            column: 1,
            row: 0,
            rect: Rect::new(50.0, 50.0, 40.0, 20.0),
            status: BrickStatus::Alive,
            speed: 0.0,
            direction: 1.0,
            level: 1,
        });
        state.grid.columns = 2;
        // One tick moves the center to (60, 55)
        state.ball.pos = Vec2::new(57.0, 58.0);
        state.ball.vel = Vec2::new(3.0, -3.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.grid.bricks[1].status, BrickStatus::Destroyed);
        assert_eq!(state.score.value(), state.config.points_per_brick);
        assert_eq!(state.ball.vel.y, 3.0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = quiet_state(GameConfig::default());
        state.lives = crate::sim::state::Lives::new(1);
        state.paddle.rect.pos.x = 0.0;
        state.ball.pos = Vec2::new(400.0, state.config.surface_height - 5.0);
        state.ball.vel = Vec2::new(1.0, 3.0);

        // Pin the paddle far from the ball
        let input = TickInput {
            pointer_x: Some(0.0),
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.lives.value(), 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 0,
            level: 1
        }));

        // Terminal: further ticks are no-ops
        let ticks = state.time_ticks;
        tick(&mut state, &input);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_fastest_accepted_ball_cannot_skip_paddle() {
        let config = GameConfig::from_json(r#"{ "ball_base_speed": 29.0, "ball_max_speed": 29.0 }"#)
            .expect("fastest speed below the paddle span");
        let mut state = quiet_state(config);
        let paddle_top = state.paddle.rect.top();
        let center_x = state.paddle.rect.center().x;

        // Just above the contact span, falling at full speed
        state.ball.pos = Vec2::new(center_x, paddle_top - state.ball.radius - 0.5);
        state.ball.vel = Vec2::new(0.0, state.config.ball_max_speed);
        let input = TickInput {
            pointer_x: Some(center_x),
            ..Default::default()
        };

        tick(&mut state, &input);
        assert_eq!(state.lives.value(), 3);
        assert!(state.ball.vel.y < 0.0);
        assert_eq!(state.ball.bottom(), paddle_top);
    }

    #[test]
    fn test_clearing_last_brick_levels_up() {
        let mut state = quiet_state(GameConfig::default());
        // Ball will enter the only brick this tick
        state.ball.pos = Vec2::new(10.0, 40.0);
        state.ball.vel = Vec2::new(1.0, -3.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::LevelTransition);
        assert_eq!(state.grid.alive_count(), state.grid.len());
        assert!(state.drain_events().contains(&GameEvent::LevelUp { level: 2 }));

        // The transition folds back into Running on the next tick
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_pointer_overrides_keys() {
        let mut state = quiet_state(GameConfig::default());
        let input = TickInput {
            pointer_x: Some(100.0),
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x(), 100.0 - state.paddle.width() / 2.0);
    }

    #[test]
    fn test_keys_move_paddle() {
        let mut state = quiet_state(GameConfig::default());
        let start = state.paddle.x();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x(), start - state.config.paddle_speed);
    }

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut state = quiet_state(GameConfig::default());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let center = state.paddle.rect.center().x;
        assert!((center - state.ball.pos.x).abs() < 0.001);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(GameConfig::default(), 99999);
        let mut state2 = GameState::new(GameConfig::default(), 99999);
        state1.phase = GamePhase::Running;
        state2.phase = GamePhase::Running;

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.grid, state2.grid);
    }
}
