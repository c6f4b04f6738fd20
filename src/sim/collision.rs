//! Collision detection and response
//!
//! Runs once per tick after the ball has moved. Every reflection is guarded
//! on the sign of the velocity, so a ball that still overlaps a surface on
//! the following tick is never bounced back into it.

use super::grid::Grid;
use super::rect::Rect;
use super::state::{Axis, Ball, GameEvent, GameState, Paddle};

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub wall_hit: bool,
    pub paddle_hit: bool,
    /// Ball fell past the bottom edge
    pub ball_lost: bool,
    pub bricks_destroyed: u32,
}

/// Bounce off the left, right and top edges
pub fn wall_collision(ball: &mut Ball, bounds: &Rect) -> bool {
    let mut hit = false;

    let past_right = ball.pos.x + ball.radius >= bounds.right() && ball.vel.x > 0.0;
    let past_left = ball.pos.x - ball.radius <= bounds.left() && ball.vel.x < 0.0;
    if past_right || past_left {
        ball.reflect(Axis::X);
        hit = true;
    }

    if ball.top() <= bounds.top() && ball.vel.y < 0.0 {
        ball.reflect(Axis::Y);
        hit = true;
    }

    hit
}

/// Bounce a falling ball off the paddle
///
/// The ball's bottom must have reached the paddle's top edge (without having
/// fallen past the paddle) and its center must lie within the paddle span.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    let rect = &paddle.rect;
    let falling = ball.vel.y > 0.0;
    let level_with_paddle = ball.bottom() >= rect.top() && ball.top() <= rect.bottom();
    let within_span = ball.pos.x >= rect.left() && ball.pos.x <= rect.right();

    if falling && level_with_paddle && within_span {
        ball.reflect(Axis::Y);
        ball.pos.y = rect.top() - ball.radius;
        return true;
    }

    false
}

/// True once the ball has dropped past the bottom edge
pub fn missed_bottom(ball: &Ball, bounds: &Rect) -> bool {
    ball.bottom() > bounds.bottom()
}

/// Destroy every alive brick the ball overlaps
///
/// Bricks are tested in column-major order. The ball's vertical velocity is
/// reflected at most once per tick no matter how many bricks it hits.
pub fn brick_collisions(ball: &mut Ball, grid: &mut Grid) -> u32 {
    let mut destroyed = 0;

    for brick in grid.iter_mut() {
        if brick.is_alive() && brick.rect.overlaps_circle(ball.pos, ball.radius) {
            brick.destroy();
            destroyed += 1;
        }
    }

    if destroyed > 0 {
        ball.reflect(Axis::Y);
    }

    destroyed
}

/// Run the full collision pass, updating score and lives
pub fn resolve(state: &mut GameState) -> Resolution {
    let bounds = state.bounds();
    let mut resolution = Resolution {
        wall_hit: wall_collision(&mut state.ball, &bounds),
        paddle_hit: paddle_collision(&mut state.ball, &state.paddle),
        ..Default::default()
    };

    if missed_bottom(&state.ball, &bounds) {
        resolution.ball_lost = true;
        let remaining = state.lives.lose();
        log::debug!("Ball lost, {} lives remaining", remaining);
        state.push_event(GameEvent::LifeLost { remaining });
        if remaining > 0 {
            state.reset_ball();
        }
        return resolution;
    }

    let destroyed = brick_collisions(&mut state.ball, &mut state.grid);
    if destroyed > 0 {
        state
            .score
            .add(destroyed as u64 * state.config.points_per_brick);
        log::debug!(
            "{} brick(s) destroyed, score {}",
            destroyed,
            state.score.value()
        );
    }
    resolution.bricks_destroyed = destroyed;

    resolution
}
