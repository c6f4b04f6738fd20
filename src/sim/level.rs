//! Level progression and terminal conditions

use super::state::{GameEvent, GamePhase, GameState};

/// Check for game over or a cleared grid after the collision pass
pub fn settle(state: &mut GameState) {
    if state.lives.is_exhausted() {
        state.phase = GamePhase::GameOver;
        let score = state.score.value();
        let level = state.level;
        log::info!("Game over at level {} with score {}", level, score);
        state.push_event(GameEvent::GameOver { score, level });
        return;
    }

    if state.grid.is_cleared() {
        state.advance_level();
        state.phase = GamePhase::LevelTransition;
        log::info!("Level {}! {} bricks", state.level, state.grid.len());
        state.push_event(GameEvent::LevelUp { level: state.level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn running_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_nothing_happens_mid_level() {
        let mut state = running_state();
        settle(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_cleared_grid_advances_once() {
        let mut state = running_state();
        for brick in state.grid.iter_mut() {
            brick.destroy();
        }

        settle(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::LevelTransition);
        assert_eq!(state.grid.alive_count(), state.grid.len());
        assert_eq!(state.drain_events(), vec![GameEvent::LevelUp { level: 2 }]);

        // Fresh grid: settling again changes nothing
        settle(&mut state);
        assert_eq!(state.level, 2);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_exhausted_lives_end_the_game() {
        let mut state = running_state();
        while state.lives.lose() > 0 {}
        state.score.add(70);

        settle(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                score: 70,
                level: 1
            }]
        );
    }
}
