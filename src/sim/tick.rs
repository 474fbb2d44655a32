//! Per-frame simulation tick
//!
//! Advances the world in a fixed order: jump input, physics, obstacles,
//! collision.

use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, obstacles, physics};

/// Gap between the player's right edge and an obstacle's left edge at which
/// the autopilot jumps. Tuned for the default gravity, jump power and speed.
const AUTOPILOT_JUMP_GAP: f32 = 40.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key was pressed since the last tick
    pub jump: bool,
    /// Idle/demo mode - the game jumps by itself
    pub autopilot: bool,
}

/// Advance the game state by one tick.
///
/// Returns whether another tick should be scheduled. Once the run is over the
/// state is left untouched and every call returns `false` until a reset.
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }

    state.time_ticks += 1;

    let wants_jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    if wants_jump && physics::jump(&mut state.player, &state.tuning) {
        state.events.push(GameEvent::Jumped);
    }
    physics::step(&mut state.player, &state.tuning);

    obstacles::advance(state);

    if let Some(index) = collision::first_hit(&state.player, &state.obstacles) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Collided);
        log::info!(
            "Collision with obstacle {} at tick {}, final score {}",
            index,
            state.time_ticks,
            state.score
        );
    }

    state.phase == GamePhase::Running
}

/// Jump when grounded and the nearest obstacle ahead is about to arrive
fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.player.jumping {
        return false;
    }
    let player_right = state.player.pos.x + state.player.size.x;
    state
        .obstacles
        .iter()
        .map(|o| o.pos.x - player_right)
        .find(|gap| *gap >= 0.0)
        .is_some_and(|gap| gap <= AUTOPILOT_JUMP_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn quiet_state() -> GameState {
        GameState::new(
            1,
            Tuning {
                spawn_probability: 0.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_grounded_player_hit_by_incoming_obstacle() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle::at_right_edge());

        let input = TickInput::default();
        for _ in 0..200 {
            assert!(tick(&mut state, &input));
        }
        assert_eq!(state.obstacles[0].pos.x, 100.0);

        // Tick 201 moves the obstacle to x=96, inside the player's box
        assert!(!tick(&mut state, &input));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 201);
        assert_eq!(state.drain_events(), vec![GameEvent::Collided]);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = quiet_state();
        let mut obstacle = Obstacle::at_right_edge();
        obstacle.pos.x = 70.0;
        state.obstacles.push(obstacle);

        assert!(!tick(&mut state, &TickInput::default()));
        let frozen = state.clone();

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(!tick(&mut state, &jump));
        }
        assert_eq!(state.player, frozen.player);
        assert_eq!(state.obstacles, frozen.obstacles);
        assert_eq!(state.time_ticks, frozen.time_ticks);
    }

    #[test]
    fn test_jump_applied_on_next_tick() {
        let mut state = quiet_state();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input));
        assert_eq!(state.player.velocity_y, -9.5);
        assert_eq!(state.player.pos.y, GROUND_Y - 9.5);
        assert!(state.player.jumping);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let mut state = quiet_state();
        let mut obstacle = Obstacle::at_right_edge();
        obstacle.pos.x = 140.0;
        state.obstacles.push(obstacle);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &jump));
        let idle = TickInput::default();
        for _ in 0..60 {
            assert!(tick(&mut state, &idle));
        }
        assert!(state.player.on_ground());
    }

    #[test]
    fn test_autopilot_survives_single_obstacle() {
        let mut state = quiet_state();
        state.obstacles.push(Obstacle::at_right_edge());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..300 {
            assert!(tick(&mut state, &input));
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::Jumped, GameEvent::ObstacleCleared]
        );
    }

    #[test]
    fn test_reset_after_game_over_resumes() {
        let mut state = GameState::new(3, Tuning::default());
        let mut obstacle = Obstacle::at_right_edge();
        obstacle.pos.x = 70.0;
        state.obstacles.push(obstacle);
        state.score = 5;
        assert!(!tick(&mut state, &TickInput::default()));

        state.reset();
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(50.0, GROUND_Y));
        assert!(tick(&mut state, &TickInput::default()));
    }

    #[test]
    fn test_no_spawns_means_endless_run() {
        let mut state = quiet_state();
        for _ in 0..20_000 {
            assert!(tick(&mut state, &TickInput::default()));
        }
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            let a = tick(&mut state1, &input);
            let b = tick(&mut state2, &input);
            assert_eq!(a, b);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.player, state2.player);
    }

    proptest! {
        #[test]
        fn prop_world_invariants_hold_while_running(
            seed in any::<u64>(),
            jumps in proptest::collection::vec(any::<bool>(), 1..600),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            for jump in jumps {
                let running = tick(&mut state, &TickInput { jump, autopilot: false });
                prop_assert!(state.player.pos.y >= 0.0 && state.player.pos.y <= GROUND_Y);
                prop_assert!(state.obstacles.windows(2).all(|w| w[0].pos.x <= w[1].pos.x));
                if !running {
                    break;
                }
            }
        }
    }
}
