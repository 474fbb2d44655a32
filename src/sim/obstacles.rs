//! Obstacle spawning, scrolling and culling

use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle};

/// Move every obstacle, cull the front one if it has left the screen,
/// then maybe spawn a new one at the right edge.
pub fn advance(state: &mut GameState) {
    let speed = state.tuning.obstacle_speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }

    // Only the oldest obstacle is checked; at most one leaves per tick
    if state.obstacles.first().is_some_and(Obstacle::is_off_screen) {
        state.obstacles.remove(0);
        state.score += 1;
        state.events.push(GameEvent::ObstacleCleared);
    }

    if state.rng.random::<f32>() < state.tuning.spawn_probability {
        state.obstacles.push(Obstacle::at_right_edge());
        log::debug!("Obstacle spawned ({} active)", state.obstacles.len());
    }
}
