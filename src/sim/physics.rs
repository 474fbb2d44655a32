//! Vertical player physics: jump impulse, gravity, ground and ceiling clamps

use super::state::Player;
use crate::consts::GROUND_Y;
use crate::tuning::Tuning;

/// Apply a jump impulse. Returns false if the jump was refused
/// (airborne with air jumps disabled).
pub fn jump(player: &mut Player, tuning: &Tuning) -> bool {
    if player.jumping && !tuning.allow_air_jump {
        return false;
    }
    player.velocity_y = tuning.jump_power;
    player.jumping = true;
    true
}

/// Advance the player by one tick of gravity
pub fn step(player: &mut Player, tuning: &Tuning) {
    player.velocity_y += tuning.gravity;
    player.pos.y += player.velocity_y;

    if player.pos.y >= GROUND_Y {
        player.pos.y = GROUND_Y;
        player.velocity_y = 0.0;
        player.jumping = false;
    } else if player.pos.y < 0.0 {
        // Stacked air jumps can climb past the top of the canvas
        player.pos.y = 0.0;
        player.velocity_y = player.velocity_y.max(0.0);
    }
}
