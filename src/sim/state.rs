//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay, ticks advance the world
    Running,
    /// Run ended by a collision; world is frozen until restart
    GameOver,
}

/// Something that happened during a tick that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A queued jump was applied
    Jumped,
    /// The front obstacle left the screen and was scored
    ObstacleCleared,
    /// The player hit an obstacle; the run is over
    Collided,
}

/// The player-controlled gecko
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            jumping: false,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn on_ground(&self) -> bool {
        self.pos.y >= GROUND_Y
    }
}

/// A box scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// New obstacle at the right screen edge, resting on the ground
    pub fn at_right_edge() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT - OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Right edge has passed the left screen boundary
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Serializable view of the world, used for run summaries
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: &'a [Obstacle],
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Ticks simulated since the last (re)start
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Spawn RNG; keeps its stream across restarts
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Running,
            player: Player::default(),
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Put every world field back to its starting value
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.player = Player::default();
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            seed: self.seed,
            phase: self.phase,
            score: self.score,
            time_ticks: self.time_ticks,
            player: self.player,
            obstacles: &self.obstacles,
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_ground() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::new(50.0, 450.0));
        assert!(state.player.on_ground());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_obstacle_spawn_geometry() {
        let obstacle = Obstacle::at_right_edge();
        assert_eq!(obstacle.pos, Vec2::new(900.0, 460.0));
        assert_eq!(obstacle.size, Vec2::new(20.0, 40.0));
        assert!(!obstacle.is_off_screen());
    }

    #[test]
    fn test_off_screen_needs_right_edge_past_zero() {
        let mut obstacle = Obstacle::at_right_edge();
        obstacle.pos.x = -20.0;
        assert!(!obstacle.is_off_screen());
        obstacle.pos.x = -20.5;
        assert!(obstacle.is_off_screen());
    }

    #[test]
    fn test_snapshot_serializes_world() {
        let mut state = GameState::new(3, Tuning::default());
        state.phase = GamePhase::GameOver;
        state.score = 4;
        state.time_ticks = 120;
        state.obstacles.push(Obstacle::at_right_edge());

        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["seed"], 3);
        assert_eq!(value["phase"], "GameOver");
        assert_eq!(value["score"], 4);
        assert_eq!(value["time_ticks"], 120);
        assert_eq!(value["player"]["pos"], serde_json::json!([50.0, 450.0]));
        assert_eq!(value["obstacles"][0]["pos"], serde_json::json!([900.0, 460.0]));
    }

    #[test]
    fn test_reset_restores_initial_fields() {
        let mut state = GameState::new(7, Tuning::default());
        state.phase = GamePhase::GameOver;
        state.score = 12;
        state.player.pos.y = 300.0;
        state.player.velocity_y = -3.0;
        state.player.jumping = true;
        state.obstacles.push(Obstacle::at_right_edge());
        state.events.push(GameEvent::Collided);

        state.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::default());
        assert!(state.obstacles.is_empty());
        assert!(state.events.is_empty());
    }
}
