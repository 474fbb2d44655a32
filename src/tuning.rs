//! Data-driven game balance
//!
//! Every number that shapes how a run feels lives here so it can be tweaked
//! from JSON without a rebuild.

use serde::{Deserialize, Serialize};

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/tick²)
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative = up)
    pub jump_power: f32,
    /// Leftward obstacle speed (units/tick)
    pub obstacle_speed: f32,
    /// Chance of spawning an obstacle on any given tick
    pub spawn_probability: f32,
    /// Whether a jump may be triggered while already airborne
    pub allow_air_jump: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_power: -10.0,
            obstacle_speed: 4.0,
            spawn_probability: 0.02,
            allow_air_jump: true,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values into ranges the simulation can honor
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.spawn_probability.is_finite() {
            self.spawn_probability = defaults.spawn_probability;
        }
        self.spawn_probability = self.spawn_probability.clamp(0.0, 1.0);
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            self.gravity = defaults.gravity;
        }
        if !self.obstacle_speed.is_finite() || self.obstacle_speed < 0.0 {
            self.obstacle_speed = defaults.obstacle_speed;
        }
        if !self.jump_power.is_finite() {
            self.jump_power = defaults.jump_power;
        }
        self
    }

    /// Element id holding inline tuning JSON in the page
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "tuning";

    /// Environment variable naming a tuning JSON file (native)
    #[allow(dead_code)]
    const ENV_VAR: &'static str = "GECKO_JUMP_TUNING";

    /// Load tuning from an inline `<script id="tuning">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => Self::parse_or_default(&json),
            _ => Self::default(),
        }
    }

    /// Load tuning from the file named by `GECKO_JUMP_TUNING` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning: {:?}", tuning);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
