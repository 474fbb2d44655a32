//! Frame loop driver
//!
//! One [`GameLoop::frame`] call is one display refresh: tick, forward the
//! tick's events to audio, draw. The caller (browser `requestAnimationFrame`
//! or the native headless runner) schedules the next frame only while
//! [`LoopControl::Continue`] comes back.

use crate::audio::{AudioOut, Clip};
use crate::renderer::{Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Whether the caller should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Owns the world plus the inputs queued between frames
pub struct GameLoop {
    pub state: GameState,
    /// Input waiting for the next tick
    pub input: TickInput,
    pub settings: Settings,
    /// A frame is scheduled or about to be
    active: bool,
}

impl GameLoop {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            input: TickInput::default(),
            settings,
            active: true,
        }
    }

    /// Apply audio preferences and start the background loop
    pub fn start<A: AudioOut + ?Sized>(&mut self, audio: &mut A) {
        audio.apply_settings(&self.settings);
        audio.play(Clip::Music);
        log::info!("Run started (seed {})", self.state.seed);
    }

    /// Queue a jump for the next tick
    pub fn queue_jump(&mut self) {
        self.input.jump = true;
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.input.autopilot = !self.input.autopilot;
        log::info!("Autopilot: {}", self.input.autopilot);
        self.input.autopilot
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Run one tick and draw the result
    pub fn frame<S, A>(&mut self, surface: &mut S, audio: &mut A) -> LoopControl
    where
        S: Surface + ?Sized,
        A: AudioOut + ?Sized,
    {
        let running = tick(&mut self.state, &self.input);

        // Clear one-shot inputs after processing
        self.input.jump = false;

        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => audio.play(Clip::Jump),
                GameEvent::Collided => {
                    audio.play(Clip::Collision);
                    audio.pause(Clip::Music);
                    log::info!("Game over - score {}", self.state.score);
                }
                GameEvent::ObstacleCleared => {
                    log::debug!("Obstacle cleared, score {}", self.state.score);
                }
            }
        }

        draw_frame(&self.state, surface);

        if running {
            LoopControl::Continue
        } else {
            self.active = false;
            LoopControl::Stop
        }
    }

    /// Reset the world and resume. Returns true if the caller must schedule a
    /// frame (the loop had stopped); false if a frame is already pending.
    pub fn restart<A: AudioOut + ?Sized>(&mut self, audio: &mut A) -> bool {
        self.state.reset();
        self.input.jump = false;
        audio.play(Clip::Music);
        log::info!("Game restarted");

        let needs_schedule = !self.active;
        self.active = true;
        needs_schedule
    }

    /// Flip mute on every clip and remember the choice
    pub fn toggle_mute<A: AudioOut + ?Sized>(&mut self, audio: &mut A) -> bool {
        let muted = self.settings.toggle_mute();
        audio.apply_settings(&self.settings);
        self.settings.save();
        log::info!("Muted: {}", muted);
        muted
    }

    /// Drive frames back to back until the run ends or `max_frames` pass.
    /// Returns the number of frames run.
    pub fn run_headless<S, A>(&mut self, surface: &mut S, audio: &mut A, max_frames: u64) -> u64
    where
        S: Surface + ?Sized,
        A: AudioOut + ?Sized,
    {
        let mut frames = 0;
        while frames < max_frames {
            frames += 1;
            if self.frame(surface, audio) == LoopControl::Stop {
                break;
            }
        }
        frames
    }
}
