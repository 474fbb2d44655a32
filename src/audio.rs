//! Audio playback
//!
//! The game only ever starts or pauses one of three clips. Backends implement
//! [`AudioOut`]; the browser one plays `<audio>` elements and synthesizes the
//! jump/collision cues with Web Audio when an element is missing.

use crate::settings::Settings;

/// The three clips the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    /// Looping background music
    Music,
    /// Jump cue
    Jump,
    /// Collision cue
    Collision,
}

impl Clip {
    pub const ALL: [Clip; 3] = [Clip::Music, Clip::Jump, Clip::Collision];

    /// DOM id of the `<audio>` element backing this clip
    pub fn element_id(&self) -> &'static str {
        match self {
            Clip::Music => "backgroundMusic",
            Clip::Jump => "jumpSound",
            Clip::Collision => "collisionSound",
        }
    }

    /// Volume for this clip under the given settings
    pub fn volume(&self, settings: &Settings) -> f32 {
        match self {
            Clip::Music => settings.music_level(),
            Clip::Jump | Clip::Collision => settings.sfx_level(),
        }
    }
}

/// Something that can play the game's clips
pub trait AudioOut {
    fn play(&mut self, clip: Clip);
    fn pause(&mut self, clip: Clip);
    /// Apply mute and volume preferences to every clip
    fn apply_settings(&mut self, settings: &Settings);
}

/// Backend that plays nothing (native/headless runs)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioOut for NullAudio {
    fn play(&mut self, clip: Clip) {
        log::trace!("play {:?}", clip);
    }

    fn pause(&mut self, clip: Clip) {
        log::trace!("pause {:?}", clip);
    }

    fn apply_settings(&mut self, _settings: &Settings) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::{Closure, JsValue};
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioOut, Clip};
    use crate::settings::Settings;

    /// `<audio>` elements with a Web Audio fallback for the cues
    pub struct WebAudio {
        music: Option<HtmlAudioElement>,
        jump: Option<HtmlAudioElement>,
        collision: Option<HtmlAudioElement>,
        ctx: Option<AudioContext>,
        muted: bool,
        sfx_volume: f32,
    }

    impl WebAudio {
        pub fn new() -> Self {
            let document = web_sys::window().and_then(|w| w.document());
            let find = |clip: Clip| -> Option<HtmlAudioElement> {
                let el = document
                    .as_ref()
                    .and_then(|d| d.get_element_by_id(clip.element_id()))
                    .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
                if el.is_none() {
                    log::info!("No <audio id=\"{}\"> element", clip.element_id());
                }
                el
            };

            let music = find(Clip::Music);
            if let Some(music) = &music {
                music.set_loop(true);
            }
            let jump = find(Clip::Jump);
            let collision = find(Clip::Collision);

            // Only needed for synthesized cues
            let ctx = if jump.is_none() || collision.is_none() {
                let ctx = AudioContext::new().ok();
                if ctx.is_none() {
                    log::warn!("Failed to create AudioContext - cue fallback disabled");
                }
                ctx
            } else {
                None
            };

            Self {
                music,
                jump,
                collision,
                ctx,
                muted: false,
                sfx_volume: 1.0,
            }
        }

        fn element(&self, clip: Clip) -> Option<&HtmlAudioElement> {
            match clip {
                Clip::Music => self.music.as_ref(),
                Clip::Jump => self.jump.as_ref(),
                Clip::Collision => self.collision.as_ref(),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn synthesize(&self, clip: Clip) {
            if self.muted || self.sfx_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match clip {
                Clip::Jump => Self::play_jump(ctx, self.sfx_volume),
                Clip::Collision => Self::play_collision(ctx, self.sfx_volume),
                Clip::Music => {}
            }
        }

        /// Jump - quick rising chirp
        fn play_jump(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Collision - thud followed by a falling tone
        fn play_collision(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 90.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(90.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            for (i, freq) in [400.0, 300.0, 200.0].iter().enumerate() {
                let delay = 0.1 + i as f64 * 0.15;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Square) {
                    let start = t + delay;
                    gain.gain().set_value_at_time(vol * 0.15, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.2)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.25).ok();
                }
            }
        }
    }

    impl AudioOut for WebAudio {
        fn play(&mut self, clip: Clip) {
            match self.element(clip) {
                // Autoplay policies reject play() before a user gesture
                Some(el) => match el.play() {
                    Ok(promise) => {
                        let on_reject = Closure::once(move |e: JsValue| {
                            log::warn!("Could not play {:?}: {:?}", clip, e);
                        });
                        let _ = promise.catch(&on_reject);
                        on_reject.forget();
                    }
                    Err(e) => log::warn!("Could not play {:?}: {:?}", clip, e),
                },
                None => self.synthesize(clip),
            }
        }

        fn pause(&mut self, clip: Clip) {
            if let Some(el) = self.element(clip) {
                let _ = el.pause();
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.muted = settings.muted;
            self.sfx_volume = Clip::Jump.volume(settings);
            for clip in Clip::ALL {
                if let Some(el) = self.element(clip) {
                    el.set_muted(settings.muted);
                    el.set_volume(clip.volume(settings) as f64);
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Audio call captured by [`RecordingAudio`]
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum AudioCall {
        Play(Clip),
        Pause(Clip),
        Muted(bool),
    }

    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub calls: Vec<AudioCall>,
    }

    impl AudioOut for RecordingAudio {
        fn play(&mut self, clip: Clip) {
            self.calls.push(AudioCall::Play(clip));
        }

        fn pause(&mut self, clip: Clip) {
            self.calls.push(AudioCall::Pause(clip));
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.calls.push(AudioCall::Muted(settings.muted));
        }
    }

    #[test]
    fn test_clip_volumes_follow_settings() {
        let settings = Settings {
            master_volume: 0.5,
            music_volume: 0.5,
            sfx_volume: 1.0,
            ..Default::default()
        };
        assert_eq!(Clip::Music.volume(&settings), 0.25);
        assert_eq!(Clip::Jump.volume(&settings), 0.5);
        assert_eq!(Clip::Collision.volume(&settings), 0.5);
    }

    #[test]
    fn test_element_ids_are_distinct() {
        let ids: std::collections::HashSet<_> = Clip::ALL.iter().map(Clip::element_id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_page_leaves_cues_to_synthesizer() {
        let page = include_str!("../index.html");
        for clip in [Clip::Jump, Clip::Collision] {
            let tag = format!("<audio id=\"{}\"", clip.element_id());
            assert!(!page.contains(&tag), "{} shadows the synthesized cue", tag);
        }
        // Nothing references assets that are not shipped
        assert!(!page.contains("sounds/"));
    }
}
