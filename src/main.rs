//! Gecko Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use gecko_jump::audio::WebAudio;
    use gecko_jump::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use gecko_jump::renderer::canvas::CanvasSurface;
    use gecko_jump::{GameLoop, LoopControl, Settings, Tuning};

    const RESTART_GRADIENT: &str = "linear-gradient(135deg, #ff416c, #ff4b2b)";
    const RESTART_GRADIENT_HOVER: &str = "linear-gradient(135deg, #ff4b2b, #ff416c)";
    const RESTART_SHADOW: &str = "0px 4px 10px rgba(0, 0, 0, 0.3)";
    const RESTART_SHADOW_HOVER: &str = "0px 6px 12px rgba(0, 0, 0, 0.4)";

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        surface: CanvasSurface,
        audio: WebAudio,
        restart_button: HtmlElement,
        mute_button: Option<HtmlElement>,
    }

    impl Game {
        fn show_restart(&self, visible: bool) {
            let display = if visible { "block" } else { "none" };
            let _ = self.restart_button.style().set_property("display", display);
        }

        fn refresh_mute_label(&self) {
            if let Some(btn) = &self.mute_button {
                btn.set_inner_text(self.game_loop.settings.mute_label());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gecko Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let surface = CanvasSurface::new(&canvas, CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32)
            .expect("2D canvas context unavailable");

        let restart_button = create_restart_button(&document).expect("could not create restart button");
        let mute_button = document
            .get_element_by_id("muteButton")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if mute_button.is_none() {
            log::warn!("No #muteButton element - mute toggle unavailable");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(seed, Tuning::load(), Settings::load()),
            surface,
            audio: WebAudio::new(),
            restart_button,
            mute_button,
        }));

        {
            let mut g = game.borrow_mut();
            let Game {
                game_loop, audio, ..
            } = &mut *g;
            game_loop.start(audio);
            g.refresh_mute_label();
        }

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_mute_button(game.clone());

        request_animation_frame(game);

        log::info!("Gecko Jump running!");
    }

    /// Build the styled restart button, hidden until game over
    fn create_restart_button(document: &Document) -> Option<HtmlElement> {
        let button: HtmlElement = document.create_element("button").ok()?.dyn_into().ok()?;
        button.set_id("restartButton");
        button.set_inner_text("Restart Game");

        let style = button.style();
        for (name, value) in [
            ("position", "absolute"),
            ("top", "65%"),
            ("left", "50%"),
            ("transform", "translate(-50%, -50%)"),
            ("padding", "15px 30px"),
            ("font-size", "22px"),
            ("font-weight", "bold"),
            ("color", "white"),
            ("background", RESTART_GRADIENT),
            ("border", "none"),
            ("border-radius", "30px"),
            ("cursor", "pointer"),
            ("box-shadow", RESTART_SHADOW),
            ("transition", "0.3s"),
            ("display", "none"),
        ] {
            let _ = style.set_property(name, value);
        }

        // Hover effect
        for (event, background, shadow) in [
            ("mouseover", RESTART_GRADIENT_HOVER, RESTART_SHADOW_HOVER),
            ("mouseout", RESTART_GRADIENT, RESTART_SHADOW),
        ] {
            let target = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let style = target.style();
                let _ = style.set_property("background", background);
                let _ = style.set_property("box-shadow", shadow);
            });
            let _ = button.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        document.body()?.append_child(&button).ok()?;
        Some(button)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.code().as_str() {
                "Space" => {
                    // Keep the page from scrolling
                    event.prevent_default();
                    g.game_loop.queue_jump();
                }
                "KeyI" => {
                    g.game_loop.toggle_autopilot();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let button = game.borrow().restart_button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let needs_schedule = {
                let mut g = game.borrow_mut();
                let Game {
                    game_loop, audio, ..
                } = &mut *g;
                let needs_schedule = game_loop.restart(audio);
                g.show_restart(false);
                needs_schedule
            };
            if needs_schedule {
                request_animation_frame(game.clone());
            }
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_mute_button(game: Rc<RefCell<Game>>) {
        let Some(button) = game.borrow().mute_button.clone() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            let Game {
                game_loop, audio, ..
            } = &mut *g;
            game_loop.toggle_mute(audio);
            g.refresh_mute_label();
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            run_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn run_frame(game: Rc<RefCell<Game>>) {
        let control = {
            let mut g = game.borrow_mut();
            let Game {
                game_loop,
                surface,
                audio,
                ..
            } = &mut *g;
            let control = game_loop.frame(surface, audio);
            if control == LoopControl::Stop {
                g.show_restart(true);
            }
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the native runner (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u64 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gecko_jump::audio::NullAudio;
    use gecko_jump::renderer::NullSurface;
    use gecko_jump::{GameLoop, Settings, Tuning};

    env_logger::init();
    log::info!("Gecko Jump (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::var("GECKO_JUMP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    let mut game = GameLoop::new(seed, Tuning::load(), Settings::default());
    let mut audio = NullAudio;
    game.start(&mut audio);
    game.toggle_autopilot();

    let frames = game.run_headless(&mut NullSurface, &mut audio, HEADLESS_FRAMES);
    let outcome = if game.state.is_game_over() {
        "crashed"
    } else {
        "survived"
    };
    println!(
        "Seed {}: {} after {} frames with score {}",
        seed, outcome, frames, game.state.score
    );
    match serde_json::to_string(&game.state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
}
