//! Apple Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use apple_catch::audio::AudioManager;
    use apple_catch::consts::*;
    use apple_catch::renderer::{RenderState, build_scene};
    use apple_catch::sim::{RoundConfig, RoundController, RoundHost, RoundResult, Sound, tick};
    use apple_catch::{KeyState, Settings};

    /// Host page: HUD text, results overlay and audio
    struct DomHost {
        score_el: Option<Element>,
        time_el: Option<Element>,
        end_div: Option<HtmlElement>,
        win_lose_el: Option<Element>,
        end_score_el: Option<Element>,
        audio: AudioManager,
        round_secs: f64,
    }

    impl DomHost {
        fn new(document: &Document, settings: &Settings, round_secs: f64) -> Self {
            Self {
                score_el: document.get_element_by_id("hud-score"),
                time_el: document.get_element_by_id("hud-time"),
                end_div: html_element(document, "gameEndDiv"),
                win_lose_el: document.get_element_by_id("gameWinLoseSpan"),
                end_score_el: document.get_element_by_id("gameEndScoreSpan"),
                audio: AudioManager::new(settings),
                round_secs,
            }
        }
    }

    impl RoundHost for DomHost {
        fn set_score_text(&mut self, text: &str) {
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(text));
            }
        }

        fn set_time_text(&mut self, text: &str) {
            if let Some(el) = &self.time_el {
                el.set_text_content(Some(text));
            }
        }

        fn play_sound(&mut self, sound: Sound) {
            self.audio.play(sound);
        }

        fn start_music(&mut self) {
            self.audio.start_music(self.round_secs);
        }

        fn show_results(&mut self, result: &RoundResult) {
            self.audio.stop_music();

            if let Some(el) = &self.end_score_el {
                el.set_text_content(Some(&result.score.to_string()));
            }
            if let Some(el) = &self.win_lose_el {
                el.set_text_content(Some(result.outcome.banner()));
            }
            if let Some(div) = &self.end_div {
                let _ = div.style().set_property("display", "flex");
            }

            match serde_json::to_string(result) {
                Ok(json) => log::info!("Round result: {json}"),
                Err(e) => log::warn!("Could not serialize result: {e}"),
            }
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Game instance holding all state
    struct Game {
        round: RoundController<DomHost>,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: KeyState,
        settings: Settings,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let input = self.keys.tick_input();
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.round, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.round, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("logger init failed: {e}")))?;

        log::info!("Apple Catch starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#canvas is not a canvas"))?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::default();
        let config = RoundConfig::default();
        let host = DomHost::new(&document, &settings, config.round_duration_ms / 1000.0);
        let field_size = config.field_size();

        let seed = js_sys::Date::now() as u64;
        let round = RoundController::initialize(config, host, seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("no graphics adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field_size)
            .await
            .map_err(|e| JsValue::from_str(&format!("failed to create device: {e}")))?;

        let game = Rc::new(RefCell::new(Game {
            round,
            render_state: Some(render_state),
            accumulator: 0.0,
            last_time: 0.0,
            keys: KeyState::default(),
            settings,
        }));

        setup_keyboard(game.clone())?;
        setup_start_button(&document, game.clone());
        setup_retry_button(&document);

        request_animation_frame(game);

        log::info!("Apple Catch ready (seed {seed})");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.handle_key(&event.key(), pressed) {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Focus loss swallows keyup
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().keys.release_all();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("gameStartButton") else {
            log::warn!("No start button; round stays paused");
            return;
        };
        let start_div = html_element(document, "gameStartDiv");

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(div) = &start_div {
                let _ = div.style().set_property("display", "none");
            }
            let mut g = game.borrow_mut();
            g.round.host().audio.resume();
            g.round.on_start_signal();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Retry starts over from a fresh page load
    fn setup_retry_button(document: &Document) {
        let Some(btn) = document.get_element_by_id("retryButton") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let ended = {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            if g.round.is_ended() {
                // Last frame stays on the canvas under the results overlay
                g.render_state = None;
                log::info!("Scene stopped");
                true
            } else {
                false
            }
        };

        if !ended {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use apple_catch::consts::SIM_DT;
    use apple_catch::sim::{
        RoundConfig, RoundController, RoundHost, RoundResult, Sound, TickInput, tick,
    };

    /// Host that reports to the log instead of a page
    #[derive(Default)]
    pub struct LogHost {
        pub catches: u32,
        pub result: Option<RoundResult>,
    }

    impl RoundHost for LogHost {
        fn set_score_text(&mut self, text: &str) {
            log::debug!("{text}");
        }

        fn set_time_text(&mut self, text: &str) {
            log::trace!("{text}");
        }

        fn play_sound(&mut self, sound: Sound) {
            if sound == Sound::Catch {
                self.catches += 1;
            }
        }

        fn start_music(&mut self) {
            log::debug!("(music)");
        }

        fn show_results(&mut self, result: &RoundResult) {
            log::info!("{} Final score: {}", result.outcome.banner(), result.score);
            self.result = Some(*result);
        }
    }

    /// Steer the basket under the apple
    fn autopilot<H: RoundHost>(round: &RoundController<H>) -> TickInput {
        let world = round.world();
        let basket = world.player.hitbox();
        let apple = world.target.hitbox();
        let basket_mid = (basket.min.x + basket.max.x) * 0.5;
        let apple_mid = (apple.min.x + apple.max.x) * 0.5;
        let slack = basket.size().x * 0.25;

        TickInput {
            left: apple_mid < basket_mid - slack,
            right: apple_mid > basket_mid + slack,
        }
    }

    /// Play one full round with the autopilot at the fixed timestep
    pub fn play(seed: u64) -> RoundController<LogHost> {
        let mut round = RoundController::initialize(RoundConfig::default(), LogHost::default(), seed);
        round.on_start_signal();

        while !round.is_ended() {
            let input = autopilot(&round);
            tick(&mut round, &input, SIM_DT);
        }
        round
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Apple Catch (native) starting...");
    log::info!("Native mode plays one headless round - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    let round = headless::play(seed);
    log::info!("{} catches", round.host().catches);

    match round.result().map(|r| serde_json::to_string(&r)) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => log::error!("Could not serialize result: {e}"),
        None => log::error!("Round ended without a result"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
