//! Meteor Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use meteor_dodge::audio::WebAudio;
    use meteor_dodge::persistence::LocalStorageStore;
    use meteor_dodge::platform::{
        FrameClock, HostCommand, key_command, pointer_steer, press_confirms, prevents_default,
    };
    use meteor_dodge::renderer::{RenderState, build_scene};
    use meteor_dodge::sim::{GamePhase, GameState};
    use meteor_dodge::{Engine, InputAction, Settings};

    /// Game instance holding all state
    struct Game {
        engine: Engine<WebAudio, LocalStorageStore>,
        settings: Settings,
        clock: FrameClock,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
        // Last values pushed to the DOM
        shown_phase: Option<GamePhase>,
        shown_score: Option<u64>,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, document: Document) -> Self {
            let settings = Settings::load();
            let mut audio = WebAudio::new();
            audio.apply_settings(&settings);

            Self {
                engine: Engine::new(GameState::new(seed), audio, LocalStorageStore),
                settings,
                clock: FrameClock::new(),
                render_state: None,
                canvas,
                document,
                shown_phase: None,
                shown_score: None,
            }
        }

        fn command(&mut self, command: HostCommand) {
            match command {
                HostCommand::Game(action) => {
                    if action == InputAction::Confirm {
                        // Browsers only allow audio after a user gesture
                        self.engine.audio_mut().resume();
                    }
                    self.engine.handle_input(action);
                }
                HostCommand::ToggleMute => {
                    let muted = self.settings.toggle_mute();
                    self.engine.audio_mut().set_muted(muted);
                    self.settings.save();
                    log::info!("Muted: {}", muted);
                }
                HostCommand::ToggleAutopilot => {
                    let enabled = !self.engine.autopilot();
                    self.engine.set_autopilot(enabled);
                }
            }
        }

        /// Pointer x relative to the canvas, and the canvas width
        fn canvas_x(&self, client_x: i32) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            ((client_x as f64 - rect.left()) as f32, rect.width() as f32)
        }

        /// Press anywhere on the page: start or restart outside play
        fn page_press(&mut self) {
            if press_confirms(self.engine.phase()) {
                self.command(HostCommand::Game(InputAction::Confirm));
            }
        }

        /// Press or drag on the canvas: steer by canvas half during play
        fn pointer_move(&mut self, client_x: i32) {
            if self.engine.phase() == GamePhase::Playing {
                let (x, width) = self.canvas_x(client_x);
                let (left, right) = pointer_steer(x, width);
                self.engine.set_directional_intent(left, right);
            }
        }

        fn pointer_up(&mut self) {
            self.engine.set_directional_intent(false, false);
        }

        /// Tab hidden: drop held input and the stale timestamp
        fn suspend(&mut self) {
            self.engine.set_directional_intent(false, false);
            self.clock.reset();
            log::info!("Paused frame clock (tab hidden)");
        }

        fn frame(&mut self, time: f64) {
            let dt = self.clock.tick(time);
            self.engine.advance(dt);
            self.render();
            self.update_hud();
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.engine.snapshot(), &self.settings);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let score = self.engine.score();
            if self.shown_score != Some(score) {
                self.set_text("score", &format!("Score: {}", score));
                self.shown_score = Some(score);
            }

            let phase = self.engine.phase();
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            self.set_hidden("startScreen", phase != GamePhase::Idle);
            self.set_hidden("gameOverScreen", phase != GamePhase::Ended);
            self.set_text("bestScore", &self.engine.best_score().to_string());

            if let Some(result) = self.engine.last_result() {
                self.set_text("finalScore", &result.final_score.to_string());
            }
        }
    }

    fn js_error(context: &str, e: impl std::fmt::Debug) -> JsValue {
        JsValue::from_str(&format!("{}: {:?}", context, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| js_error("logger", e))?;

        log::info!("Meteor Dodge starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Back the canvas at device resolution
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            canvas.clone(),
            document.clone(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        // A missing GPU leaves the DOM HUD playable
        match init_renderer(&canvas, width, height, &game).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {:?}", e),
        }

        setup_keyboard(game.clone());
        setup_pointer(&canvas, game.clone());
        setup_visibility(game.clone());

        request_animation_frame(game);

        log::info!("Meteor Dodge running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        game: &Rc<RefCell<Game>>,
    ) -> Result<RenderState, JsValue> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_error("surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_error("adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let canvas_size = {
            let g = game.borrow();
            let tuning = &g.engine.state().tuning;
            glam::Vec2::new(tuning.canvas_width, tuning.canvas_height)
        };

        RenderState::new(surface, &adapter, width, height, canvas_size)
            .await
            .map_err(|e| js_error("device", e))
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if prevents_default(&code) {
                    event.prevent_default();
                }
                // Auto-repeat would re-fire start/restart while held
                if pressed && event.repeat() {
                    return;
                }
                if let Some(command) = key_command(&code, pressed) {
                    game.borrow_mut().command(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click or tap anywhere (overlays included) starts/restarts
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().page_press();
            });
            for name in ["click", "touchstart"] {
                let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Mouse down on the canvas steers
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_move(event.client_x());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere releases steering
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer_up();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start on the canvas steers
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_move(touch.client_x());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (finger slides across the halves)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_move(touch.client_x());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                match event.touches().get(0) {
                    Some(touch) => g.pointer_move(touch.client_x()),
                    None => g.pointer_up(),
                }
            });
            for name in ["touchend", "touchcancel"] {
                let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().suspend();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur drops held keys (their keyup never arrives)
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().pointer_up();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use meteor_dodge::audio::NullAudio;
    use meteor_dodge::persistence::MemoryStore;
    use meteor_dodge::sim::{GamePhase, GameState};
    use meteor_dodge::{Engine, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a session after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const SESSIONS: u32 = 3;

    /// Usage: `meteor-dodge [seed] [tuning.json]`
    pub fn run() -> ExitCode {
        let mut args = std::env::args().skip(1);

        let seed = match args.next().map(|s| s.parse::<u64>()) {
            None => 42,
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::error!("Invalid seed: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let tuning = match args.next() {
            None => Tuning::default(),
            Some(path) => match load_tuning(&path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Could not load tuning from {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            },
        };

        let state = GameState::with_tuning(seed, tuning);
        let mut engine = Engine::new(state, NullAudio, MemoryStore::new());
        engine.set_autopilot(true);

        for session in 1..=SESSIONS {
            engine.start();
            let mut frames = 0;
            while engine.phase() == GamePhase::Playing && frames < MAX_FRAMES {
                engine.advance(FRAME_DT);
                frames += 1;
            }

            let seconds = frames as f32 * FRAME_DT;
            match engine.last_result() {
                Some(result) => println!(
                    "Session {}: score {} after {:.1}s (best {}{})",
                    session,
                    result.final_score,
                    seconds,
                    result.best_score,
                    if result.new_best { ", new best" } else { "" }
                ),
                None => println!(
                    "Session {}: survived {:.1}s with score {}",
                    session,
                    seconds,
                    engine.score()
                ),
            }
        }

        ExitCode::SUCCESS
    }

    fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Tuning::from_json(&json)?;
        Ok(tuning)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Meteor Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
