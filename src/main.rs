//! Rect Fighter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use rect_fighter::audio::{AudioManager, SoundEffect};
    use rect_fighter::consts::*;
    use rect_fighter::platform::{Binding, KeyboardState, UiCommand};
    use rect_fighter::record::MatchEntry;
    use rect_fighter::renderer::RenderState;
    use rect_fighter::sim::{GameEvent, GamePhase, GameState, tick};
    use rect_fighter::{MatchRecord, Settings};

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: KeyboardState,
        settings: Settings,
        record: MatchRecord,
        audio: AudioManager,
        document: Document,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, document: Document) -> Self {
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                state: GameState::new(seed, settings.round_seconds),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                keys: KeyboardState::new(),
                settings,
                record: MatchRecord::load(),
                audio,
                document,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let mut input = self.keys.tick_input();
                input.cpu_enemy = self.settings.cpu_opponent;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Presses are consumed by exactly one tick
                self.keys.clear_one_shots();
                self.handle_events();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Play sounds and record results for the last tick's events
        fn handle_events(&mut self) {
            for event in std::mem::take(&mut self.state.events) {
                self.audio.play(SoundEffect::for_event(&event));

                if let GameEvent::RoundOver(_) = event {
                    if let Some(entry) = MatchEntry::from_state(&self.state, js_sys::Date::now()) {
                        self.record.record(entry);
                        self.record.save();
                    }
                }
            }
        }

        fn toggle_cpu(&mut self) {
            self.settings.cpu_opponent = !self.settings.cpu_opponent;
            self.settings.save();
            log::info!("CPU opponent: {}", self.settings.cpu_opponent);
        }

        /// Render the current frame
        fn render(&mut self) {
            let hit_flash = self.settings.effective_hit_flash();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, hit_flash) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        fn set_bar(&self, id: &str, ratio: f32) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("style", &format!("width: {:.0}%", ratio * 100.0));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            self.set_bar("player-health", self.state.player.health_ratio());
            self.set_bar("enemy-health", self.state.enemy.health_ratio());
            self.set_text("timer", &self.state.seconds_left().to_string());
            self.set_text("record", &self.record.summary());

            self.set_visible("hud-fps", self.settings.show_fps);
            self.set_text("fps", &self.fps.to_string());

            self.set_visible("cpu-indicator", self.settings.cpu_opponent);
            self.set_visible("pause-menu", self.state.phase == GamePhase::Paused);

            let outcome = self.state.result.map(|r| r.outcome);
            self.set_visible("result", outcome.is_some());
            if let Some(outcome) = outcome {
                self.set_text("result-text", outcome.label());
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Rect Fighter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "element #canvas is not a canvas")?;

        let (width, height) = fit_canvas(&window, &canvas);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings, document.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(canvas, game.clone());

        request_animation_frame(game);

        log::info!("Rect Fighter running!");
        Ok(())
    }

    /// Match the drawing buffer to the displayed size
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Some(binding) = g.keys.key_down(&event.key()) else {
                    return;
                };
                // Space and arrows would scroll the page
                event.prevent_default();
                if binding == Binding::Ui(UiCommand::ToggleCpu) && !event.repeat() {
                    g.toggle_cpu();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_up(&event.key()).is_some() {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().keys.queue(UiCommand::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause when the tab hides or the window loses focus; held keys are dropped
    /// because their keyup would never arrive.
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        fn suspend(g: &mut Game, why: &str) {
            g.keys.release_all();
            if g.state.phase == GamePhase::Fighting {
                g.keys.queue(UiCommand::Pause);
                log::info!("Auto-paused ({})", why);
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    suspend(&mut game.borrow_mut(), "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                suspend(&mut game.borrow_mut(), "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native build: no window, so play one CPU-vs-CPU round headless and report it
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rect_fighter::consts::SIM_DT;
    use rect_fighter::record::MatchEntry;
    use rect_fighter::sim::{GameEvent, GameState, TickInput, tick};
    use rect_fighter::{MatchRecord, Settings};

    env_logger::init();
    log::info!("Rect Fighter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let settings = Settings::load();
    let mut state = GameState::new(seed, settings.round_seconds);
    let input = TickInput {
        cpu_player: true,
        cpu_enemy: true,
        ..Default::default()
    };

    let mut hits = 0;
    while !state.is_over() {
        tick(&mut state, &input, SIM_DT);
        hits += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Hit { .. }))
            .count();
    }

    let mut record = MatchRecord::new();
    if let Some(entry) = MatchEntry::from_state(&state, 0.0) {
        println!(
            "Seed {}: {} by {:?} after {} hits ({} - {}, {}s left)",
            seed,
            entry.outcome,
            entry.reason,
            hits,
            entry.player_health,
            entry.enemy_health,
            entry.seconds_left
        );
        record.record(entry);
    }
    log::info!("Record: {}", record.summary());
}
