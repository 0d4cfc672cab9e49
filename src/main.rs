//! Cookie Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use cookie_dash::Theme;
    use cookie_dash::consts::*;
    use cookie_dash::flavor::{self, FlavorText, RunStats};
    use cookie_dash::renderer::{RenderState, scene};
    use cookie_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use cookie_dash::storage::Counters;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: TickInput,
        counters: Counters,
        /// Taken out while a narration request is in flight through it
        narrator: Option<Box<dyn FlavorText>>,
        /// Pending animation frame; None means the loop is stopped
        raf_id: Option<i32>,
        /// Bumped on every run start so stale narrator replies are dropped
        run_generation: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                input: TickInput::default(),
                counters: Counters::load(),
                narrator: Some(flavor::default_provider(seed)),
                raf_id: None,
                run_generation: 0,
            }
        }

        /// Run one simulation tick and consume the one-shot jump edge
        fn update(&mut self) -> Vec<GameEvent> {
            let input = self.input;
            let events = tick(&mut self.state, &input);
            self.input.jump = false;
            events
        }

        /// Render the current frame
        fn render(&mut self) {
            let sky = self.state.theme.palette().sky;
            let vertices = scene::build(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, sky) {
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

        /// Throttled score/treat readout refresh
        fn sync_hud(&self) {
            set_text("hud-score", &self.state.score.to_string());
            set_text("hud-treats", &self.state.treats.to_string());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cookie Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Surface the persisted best before the first run
        let high_score = game.borrow().counters.high_score;
        set_text("menu-high-score", &high_score.to_string());

        setup_input_handlers(&canvas, game.clone());
        setup_start_buttons(game.clone());

        // Draw the idle scene behind the menu overlay
        game.borrow_mut().render();

        log::info!("Cookie Dash ready (seed {})", seed);
    }

    /// Reset session state and (re)start the frame loop
    fn start_run(game: &Rc<RefCell<Game>>) {
        let seed = js_sys::Date::now() as u64;
        {
            let mut g = game.borrow_mut();
            g.run_generation = g.run_generation.wrapping_add(1);
            g.input = TickInput::default();
            g.state.start_run(seed);
        }

        set_overlay_visible("menu", false);
        set_overlay_visible("game-over", false);
        set_text("hud-score", "0");
        set_text("hud-treats", "0");
        set_text("hud-theme", Theme::Neighborhood.label());

        // Kick the loop unless a frame is already pending
        if game.borrow().raf_id.is_none() {
            schedule_frame(game.clone());
        }
        log::info!("Run started with seed {}", seed);
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(handle);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(err) => log::error!("Failed to schedule frame: {:?}", err),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let events = {
            let mut g = game.borrow_mut();
            let events = g.update();
            g.render();
            if g.state.frame % HUD_SYNC_FRAMES == 0 {
                g.sync_hud();
            }
            events
        };

        for event in &events {
            match *event {
                GameEvent::ThemeChanged(theme) => {
                    set_text("hud-theme", theme.label());
                    log::info!("Scenery rolled over to the {}", theme.label());
                }
                GameEvent::RunEnded {
                    score,
                    treats,
                    theme,
                } => handle_run_ended(&game, score, treats, theme),
            }
        }

        // The loop is explicitly cancelled on game over: a terminal tick
        // simply does not schedule a successor.
        if game.borrow().state.phase == GamePhase::Playing {
            schedule_frame(game);
        } else {
            game.borrow_mut().raf_id = None;
        }
    }

    fn handle_run_ended(game: &Rc<RefCell<Game>>, score: u64, treats: u32, theme: Theme) {
        let generation = {
            let mut g = game.borrow_mut();
            let improved = g.counters.record_run(score, treats);
            g.counters.save();

            set_text("final-score", &score.to_string());
            set_text("final-treats", &treats.to_string());
            set_text("final-high-score", &g.counters.high_score.to_string());
            set_element_visible("new-record", improved);
            set_element_visible("flavor-loading", true);
            set_element_visible("flavor-message", false);
            set_overlay_visible("game-over", true);

            log::info!(
                "Run over: score {}, treats {}, high score {}",
                score,
                treats,
                g.counters.high_score
            );
            g.run_generation
        };

        // Narrate outside the borrow: a synchronous provider delivers
        // immediately and the delivery itself needs the game.
        let mut narrator = game.borrow_mut().narrator.take();
        if let Some(provider) = narrator.as_mut() {
            let handle = game.clone();
            provider.narrate(
                RunStats {
                    score,
                    treats,
                    theme,
                },
                Box::new(move |line| {
                    if handle.borrow().run_generation != generation {
                        log::info!("Discarding narrator reply from a finished run");
                        return;
                    }
                    set_text("flavor-message", &line);
                    set_element_visible("flavor-loading", false);
                    set_element_visible("flavor-message", true);
                }),
            );
        }
        game.borrow_mut().narrator = narrator;
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard: Space or ArrowUp, auto-repeat filtered so a held key is a
        // single edge
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        game.borrow_mut().input.jump = true;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                game.borrow_mut().input.jump = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "run-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    start_run(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    // --- DOM helpers -------------------------------------------------------

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_overlay_visible(id: &str, visible: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    fn set_element_visible(id: &str, visible: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cookie_dash::flavor::{FlavorText, RunStats, StaticPool};
    use cookie_dash::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Cookie Dash (native) starting...");
    log::info!("The browser build is the real game - run with `trunk serve`");

    // Headless demo: a naive autopilot plays one seeded run to completion.
    let seed = 0xC00C1E;
    let mut state = GameState::new(seed);
    state.start_run(seed);

    let mut jump_cooldown = 0u32;
    let mut result = None;
    for _ in 0..200_000 {
        // Hop whenever a hazard is closing in at paw level
        let danger = state.entities.iter().any(|e| {
            !e.kind.is_collectible()
                && !e.deleted
                && e.x > state.player.x
                && e.x < state.player.x + 120.0
                && e.y + e.height >= cookie_dash::consts::GROUND_Y - 20.0
        });
        let jump = danger && jump_cooldown == 0;
        if jump {
            jump_cooldown = 30;
        }
        jump_cooldown = jump_cooldown.saturating_sub(1);

        let events = tick(&mut state, &TickInput { jump });
        result = events.iter().find_map(|e| match *e {
            GameEvent::RunEnded {
                score,
                treats,
                theme,
            } => Some((score, treats, theme)),
            _ => None,
        });
        if result.is_some() {
            break;
        }
    }

    match result {
        Some((score, treats, theme)) => {
            println!(
                "Run over: score {}, treats {}, last seen at the {}",
                score,
                treats,
                theme.label()
            );
            let mut narrator = StaticPool::new(seed);
            narrator.narrate(
                RunStats {
                    score,
                    treats,
                    theme,
                },
                Box::new(|line| println!("{}", line)),
            );
        }
        None => println!("The autopilot outran the demo tick limit. Good dog."),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
