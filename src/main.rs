//! Orb Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use orb_hop::renderer::{CanvasRenderer, build_scene};
    use orb_hop::sim::RunPhase;
    use orb_hop::{Engine, GameConfig, GameObserver, Leaderboard};

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(selector: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.query_selector(selector).ok().flatten()) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Mirrors engine notifications into the DOM HUD
    struct Hud;

    impl GameObserver for Hud {
        fn on_score_update(&mut self, score: u64) {
            set_text("#hud-score .hud-value", &score.to_string());
        }

        fn on_level_update(&mut self, level: u32) {
            set_text("#hud-level .hud-value", &level.to_string());
        }

        fn on_lives_update(&mut self, lives: u32) {
            set_text("#hud-lives .hud-value", &"\u{2764}".repeat(lives as usize));
        }

        fn on_game_over(&mut self) {
            set_visible("game-over", true);
        }
    }

    /// Game instance holding all state
    struct Game {
        engine: Engine<Hud>,
        renderer: Option<CanvasRenderer>,
        leaderboard: Leaderboard,
        /// Whether this run's score has been offered to the leaderboard
        submitted: bool,
    }

    impl Game {
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.draw(&build_scene(self.engine.state())) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        /// Offer the finished run to the leaderboard. Failures are logged only.
        fn submit_score(&mut self) {
            self.submitted = true;
            let summary = self.engine.summary();
            set_text("#final-score", &summary.score.to_string());
            set_text("#final-level", &summary.level.to_string());

            let name = document()
                .and_then(|d| d.get_element_by_id("player-name"))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();

            match self
                .leaderboard
                .submit_run(&name, &summary, js_sys::Date::now())
            {
                Some(rank) => {
                    log::info!("Score {} ranked #{}", summary.score, rank);
                    if let Err(e) = self.leaderboard.save() {
                        log::warn!("Failed to save leaderboard: {}", e);
                    }
                }
                None => log::info!("Score {} not submitted", summary.score),
            }
            self.show_leaderboard();
        }

        fn show_leaderboard(&self) {
            let text = self
                .leaderboard
                .top(10)
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}. {} - {} (level {})", i + 1, e.name, e.score, e.level))
                .collect::<Vec<_>>()
                .join("\n");
            set_text("#leaderboard-list", &text);
        }

        fn restart(&mut self) -> bool {
            self.submitted = false;
            set_visible("game-over", false);
            set_visible("pause-menu", false);
            self.engine.restart()
        }

        fn toggle_pause(&mut self) {
            self.engine.toggle_pause();
            set_visible("pause-menu", self.engine.is_paused());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Orb Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        set_visible("loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = GameConfig::load();
        let engine = Engine::with_entropy(config, Hud).map_err(|e| e.to_string())?;
        let renderer = CanvasRenderer::new(
            &canvas,
            config.world_width,
            config.world_height,
            window.device_pixel_ratio(),
        )?;

        let leaderboard = Leaderboard::load();
        let game = Rc::new(RefCell::new(Game {
            engine,
            renderer: Some(renderer),
            leaderboard,
            submitted: false,
        }));
        game.borrow().show_leaderboard();

        setup_keyboard(game.clone())?;
        setup_touch_controls(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone())?;

        set_visible("hud", true);

        // Start game loop
        if game.borrow_mut().engine.start() {
            request_animation_frame(game);
        }

        log::info!("Orb Hop running!");
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_running = {
            let mut g = game.borrow_mut();
            let keep_running = g.engine.frame();
            g.render();
            if g.engine.phase() == RunPhase::GameOver && !g.submitted {
                g.submit_score();
            }
            keep_running
        };

        if keep_running {
            request_animation_frame(game);
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "Escape" | "p" => g.toggle_pause(),
                    _ => {
                        if g.engine.key_down(&key) {
                            event.prevent_default();
                        }
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().engine.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// On-screen buttons: hold left/right, tap jump
    fn setup_touch_controls(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        let buttons = [
            ("btn-left", "left-start", Some("left-end")),
            ("btn-right", "right-start", Some("right-end")),
            ("btn-jump", "jump", None),
        ];

        for (id, start, end) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            let mut actions = vec![("touchstart", start)];
            if let Some(end) = end {
                actions.push(("touchend", end));
                actions.push(("touchcancel", end));
            }

            for (event_name, action) in actions {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if let Err(e) = game.borrow_mut().engine.handle_mobile_action(action) {
                        log::warn!("{}", e);
                    }
                });
                let _ = btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        for id in ["restart-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let needs_loop = game.borrow_mut().restart();
                    if needs_loop {
                        request_animation_frame(game.clone());
                    }
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        for id in ["pause-btn", "resume-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().toggle_pause();
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = document().ok_or("no document")?;
        let document_clone = document.clone();

        // Visibility change (tab switch, minimize)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.engine.phase() == RunPhase::Active {
                    g.toggle_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames the headless run is allowed before giving up (two minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use orb_hop::engine::EventLog;
    use orb_hop::{Engine, GameConfig, Leaderboard};

    env_logger::init();
    log::info!("Orb Hop (native) starting...");
    log::info!("Native mode runs a scripted headless game - run with `trunk serve` for the web version");

    let mut engine = match Engine::with_entropy(GameConfig::load(), EventLog::default()) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    // Hold right, hop whenever grounded
    engine.start();
    engine.key_down("ArrowRight");
    for _ in 0..HEADLESS_FRAMES {
        if engine.state().player.on_ground {
            engine.jump();
        }
        if !engine.frame() {
            break;
        }
    }

    let summary = engine.summary();
    log::info!(
        "Run finished after {} ticks with {} notifications",
        summary.ticks,
        engine.observer().events.len()
    );

    let mut leaderboard = Leaderboard::load();
    if leaderboard.submit_run("headless", &summary, 0.0).is_some() {
        if let Err(e) = leaderboard.save() {
            log::warn!("Failed to save leaderboard: {}", e);
        }
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}
