//! Comic Bonk entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use comic_bonk::audio::{AudioManager, SoundEffect};
    use comic_bonk::consts::*;
    use comic_bonk::hud::{HudSnapshot, short_address};
    use comic_bonk::platform::round_seed;
    use comic_bonk::renderer::CanvasRenderer;
    use comic_bonk::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use comic_bonk::wallet::{
        BrowserClock, BrowserWallet, ConfigureOptions, FetchTransport, JsWalletAdapter, PassGate,
        WalletBridge, WalletConfig,
    };
    use comic_bonk::{HighScore, Settings};
    use glam::Vec2;

    /// Global the page may set to override wallet settings
    const PAGE_CONFIG_GLOBAL: &str = "comicBonkConfig";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        high_score: HighScore,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        workbench_open: bool,
        // Workbench paused a running round and should resume it on close
        resume_after_workbench: bool,
        new_record: bool,
    }

    impl Game {
        fn new(renderer: CanvasRenderer, width: f32, height: f32) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: GameState::new(round_seed(), width, height),
                renderer,
                audio,
                settings,
                high_score: HighScore::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                workbench_open: false,
                resume_after_workbench: false,
                new_record: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.swing = false;
                self.input.power = false;
                self.input.pause = false;

                let events = std::mem::take(&mut self.state.events);
                for event in &events {
                    self.handle_event(event);
                }
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            if let GameEvent::GameOver { score } = event {
                self.new_record = self.high_score.submit(*score);
                if self.new_record {
                    self.high_score.save();
                    log::info!("New high score: {}", score);
                }
            }
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
        }

        fn render(&mut self) {
            if let Err(e) = self
                .renderer
                .render(&self.state, &self.settings.hammer, &self.settings)
            {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.renderer.resize(width, height);
            self.state.resize(width as f32, height as f32);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = page_document() else { return };
            let hud = HudSnapshot::capture(&self.state, self.high_score.best());

            set_text(&document, "hud-score", &hud.score.to_string());
            set_text(&document, "hud-best", &hud.best.to_string());
            set_text(&document, "hud-time", &hud.display_time.to_string());
            set_class(
                &document,
                "hud-time",
                if hud.low_time { "hud-value low" } else { "hud-value" },
            );

            match hud.combo {
                Some(_) => {
                    set_text(&document, "hud-combo", &hud.combo_label());
                    set_class(&document, "hud-combo", "combo");
                }
                None => set_class(&document, "hud-combo", "combo hidden"),
            }

            set_text(&document, "mission-text", &hud.mission);
            set_text(&document, "mission-progress", &hud.mission_progress);

            if let Some(fill) = document.get_element_by_id("power-fill") {
                let _ = fill.set_attribute("style", &format!("width: {}%", hud.power_percent));
            }
            set_class(
                &document,
                "power-btn",
                if hud.power_ready { "power-btn ready" } else { "power-btn" },
            );

            set_class(
                &document,
                "pause-menu",
                if hud.paused && !self.workbench_open { "overlay" } else { "overlay hidden" },
            );

            if hud.game_over {
                set_class(&document, "game-over", "overlay");
                set_text(&document, "final-score", &hud.score.to_string());
                set_text(&document, "final-best", &self.high_score.best().to_string());
                set_class(
                    &document,
                    "new-record",
                    if self.new_record { "" } else { "hidden" },
                );
            } else {
                set_class(&document, "game-over", "overlay hidden");
            }
        }

        /// Start a fresh round on the same viewport
        fn restart(&mut self) {
            let seed = round_seed();
            self.state = GameState::new(seed, self.state.width, self.state.height);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.new_record = false;
            log::info!("Round restarted with seed: {}", seed);
        }

        fn open_workbench(&mut self) {
            self.workbench_open = true;
            self.resume_after_workbench = self.state.phase == GamePhase::Playing;
            if self.resume_after_workbench {
                self.input.pause = true;
            }
        }

        fn close_workbench(&mut self) {
            self.workbench_open = false;
            self.settings.save();
            if self.resume_after_workbench {
                self.input.pause = true;
            }
            self.resume_after_workbench = false;
        }
    }

    fn page_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn set_disabled(document: &Document, id: &str, disabled: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if disabled {
                el.set_attribute("disabled", "")
            } else {
                el.remove_attribute("disabled")
            };
        }
    }

    /// Attach a click handler to the element with `id`, if present
    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn viewport_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (800, 600);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(600.0);
        (width as u32, height as u32)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Comic Bonk starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        set_class(&document, "loading", "hidden");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("element #canvas is not a canvas"))?;

        let (width, height) = viewport_size();
        let renderer = CanvasRenderer::new(canvas.clone())?;
        renderer.resize(width, height);

        let game = Rc::new(RefCell::new(Game::new(renderer, width as f32, height as f32)));
        log::info!("Game initialized with seed: {}", game.borrow().state.seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        setup_buttons(&document, game.clone());
        setup_workbench(&document, game.clone());
        setup_auto_pause(&document, game.clone());
        setup_wallet(&document);

        set_class(&document, "hud", "");

        // Start game loop
        request_animation_frame(game);

        log::info!("Comic Bonk running!");
        Ok(())
    }

    /// Pointer position relative to the canvas
    fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer =
                    Some(Vec2::new(event.offset_x() as f32, event.offset_y() as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down swings
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.pointer = Some(Vec2::new(event.offset_x() as f32, event.offset_y() as f32));
                g.input.swing = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(point) = touch_point(&canvas_clone, &event) {
                    game.borrow_mut().input.pointer = Some(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start swings
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(point) = touch_point(&canvas_clone, &event) {
                    g.input.pointer = Some(point);
                }
                g.input.swing = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.workbench_open {
                    return;
                }
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.power = true;
                    }
                    "Escape" => g.input.pause = true,
                    "i" | "I" => {
                        g.input.autoplay = !g.input.autoplay;
                        log::info!("Autoplay: {}", g.input.autoplay);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport_size();
            game.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "power-btn", move || {
                game.borrow_mut().input.power = true;
            });
        }
        {
            let game = game.clone();
            on_click(document, "retry-btn", move || {
                let mut g = game.borrow_mut();
                g.audio.play(SoundEffect::Click);
                g.restart();
            });
        }
        on_click(document, "resume-btn", move || {
            game.borrow_mut().input.pause = true; // Toggle back to playing
        });
    }

    fn refresh_workbench(document: &Document, settings: &Settings) {
        let hammer = &settings.hammer;
        set_text(document, "head-label", &hammer.head.as_str().to_uppercase());
        set_text(document, "alloy-label", &hammer.alloy.as_str().to_uppercase());
        set_text(document, "grip-label", &hammer.grip.as_str().to_uppercase());
    }

    fn setup_workbench(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "customize-btn", move || {
                let mut g = game.borrow_mut();
                g.audio.play(SoundEffect::Click);
                g.open_workbench();
                if let Some(document) = page_document() {
                    refresh_workbench(&document, &g.settings);
                    set_class(&document, "workbench", "overlay");
                }
            });
        }

        let cycles: [(&str, fn(&mut Settings)); 3] = [
            ("head-btn", |s| s.hammer.cycle_head()),
            ("alloy-btn", |s| s.hammer.cycle_alloy()),
            ("grip-btn", |s| s.hammer.cycle_grip()),
        ];
        for (id, cycle) in cycles {
            let game = game.clone();
            on_click(document, id, move || {
                let mut g = game.borrow_mut();
                cycle(&mut g.settings);
                g.audio.play(SoundEffect::Click);
                if let Some(document) = page_document() {
                    refresh_workbench(&document, &g.settings);
                }
            });
        }

        on_click(document, "workbench-done", move || {
            let mut g = game.borrow_mut();
            g.close_workbench();
            g.audio.play(SoundEffect::Click);
            if let Some(document) = page_document() {
                set_class(&document, "workbench", "overlay hidden");
            }
        });
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (app switch)
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wallet bridge plus the pass state shown beside it
    struct WalletUi {
        bridge: BrowserWallet,
        gate: RefCell<PassGate>,
    }

    impl WalletUi {
        fn show_status(&self, text: &str) {
            if let Some(document) = page_document() {
                set_text(&document, "wallet-status", text);
            }
        }

        fn show_gate(&self) {
            let gate = self.gate.borrow();
            self.show_status(gate.status_text());
            if let Some(document) = page_document() {
                set_class(
                    &document,
                    "mint-btn",
                    if gate.can_mint() { "wallet-btn" } else { "wallet-btn hidden" },
                );
            }
        }
    }

    /// Wallet options the page may publish before the module loads
    fn page_wallet_options() -> Option<ConfigureOptions> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(PAGE_CONFIG_GLOBAL)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let text: String = js_sys::JSON::stringify(&value).ok()?.into();
        serde_json::from_str(&text)
            .map_err(|err| log::warn!("Ignoring malformed {}: {}", PAGE_CONFIG_GLOBAL, err))
            .ok()
    }

    fn setup_wallet(document: &Document) {
        let bridge = WalletBridge::new(
            JsWalletAdapter::detect(),
            FetchTransport,
            BrowserClock,
            WalletConfig::default(),
        );
        if let Some(options) = page_wallet_options() {
            bridge.configure(options);
        }
        let ui = Rc::new(WalletUi {
            bridge,
            gate: RefCell::new(PassGate::new()),
        });

        {
            let ui = ui.clone();
            on_click(document, "connect-btn", move || {
                if ui.bridge.is_busy() {
                    return;
                }
                if let Some(session) = ui.bridge.session() {
                    log::info!("Already connected as {}", short_address(&session.public_key));
                    return;
                }
                let ui = ui.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Some(document) = page_document() {
                        set_disabled(&document, "connect-btn", true);
                        set_text(&document, "connect-btn", "Connecting...");
                    }
                    ui.show_status("");
                    let connected = ui.bridge.connect().await;
                    let Some(document) = page_document() else { return };
                    set_disabled(&document, "connect-btn", false);
                    match connected {
                        Ok(result) => {
                            set_text(&document, "connect-btn", &short_address(&result.public_key));
                            ui.gate.borrow_mut().begin_check();
                            ui.show_gate();
                            let checked = ui.bridge.gate_check(&result.public_key).await;
                            ui.gate.borrow_mut().finish_check(checked);
                            ui.show_gate();
                        }
                        Err(err) => {
                            log::warn!("Connect failed [{}]: {}", err.code(), err);
                            set_text(&document, "connect-btn", "Connect Wallet");
                            ui.show_status(&err.to_string());
                        }
                    }
                });
            });
        }

        {
            let ui = ui.clone();
            on_click(document, "sign-test-btn", move || {
                let ui = ui.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match ui.bridge.sign_message("Hello from Comic Bonk").await {
                        Ok(signature) => ui.show_status(&format!("Signed: {}", short_address(&signature))),
                        Err(err) => ui.show_status(&format!("Sign test: {err}")),
                    }
                });
            });
        }

        on_click(document, "mint-btn", move || {
            let Some(session) = ui.bridge.session() else {
                ui.show_status("Connect a wallet first.");
                return;
            };
            if !ui.gate.borrow_mut().begin_mint() {
                return;
            }
            ui.show_gate();
            let ui = ui.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let minted = ui.bridge.mint_pass(&session.public_key).await;
                ui.gate.borrow_mut().finish_mint(minted);
                ui.show_gate();
            });
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use comic_bonk::consts::SIM_DT;
    use comic_bonk::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Comic Bonk (native) starting...");
    log::info!("Native mode runs a headless autoplay round - use `trunk serve` for the web version");

    let seed = comic_bonk::platform::round_seed();
    let mut state = GameState::new(seed, 800.0, 600.0);
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let (mut smashes, mut mines, mut mega_bonks) = (0u32, 0u32, 0u32);
    // Generous cap; a round lasts well under this even with time bonuses
    let max_ticks = 60 * 60 * 10;
    for _ in 0..max_ticks {
        tick(&mut state, &input, SIM_DT);
        for event in &state.events {
            match event {
                GameEvent::Smash { .. } => smashes += 1,
                GameEvent::MineHit => mines += 1,
                GameEvent::MegaBonk { .. } => mega_bonks += 1,
                _ => {}
            }
        }
        if state.is_over() {
            break;
        }
    }

    log::info!(
        "Round over (seed {}): score {} | smashes {} | mines {} | mega bonks {} | ticks {}",
        seed,
        state.score,
        smashes,
        mines,
        mega_bonks,
        state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
