//! Ping Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PageTransitionEvent, Window};

    use ping_pong::consts::COUNTDOWN_TICK_MS;
    use ping_pong::host::{HostState, Registrations};
    use ping_pong::render::CanvasRenderer;
    use ping_pong::{GameConfig, Session, SessionEvent};

    thread_local! {
        /// The live host, if any. Replacing or clearing it tears the old one down.
        static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
    }

    /// Game instance: the session plus the timers currently registered for it
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        window: Window,
        /// Countdown timer callback, shared by every interval we arm
        tick_fn: js_sys::Function,
        frame_id: Option<i32>,
        interval_id: Option<i32>,
        state: HostState,
    }

    impl Game {
        /// Feed one event to the session and keep the countdown timer in step
        fn dispatch(&mut self, event: SessionEvent<'_>) {
            if !self.state.is_running() {
                return;
            }
            self.session.dispatch(event);
            self.sync_countdown_timer();
        }

        /// Arm the one-second timer while counting down, disarm it otherwise
        fn sync_countdown_timer(&mut self) {
            let active = self.state.is_running() && self.session.countdown_active();
            match (active, self.interval_id) {
                (true, None) => {
                    match self
                        .window
                        .set_interval_with_callback_and_timeout_and_arguments_0(
                            &self.tick_fn,
                            COUNTDOWN_TICK_MS,
                        ) {
                        Ok(id) => self.interval_id = Some(id),
                        Err(e) => {
                            log::error!("Failed to start countdown timer: {:?}", e);
                            self.halt();
                        }
                    }
                }
                (false, Some(id)) => {
                    self.window.clear_interval_with_handle(id);
                    self.interval_id = None;
                }
                _ => {}
            }
        }

        /// Step and draw one frame
        fn frame(&mut self) -> Result<(), JsValue> {
            self.dispatch(SessionEvent::Frame);
            self.renderer.draw(&self.session.snapshot())
        }

        fn stop_timers(&mut self) {
            if let Some(id) = self.frame_id.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            if let Some(id) = self.interval_id.take() {
                self.window.clear_interval_with_handle(id);
            }
        }

        /// Page hidden: pause the loop and forget held keys, whose key-ups
        /// will never arrive
        fn suspend(&mut self) {
            if self.state.suspend() {
                self.stop_timers();
                self.session.release_keys();
                log::info!("Ping Pong suspended");
            }
        }

        /// Stop every timer for good; callbacks that still fire become no-ops
        fn halt(&mut self) {
            self.state.halt();
            self.stop_timers();
        }
    }

    type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
    type Listener = Closure<dyn FnMut(web_sys::Event)>;

    /// Schedule the next animation frame unless one is already pending
    fn request_frame(game: &mut Game, on_frame: &FrameClosure) {
        if game.frame_id.is_some() || !game.state.is_running() {
            return;
        }
        if let Some(closure) = on_frame.borrow().as_ref() {
            match game
                .window
                .request_animation_frame(closure.as_ref().unchecked_ref())
            {
                Ok(id) => game.frame_id = Some(id),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    game.halt();
                }
            }
        }
    }

    /// Owns the game and every callback registered with the browser
    struct Host {
        game: Rc<RefCell<Game>>,
        window: Window,
        on_frame: FrameClosure,
        _on_tick: Closure<dyn FnMut()>,
        listeners: Registrations<Listener>,
    }

    impl Host {
        /// Add a window listener that teardown will remove again
        fn listen(&mut self, event: &'static str, listener: Listener) -> Result<(), JsValue> {
            let window = &self.window;
            self.listeners.register(event, listener, |event, listener| {
                window.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            })
        }

        fn teardown(&mut self) {
            self.game.borrow_mut().halt();
            for (event, listener) in self.listeners.drain() {
                let _ = self
                    .window
                    .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
            }
            // Breaks the frame closure's reference to itself
            self.on_frame.borrow_mut().take();
            log::info!("Ping Pong stopped");
        }
    }

    impl Drop for Host {
        fn drop(&mut self) {
            self.teardown();
        }
    }

    /// Tear down the running game, if any
    pub fn stop() {
        let host = HOST.with(|h| h.borrow_mut().take());
        drop(host);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        // Fails only when an earlier run already installed the logger
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Ping Pong starting...");

        // Replacing a running game must release its callbacks first
        stop();

        match start() {
            Ok(host) => {
                HOST.with(|h| *h.borrow_mut() = Some(host));
                log::info!("Ping Pong running!");
            }
            Err(e) => log::error!("Ping Pong failed to start: {:?}", e),
        }
    }

    /// Build the host. On any error the partially built host is dropped,
    /// which removes whatever it had registered so far.
    fn start() -> Result<Host, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let config = GameConfig::load();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        canvas.set_width(config.canvas_width as u32);
        canvas.set_height(config.canvas_height as u32);
        let renderer = CanvasRenderer::new(&canvas)?;

        // The tick callback needs the game, the game needs the tick callback:
        // build the callback against a slot that is filled right after.
        let slot: Rc<RefCell<Option<Rc<RefCell<Game>>>>> = Rc::new(RefCell::new(None));
        let on_tick = {
            let slot = slot.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Some(game) = slot.borrow().as_ref() {
                    game.borrow_mut().dispatch(SessionEvent::CountdownTick);
                }
            })
        };

        let session = Session::new(config, js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", session.seed());

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            window: window.clone(),
            tick_fn: on_tick.as_ref().unchecked_ref::<js_sys::Function>().clone(),
            frame_id: None,
            interval_id: None,
            state: HostState::Running,
        }));
        *slot.borrow_mut() = Some(game.clone());

        let on_frame: FrameClosure = Rc::new(RefCell::new(None));
        {
            let game = game.clone();
            let next = on_frame.clone();
            *on_frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                let mut g = game.borrow_mut();
                g.frame_id = None;
                if !g.state.is_running() {
                    return;
                }
                if let Err(e) = g.frame() {
                    log::error!("Render error: {:?}", e);
                    g.halt();
                    return;
                }
                request_frame(&mut g, &next);
            }));
        }

        let mut host = Host {
            game: game.clone(),
            window,
            on_frame: on_frame.clone(),
            _on_tick: on_tick,
            listeners: Registrations::new(),
        };

        let on_key_down = {
            let game = game.clone();
            Listener::new(move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if matches!(key.as_str(), "ArrowUp" | "ArrowDown" | " " | "w" | "s") {
                    event.prevent_default();
                }
                game.borrow_mut().dispatch(SessionEvent::KeyDown(&key));
            })
        };
        host.listen("keydown", on_key_down)?;

        let on_key_up = {
            let game = game.clone();
            Listener::new(move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    game.borrow_mut().dispatch(SessionEvent::KeyUp(&event.key()));
                }
            })
        };
        host.listen("keyup", on_key_up)?;

        // Hidden pages may come back from the back/forward cache, so only pause
        let on_page_hide = {
            let game = game.clone();
            Listener::new(move |_event: web_sys::Event| game.borrow_mut().suspend())
        };
        host.listen("pagehide", on_page_hide)?;

        let on_page_show = {
            let game = game.clone();
            let on_frame = on_frame.clone();
            Listener::new(move |event: web_sys::Event| {
                let restored = event
                    .dyn_ref::<PageTransitionEvent>()
                    .is_some_and(|e| e.persisted());
                if !restored {
                    return;
                }
                let mut g = game.borrow_mut();
                if g.state.resume() {
                    g.sync_countdown_timer();
                    request_frame(&mut g, &on_frame);
                    log::info!("Ping Pong resumed");
                }
            })
        };
        host.listen("pageshow", on_page_show)?;

        // Start game loop
        let mut g = game.borrow_mut();
        request_frame(&mut g, &on_frame);
        if !g.state.is_running() {
            return Err(JsValue::from_str("could not start the frame loop"));
        }
        drop(g);

        Ok(host)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Tear the game down from JavaScript (e.g. when its container unmounts)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ping Pong (native) starting...");
    log::info!("Native mode runs a headless match - build for wasm32 to play");

    let config = ping_pong::GameConfig::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        });

    headless_match(config, seed);
}

/// Play a match with nobody at the keys: 60 frames per simulated second
#[cfg(not(target_arch = "wasm32"))]
fn headless_match(config: ping_pong::GameConfig, seed: u64) {
    use ping_pong::sim::GamePhase;
    use ping_pong::{Session, SessionEvent};

    const FRAMES_PER_SECOND: u64 = 60;
    const MAX_FRAMES: u64 = FRAMES_PER_SECOND * 60 * 30;

    let mut session = Session::new(config, seed);
    log::info!("Headless match with seed: {}", session.seed());
    session.dispatch(SessionEvent::KeyDown("Enter"));

    let mut frame = 0;
    while frame < MAX_FRAMES && !matches!(session.phase(), GamePhase::RoundOver(_)) {
        frame += 1;
        if session.countdown_active() && frame % FRAMES_PER_SECOND == 0 {
            session.dispatch(SessionEvent::CountdownTick);
        }
        session.dispatch(SessionEvent::Frame);
    }

    let snap = session.snapshot();
    println!(
        "{} - {} after {} frames ({:?})",
        snap.score_left, snap.score_right, frame, snap.phase
    );
    match snap.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not export final snapshot: {}", e),
    }
}
