//! Canvas Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlButtonElement, HtmlCanvasElement, MouseEvent};

    use canvas_breakout::render::CanvasSurface;
    use canvas_breakout::sim::GameEvent;
    use canvas_breakout::{FrameDriver, FrameRequest, GameConfig, InputState};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver,
        surface: CanvasSurface,
        frames: FrameRequest,
        input: InputState,
        canvas: HtmlCanvasElement,
        button: Option<HtmlButtonElement>,
    }

    impl Game {
        fn new(
            config: GameConfig,
            seed: u64,
            canvas: HtmlCanvasElement,
            ctx: CanvasRenderingContext2d,
        ) -> Self {
            Self {
                driver: FrameDriver::new(config, seed),
                surface: CanvasSurface::new(ctx),
                frames: FrameRequest::default(),
                input: InputState::new(),
                canvas,
                button: None,
            }
        }

        /// Run one frame; returns the notifications and whether to keep going
        fn frame(&mut self) -> (Vec<GameEvent>, bool) {
            let input = self.input.snapshot();
            let events = self
                .driver
                .frame(&input, &mut self.surface, &mut self.frames);
            (events, self.frames.take())
        }

        /// Fresh session after game over; the run button starts it
        fn restart(&mut self) {
            self.driver.restart(js_sys::Date::now() as u64);
            if let Some(button) = &self.button {
                button.set_disabled(false);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Canvas Breakout starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("myCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let config = GameConfig::load(&canvas);
        canvas.set_width(config.surface_width as u32);
        canvas.set_height(config.surface_height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed, canvas.clone(), ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;
        setup_run_button(&document, game)?;

        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Pointer move - absolute position relative to the canvas
        {
            let game = game.clone();
            let canvas = game.borrow().canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let rect = g.canvas.get_bounding_client_rect();
                g.input
                    .pointer_moved(event.client_x() as f32, rect.left() as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_run_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("runButton") else {
            log::warn!("No #runButton, starting immediately");
            start(&game);
            return Ok(());
        };
        let btn: HtmlButtonElement = btn.dyn_into()?;
        game.borrow_mut().button = Some(btn.clone());

        let button = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            start(&game);
            button.set_disabled(true);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn start(game: &Rc<RefCell<Game>>) {
        let scheduled = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.driver.start(&mut g.frames) && g.frames.take()
        };
        if scheduled {
            request_animation_frame(game.clone());
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let (events, again) = game.borrow_mut().frame();

        // Alerts block, so show them with the game unborrowed
        let mut game_over = false;
        for event in events {
            game_over |= matches!(event, GameEvent::GameOver { .. });
            notify(event);
        }

        if game_over {
            let has_button = {
                let mut g = game.borrow_mut();
                g.restart();
                g.button.is_some()
            };
            if !has_button {
                start(&game);
            }
        } else if again {
            request_animation_frame(game);
        }
    }

    fn notify(event: GameEvent) {
        let message = match event {
            GameEvent::LevelUp { level } => format!("Level {}! Get ready!", level),
            GameEvent::GameOver { score, level } => {
                format!("GAME OVER\nScore: {}  Level: {}", score, level)
            }
            GameEvent::LifeLost { .. } => return,
        };
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&message);
        }
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

/// Maximum frames for the headless demo
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u64 = 20_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_breakout::render::RecordingSurface;
    use canvas_breakout::sim::GameEvent;
    use canvas_breakout::{FrameDriver, FrameRequest, GameConfig, InputState};

    env_logger::init();
    log::info!("Canvas Breakout (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = GameConfig::load(config_path.as_deref());
    let seed = std::env::var("BREAKOUT_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut driver = FrameDriver::new(config, seed);
    let mut surface = RecordingSurface::default();
    let mut frames = FrameRequest::default();
    let mut input = InputState::new();
    input.set_autopilot(true);

    driver.start(&mut frames);
    while frames.take() && driver.state().time_ticks < DEMO_FRAMES {
        for event in driver.frame(&input.snapshot(), &mut surface, &mut frames) {
            match event {
                GameEvent::LevelUp { level } => println!("Level {}!", level),
                GameEvent::LifeLost { remaining } => println!("Life lost, {} left", remaining),
                GameEvent::GameOver { score, level } => {
                    println!("GAME OVER at level {} with score {}", level, score)
                }
            }
        }
    }
    driver.stop();

    let state = driver.state();
    println!(
        "Demo finished after {} ticks: level {}, score {}, lives {}",
        state.time_ticks,
        state.level,
        state.score.value(),
        state.lives.value()
    );
}
