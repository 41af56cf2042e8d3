use crate::game::SPLASH_MESSAGE;
use crate::{Config, ExitReason, Game, Session, SplashEvent, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct GameLoop {
    session: Session<WebRenderer>,
    last_step: f64,
    splash_until: Option<f64>,
}

impl GameLoop {
    fn new() -> Result<Self, JsValue> {
        let game = Game::new(Config::default());
        let renderer = WebRenderer::new("gameCanvas")?;
        let mut session = Session::new(game, renderer);
        session
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let now = session.renderer().now();
        let splash_until = now + session.game.config.splash_duration.as_secs_f64() * 1000.0;
        session.game.show_message(SPLASH_MESSAGE);

        Ok(Self {
            session,
            last_step: now,
            splash_until: Some(splash_until),
        })
    }

    /// Returns an exit reason once the session is over
    fn update_frame(&mut self, current_time: f64) -> Result<Option<ExitReason>, JsValue> {
        if let Some(deadline) = self.splash_until {
            let event = self
                .session
                .poll_splash()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            if let SplashEvent::Exit(reason) = event {
                return Ok(Some(reason));
            }
            if event == SplashEvent::Dismissed || current_time >= deadline {
                self.session.game.clear_message();
                self.splash_until = None;
                self.last_step = current_time;
            } else {
                self.session
                    .render()
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                return Ok(None);
            }
        }

        let delay = self.session.game.tick_delay().as_secs_f64() * 1000.0;
        if current_time - self.last_step < delay {
            return Ok(None);
        }

        // Catch up on ticks missed between animation frames, a bounded amount
        let mut steps = 0;
        while current_time - self.last_step >= delay && steps < 8 {
            if let Some(reason) = self
                .session
                .step()
                .map_err(|e| JsValue::from_str(&e.to_string()))?
            {
                return Ok(Some(reason));
            }
            self.last_step += delay;
            steps += 1;
        }
        if current_time - self.last_step >= delay {
            self.last_step = current_time;
        }

        Ok(None)
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting Pong...".into());

    let game_loop = match GameLoop::new() {
        Ok(gl) => Rc::new(RefCell::new(gl)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game loop: {:?}", e).into());
            return Err(e);
        }
    };

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let game_loop_clone = game_loop.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let current_time = performance.now();

        let outcome = game_loop_clone.borrow_mut().update_frame(current_time);
        match outcome {
            Ok(None) => {}
            Ok(Some(reason)) => {
                if let Err(e) = game_loop_clone.borrow_mut().session.finish(Ok(reason)) {
                    web_sys::console::error_1(&e.to_string().into());
                }
                web_sys::console::log_1(&reason.message().into());
                // Not rescheduling ends the animation loop
                return;
            }
            Err(e) => {
                web_sys::console::error_1(&e);
                let _ = game_loop_clone.borrow_mut().session.shutdown();
                return;
            }
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = f.borrow().as_ref() {
            let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    web_sys::console::log_1(&"[WASM] Game loop started!".into());

    Ok(())
}
