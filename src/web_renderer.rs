use crate::entity::{Color, Entity, EntityKind};
use crate::game::Game;
use crate::input::Key;
use crate::renderer::{Input, Renderer};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

const TARGET_FRAME_TIME: f64 = 16.0; // ~60 FPS
const MAX_PENDING_INPUT: usize = 64;

const COLOR_BACKGROUND: &str = "#000000";
const COLOR_LINE: &str = "#FFFFFF";
const COLOR_TEXT: &str = "#FFFFFF";
const FONT: &str = "normal 24px Arial";

fn css_color(color: Color) -> &'static str {
    match color {
        Color::Red => "#FF0000",
        Color::Blue => "#0000FF",
        Color::Green => "#00FF00",
        Color::Yellow => "#FFFF00",
        Color::Orange => "#FFA500",
        Color::Purple => "#800080",
        Color::White => "#FFFFFF",
    }
}

fn js_err(err: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", err))
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,
    device_pixel_ratio: f64,
    last_render_time: f64,

    // Keys arrive from the DOM callback and wait here for the next poll
    pending_input: Rc<RefCell<VecDeque<Input>>>,
    listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let device_pixel_ratio = window.device_pixel_ratio();

        Ok(Self {
            canvas,
            context,
            window,
            device_pixel_ratio,
            last_render_time: f64::NEG_INFINITY,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
            listener: None,
        })
    }

    pub fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_default()
    }

    fn setup_keyboard_listener(&mut self) -> io::Result<()> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let key = match event.key().as_str() {
                "ArrowLeft" => Some(Key::Left),
                "ArrowRight" => Some(Key::Right),
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(Key::Char(c)),
                        _ => None,
                    }
                }
            };

            if let Some(key) = key {
                let mut pending = pending_input.borrow_mut();
                if pending.len() < MAX_PENDING_INPUT {
                    pending.push_back(Input::Key(key));
                }
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;

        self.listener = Some(closure);
        Ok(())
    }

    /// Arena coordinates (origin centered, y up) to canvas coordinates
    fn to_canvas(game: &Game, x: f32, y: f32) -> (f64, f64) {
        (
            (x + game.arena.width / 2.0) as f64,
            (game.arena.height / 2.0 - y) as f64,
        )
    }

    fn resize(&self, width: f64, height: f64) -> io::Result<()> {
        let pixel_width = (width * self.device_pixel_ratio) as u32;
        let pixel_height = (height * self.device_pixel_ratio) as u32;

        if self.canvas.width() != pixel_width || self.canvas.height() != pixel_height {
            self.canvas.set_width(pixel_width);
            self.canvas.set_height(pixel_height);

            let element: &HtmlElement = self.canvas.unchecked_ref();
            element
                .style()
                .set_property("width", &format!("{}px", width))
                .map_err(js_err)?;
            element
                .style()
                .set_property("height", &format!("{}px", height))
                .map_err(js_err)?;

            // Setting the canvas size resets the context transform
            self.context
                .scale(self.device_pixel_ratio, self.device_pixel_ratio)
                .map_err(js_err)?;
        }
        Ok(())
    }

    fn draw_center_line(&self, width: f64, height: f64) {
        self.context.set_stroke_style_str(COLOR_LINE);
        self.context.set_line_width(1.0);
        self.context.begin_path();
        let mut x = 0.0;
        while x < width {
            self.context.move_to(x, height / 2.0);
            self.context.line_to((x + 20.0).min(width), height / 2.0);
            x += 40.0;
        }
        self.context.stroke();
    }

    fn draw_entities(&self, game: &Game) -> io::Result<()> {
        for entity in game.entities() {
            let pos = entity.position();
            let (cx, cy) = Self::to_canvas(game, pos.x, pos.y);
            self.context.set_fill_style_str(css_color(entity.color()));

            match entity.kind() {
                EntityKind::Paddle { width, height } => {
                    let (w, h) = (width as f64, height as f64);
                    self.context.fill_rect(cx - w / 2.0, cy - h / 2.0, w, h);
                }
                EntityKind::Ball { radius } => {
                    self.context.begin_path();
                    self.context
                        .arc(cx, cy, radius as f64, 0.0, 2.0 * PI)
                        .map_err(js_err)?;
                    self.context.fill();
                }
            }
        }
        Ok(())
    }

    fn draw_text(&self, game: &Game, text: &str, y: f32) -> io::Result<()> {
        let (cx, cy) = Self::to_canvas(game, 0.0, y);
        self.context.set_fill_style_str(COLOR_TEXT);
        self.context.set_font(FONT);
        self.context.set_text_align("center");
        self.context.set_text_baseline("bottom");
        self.context.fill_text(text, cx, cy).map_err(js_err)
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.setup_keyboard_listener()?;
        }
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        let now = self.now();
        if now - self.last_render_time < TARGET_FRAME_TIME {
            return Ok(());
        }
        self.last_render_time = now;

        let width = game.arena.width as f64;
        let height = game.arena.height as f64;
        self.resize(width, height)?;

        self.context.set_fill_style_str(COLOR_BACKGROUND);
        self.context.fill_rect(0.0, 0.0, width, height);

        self.draw_center_line(width, height);
        self.draw_entities(game)?;

        let score_y = game.arena.height / 2.0 - 40.0;
        self.draw_text(game, &game.scoreboard.to_string(), score_y)?;

        if let Some(message) = &game.message {
            self.draw_text(game, message, 0.0)?;
        }

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if let Some(listener) = self.listener.take() {
            self.window
                .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
                .map_err(js_err)?;
        }
        self.pending_input.borrow_mut().clear();
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
