//! Browser front-end: canvas 2D surface and page wiring

use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

use super::CanvasLayout;
use crate::error::{PongError, Result};
use crate::renderer::{Color, DrawSurface, Frame, css_color};
use crate::session::GameSession;
use crate::settings::Settings;

/// Names used when the start button launches a game
const DEFAULT_PLAYERS: (&str, &str) = ("Jojo", "Lili");

fn missing(what: &str) -> PongError {
    PongError::MissingSurface(what.to_string())
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<T>().ok())
        .ok_or_else(|| missing(&format!("#{id}")))
}

fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

/// `DrawSurface` over a canvas 2D context
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    font_family: String,
}

impl Canvas2dSurface {
    pub fn new(canvas: &HtmlCanvasElement, font_family: impl Into<String>) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| missing("2d context"))?;
        Ok(Self {
            ctx,
            font_family: font_family.into(),
        })
    }

    fn set_font(&self, size: f32) {
        self.ctx.set_font(&format!("{}px {}", size, self.font_family));
    }

    /// Reset the transform and rotate the court onto a portrait canvas
    fn apply_layout(&self, layout: &CanvasLayout) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        if layout.rotated {
            let (w, h) = (layout.canvas_width as f64, layout.canvas_height as f64);
            let _ = self.ctx.translate(w / 2.0, h / 2.0);
            let _ = self.ctx.rotate(FRAC_PI_2);
            let _ = self.ctx.translate(-h / 2.0, -w / 2.0);
        }
    }
}

impl DrawSurface for Canvas2dSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx
            .clear_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(x as f64, y as f64, radius as f64, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.set_font(size);
        self.ctx.set_fill_style_str(&css_color(color));
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn measure_text(&mut self, text: &str, size: f32) -> f32 {
        self.set_font(size);
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }
}

/// Page state shared by the event closures
struct App {
    session: GameSession,
    surface: Canvas2dSurface,
    canvas: HtmlCanvasElement,
    /// Handle of the running tick interval
    interval: Option<i32>,
}

impl App {
    fn fit_canvas(&mut self, window: &Window) {
        let inner = |v: std::result::Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        let layout = CanvasLayout::for_window(inner(window.inner_width()), inner(window.inner_height()));

        // Resizing the canvas also resets its transform
        self.canvas.set_width(layout.canvas_width as u32);
        self.canvas.set_height(layout.canvas_height as u32);
        self.surface.apply_layout(&layout);

        let (w, h) = layout.playfield();
        self.session.resize(w, h);
        log::debug!("Canvas {}x{} (rotated: {})", w, h, layout.rotated);
    }

    fn draw(&mut self, frame: Option<Frame>) {
        if let Some(frame) = frame {
            frame.replay(&mut self.surface);
        }
    }

    fn on_tick(&mut self) {
        let frame = self.session.tick();
        self.draw(frame);
        if !self.session.is_running() {
            self.cancel_interval();
        }
    }

    fn cancel_interval(&mut self) {
        if let Some(handle) = self.interval.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

/// Look up the page elements, wire the events and wait for "start"
pub fn run() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;

    let canvas: HtmlCanvasElement = element(&document, "pong_canvas")?;
    let start_button: HtmlElement = element(&document, "button_start_game")?;
    let reset_button: HtmlElement = element(&document, "reset_button")?;

    let settings = Settings::load();
    let surface = Canvas2dSurface::new(&canvas, settings.theme.font_family.clone())?;
    let session = GameSession::new(settings, 0.0, 0.0);

    let app = Rc::new(RefCell::new(App {
        session,
        surface,
        canvas: canvas.clone(),
        interval: None,
    }));
    app.borrow_mut().fit_canvas(&window);

    // Tick closure lives as long as the page
    let tick = Closure::<dyn FnMut()>::new({
        let app = app.clone();
        move || app.borrow_mut().on_tick()
    });
    let tick_fn: js_sys::Function = tick.as_ref().unchecked_ref::<js_sys::Function>().clone();
    tick.forget();

    // Start button
    {
        let app = app.clone();
        let window = window.clone();
        let canvas = canvas.clone();
        let start = start_button.clone();
        let reset = reset_button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            set_display(&canvas, "block");
            set_display(&start, "none");
            set_display(&reset, "block");

            let mut a = app.borrow_mut();
            a.cancel_interval();
            a.fit_canvas(&window);
            let (left, right) = DEFAULT_PLAYERS;
            if let Err(e) = a.session.start(left, right) {
                log::error!("Cannot start match: {}", e);
                return;
            }
            let frame = a.session.frame();
            a.draw(frame);

            let tick_ms = a.session.settings().tick_ms as i32;
            match window.set_interval_with_callback_and_timeout_and_arguments_0(&tick_fn, tick_ms) {
                Ok(handle) => a.interval = Some(handle),
                Err(e) => log::error!("Failed to start tick interval: {:?}", e),
            }
        });
        let _ = start_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Reset button
    {
        let app = app.clone();
        let canvas = canvas.clone();
        let start = start_button.clone();
        let reset = reset_button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            set_display(&canvas, "none");
            set_display(&start, "block");
            set_display(&reset, "none");

            let mut a = app.borrow_mut();
            a.cancel_interval();
            a.session.stop();
        });
        let _ = reset_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Keyboard
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            app.borrow_mut().session.on_key_down(&event.key());
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            app.borrow_mut().session.on_key_up(&event.key());
        });
        let _ = document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Window blur: keyup events are lost while unfocused
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().session.release_keys();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Resize
    {
        let app = app.clone();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.fit_canvas(&window_clone);
            let frame = a.session.frame();
            a.draw(frame);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    log::info!("Duel Pong ready");
    Ok(())
}
