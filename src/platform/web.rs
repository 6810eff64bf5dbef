//! Browser bindings: Canvas 2D surface, frame loop and JS exports
//!
//! Every started effect returns an [`FxHandle`]. The handle owns the loop's
//! cancellation token, its pointer listener and any pending timer; calling
//! `stop()` (or freeing the handle) tears all of them down.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};

use super::frame::{CancelToken, run_frame};
use super::surface::{Color, Surface};
use crate::settings::Settings;
use crate::sim::{Animation, BouncingBall, GravityBoxes, PulsingCircle, Starfield, Typewriter};

/// Canvas 2D context as a [`Surface`]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        canvas_size(&self.canvas)
    }

    /// A canvas removed from the document is no longer drawn
    fn is_available(&self) -> bool {
        self.canvas.is_connected()
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }
}

fn canvas_size(canvas: &HtmlCanvasElement) -> Vec2 {
    Vec2::new(canvas.width() as f32, canvas.height() as f32)
}

/// Pointer position in canvas pixels (accounts for CSS scaling)
fn click_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
    let css_w = canvas.client_width().max(1) as f32;
    let css_h = canvas.client_height().max(1) as f32;
    let scale = canvas_size(canvas) / Vec2::new(css_w, css_h);
    Vec2::new(event.offset_x() as f32, event.offset_y() as f32) * scale
}

fn seed() -> u64 {
    js_sys::Date::now() as u64
}

struct ClickListener {
    canvas: HtmlCanvasElement,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

/// Self-rescheduling `setTimeout` chain with a single pending timer
struct TimerLoop {
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl TimerLoop {
    fn schedule(&self, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

/// Handle to a running effect
#[wasm_bindgen]
pub struct FxHandle {
    token: CancelToken,
    click: Option<ClickListener>,
    timer: Option<Rc<TimerLoop>>,
}

#[wasm_bindgen]
impl FxHandle {
    /// Stop the effect: no further frames, clicks or timer ticks
    pub fn stop(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Some(listener) = self.click.take() {
            let _ = listener.canvas.remove_event_listener_with_callback(
                "click",
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        log::debug!("Effect stopped");
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        !self.token.is_cancelled()
    }
}

impl Drop for FxHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start an effect on a canvas. Clicks are routed to effects that accept them.
pub fn start_animation<A>(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, animation: A) -> FxHandle
where
    A: Animation + 'static,
{
    let token = CancelToken::new();
    let animation = Rc::new(RefCell::new(animation));
    let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas.clone(), ctx)));

    let click = if animation.borrow().accepts_clicks() {
        attach_click(&canvas, animation.clone())
    } else {
        None
    };

    request_animation_frame(animation, surface, token.clone());

    FxHandle {
        token,
        click,
        timer: None,
    }
}

fn attach_click<A>(canvas: &HtmlCanvasElement, animation: Rc<RefCell<A>>) -> Option<ClickListener>
where
    A: Animation + 'static,
{
    let target = canvas.clone();
    let callback = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
        let pos = click_position(&target, &event);
        animation.borrow_mut().on_click(pos);
    });
    match canvas.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref()) {
        Ok(()) => Some(ClickListener {
            canvas: canvas.clone(),
            callback,
        }),
        Err(e) => {
            log::warn!("Could not attach click listener: {:?}", e);
            None
        }
    }
}

fn request_animation_frame<A>(
    animation: Rc<RefCell<A>>,
    surface: Rc<RefCell<CanvasSurface>>,
    token: CancelToken,
) where
    A: Animation + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        let outcome = run_frame(
            &mut *animation.borrow_mut(),
            &mut *surface.borrow_mut(),
            &token,
        );
        if outcome.reschedule() {
            request_animation_frame(animation, surface, token);
        } else {
            log::debug!("Animation loop finished");
        }
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

#[wasm_bindgen]
pub fn start_bouncing_ball(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> FxHandle {
    let settings = Settings::load();
    let ball = BouncingBall::from_settings(&settings.ball, canvas_size(&canvas), settings.motion_scale());
    log::info!("Starting bouncing ball");
    start_animation(canvas, ctx, ball)
}

#[wasm_bindgen]
pub fn start_gravity_boxes(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> FxHandle {
    let settings = Settings::load();
    let seed = seed();
    let boxes = GravityBoxes::with_initial_boxes(settings.boxes, canvas_size(&canvas), seed);
    log::info!("Starting gravity boxes with seed: {}", seed);
    start_animation(canvas, ctx, boxes)
}

#[wasm_bindgen]
pub fn start_pulsing_circle(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> FxHandle {
    let settings = Settings::load();
    let circle = PulsingCircle::new(&settings.pulse, settings.motion_scale());
    log::info!("Starting pulsing circle");
    start_animation(canvas, ctx, circle)
}

#[wasm_bindgen]
pub fn start_starfield(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> FxHandle {
    let settings = Settings::load();
    let count = settings.effective_star_count();
    let field = Starfield::new(&settings.starfield, count, settings.motion_scale(), seed());
    log::info!("Starting starfield with {} stars", count);
    start_animation(canvas, ctx, field)
}

/// Validate and persist a settings document; effects started afterwards use it
#[wasm_bindgen]
pub fn save_settings(json: &str) -> Result<(), JsValue> {
    let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    settings
        .save()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Type `phrases` into `element`, one character per tick
#[wasm_bindgen]
pub fn start_typewriter(element: HtmlElement, phrases: Vec<String>) -> FxHandle {
    let settings = Settings::load();
    let writer = RefCell::new(Typewriter::new(phrases, settings.typewriter.clone()));
    let timer = Rc::new(TimerLoop {
        pending: Cell::new(None),
        callback: RefCell::new(None),
    });

    let weak: Weak<TimerLoop> = Rc::downgrade(&timer);
    let callback = Closure::<dyn FnMut()>::new(move || {
        let Some(timer) = weak.upgrade() else {
            return;
        };
        timer.pending.set(None);
        let delay = {
            let mut writer = writer.borrow_mut();
            let delay = writer.tick();
            element.set_text_content(Some(writer.text()));
            delay
        };
        timer.schedule(delay);
    });
    *timer.callback.borrow_mut() = Some(callback);
    timer.schedule(settings.typewriter.type_ms);
    log::info!("Starting typewriter");

    FxHandle {
        token: CancelToken::new(),
        click: None,
        timer: Some(timer),
    }
}
