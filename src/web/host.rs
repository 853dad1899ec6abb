//! Browser host: canvas sizing, DOM listeners and the animation-frame loop
//!
//! All closures hold a `Weak` reference to the controller, so dropping the
//! mount handle frees everything once the listeners are detached. The 2D
//! context and the frame closure are only created once the controller asks
//! for them, after the reduced-motion check.

use std::cell::RefCell;
use std::rc::Weak;

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::canvas::CanvasSurface;
use crate::core::{Controller, Host, Viewport};
use crate::stats::FrameRate;
use crate::theme::{colors, THEME_CHANGE_EVENT};
use crate::time::now_seconds;

pub type WeakController = Weak<RefCell<Controller<WebHost>>>;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Seconds between frame-rate log lines
const FPS_LOG_INTERVAL: f64 = 5.0;

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    parent: Option<Element>,
    surface: Option<CanvasSurface>,
    controller: WeakController,
    listeners: Vec<Listener>,
    frame_callback: Option<Closure<dyn FnMut()>>,
    frame_id: Option<i32>,
    frame_rate: FrameRate,
    last_fps_log: f64,
}

impl WebHost {
    pub fn new(window: Window, canvas: HtmlCanvasElement, controller: WeakController) -> Self {
        let parent = canvas.parent_element();
        Self {
            window,
            canvas,
            parent,
            surface: None,
            controller,
            listeners: Vec::new(),
            frame_callback: None,
            frame_id: None,
            frame_rate: FrameRate::new(),
            last_fps_log: now_seconds(),
        }
    }

    fn frame_closure(weak: WeakController) -> Closure<dyn FnMut()> {
        Closure::wrap(Box::new(move || {
            with_controller(&weak, |ctrl| {
                ctrl.on_frame();
                ctrl.host_mut().record_frame();
            });
        }) as Box<dyn FnMut()>)
    }

    /// Feed the frame-rate counter and log it every few seconds.
    fn record_frame(&mut self) {
        let now = now_seconds();
        self.frame_rate.tick_at(now);
        if now - self.last_fps_log >= FPS_LOG_INTERVAL {
            debug!(fps = format!("{:.1}", self.frame_rate.fps()), "Frame rate");
            self.last_fps_log = now;
        }
    }

    /// Listener translating client coordinates into container coordinates
    fn pointer_listener(
        &self,
        apply: fn(&mut Controller<WebHost>, f64, f64),
    ) -> Closure<dyn FnMut(Event)> {
        let weak = self.controller.clone();
        let parent = self.parent.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let (Some(parent), Some(mouse)) = (parent.as_ref(), event.dyn_ref::<MouseEvent>())
            else {
                return;
            };
            let rect = parent.get_bounding_client_rect();
            let x = f64::from(mouse.client_x()) - rect.left();
            let y = f64::from(mouse.client_y()) - rect.top();
            with_controller(&weak, |ctrl| apply(ctrl, x, y));
        }) as Box<dyn FnMut(Event)>)
    }

    fn plain_listener(&self, apply: fn(&mut Controller<WebHost>)) -> Closure<dyn FnMut(Event)> {
        let weak = self.controller.clone();
        Closure::wrap(Box::new(move |_: Event| {
            with_controller(&weak, apply);
        }) as Box<dyn FnMut(Event)>)
    }

    fn set_css_size(&self, viewport: &Viewport) {
        let style = self.canvas.style();
        for (name, value) in [("width", viewport.width), ("height", viewport.height)] {
            if let Err(e) = style.set_property(name, &format!("{value}px")) {
                warn!(?e, name, "Failed to set canvas style");
            }
        }
    }
}

/// Run `f` on the live controller. Skipped once unmounted, or if the
/// controller is already borrowed further up the stack.
fn with_controller(weak: &WeakController, f: impl FnOnce(&mut Controller<WebHost>)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut ctrl) = shared.try_borrow_mut() else {
        debug!("Controller busy, dropping event");
        return;
    };
    f(&mut ctrl);
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn surface(&mut self) -> Option<&mut CanvasSurface> {
        if self.surface.is_none() {
            self.surface = CanvasSurface::from_canvas(&self.canvas);
        }
        self.surface.as_mut()
    }

    fn fit_viewport(&mut self) -> Option<Viewport> {
        let rect = self.parent.as_ref()?.get_bounding_client_rect();
        let viewport = Viewport::new(rect.width(), rect.height(), self.window.device_pixel_ratio());
        let (width, height) = viewport.backing_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.set_css_size(&viewport);
        if let Some(surface) = self.surface.as_mut() {
            // Resizing the backing store resets the transform
            surface.set_pixel_ratio(viewport.pixel_ratio);
        }
        Some(viewport)
    }

    fn dot_color(&self) -> Option<String> {
        let root = self.window.document()?.document_element()?;
        let style = self.window.get_computed_style(&root).ok().flatten()?;
        style.get_property_value(colors::DOT_COLOR_VAR).ok()
    }

    fn attach_listeners(&mut self) {
        let window: EventTarget = self.window.clone().into();
        let mut wanted = vec![
            (window.clone(), "mousemove", self.pointer_listener(Controller::<WebHost>::on_pointer_move)),
            (window.clone(), "mousedown", self.pointer_listener(Controller::<WebHost>::on_pointer_down)),
            (window.clone(), "resize", self.plain_listener(Controller::<WebHost>::on_resize)),
            (window, THEME_CHANGE_EVENT, self.plain_listener(Controller::<WebHost>::on_theme_changed)),
        ];
        // `mouseleave` never fires on window; the root element sees the
        // cursor leave the page.
        match self.window.document().and_then(|d| d.document_element()) {
            Some(root) => wanted.push((
                root.into(),
                "mouseleave",
                self.plain_listener(Controller::<WebHost>::on_pointer_leave),
            )),
            None => warn!("No document element, cursor will not reset on leave"),
        }

        for (target, event, closure) in wanted {
            match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
                Ok(()) => self.listeners.push(Listener { target, event, closure }),
                Err(e) => warn!(?e, event, "Failed to attach listener"),
            }
        }
        debug!(count = self.listeners.len(), "Listeners attached");
    }

    fn detach_listeners(&mut self) {
        for Listener { target, event, closure } in self.listeners.drain(..) {
            if let Err(e) =
                target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                warn!(?e, event, "Failed to detach listener");
            }
        }
    }

    fn request_frame(&mut self) {
        let weak = self.controller.clone();
        let callback = self
            .frame_callback
            .get_or_insert_with(|| Self::frame_closure(weak));
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => self.frame_id = Some(id),
            Err(e) => warn!(?e, "requestAnimationFrame failed"),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                warn!(?e, "cancelAnimationFrame failed");
            }
        }
        self.frame_callback = None;
    }
}
