//! Browser bindings
//!
//! `mount(canvas)` starts a dot field sized to the canvas's parent element.
//! Pages that switch themes should fire a `themechange` event on `window` (or
//! call `notifyThemeChanged()`) so the dot color is re-read.

mod canvas;
mod host;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::core::{Controller, FieldParams};

pub use canvas::CanvasSurface;
pub use host::WebHost;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

/// Handle to a mounted field. Dropping it (or calling `free()` from JS)
/// unmounts the field.
#[wasm_bindgen]
pub struct DotFieldHandle {
    controller: Rc<RefCell<Controller<WebHost>>>,
}

#[wasm_bindgen]
impl DotFieldHandle {
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.controller.borrow().state().is_running()
    }

    pub fn state(&self) -> String {
        self.controller.borrow().state().to_string()
    }

    #[wasm_bindgen(js_name = notifyThemeChanged)]
    pub fn notify_theme_changed(&self) {
        self.controller.borrow_mut().on_theme_changed();
    }

    /// Cancel the frame loop and detach all listeners. Safe to call twice.
    pub fn unmount(&self) {
        self.controller.borrow_mut().unmount();
    }
}

impl Drop for DotFieldHandle {
    fn drop(&mut self) {
        if let Ok(mut ctrl) = self.controller.try_borrow_mut() {
            ctrl.unmount();
        }
    }
}

/// Mount with the default tuning.
#[wasm_bindgen]
pub fn mount(canvas: HtmlCanvasElement) -> Result<DotFieldHandle, JsValue> {
    mount_field(canvas, FieldParams::default())
}

/// Mount with tuning overrides given as a JSON object.
#[wasm_bindgen(js_name = mountWithParams)]
pub fn mount_with_params(canvas: HtmlCanvasElement, params: &str) -> Result<DotFieldHandle, JsValue> {
    let params = FieldParams::from_json(params).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount_field(canvas, params)
}

fn mount_field(canvas: HtmlCanvasElement, params: FieldParams) -> Result<DotFieldHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let controller = Rc::new_cyclic(|weak| {
        let host = WebHost::new(window, canvas, weak.clone());
        RefCell::new(Controller::mount(host, params))
    });
    Ok(DotFieldHandle { controller })
}
