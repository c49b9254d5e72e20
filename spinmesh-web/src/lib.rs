/// spinmesh web - the viewport in a browser canvas
///
/// Binds a `Viewport` to a `<canvas>` through its 2D context, wires the DOM
/// mouse, wheel and resize listeners to the viewport's input handlers, and
/// drives `tick` from `requestAnimationFrame`.

pub mod surface;

use rand::rngs::StdRng;
use rand::SeedableRng;
use spinmesh_core::{InputEvent, InputHandler, Viewport, ViewportConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent, Window};

pub use surface::CanvasSurface;

/// Selector of the canvas the page provides
pub const DEFAULT_CANVAS_SELECTOR: &str = "canvas.webgl";

type SharedViewport = Rc<RefCell<Viewport<CanvasSurface>>>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// Start the viewport on `canvas.webgl` with the default config.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    start_viewport(DEFAULT_CANVAS_SELECTOR, ViewportConfig::default())
}

/// Start the viewport on the canvas matching `selector`, configured from a
/// TOML document (an empty string keeps every default).
#[wasm_bindgen(js_name = "startWithConfig")]
pub fn start_with_config(selector: &str, config_toml: &str) -> Result<(), JsValue> {
    let config = ViewportConfig::from_toml_str(config_toml)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    start_viewport(selector, config)
}

fn start_viewport(selector: &str, config: ViewportConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("no canvas matches {selector:?}")))?
        .dyn_into::<HtmlCanvasElement>()?;

    let (width, height) = window_size(&window)?;
    let surface = CanvasSurface::new(canvas.clone(), document)?;

    // Seeded from Math.random so the core needs no OS entropy source
    let mut rng = StdRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64);
    let viewport = Viewport::generate(config, &mut rng, surface, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    web_sys::console::log_1(
        &format!(
            "spinmesh: {} triangles on {}x{}",
            viewport.mesh().triangle_count(),
            width,
            height
        )
        .into(),
    );

    let viewport: SharedViewport = Rc::new(RefCell::new(viewport));
    attach_listeners(&window, &canvas, &viewport)?;
    start_animation_loop(window, viewport)
}

fn window_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

/// Register a listener that lives as long as the page
fn listen<E, F>(target: &web_sys::EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn attach_listeners(
    window: &Window,
    canvas: &HtmlCanvasElement,
    viewport: &SharedViewport,
) -> Result<(), JsValue> {
    let dispatch = |viewport: &SharedViewport| {
        let viewport = viewport.clone();
        move |event: InputEvent| viewport.borrow_mut().dispatch(event)
    };

    let send = dispatch(viewport);
    listen(canvas, "mousedown", move |e: MouseEvent| {
        send(InputEvent::PointerDown {
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        })
    })?;

    let send = dispatch(viewport);
    listen(canvas, "mousemove", move |e: MouseEvent| {
        send(InputEvent::PointerMove {
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        })
    })?;

    let send = dispatch(viewport);
    listen(canvas, "mouseup", move |_: MouseEvent| send(InputEvent::PointerUp))?;

    let send = dispatch(viewport);
    listen(canvas, "mouseleave", move |_: MouseEvent| {
        send(InputEvent::PointerLeave)
    })?;

    let send = dispatch(viewport);
    listen(canvas, "wheel", move |e: WheelEvent| {
        send(InputEvent::Wheel {
            delta_y: e.delta_y() as f32,
        })
    })?;

    let send = dispatch(viewport);
    listen(canvas, "dblclick", move |_: MouseEvent| {
        send(InputEvent::DoubleClick)
    })?;

    let send = dispatch(viewport);
    let resize_window = window.clone();
    listen(window, "resize", move |_: web_sys::Event| {
        if let Ok((width, height)) = window_size(&resize_window) {
            send(InputEvent::Resize { width, height });
        }
    })?;

    Ok(())
}

/// Run `tick` once per display refresh, forever. Each callback schedules
/// its successor.
fn start_animation_loop(window: Window, viewport: SharedViewport) -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let loop_window = window.clone();
    let mut last_timestamp: Option<f64> = None;

    *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let elapsed_ms = last_timestamp.map_or(0.0, |last| (timestamp - last).max(0.0));
        last_timestamp = Some(timestamp);

        if let Err(e) = viewport
            .borrow_mut()
            .tick(Duration::from_secs_f64(elapsed_ms / 1000.0))
        {
            web_sys::console::error_1(&format!("spinmesh: draw failed: {e}").into());
        }

        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = loop_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                web_sys::console::error_1(
                    &format!("spinmesh: could not schedule next frame: {e:?}").into(),
                );
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    Ok(())
}
