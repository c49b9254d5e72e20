/// Canvas 2D drawing target
use spinmesh_core::{Frame, Rgb, Surface, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Strokes the wireframe into a `<canvas>` and drives the Fullscreen API
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    document: Document,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, document: Document) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            context,
            document,
        })
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

fn set_style(ctx: &CanvasRenderingContext2d, property: &str, color: Rgb) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str(property),
        &JsValue::from_str(&color.to_string()),
    );
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Setting the size also resets the context state, so only do it on change
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        let ctx = &self.context;
        let (width, height) = (frame.width as f64, frame.height as f64);

        set_style(ctx, "fillStyle", frame.style.background);
        ctx.fill_rect(0.0, 0.0, width, height);

        set_style(ctx, "strokeStyle", frame.style.wire);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for segment in frame.segments() {
            ctx.move_to(segment.from.x as f64, segment.from.y as f64);
            ctx.line_to(segment.to.x as f64, segment.to.y as f64);
        }
        ctx.stroke();
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.canvas
            .request_fullscreen()
            .map_err(|e| SurfaceError::FullscreenDenied(js_error(e)))
    }

    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.document.exit_fullscreen();
        Ok(())
    }
}
