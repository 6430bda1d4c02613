//! Pixelated fireworks backdrop for the celebration view.
//! The video is drawn down onto a small offscreen canvas and blown back up with
//! smoothing off, once per animation frame, for as long as the page lives.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, window};

/// `HAVE_CURRENT_DATA`: a frame is available to draw.
const HAVE_CURRENT_DATA: u16 = 2;

/// Size of the downsampled frame for a `w`×`h` canvas.
pub fn pixel_grid(w: u32, h: u32, pixel: u32) -> (u32, u32) {
    let pixel = pixel.max(1);
    (w.div_ceil(pixel), h.div_ceil(pixel))
}

pub fn resize_canvas(canvas: &HtmlCanvasElement) {
    let Some(win) = window() else { return };
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    canvas.set_width(w.max(0.0) as u32);
    canvas.set_height(h.max(0.0) as u32);
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok(ctx)
}

struct Pixelator {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    offscreen: HtmlCanvasElement,
    offscreen_ctx: CanvasRenderingContext2d,
    pixel: u32,
}

impl Pixelator {
    fn draw(&self) {
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return;
        }
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let (sw, sh) = pixel_grid(w, h, self.pixel);
        if self.offscreen.width() != sw || self.offscreen.height() != sh {
            self.offscreen.set_width(sw);
            self.offscreen.set_height(sh);
        }
        self.offscreen_ctx.set_image_smoothing_enabled(false);
        self.ctx.set_image_smoothing_enabled(false);
        let (sw, sh) = (sw as f64, sh as f64);
        self.offscreen_ctx
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, sw, sh)
            .ok();
        self.ctx
            .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &self.offscreen,
                0.0,
                0.0,
                sw,
                sh,
                0.0,
                0.0,
                w as f64,
                h as f64,
            )
            .ok();
    }
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Start the frame loop. Missing 2d contexts are reported; the loop itself
/// never stops.
pub fn start(
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    pixel: u32,
) -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    resize_canvas(&canvas);
    let ctx = context_2d(&canvas)?;
    let offscreen: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    let offscreen_ctx = context_2d(&offscreen)?;
    let pixelator = Pixelator {
        video,
        canvas,
        ctx,
        offscreen,
        offscreen_ctx,
        pixel,
    };

    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        pixelator.draw();
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        w.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_grid_rounds_up() {
        assert_eq!(pixel_grid(1280, 720, 10), (128, 72));
        assert_eq!(pixel_grid(1281, 721, 10), (129, 73));
        assert_eq!(pixel_grid(5, 5, 10), (1, 1));
    }

    #[test]
    fn test_pixel_grid_zero_pixel_is_identity() {
        assert_eq!(pixel_grid(300, 200, 0), (300, 200));
    }
}
