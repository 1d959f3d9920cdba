//! 2D canvas renderer

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::RenderSnapshot;

const BACKGROUND: &str = "#112240";
const CENTER_LINE: &str = "rgba(255, 255, 255, 0.3)";
const LEFT_COLOR: &str = "#4ecca3";
const RIGHT_COLOR: &str = "#e94560";
const BALL_COLOR: &str = "#ffffff";
const OVERLAY: &str = "rgba(0, 0, 0, 0.7)";
const FONT: &str = "\"Orbitron\", sans-serif";

/// Draws render snapshots onto a canvas element
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Acquire the canvas' 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame
    pub fn draw(&self, snap: &RenderSnapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let w = snap.canvas_width as f64;
        let h = snap.canvas_height as f64;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Dashed center line
        let dash = js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
        ctx.set_line_dash(&dash)?;
        ctx.begin_path();
        ctx.move_to(w / 2.0, 0.0);
        ctx.line_to(w / 2.0, h);
        ctx.set_stroke_style_str(CENTER_LINE);
        ctx.set_line_width(2.0);
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new())?;

        // Paddles
        let pw = snap.paddle_width as f64;
        let ph = snap.paddle_height as f64;
        ctx.set_fill_style_str(LEFT_COLOR);
        ctx.fill_rect(0.0, snap.paddle_left_y as f64, pw, ph);
        ctx.set_fill_style_str(RIGHT_COLOR);
        ctx.fill_rect(w - pw, snap.paddle_right_y as f64, pw, ph);

        // Ball, drawn as a circle inside its bounding square
        if snap.ball_visible() {
            let r = snap.ball_size as f64 / 2.0;
            ctx.set_fill_style_str(BALL_COLOR);
            ctx.begin_path();
            ctx.arc(
                snap.ball_x as f64 + r,
                snap.ball_y as f64 + r,
                r,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
        }

        // Scores
        ctx.set_text_align("center");
        ctx.set_font(&format!("bold 36px {}", FONT));
        ctx.set_fill_style_str(LEFT_COLOR);
        ctx.fill_text(&snap.score_left.to_string(), w / 4.0, 50.0)?;
        ctx.set_fill_style_str(RIGHT_COLOR);
        ctx.fill_text(&snap.score_right.to_string(), 3.0 * w / 4.0, 50.0)?;

        if let Some(headline) = snap.headline() {
            ctx.set_fill_style_str(OVERLAY);
            ctx.fill_rect(0.0, 0.0, w, h);

            ctx.set_fill_style_str(BALL_COLOR);
            ctx.set_font(&format!("bold 36px {}", FONT));
            ctx.fill_text(&headline, w / 2.0, h / 2.0 - 40.0)?;

            if let Some(subline) = snap.subline() {
                let size = if snap.countdown.is_some() { 72 } else { 24 };
                ctx.set_font(&format!("bold {}px {}", size, FONT));
                ctx.fill_text(&subline, w / 2.0, h / 2.0 + 40.0)?;
            }
        }

        ctx.set_text_align("left");
        Ok(())
    }
}
