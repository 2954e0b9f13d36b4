//! Canvas 2D painter (WASM only)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{Scene, Shape};

/// Paints scenes onto a canvas sized for the device pixel ratio
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas backing store for `dpr` and grab its 2D context
    pub fn new(
        canvas: &HtmlCanvasElement,
        width: f32,
        height: f32,
        dpr: f64,
    ) -> Result<Self, JsValue> {
        canvas.set_width((width as f64 * dpr) as u32);
        canvas.set_height((height as f64 * dpr) as u32);
        canvas.set_attribute("style", &format!("width:{}px;height:{}px", width, height))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        ctx.scale(dpr, dpr)?;

        log::info!("Canvas {}x{} @ {}x", width, height, dpr);
        Ok(Self { ctx })
    }

    /// Paint a full frame
    pub fn draw(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(scene.background);
        ctx.fill_rect(0.0, 0.0, scene.width as f64, scene.height as f64);

        ctx.save();
        ctx.translate(-scene.camera_x as f64, 0.0)?;
        for shape in &scene.shapes {
            self.fill(shape)?;
        }
        ctx.restore();
        Ok(())
    }

    fn fill(&self, shape: &Shape) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match *shape {
            Shape::Rect { x, y, w, h, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            Shape::Triangle { points, color } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.move_to(points[0].x as f64, points[0].y as f64);
                ctx.line_to(points[1].x as f64, points[1].y as f64);
                ctx.line_to(points[2].x as f64, points[2].y as f64);
                ctx.close_path();
                ctx.fill();
            }
        }
        Ok(())
    }
}
