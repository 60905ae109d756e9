use dots_core::{DotsEngine, Rect, Rgb, Surface};
use glam::Vec2;
use web_sys as web;

/// [`Surface`] over a canvas 2D context.
pub struct CanvasSurface<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn set_fill(&self, color: Rgb) {
        #[allow(deprecated)]
        self.ctx.set_fill_style(&color.to_css().into());
    }

    fn set_stroke(&self, color: Rgb) {
        #[allow(deprecated)]
        self.ctx.set_stroke_style(&color.to_css().into());
    }
}

impl Surface for CanvasSurface<'_> {
    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Rgb) {
        let Rect { x, y, w, h } = rect;
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0) as f64;
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        self.set_fill(color);
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        _ = ctx.arc_to(x + w, y, x + w, y + r, r);
        ctx.line_to(x + w, y + h - r);
        _ = ctx.arc_to(x + w, y + h, x + w - r, y + h, r);
        ctx.line_to(x + r, y + h);
        _ = ctx.arc_to(x, y + h, x, y + h - r, r);
        ctx.line_to(x, y + r);
        _ = ctx.arc_to(x, y, x + r, y, r);
        ctx.close_path();
        ctx.fill();
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.set_stroke(color);
        let ctx = self.ctx;
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
    }
}

/// Clear the canvas and paint the engine's current frame.
pub fn draw_frame(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    engine: &DotsEngine,
) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    let mut surface = CanvasSurface::new(ctx);
    engine.render(&mut surface);
}
