use image::RgbaImage;

use crate::{
    fonts::{handle::FontHandle, shaper::TextShaper},
    foundation::{
        core::{Affine, BezPath, CanvasSize},
        error::{CaptionError, CaptionResult},
    },
    layout::plan::RenderPlan,
    render::composite::over_in_place,
    style::color::Color,
};

/// Draws a [`RenderPlan`] with an outline stroke under a solid fill.
///
/// The rasterizer knows nothing about supersampling: callers pass a canvas, plan, font and
/// stroke width that are already scaled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rasterizer {
    fill: Color,
    stroke: Color,
    stroke_width: f64,
}

impl Rasterizer {
    /// `stroke_width` is how far the outline extends beyond the glyph edge, in pixels.
    pub fn new(fill: Color, stroke: Color, stroke_width: u32) -> Self {
        Self {
            fill,
            stroke,
            stroke_width: f64::from(stroke_width),
        }
    }

    /// Draw `plan` onto a premultiplied RGBA8 canvas.
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        shaper: &mut TextShaper,
        plan: &RenderPlan,
    ) -> CaptionResult<()> {
        if plan.is_empty() {
            return Ok(());
        }
        let (width, height) = canvas.dimensions();
        let layer = self.draw_layer(CanvasSize::new(width, height)?, shaper, plan)?;
        over_in_place(canvas, layer.data_as_u8_slice())
    }

    /// Draw `plan` into a fresh transparent layer of `size`.
    pub fn draw_layer(
        &self,
        size: CanvasSize,
        shaper: &mut TextShaper,
        plan: &RenderPlan,
    ) -> CaptionResult<vello_cpu::Pixmap> {
        let (w, h) = surface_dims(size)?;
        let font = shaper.font().clone();
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        for line in &plan.lines {
            ctx.set_transform(affine_to_cpu(Affine::translate((
                line.x as f64,
                line.y as f64,
            ))));

            // Each line is stroked and then filled before the next one starts, so a line's
            // outline never covers its own fill but may cover the line above.
            match font.as_ref() {
                FontHandle::Scalable(f) => {
                    let shaped = shaper.shape(&line.text);
                    let font_data = shaper.font_data().ok_or_else(|| {
                        CaptionError::render("scalable font has no glyph data")
                    })?;
                    let font_size = f.size_px as f32;
                    let glyphs = || {
                        shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        })
                    };

                    if self.stroke_width > 0.0 {
                        ctx.set_stroke(self.outline_stroke(vello_cpu::kurbo::Join::Round));
                        ctx.set_paint(color_to_cpu(self.stroke));
                        ctx.glyph_run(font_data)
                            .font_size(font_size)
                            .stroke_glyphs(glyphs());
                    }
                    ctx.set_paint(color_to_cpu(self.fill));
                    ctx.glyph_run(font_data)
                        .font_size(font_size)
                        .fill_glyphs(glyphs());
                }
                FontHandle::Bitmap(b) => {
                    let path = bezpath_to_cpu(&b.outline(&line.text));
                    if self.stroke_width > 0.0 {
                        ctx.set_stroke(self.outline_stroke(vello_cpu::kurbo::Join::Miter));
                        ctx.set_paint(color_to_cpu(self.stroke));
                        ctx.stroke_path(&path);
                    }
                    ctx.set_paint(color_to_cpu(self.fill));
                    ctx.fill_path(&path);
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap)
    }

    /// Strokes are centered on the outline, so the pen is twice the outward width.
    fn outline_stroke(&self, join: vello_cpu::kurbo::Join) -> vello_cpu::kurbo::Stroke {
        vello_cpu::kurbo::Stroke::new(self.stroke_width * 2.0).with_join(join)
    }
}

/// Largest canvas side the rasterizer accepts, in pixels.
pub const MAX_SURFACE_SIDE: u32 = u16::MAX as u32;

fn surface_dims(size: CanvasSize) -> CaptionResult<(u16, u16)> {
    check_surface(size)?;
    Ok((size.width as u16, size.height as u16))
}

/// Reject canvases wider or taller than [`MAX_SURFACE_SIDE`].
pub(crate) fn check_surface(size: CanvasSize) -> CaptionResult<()> {
    if size.width > MAX_SURFACE_SIDE || size.height > MAX_SURFACE_SIDE {
        return Err(CaptionError::render(format!(
            "canvas {}x{} exceeds the {MAX_SURFACE_SIDE} px rasterizer limit",
            size.width, size.height
        )));
    }
    Ok(())
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
