use std::{borrow::Cow, sync::Arc};

use crate::{
    fonts::handle::{FontHandle, ScalableFont},
    foundation::error::{CaptionError, CaptionResult},
};

/// Measures the advance width of a single line of text in whole pixels.
pub trait TextMeasure {
    /// Width of `text` laid out on one line, rounded up to whole pixels.
    fn measure(&mut self, text: &str) -> u32;
}

/// A glyph positioned relative to the top-left of its line box; `y` is the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph id in the font.
    pub id: u32,
    /// Horizontal pen position.
    pub x: f32,
    /// Baseline position.
    pub y: f32,
}

/// Result of shaping one line.
#[derive(Clone, Debug, Default)]
pub struct ShapedLine {
    /// Advance width in whole pixels.
    pub width: u32,
    /// Positioned glyphs; empty for the bitmap font.
    pub glyphs: Vec<ShapedGlyph>,
}

/// Shapes single lines with one resolved font.
///
/// A shaper is owned by one render call. It keeps the parley contexts that measuring and
/// shaping need, so the shared [`FontHandle`] itself stays immutable.
pub struct TextShaper {
    font: Arc<FontHandle>,
    engine: Option<ParleyEngine>,
}

struct ParleyEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    size_px: f32,
    font_data: vello_cpu::peniko::FontData,
}

impl TextShaper {
    /// Bind a shaper to `font`.
    pub fn new(font: Arc<FontHandle>) -> CaptionResult<Self> {
        let engine = match font.as_ref() {
            FontHandle::Scalable(f) => Some(ParleyEngine::new(f)?),
            FontHandle::Bitmap(_) => None,
        };
        Ok(Self { font, engine })
    }

    /// Font this shaper measures with.
    pub fn font(&self) -> &Arc<FontHandle> {
        &self.font
    }

    pub(crate) fn font_data(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.engine.as_ref().map(|e| &e.font_data)
    }

    /// Shape `text` as a single unbroken line.
    pub fn shape(&mut self, text: &str) -> ShapedLine {
        match (self.font.as_ref(), self.engine.as_mut()) {
            (FontHandle::Scalable(_), Some(engine)) => engine.shape(text),
            (FontHandle::Bitmap(b), _) => ShapedLine {
                width: b.measure(text),
                glyphs: Vec::new(),
            },
            (FontHandle::Scalable(_), None) => ShapedLine::default(),
        }
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str) -> u32 {
        match (self.font.as_ref(), self.engine.as_mut()) {
            (FontHandle::Bitmap(b), _) => b.measure(text),
            (FontHandle::Scalable(_), Some(engine)) => width_px(engine.layout(text).width()),
            (FontHandle::Scalable(_), None) => 0,
        }
    }
}

impl ParleyEngine {
    fn new(font: &ScalableFont) -> CaptionResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CaptionError::render("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CaptionError::render("registered font family has no name"))?
            .to_string();

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            size_px: font.size_px as f32,
            font_data,
        })
    }

    fn layout(&mut self, text: &str) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    fn shape(&mut self, text: &str) -> ShapedLine {
        let layout = self.layout(text);
        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }
        ShapedLine {
            width: width_px(layout.width()),
            glyphs,
        }
    }
}

fn width_px(w: f32) -> u32 {
    if w.is_finite() && w > 0.0 {
        w.ceil() as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/shaper.rs"]
mod tests;
