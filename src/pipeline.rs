//! End-to-end caption burning: resolve font, wrap, plan, rasterize at N×, downsample, flatten.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use image::{DynamicImage, RgbImage};

use crate::{
    fonts::{handle::FontHandle, resolver::FontResolver, shaper::TextShaper},
    foundation::{
        core::CanvasSize,
        error::{CaptionError, CaptionResult},
    },
    layout::{
        plan::{LayoutParams, RenderPlan, plan_lines},
        wrap::wrap_text,
    },
    render::{
        composite::{flatten_premul, resample_premul, to_premul_rgba8},
        raster::{Rasterizer, check_surface},
    },
    style::{PositionMode, StyleConfig, color::Color},
};

/// Default preview canvas width.
pub const PREVIEW_WIDTH: u32 = 1080;
/// Default preview canvas height.
pub const PREVIEW_HEIGHT: u32 = 1920;
/// Default preview background.
pub const PREVIEW_BACKGROUND: Color = Color::rgb(80, 80, 80);

/// Per-call rendering options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurnOptions {
    /// Vertical anchoring of the caption block.
    pub position: PositionMode,
    /// Integer supersampling factor; `1` renders directly at the target size.
    ///
    /// The supersampled canvas may not exceed [`crate::MAX_SURFACE_SIDE`] pixels per side,
    /// so a 4000 px wide image allows at most a factor of 16.
    pub supersample: u32,
    /// Opaque color transparency is flattened onto.
    pub background: Color,
}

impl Default for BurnOptions {
    fn default() -> Self {
        Self {
            position: PositionMode::Upper,
            supersample: 2,
            background: Color::BLACK,
        }
    }
}

impl BurnOptions {
    fn validate(&self) -> CaptionResult<()> {
        if self.supersample == 0 {
            return Err(CaptionError::validation("supersample factor must be >= 1"));
        }
        Ok(())
    }
}

/// Caption layout for one image, at supersampled resolution.
#[derive(Clone, Debug)]
pub struct CaptionLayout {
    /// Font the plan was measured with.
    pub font: Arc<FontHandle>,
    /// Requested font size in supersampled pixels (the bitmap fallback ignores it).
    pub font_size: u32,
    /// Supersampled canvas the plan is placed on.
    pub canvas: CanvasSize,
    /// Line positions.
    pub plan: RenderPlan,
}

/// Burns captions with a fixed style and font resolver.
#[derive(Clone, Debug, Default)]
pub struct CaptionRenderer {
    style: StyleConfig,
    fonts: FontResolver,
}

impl CaptionRenderer {
    /// Renderer with a validated style.
    pub fn new(style: StyleConfig, fonts: FontResolver) -> CaptionResult<Self> {
        style.validate()?;
        Ok(Self { style, fonts })
    }

    /// Style in use.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Font resolver in use.
    pub fn fonts(&self) -> &FontResolver {
        &self.fonts
    }

    /// Compute the caption layout for an image of `width` x `height` without drawing.
    ///
    /// Returns `None` when the caption has no words.
    pub fn layout(
        &self,
        width: u32,
        height: u32,
        caption: &str,
        opts: &BurnOptions,
    ) -> CaptionResult<Option<CaptionLayout>> {
        Ok(self
            .prepare(width, height, caption, opts)?
            .map(|(_, layout)| layout))
    }

    fn prepare(
        &self,
        width: u32,
        height: u32,
        caption: &str,
        opts: &BurnOptions,
    ) -> CaptionResult<Option<(TextShaper, CaptionLayout)>> {
        opts.validate()?;
        if caption.trim().is_empty() {
            return Ok(None);
        }

        let scale = opts.supersample;
        let canvas = CanvasSize::new(width, height)?.scaled(scale)?;
        check_surface(canvas)?;
        let font_size = self
            .style
            .font_size_for_width(width)
            .checked_mul(scale)
            .ok_or_else(|| CaptionError::validation("font size overflows at supersample"))?;

        let font = self.fonts.resolve(font_size);
        let mut shaper = TextShaper::new(font.clone())?;

        let max_width = (f64::from(canvas.width) * self.style.max_width_ratio).floor() as u32;
        let lines = wrap_text(caption, &mut shaper, max_width);

        let params = LayoutParams {
            font_size,
            line_height_ratio: self.style.line_height_ratio,
            canvas,
            mode: opts.position,
            margin_top_ratio: self.style.margin_top_ratio,
            margin_bottom_ratio: self.style.margin_bottom_ratio,
        };
        let plan = plan_lines(&lines, &mut shaper, &params)?;

        Ok(Some((
            shaper,
            CaptionLayout {
                font,
                font_size,
                canvas,
                plan,
            },
        )))
    }

    /// Burn `caption` onto `image` in memory.
    ///
    /// An empty or all-whitespace caption returns the input unchanged. Otherwise the result is
    /// an opaque RGB8 image with the input's dimensions.
    #[tracing::instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn render(
        &self,
        image: &DynamicImage,
        caption: &str,
        opts: &BurnOptions,
    ) -> CaptionResult<DynamicImage> {
        let Some((mut shaper, layout)) =
            self.prepare(image.width(), image.height(), caption, opts)?
        else {
            return Ok(image.clone());
        };
        tracing::debug!(
            family = layout.font.family(),
            font_size = layout.font_size,
            lines = layout.plan.lines.len(),
            "rendering caption"
        );

        let target = CanvasSize::new(image.width(), image.height())?;
        let mut canvas = resample_premul(&to_premul_rgba8(image), layout.canvas);

        let raster = Rasterizer::new(
            self.style.fill_color,
            self.style.stroke_color,
            self.style
                .stroke_width
                .checked_mul(opts.supersample)
                .ok_or_else(|| CaptionError::validation("stroke width overflows at supersample"))?,
        );
        raster.draw(&mut canvas, &mut shaper, &layout.plan)?;

        let downsampled = resample_premul(&canvas, target);
        Ok(DynamicImage::ImageRgb8(flatten_premul(
            &downsampled,
            opts.background,
        )))
    }

    /// Burn `caption` onto the image at `image_path` and save it as PNG.
    ///
    /// Writes to `output_path`, or over the input when `None`. An empty or all-whitespace
    /// caption touches nothing and returns `image_path`.
    ///
    /// The rendered image is dropped when saving fails. Callers that need it after a
    /// [`CaptionError::Write`] should call [`CaptionRenderer::render`] and [`save_png`]
    /// themselves.
    #[tracing::instrument(skip(self))]
    pub fn burn_file(
        &self,
        image_path: &Path,
        caption: &str,
        output_path: Option<&Path>,
        opts: &BurnOptions,
    ) -> CaptionResult<PathBuf> {
        opts.validate()?;
        if caption.trim().is_empty() {
            return Ok(image_path.to_path_buf());
        }
        let output_path = output_path.unwrap_or(image_path);

        let image = image::open(image_path).map_err(|source| CaptionError::Decode {
            path: image_path.to_path_buf(),
            source,
        })?;
        let rendered = self.render(&image, caption, opts)?;
        save_png(&rendered, output_path)?;
        Ok(output_path.to_path_buf())
    }

    /// Solid `background` canvas of `width` x `height` with `caption` burned in.
    pub fn preview(
        &self,
        caption: &str,
        width: u32,
        height: u32,
        background: Color,
    ) -> CaptionResult<DynamicImage> {
        CanvasSize::new(width, height)?;
        let canvas = RgbImage::from_pixel(
            width,
            height,
            image::Rgb([background.r, background.g, background.b]),
        );
        self.render(
            &DynamicImage::ImageRgb8(canvas),
            caption,
            &BurnOptions::default(),
        )
    }
}

/// Save `image` as PNG, creating parent directories as needed.
pub fn save_png(image: &DynamicImage, path: &Path) -> CaptionResult<()> {
    let write_err = |source| CaptionError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| write_err(image::ImageError::IoError(e)))?;
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(write_err)
}

/// [`CaptionRenderer::burn_file`] with the default style and fonts.
pub fn burn_caption(
    image_path: &Path,
    caption: &str,
    output_path: Option<&Path>,
    opts: &BurnOptions,
) -> CaptionResult<PathBuf> {
    CaptionRenderer::default().burn_file(image_path, caption, output_path, opts)
}

/// [`CaptionRenderer::preview`] with the default style and fonts.
pub fn create_preview(
    caption: &str,
    width: u32,
    height: u32,
    background: Color,
) -> CaptionResult<DynamicImage> {
    CaptionRenderer::default().preview(caption, width, height, background)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
