//! captionburn overlays short captions onto still images in the style of short-form video
//! slideshows: a heavy sans-serif sized relative to the image width, tight line spacing, white
//! fill over a black outline, placed in a fixed vertical band.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`FontResolver`] loads the first usable font candidate at the exact
//!    (supersampled) pixel size, caching it in a [`FontCache`]; the built-in bitmap font is the
//!    last resort.
//! 2. **Wrap**: [`wrap_text`] greedily breaks the caption into lines no wider than the
//!    style's maximum.
//! 3. **Plan**: [`plan_lines`] turns lines into a [`RenderPlan`] of centered positions under a
//!    [`PositionMode`].
//! 4. **Rasterize**: [`Rasterizer`] strokes then fills each line on an N× supersampled
//!    premultiplied canvas.
//! 5. **Composite**: the canvas is Lanczos-downsampled to the input size and flattened onto an
//!    opaque background.
//!
//! [`CaptionRenderer::render`] runs the pipeline in memory; [`burn_caption`] and
//! [`create_preview`] are the file and preview conveniences.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod fonts;
mod foundation;
mod layout;
mod pipeline;
mod render;
mod style;

pub use fonts::bitmap::BitmapFont;
pub use fonts::cache::{FontCache, FontKey};
pub use fonts::handle::{FontHandle, ScalableFont};
pub use fonts::resolver::{DEFAULT_FAMILY, DEFAULT_FONT_DIR, DEFAULT_FONT_FILES, FontResolver};
pub use fonts::shaper::{ShapedGlyph, ShapedLine, TextMeasure, TextShaper};
pub use foundation::core::CanvasSize;
pub use foundation::error::{CaptionError, CaptionResult};
pub use layout::plan::{LayoutParams, PlacedLine, RenderPlan, plan_lines};
pub use layout::wrap::wrap_text;
pub use pipeline::{
    BurnOptions, CaptionLayout, CaptionRenderer, PREVIEW_BACKGROUND, PREVIEW_HEIGHT,
    PREVIEW_WIDTH, burn_caption, create_preview, save_png,
};
pub use render::composite::{flatten_premul, over_in_place, resample_premul, to_premul_rgba8};
pub use render::raster::{MAX_SURFACE_SIDE, Rasterizer};
pub use style::color::Color;
pub use style::{PositionMode, StyleConfig};
