use crate::{
    fonts::shaper::TextMeasure,
    foundation::{
        core::CanvasSize,
        error::{CaptionError, CaptionResult},
    },
    style::PositionMode,
};

/// Inputs for placing a block of wrapped lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Font size in pixels (already supersampled).
    pub font_size: u32,
    /// Line advance as a multiple of `font_size`.
    pub line_height_ratio: f64,
    /// Canvas the block is placed on (already supersampled).
    pub canvas: CanvasSize,
    /// Vertical anchoring policy.
    pub mode: PositionMode,
    /// Block origin for [`PositionMode::Upper`] as a fraction of the canvas height.
    pub margin_top_ratio: f64,
    /// Gap below the block for [`PositionMode::Bottom`] as a fraction of the canvas height.
    pub margin_bottom_ratio: f64,
}

impl LayoutParams {
    /// `round(font_size * line_height_ratio)`.
    pub fn line_height(&self) -> u32 {
        round_px(f64::from(self.font_size) * self.line_height_ratio)
    }

    fn validate(&self) -> CaptionResult<()> {
        if self.font_size == 0 {
            return Err(CaptionError::validation("layout font_size must be > 0"));
        }
        if !self.line_height_ratio.is_finite() || self.line_height_ratio <= 0.0 {
            return Err(CaptionError::validation(
                "layout line_height_ratio must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// One line of the block with its top-left position on the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    /// Line text.
    pub text: String,
    /// Left edge; centers the line horizontally.
    pub x: i64,
    /// Top of the line box.
    pub y: i64,
    /// Measured advance width.
    pub width: u32,
}

/// Positions of every line of one caption block. Computed per call, never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPlan {
    /// Lines in reading order.
    pub lines: Vec<PlacedLine>,
    /// Vertical advance between consecutive lines.
    pub line_height: u32,
    /// `lines.len() * line_height`.
    pub total_height: u64,
    /// Top of the first line.
    pub start_y: i64,
}

impl RenderPlan {
    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Place already-wrapped `lines` on the canvas.
///
/// The block may extend past the canvas edges for very long captions; nothing is clipped or
/// re-wrapped here.
pub fn plan_lines<M: TextMeasure + ?Sized>(
    lines: &[String],
    measure: &mut M,
    params: &LayoutParams,
) -> CaptionResult<RenderPlan> {
    params.validate()?;

    let line_height = params.line_height();
    let total_height = lines.len() as u64 * u64::from(line_height);
    let start_y = block_start_y(params, total_height);
    let canvas_w = i64::from(params.canvas.width);

    let placed = lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measure.measure(text);
            PlacedLine {
                text: text.clone(),
                x: (canvas_w - i64::from(width)).div_euclid(2),
                y: start_y + i as i64 * i64::from(line_height),
                width,
            }
        })
        .collect();

    tracing::debug!(
        lines = lines.len(),
        line_height,
        total_height,
        start_y,
        mode = params.mode.as_str(),
        "planned caption block"
    );

    Ok(RenderPlan {
        lines: placed,
        line_height,
        total_height,
        start_y,
    })
}

fn block_start_y(params: &LayoutParams, total_height: u64) -> i64 {
    let canvas_h = i64::from(params.canvas.height);
    let total = i64::try_from(total_height).unwrap_or(i64::MAX);
    match params.mode {
        PositionMode::Upper => {
            i64::from(round_px(f64::from(params.canvas.height) * params.margin_top_ratio))
        }
        PositionMode::Center => (canvas_h - total).div_euclid(2),
        PositionMode::Bottom => {
            let margin =
                i64::from(round_px(f64::from(params.canvas.height) * params.margin_bottom_ratio));
            canvas_h - margin - total
        }
    }
}

fn round_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
