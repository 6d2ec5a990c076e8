//! Caption style constants and placement policy.

pub(crate) mod color;

use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{CaptionError, CaptionResult};
use color::Color;

/// Visual style of a burned caption.
///
/// All pixel quantities are expressed at the original image resolution; the pipeline multiplies
/// them by the supersample factor before rasterizing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Font size as a fraction of the image width.
    pub font_size_ratio: f64,
    /// Lower bound for the computed font size, in pixels.
    pub font_size_min: u32,
    /// Upper bound for the computed font size, in pixels.
    pub font_size_max: u32,
    /// Line advance as a multiple of the font size.
    pub line_height_ratio: f64,
    /// Glyph fill color.
    pub fill_color: Color,
    /// Outline color.
    pub stroke_color: Color,
    /// Outline width in pixels, drawn outward from the glyph edge.
    pub stroke_width: u32,
    /// Maximum line width as a fraction of the image width.
    pub max_width_ratio: f64,
    /// Block origin for [`PositionMode::Upper`] as a fraction of the image height.
    pub margin_top_ratio: f64,
    /// Gap below the block for [`PositionMode::Bottom`] as a fraction of the image height.
    pub margin_bottom_ratio: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size_ratio: 0.051,
            font_size_min: 38,
            font_size_max: 60,
            line_height_ratio: 1.06,
            fill_color: Color::WHITE,
            stroke_color: Color::BLACK,
            stroke_width: 4,
            max_width_ratio: 0.88,
            margin_top_ratio: 0.18,
            margin_bottom_ratio: 0.12,
        }
    }
}

impl StyleConfig {
    /// Font size for an image of the given width: `clamp(round(width * ratio), min, max)`.
    pub fn font_size_for_width(&self, width: u32) -> u32 {
        let raw = (f64::from(width) * self.font_size_ratio).round();
        let raw = if raw.is_finite() && raw > 0.0 {
            raw.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        raw.clamp(self.font_size_min, self.font_size_max)
    }

    /// Check ratios and bounds.
    pub fn validate(&self) -> CaptionResult<()> {
        fn positive(name: &str, v: f64) -> CaptionResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(CaptionError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
            Ok(())
        }

        positive("font_size_ratio", self.font_size_ratio)?;
        positive("line_height_ratio", self.line_height_ratio)?;
        positive("max_width_ratio", self.max_width_ratio)?;

        for (name, v) in [
            ("margin_top_ratio", self.margin_top_ratio),
            ("margin_bottom_ratio", self.margin_bottom_ratio),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(CaptionError::validation(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }

        if self.font_size_min == 0 {
            return Err(CaptionError::validation("font_size_min must be > 0"));
        }
        if self.font_size_min > self.font_size_max {
            return Err(CaptionError::validation(format!(
                "font_size_min ({}) must be <= font_size_max ({})",
                self.font_size_min, self.font_size_max
            )));
        }
        Ok(())
    }

    /// Parse a (possibly partial) style document; missing keys keep their defaults.
    pub fn from_json_reader(r: impl std::io::Read) -> CaptionResult<Self> {
        let style: Self = serde_json::from_reader(r).context("parse style JSON")?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style document from disk.
    pub fn from_json_path(path: &Path) -> CaptionResult<Self> {
        let f = File::open(path).with_context(|| format!("open style '{}'", path.display()))?;
        Self::from_json_reader(BufReader::new(f))
    }
}

/// Where the caption block is anchored vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Fixed band starting at `margin_top_ratio` of the height.
    #[default]
    Upper,
    /// Block centered vertically.
    Center,
    /// Block ending `margin_bottom_ratio` of the height above the bottom edge.
    Bottom,
}

impl PositionMode {
    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for PositionMode {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => Err(CaptionError::validation(format!(
                "unknown position \"{other}\" (expected upper, center or bottom)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/style/style.rs"]
mod tests;
