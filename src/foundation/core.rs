use crate::foundation::error::{CaptionError, CaptionResult};

pub use kurbo::{Affine, BezPath};

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Create a validated canvas size with both dimensions non-zero.
    pub fn new(width: u32, height: u32) -> CaptionResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaptionError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Multiply both dimensions by an integer supersampling factor.
    pub fn scaled(self, factor: u32) -> CaptionResult<Self> {
        let width = self.width.checked_mul(factor);
        let height = self.height.checked_mul(factor);
        match (width, height) {
            (Some(width), Some(height)) => Self::new(width, height),
            _ => Err(CaptionError::validation(format!(
                "canvas {}x{} overflows at supersample factor {factor}",
                self.width, self.height
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
