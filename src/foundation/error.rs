use std::path::PathBuf;

/// Convenience result type used across captionburn.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Error type for caption layout and rendering.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// Invalid style, options or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// A single font candidate could not be loaded.
    ///
    /// The resolver absorbs these and moves on to the next candidate.
    #[error("font load error: '{}': {reason}", .path.display())]
    FontLoad {
        /// Candidate that failed.
        path: PathBuf,
        /// Human-readable failure reason.
        reason: String,
    },

    /// The source image could not be read or decoded.
    #[error("image decode error: '{}': {source}", .path.display())]
    Decode {
        /// Source image path.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The rendered image could not be persisted.
    #[error("image write error: '{}': {source}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder or IO error.
        #[source]
        source: image::ImageError,
    },

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaptionError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CaptionError::FontLoad`].
    pub fn font_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FontLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
