use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    fonts::bitmap::BitmapFont,
    foundation::error::{CaptionError, CaptionResult},
};

/// A font resolved at one exact pixel size.
///
/// Handles are immutable once created and shared through [`crate::FontCache`].
#[derive(Debug)]
pub enum FontHandle {
    /// A TrueType/OpenType font loaded from disk.
    Scalable(ScalableFont),
    /// The built-in fixed-size bitmap font.
    Bitmap(&'static BitmapFont),
}

impl FontHandle {
    /// Pixel size the handle measures and renders at.
    ///
    /// For the bitmap fallback this is its fixed size, not the requested one.
    pub fn size_px(&self) -> u32 {
        match self {
            Self::Scalable(f) => f.size_px,
            Self::Bitmap(b) => b.size_px(),
        }
    }

    /// Family name reported by the font file, or `"builtin"` for the bitmap fallback.
    pub fn family(&self) -> &str {
        match self {
            Self::Scalable(f) => &f.family,
            Self::Bitmap(_) => "builtin",
        }
    }

    /// Whether this is the built-in bitmap fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Bitmap(_))
    }

    /// File the font was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        match self {
            Self::Scalable(f) => Some(&f.path),
            Self::Bitmap(_) => None,
        }
    }
}

/// Validated font file contents plus the size they are used at.
#[derive(Clone, Debug)]
pub struct ScalableFont {
    pub(crate) path: PathBuf,
    pub(crate) family: String,
    pub(crate) size_px: u32,
    pub(crate) bytes: Arc<Vec<u8>>,
}

impl ScalableFont {
    /// Read and validate a font file for use at `size_px`.
    ///
    /// Fails with [`CaptionError::FontLoad`] when the file is missing, unreadable or does not
    /// contain a usable face.
    pub fn load(path: &Path, size_px: u32) -> CaptionResult<Self> {
        if size_px == 0 {
            return Err(CaptionError::font_load(path, "font size must be > 0"));
        }
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CaptionError::font_load(path, "file not found"),
            _ => CaptionError::font_load(path, e.to_string()),
        })?;
        Self::from_bytes(path, bytes, size_px)
    }

    /// Validate in-memory font bytes; `path` is only used for diagnostics.
    pub fn from_bytes(path: &Path, bytes: Vec<u8>, size_px: u32) -> CaptionResult<Self> {
        let family = family_name_of(&bytes).ok_or_else(|| {
            CaptionError::font_load(path, "no font families registered from font bytes")
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            family,
            size_px,
            bytes: Arc::new(bytes),
        })
    }

    /// Family name reported by the font file.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

fn family_name_of(bytes: &[u8]) -> Option<String> {
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let (family_id, _) = families.first()?;
    font_ctx
        .collection
        .family_name(*family_id)
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/handle.rs"]
mod tests;
