use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::fonts::{
    bitmap::BUILTIN,
    cache::{FontCache, FontKey},
    handle::{FontHandle, ScalableFont},
};

/// Logical family used for the default candidate list.
pub const DEFAULT_FAMILY: &str = "tiktok-sans";

/// Default font files, most preferred first.
pub const DEFAULT_FONT_FILES: [&str; 3] = [
    "TikTokSans36pt-SemiBold.ttf",
    "TikTokSans36pt-Bold.ttf",
    "TikTokSans16pt-SemiBold.ttf",
];

/// Directory searched for [`DEFAULT_FONT_FILES`] by [`FontResolver::default`].
pub const DEFAULT_FONT_DIR: &str = "fonts";

/// Resolves a font at an exact pixel size from an ordered list of candidate files.
///
/// The first candidate that exists and parses wins and is cached under `(family, size)`.
/// When every candidate fails the built-in bitmap font is returned; the fallback is not cached,
/// so fonts installed later are still picked up.
#[derive(Clone, Debug)]
pub struct FontResolver {
    family: String,
    candidates: Vec<PathBuf>,
    cache: Arc<FontCache>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::with_font_dir(Path::new(DEFAULT_FONT_DIR), FontCache::global())
    }
}

impl FontResolver {
    /// Resolver over an explicit candidate list.
    pub fn new(
        family: impl Into<String>,
        candidates: impl IntoIterator<Item = PathBuf>,
        cache: Arc<FontCache>,
    ) -> Self {
        Self {
            family: family.into(),
            candidates: candidates.into_iter().collect(),
            cache,
        }
    }

    /// Resolver over [`DEFAULT_FONT_FILES`] inside `dir`.
    pub fn with_font_dir(dir: &Path, cache: Arc<FontCache>) -> Self {
        Self::new(
            DEFAULT_FAMILY,
            DEFAULT_FONT_FILES.iter().map(|f| dir.join(f)),
            cache,
        )
    }

    /// Logical family name used in cache keys.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Candidate files in search order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Cache this resolver populates.
    pub fn cache(&self) -> &Arc<FontCache> {
        &self.cache
    }

    /// Font for `size_px`, never failing.
    pub fn resolve(&self, size_px: u32) -> Arc<FontHandle> {
        let key = FontKey::new(self.family.as_str(), size_px);
        self.cache
            .get_or_try_insert_with(&key, || self.load_first(size_px))
            .unwrap_or_else(|| {
                tracing::debug!(
                    family = %self.family,
                    size_px,
                    "no font candidate loaded, using builtin bitmap font"
                );
                Arc::new(FontHandle::Bitmap(&BUILTIN))
            })
    }

    fn load_first(&self, size_px: u32) -> Option<FontHandle> {
        self.candidates
            .iter()
            .map(|path| ScalableFont::load(path, size_px))
            .find_map(|attempt| match attempt {
                Ok(font) => {
                    tracing::debug!(
                        path = %font.path.display(),
                        family = %font.family,
                        size_px,
                        "loaded font"
                    );
                    Some(FontHandle::Scalable(font))
                }
                Err(err) => {
                    tracing::debug!(%err, "font candidate skipped");
                    None
                }
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/resolver.rs"]
mod tests;
