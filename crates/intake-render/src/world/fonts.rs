//! Font loading and caching
//!
//! Fonts embedded through `typst-assets` are always present. Those families
//! carry no CJK glyphs, so deployments point the cache at extra directories
//! holding a Traditional Chinese face (Noto Sans TC, Noto Serif TC, ...).

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;

static EMBEDDED: OnceLock<Arc<FontCache>> = OnceLock::new();

/// Shared cache holding only the embedded fonts
pub fn embedded_font_cache() -> Arc<FontCache> {
    EMBEDDED
        .get_or_init(|| Arc::new(FontCache::new()))
        .clone()
}

/// A cache of fonts available for compilation
#[derive(Debug)]
pub struct FontCache {
    /// Metadata about available fonts, pre-hashed for the compiler
    book: LazyHash<FontBook>,
    /// The actual font data, indexed like the book
    fonts: Vec<Font>,
}

impl FontCache {
    /// Create a new font cache with embedded fonts
    pub fn new() -> Self {
        Self::with_font_dirs(&[])
    }

    /// Embedded fonts plus every font file found under `dirs`.
    ///
    /// Missing or unreadable directories are skipped with a warning.
    pub fn with_font_dirs(dirs: &[PathBuf]) -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        Self::load_embedded_fonts(&mut book, &mut fonts);
        let embedded = fonts.len();

        for dir in dirs {
            if dir.is_dir() {
                Self::scan_font_dir(dir, &mut book, &mut fonts);
            } else {
                tracing::warn!(dir = %dir.display(), "font directory not found, skipping");
            }
        }

        tracing::info!(
            embedded,
            extra = fonts.len() - embedded,
            "Font cache initialized"
        );

        Self {
            book: LazyHash::new(book),
            fonts,
        }
    }

    fn load_embedded_fonts(book: &mut FontBook, fonts: &mut Vec<Font>) {
        for data in typst_assets::fonts() {
            let buffer = Bytes::from_static(data);
            for font in Font::iter(buffer) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }
    }

    /// Recursively scan a directory for font files
    fn scan_font_dir(dir: &Path, book: &mut FontBook, fonts: &mut Vec<Font>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();

            if path.is_dir() {
                Self::scan_font_dir(&path, book, fonts);
            } else if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc") {
                    Self::load_font_file(&path, book, fonts);
                }
            }
        }
    }

    fn load_font_file(path: &Path, book: &mut FontBook, fonts: &mut Vec<Font>) {
        let Ok(data) = std::fs::read(path) else {
            tracing::debug!(path = %path.display(), "unreadable font file");
            return;
        };

        let buffer = Bytes::from(data);
        for font in Font::iter(buffer) {
            book.push(font.info().clone());
            fonts.push(font);
        }
    }

    /// Get the font book
    pub fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    /// Get a font by index
    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Whether any loaded face belongs to `family` (case-insensitive)
    pub fn has_family(&self, family: &str) -> bool {
        self.book
            .families()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    }

    /// List all font families
    pub fn list_font_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .book
            .families()
            .map(|(name, _)| name.to_string())
            .collect();

        families.sort();
        families.dedup();
        families
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}
