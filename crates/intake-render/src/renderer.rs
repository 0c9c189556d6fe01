//! Record to PDF
//!
//! Each render builds its own [`VirtualWorld`]; only the font cache is
//! shared between renders.

use std::path::PathBuf;
use std::sync::Arc;

use intake_types::CanonicalRecord;
use thiserror::Error;
use typst::foundations::Bytes;

use crate::compiler::{compile_pdf, CompileError, EngineError};
use crate::document::{build_document, to_markup};
use crate::world::{embedded_font_cache, FontCache, VirtualWorld};

/// Traditional Chinese faces tried in order, when installed
const CJK_FAMILIES: &[&str] = &[
    "Noto Serif TC",
    "Noto Sans TC",
    "Noto Sans CJK TC",
    "Source Han Serif TC",
    "Source Han Sans TC",
    "Microsoft JhengHei",
    "PingFang TC",
];

#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    /// Scanned for fonts in addition to the embedded ones
    pub font_dirs: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render failed: {0}")]
    RenderFailed(#[from] EngineError),
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub pdf: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<CompileError>,
}

#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    fonts: Arc<FontCache>,
    families: Arc<[String]>,
}

impl DocumentRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        let fonts = if config.font_dirs.is_empty() {
            embedded_font_cache()
        } else {
            Arc::new(FontCache::with_font_dirs(&config.font_dirs))
        };
        Self::with_fonts(fonts)
    }

    pub fn with_fonts(fonts: Arc<FontCache>) -> Self {
        let families: Vec<String> = CJK_FAMILIES
            .iter()
            .filter(|family| fonts.has_family(family))
            .map(|family| family.to_string())
            .collect();

        if families.is_empty() {
            tracing::warn!("no Traditional Chinese font found; CJK text will have no glyphs");
        } else {
            tracing::debug!(?families, "using CJK fonts");
        }

        Self {
            fonts,
            families: families.into(),
        }
    }

    /// Installed Traditional Chinese families, in the order they are requested
    pub fn cjk_families(&self) -> &[String] {
        &self.families
    }

    /// Without one, every Chinese label and value prints without glyphs
    pub fn has_cjk_font(&self) -> bool {
        !self.families.is_empty()
    }

    /// Every family the font cache loaded
    pub fn font_families(&self) -> Vec<String> {
        self.fonts.list_font_families()
    }

    /// Typst source for the record, as it would be compiled.
    ///
    /// `today` is printed in the footer when the record has no fill date.
    pub fn markup(&self, record: &CanonicalRecord, today: &str) -> String {
        to_markup(&build_document(record, today), &self.families)
    }

    /// Compile on the current thread
    pub fn render_blocking(
        &self,
        record: &CanonicalRecord,
        today: &str,
    ) -> Result<RenderedDocument, RenderError> {
        let document = build_document(record, today);
        let source = to_markup(&document, &self.families);
        let assets = document
            .assets
            .into_iter()
            .map(|(path, bytes)| (path, Bytes::from(bytes)))
            .collect();

        let world = VirtualWorld::new(source, assets, self.fonts.clone())?;
        let compiled = compile_pdf(&world)?;

        for warning in &compiled.warnings {
            tracing::debug!(message = %warning.message, "typst warning");
        }
        tracing::info!(
            pages = compiled.page_count,
            bytes = compiled.bytes.len(),
            "intake document rendered"
        );

        Ok(RenderedDocument {
            pdf: compiled.bytes,
            page_count: compiled.page_count,
            warnings: compiled.warnings,
        })
    }

    /// Compile on tokio's blocking pool.
    ///
    /// No timeout is applied here; callers wrap this in their own.
    #[cfg(feature = "server")]
    pub async fn render(
        &self,
        record: &CanonicalRecord,
        today: &str,
    ) -> Result<RenderedDocument, RenderError> {
        let renderer = self.clone();
        let record = record.clone();
        let today = today.to_string();

        tokio::task::spawn_blocking(move || renderer.render_blocking(&record, &today))
            .await
            .map_err(|e| EngineError::TaskPanicked(e.to_string()))?
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(&RendererConfig::default())
    }
}
