//! Intake record rendering
//!
//! A [`CanonicalRecord`](intake_types::CanonicalRecord) is laid out as a
//! block document, written out as Typst markup, and compiled to PDF entirely
//! in memory.
//!
//! # Feature Flags
//!
//! - `server` (default): async [`DocumentRenderer::render`] on tokio's blocking pool
//! - `wasm`: sync only, use [`DocumentRenderer::render_blocking`]

pub mod compiler;
pub mod document;
pub mod preview;
pub mod renderer;
pub mod world;

pub use compiler::{CompileError, EngineError};
pub use document::{build_document, IntakeDocument};
pub use preview::preview;
pub use renderer::{DocumentRenderer, RenderError, RenderedDocument, RendererConfig};
pub use world::FontCache;
