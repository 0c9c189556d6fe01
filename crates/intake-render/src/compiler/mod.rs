//! Typst compilation wrapper with error handling

pub mod errors;
pub mod render;

pub use errors::{CompileError, EngineError, ErrorSeverity};
pub use render::{compile_pdf, validate_syntax, CompiledPdf};
