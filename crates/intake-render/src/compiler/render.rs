//! Core compilation logic
//!
//! Compiles the mounted main source of a [`VirtualWorld`] and exports the
//! laid-out document as PDF bytes.

use typst::diag::{Severity, SourceDiagnostic};

use super::errors::{CompileError, EngineError};
use crate::world::VirtualWorld;

/// PDF bytes plus what the compiler had to say about them
#[derive(Debug, Clone)]
pub struct CompiledPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<CompileError>,
}

/// Compile the world's main file and export it to PDF.
///
/// Any error diagnostic aborts the whole compilation; warnings are returned
/// alongside the output.
pub fn compile_pdf(world: &VirtualWorld) -> Result<CompiledPdf, EngineError> {
    let warned = typst::compile(world);
    let (_, warnings) = categorize_diagnostics(&warned.warnings);

    let document = match warned.output {
        Ok(document) => document,
        Err(diagnostics) => {
            let (errors, _) = categorize_diagnostics(&diagnostics);
            if errors.is_empty() {
                // Warnings only - shouldn't happen with Err result, but handle it
                return Err(EngineError::CompileError(vec![CompileError::new(
                    "Compilation failed with unknown error",
                )]));
            }
            return Err(EngineError::CompileError(errors));
        }
    };

    let bytes = typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
        .map_err(|e| EngineError::PdfExport(format!("{:?}", e)))?;

    Ok(CompiledPdf {
        bytes,
        page_count: document.pages.len(),
        warnings,
    })
}

/// Validate Typst syntax without full compilation
pub fn validate_syntax(source: &str) -> Vec<CompileError> {
    use typst::syntax::parse;

    let parsed = parse(source);

    parsed
        .errors()
        .into_iter()
        .map(|error| CompileError::new(error.message.to_string()))
        .collect()
}

/// Categorize diagnostics into errors and warnings
fn categorize_diagnostics(
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());

        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::world::FontCache;

    fn world(source: &str) -> VirtualWorld {
        VirtualWorld::new(
            source.to_string(),
            Vec::new(),
            Arc::new(FontCache::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_compile_simple_document() {
        let pdf = compile_pdf(&world("Hello, *World*!")).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert_eq!(pdf.page_count, 1);
    }

    #[test]
    fn test_compile_syntax_error() {
        let result = compile_pdf(&world("#invalid{{{{"));
        match result {
            Err(EngineError::CompileError(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected compile error, got {:?}", other.map(|p| p.page_count)),
        }
    }

    #[test]
    fn test_validate_syntax_valid() {
        let errors = validate_syntax("Hello, World!");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_syntax_invalid() {
        let errors = validate_syntax("#let x = ");
        assert!(!errors.is_empty());
    }
}
