//! Error types for compilation and export

use thiserror::Error;

/// A compiler diagnostic, flattened to text
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    /// Human-readable error message
    pub message: String,
    /// Helpful hint for fixing the error
    pub hint: Option<String>,
    /// Severity level
    pub severity: ErrorSeverity,
}

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// Failures inside the Typst engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Compilation failed: {}", join_messages(.0))]
    CompileError(Vec<CompileError>),

    #[error("PDF export failed: {0}")]
    PdfExport(String),

    #[error("Compilation task panicked: {0}")]
    TaskPanicked(String),

    #[error("Path security violation: {0}")]
    PathSecurityViolation(String),
}

impl CompileError {
    /// Create a new compile error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            severity: ErrorSeverity::Error,
        }
    }

    /// Set a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set as warning
    pub fn as_warning(mut self) -> Self {
        self.severity = ErrorSeverity::Warning;
        self
    }
}

fn join_messages(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_display_joins_messages() {
        let err = EngineError::CompileError(vec![
            CompileError::new("unknown variable: x"),
            CompileError::new("expected expression").with_hint("check the brackets"),
        ]);
        assert_eq!(
            err.to_string(),
            "Compilation failed: unknown variable: x; expected expression"
        );
    }

    #[test]
    fn test_warning_builder() {
        let warning = CompileError::new("unknown font family").as_warning();
        assert_eq!(warning.severity, ErrorSeverity::Warning);
        assert!(warning.hint.is_none());
    }
}
