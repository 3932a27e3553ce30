//! Diagnostics for validate-time checks
//!
//! Generic diagnostic system reporting annotation inconsistencies to the
//! render layer. Layer behaviors are the first customer, but the system
//! is designed for reuse with other detectors (dangling references,
//! schema drift, etc.)

use serde::{Deserialize, Serialize};

use crate::models::annotation::AnnotationId;
use crate::models::span::Span;

/// Severity level for diagnostic marks
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// A diagnostic highlighting an issue at a specific annotation and range
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Diagnostic {
    /// The annotation the diagnostic is addressed at
    pub annotation: AnnotationId,
    /// The character range to highlight
    pub span: Span,
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Kind identifier (e.g. "overlap", "cross_boundary", "anchoring")
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a new error-severity diagnostic
    pub fn error(
        annotation: AnnotationId,
        span: Span,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            annotation,
            span,
            severity: DiagnosticSeverity::Error,
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Collection of diagnostics for one validation pass
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Diagnostics {
    pub marks: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn add(&mut self, mark: Diagnostic) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = Diagnostic>) {
        self.marks.extend(marks);
    }

    pub fn has_errors(&self) -> bool {
        self.marks
            .iter()
            .any(|m| m.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
