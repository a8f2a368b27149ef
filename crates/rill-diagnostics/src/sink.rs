//! Diagnostic accumulation
//!
//! Validators report every independent violation they find instead of
//! failing on the first one, so they write into a caller-supplied sink.

use crate::{Diagnostic, Severity};

/// Collects diagnostics produced during a validation pass
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// All collected diagnostics, in report order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any error-severity diagnostic was reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of collected diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the sink is empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the sink, yielding the collected diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RIL0200, RIL0201};

    #[test]
    fn test_sink_accumulates_in_order() {
        let mut sink = DiagnosticSink::new();
        sink.report(Diagnostic::warning(RIL0201, "first"));
        sink.report(Diagnostic::error(RIL0200, "second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.diagnostics()[0].message, "first");
        assert_eq!(sink.diagnostics()[1].message, "second");
    }

    #[test]
    fn test_has_errors() {
        let mut sink = DiagnosticSink::new();
        assert!(!sink.has_errors());

        sink.report(Diagnostic::warning(RIL0201, "just a warning"));
        assert!(!sink.has_errors());

        sink.report(Diagnostic::error(RIL0200, "a real problem"));
        assert!(sink.has_errors());
    }
}
