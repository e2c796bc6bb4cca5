//! Advisory diagnostics channel
//!
//! Non-fatal corrections (reformatted identifiers, a default picked on the
//! caller's behalf, a suppressed duplicate, ...) never interrupt an operation.
//! They are recorded as [`Diagnostic`]s on the context, mirrored to `tracing`,
//! and optionally forwarded to a caller-supplied observer.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// How loud a diagnostic is
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Warning,
}

/// Machine-readable diagnostic kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// Identifier casing differed from the canonical form for its kind
    IdentifierReformatted,
    /// Language tag could not be parsed and was dropped
    InvalidLanguage,
    /// `set` replaced a different existing value
    ValueOverwritten,
    /// `remove` matched no statement
    MissingStatement,
    /// An empty string was written as a literal
    EmptyLiteral,
    /// `add` on a predicate that allows a single value
    MaxCountExceeded,
    /// Alternative label equal to the preferred label was not added
    AltLabelSkipped,
    /// An element equal to an existing one was dropped
    DuplicateSuppressed,
    /// A default alternative was chosen on the caller's behalf
    DefaultSelected,
    /// The default alternative was removed and another one promoted
    DefaultRemoved,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::IdentifierReformatted => "identifier_reformatted",
            DiagnosticCode::InvalidLanguage => "invalid_language",
            DiagnosticCode::ValueOverwritten => "value_overwritten",
            DiagnosticCode::MissingStatement => "missing_statement",
            DiagnosticCode::EmptyLiteral => "empty_literal",
            DiagnosticCode::MaxCountExceeded => "max_count_exceeded",
            DiagnosticCode::AltLabelSkipped => "alt_label_skipped",
            DiagnosticCode::DuplicateSuppressed => "duplicate_suppressed",
            DiagnosticCode::DefaultSelected => "default_selected",
            DiagnosticCode::DefaultRemoved => "default_removed",
        }
    }

    /// Default severity for this code
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::DuplicateSuppressed | DiagnosticCode::AltLabelSkipped => {
                Severity::Note
            }
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One advisory record
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    /// Rendered subject the advisory is about, if any
    pub subject: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "[{}] {}: {}", self.code, subject, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

type Observer = Box<dyn FnMut(&Diagnostic)>;

/// Accumulated diagnostics for one context
#[derive(Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
    observer: Option<Observer>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a callback invoked for every new record
    pub fn set_observer(&mut self, observer: impl FnMut(&Diagnostic) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Record a diagnostic, emit it through `tracing`, and notify the observer
    pub fn push(&mut self, diagnostic: Diagnostic) {
        let subject = diagnostic.subject.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Warning => warn!(
                code = %diagnostic.code,
                subject,
                "{}",
                diagnostic.message
            ),
            Severity::Note => info!(
                code = %diagnostic.code,
                subject,
                "{}",
                diagnostic.message
            ),
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&diagnostic);
        }
        self.records.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record carries `code`
    pub fn has(&self, code: DiagnosticCode) -> bool {
        self.records.iter().any(|d| d.code == code)
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.records.iter().filter(|d| d.code == code).count()
    }

    /// Drain every record accumulated so far
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.records.last()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("records", &self.records)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_push_and_take() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(DiagnosticCode::DefaultSelected, "picked a"));
        diagnostics.push(
            Diagnostic::new(DiagnosticCode::DuplicateSuppressed, "dropped a").with_subject("_:b0"),
        );

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.has(DiagnosticCode::DefaultSelected));
        assert!(!diagnostics.has(DiagnosticCode::DefaultRemoved));
        assert_eq!(diagnostics.last().unwrap().severity, Severity::Note);

        let drained = diagnostics.take();
        assert_eq!(drained.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_observer_sees_records() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut diagnostics = Diagnostics::new();
        diagnostics.set_observer(move |d| sink.borrow_mut().push(d.code));
        diagnostics.push(Diagnostic::new(DiagnosticCode::ValueOverwritten, "x"));

        assert_eq!(*seen.borrow(), vec![DiagnosticCode::ValueOverwritten]);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::new(DiagnosticCode::EmptyLiteral, "empty string").with_subject("ex:a");
        assert_eq!(d.to_string(), "[empty_literal] ex:a: empty string");
        assert_eq!(
            serde_json::to_value(&d).unwrap()["code"],
            serde_json::json!("empty_literal")
        );
    }
}
