//! Internal diagnostic model shared by the lexer and the semantic layer.
//!
//! Both phases report problems as [`Diag`] values: a severity, a message,
//! and zero or more labeled source spans. Diagnostics stay in this internal
//! form while analysis runs and are rendered to [`miette::Report`]s at the
//! boundary, once the source text is available for context.

use crate::Span;
use miette::{Diagnostic, LabeledSpan, Report, Severity};
use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagSeverity {
    /// A fatal error; the statement under analysis is rejected.
    Error,
    /// A warning about suspicious but accepted input.
    Warning,
    /// An informational note.
    Note,
}

impl fmt::Display for DiagSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagSeverity::Error => write!(f, "error"),
            DiagSeverity::Warning => write!(f, "warning"),
            DiagSeverity::Note => write!(f, "note"),
        }
    }
}

/// Role of a labeled span within a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The location the diagnostic is about.
    Primary,
    /// A supporting location.
    Secondary,
}

/// A labeled source span attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagLabel {
    /// The span this label points at.
    pub span: Span,
    /// Text explaining why the span is relevant.
    pub message: String,
    /// Primary or secondary.
    pub role: LabelRole,
}

impl DiagLabel {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Secondary,
        }
    }
}

/// A structured diagnostic produced during lexing or semantic analysis.
///
/// Carries everything needed to render a rich report: labeled spans, an
/// optional help string, free-form notes, and a stable diagnostic code
/// (`L...` for lexical, `S...` for semantic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// Severity of this diagnostic.
    pub severity: DiagSeverity,
    /// The main message.
    pub message: String,
    /// Labeled spans into the source text.
    pub labels: Vec<DiagLabel>,
    /// Optional suggestion for fixing the problem.
    pub help: Option<String>,
    /// Additional context notes.
    pub notes: Vec<String>,
    /// Stable diagnostic code.
    pub code: Option<String>,
}

impl Diag {
    /// Creates a diagnostic with the given severity and message.
    pub fn new(severity: DiagSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            notes: Vec::new(),
            code: None,
        }
    }

    /// Creates an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Error, message)
    }

    /// Creates a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagSeverity::Warning, message)
    }

    /// Adds a primary label.
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::primary(span, message));
        self
    }

    /// Adds a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::secondary(span, message));
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Renders this diagnostic as a miette report against the given source.
    ///
    /// Spans are clamped to the source bounds so a stale or synthetic span
    /// can never panic the renderer.
    pub fn to_report(&self, source: &SourceFile) -> Report {
        let labels = self
            .labels
            .iter()
            .map(|label| {
                let clamped = source.clamp_span(&label.span);
                let span = (clamped.start, clamped.end - clamped.start);
                match label.role {
                    LabelRole::Primary => {
                        LabeledSpan::new_primary_with_span(Some(label.message.clone()), span)
                    }
                    LabelRole::Secondary => {
                        LabeledSpan::new_with_span(Some(label.message.clone()), span)
                    }
                }
            })
            .collect();

        let diagnostic = RenderedDiag {
            message: self.message.clone(),
            severity: match self.severity {
                DiagSeverity::Error => Severity::Error,
                DiagSeverity::Warning => Severity::Warning,
                DiagSeverity::Note => Severity::Advice,
            },
            code: self.code.clone(),
            help: self.help.clone(),
            labels,
            notes: self.notes.clone(),
        };

        let report = Report::new(diagnostic);
        match source.name() {
            Some(name) => report
                .with_source_code(miette::NamedSource::new(name, source.content().to_string())),
            None => report.with_source_code(source.content().to_string()),
        }
    }
}

/// Renders a batch of diagnostics against one source.
pub fn to_reports(diagnostics: &[Diag], source: &SourceFile) -> Vec<Report> {
    diagnostics
        .iter()
        .map(|diag| diag.to_report(source))
        .collect()
}

/// Source text wrapper used when rendering diagnostics.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    /// Creates a source file from the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    /// Creates a named source file.
    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the source content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the source name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps a span to valid bounds within this source.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// The rendered diagnostic handed to miette.
#[derive(Debug)]
struct RenderedDiag {
    message: String,
    severity: Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    notes: Vec<String>,
}

impl fmt::Display for RenderedDiag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RenderedDiag {}

impl Diagnostic for RenderedDiag {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.help.is_none() && self.notes.is_empty() {
            return None;
        }
        let mut text = String::new();
        if let Some(help) = &self.help {
            text.push_str(help);
        }
        for note in &self.notes {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str("note: ");
            text.push_str(note);
        }
        Some(Box::new(text))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.clone().into_iter()))
        }
    }
}
