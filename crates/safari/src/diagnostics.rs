//! Structured reporting for the cases where rendering degrades instead of failing.
//!
//! None of these stop a page from being written. They are logged as they happen and kept on the
//! page's [`PageOutput`](crate::PageOutput) so integration problems (a renamed placeholder, a content
//! file missing its section) can be caught after a build.
use std::fmt::{self, Display, Formatter};

use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A header or footer fragment could not be loaded, placeholders were left empty.
    FragmentFailed { fragment: String, reason: String },
    /// A content file could not be fetched or parsed, the target got fallback content.
    ContentFailed {
        file: String,
        target: String,
        reason: String,
    },
    /// A document had none of the expected sections.
    UnknownShape { file: String, target: String },
    /// A render was requested for an element id that the page does not contain.
    MissingTarget { target: String },
    /// The page path did not match a known page and was treated as the home page.
    UnknownPage { path: String },
    /// Animals were rendered without boosters because the shared file could not be loaded.
    BoostersUnavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub page: String,
    pub kind: DiagnosticKind,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::FragmentFailed { fragment, reason } => {
                write!(f, "{}: fragment `{}` not loaded: {}", self.page, fragment, reason)
            }
            DiagnosticKind::ContentFailed {
                file,
                target,
                reason,
            } => write!(
                f,
                "{}: `{}` for #{} fell back: {}",
                self.page, file, target, reason
            ),
            DiagnosticKind::UnknownShape { file, target } => write!(
                f,
                "{}: `{}` has no section that can be rendered into #{}",
                self.page, file, target
            ),
            DiagnosticKind::MissingTarget { target } => {
                write!(f, "{}: no element with id #{}", self.page, target)
            }
            DiagnosticKind::UnknownPage { path } => {
                write!(f, "{}: unknown page, rendered as home page", path)
            }
            DiagnosticKind::BoostersUnavailable { reason } => {
                write!(f, "{}: boosters unavailable, rendered animals only: {}", self.page, reason)
            }
        }
    }
}

/// Collects the [`Diagnostic`]s emitted while rendering a single page.
#[derive(Debug, Default)]
pub struct Diagnostics {
    page: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            page: self.page.clone(),
            kind,
        };

        let target = match diagnostic.kind {
            DiagnosticKind::FragmentFailed { .. } => "fragments",
            DiagnosticKind::UnknownPage { .. } => "pages",
            _ => "content",
        };
        warn!(target: target, "{}", diagnostic);

        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Formats an error together with all of its sources, e.g. `Failed to fetch ...: ... does not exist`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_tags_page() {
        let mut diagnostics = Diagnostics::new("/contact-safari.html");
        diagnostics.push(DiagnosticKind::MissingTarget {
            target: "contact-details-content".into(),
        });

        let entry = diagnostics.iter().next().unwrap();
        assert_eq!(entry.page, "/contact-safari.html");
        assert_eq!(
            entry.to_string(),
            "/contact-safari.html: no element with id #contact-details-content"
        );
    }

    #[test]
    fn test_starts_empty() {
        let diagnostics = Diagnostics::new("/");
        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.len(), 0);
    }
}
