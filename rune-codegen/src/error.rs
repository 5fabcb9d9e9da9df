use miette::{Diagnostic, LabeledSpan, NamedSource, Severity};

/// An error or warning, optionally pointing at a line of the input.
#[derive(Debug)]
pub struct ErrorReport {
    src: Option<NamedSource>,
    message: String,
    location: Option<LabeledSpan>,
    severity: Severity,
}

impl Diagnostic for ErrorReport {
    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|x| x as _)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.location
            .as_ref()
            .map(|loc| Box::new(std::iter::once(loc.clone())) as _)
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorReport {}

impl ErrorReport {
    pub fn message(message: impl Into<String>) -> Self {
        ErrorReport {
            src: None,
            message: message.into(),
            location: None,
            severity: Severity::Error,
        }
    }

    /// Build a report for a compiler diagnostic, labeling the offending line.
    pub fn from_diagnostic(
        diagnostic: &rune_compiler::Diagnostic,
        name: &str,
        text: String,
        severity: Severity,
    ) -> Self {
        let span = &diagnostic.location().span;
        let location = LabeledSpan::new(
            Some(diagnostic.kind().to_string()),
            span.start,
            span.len(),
        );
        let message = match diagnostic.glyph() {
            Some(glyph) => format!("problem in glyph '{glyph}'"),
            None => "problem outside of any glyph".into(),
        };
        ErrorReport {
            src: Some(NamedSource::new(name, text)),
            message,
            location: Some(location),
            severity,
        }
    }

    pub fn location(&self) -> Option<&LabeledSpan> {
        self.location.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_offending_line() {
        let text = "ID A\nDIM 1 9\n";
        let compilation = rune_compiler::compile(text);
        let diagnostic = compilation.diagnostics().iter().next().unwrap();
        let report =
            ErrorReport::from_diagnostic(diagnostic, "a.txt", text.into(), Severity::Warning);
        assert_eq!(report.to_string(), "problem in glyph 'A'");
        assert_eq!(report.severity(), Some(Severity::Warning));
        let label = report.location().unwrap();
        assert_eq!(label.offset(), 5);
        assert_eq!(label.len(), 7);
        assert_eq!(
            label.label(),
            Some("height must be a multiple of 8, found 9")
        );
    }
}
