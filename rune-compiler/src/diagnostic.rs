//! Problems found while compiling glyph definitions.
//!
//! None of these stop compilation. Glyphs with problems are still emitted,
//! using whatever data was collected, and it is up to the caller to decide
//! whether the output can be trusted.

use std::{fmt::Display, ops::Range};

/// The kind of problem found in the input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    #[error("wrong number of lines: expected {expected}, found {found}")]
    RowCountMismatch { expected: u16, found: usize },
    #[error("height must be a multiple of 8, found {height}")]
    InvalidHeight { height: u16 },
    #[error("pixel row found outside of any glyph")]
    RowBeforeGlyph,
    #[error("'DIM' found outside of any glyph")]
    DimensionsBeforeGlyph,
    #[error("missing 'DIM' directive")]
    MissingDimensions,
    #[error("row {row} has {found} pixels, expected {expected}")]
    ShortRow {
        row: usize,
        expected: u16,
        found: usize,
    },
    #[error("malformed '{directive}' directive: {reason}")]
    MalformedDirective {
        directive: &'static str,
        reason: String,
    },
}

/// The position of a line in the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// The 1-based line number.
    pub line: usize,
    /// The byte range of the line's text, excluding the line terminator.
    pub span: Range<usize>,
}

/// A single problem, along with the glyph and line it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    glyph: Option<String>,
    location: Location,
    kind: DiagnosticKind,
}

/// All of the problems reported during a compilation, in the order they
/// were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(glyph: Option<&str>, location: Location, kind: DiagnosticKind) -> Self {
        Diagnostic {
            glyph: glyph.map(String::from),
            location,
            kind,
        }
    }

    /// The identifier of the glyph being built when this was reported, if any.
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(glyph) = &self.glyph {
            write!(f, "{glyph}: ")?;
        }
        write!(f, "{} (line {})", self.kind, self.location.line)
    }
}

impl std::error::Error for Diagnostic {}

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// All diagnostics reported for the glyph with this identifier.
    pub fn for_glyph<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.items.iter().filter(move |d| d.glyph() == Some(id))
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.items.as_slice() {
            [] => Ok(()),
            [one] => writeln!(f, "ERROR: {one}"),
            all => {
                writeln!(f, "{} errors:", all.len())?;
                for item in all {
                    writeln!(f, "ERROR: {item}")?;
                }
                Ok(())
            }
        }
    }
}
