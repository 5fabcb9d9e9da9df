//! Parsing the glyph definition language.
//!
//! The input is line oriented. Each glyph starts with an `ID <identifier>`
//! directive, followed by a `DIM <width> <height>` directive and one line per
//! pixel row. Pixels are whitespace separated tokens, where `-` is an unset
//! pixel and anything else is a set pixel. An `END` directive stops parsing.
//! Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # a tiny glyph
//! ID dot
//! DIM 2 8
//! - -
//! - -
//! - -
//! X X
//! X X
//! - -
//! - -
//! - -
//! END
//! ```

use indexmap::IndexMap;
use log::{trace, warn};

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Location},
    glyph::{GlyphDefinition, Row, BAND_HEIGHT},
};

const COMMENT_MARKER: char = '#';
const UNSET_PIXEL: &str = "-";

/// The glyphs found in the input, in the order they were first declared.
#[derive(Clone, Debug, Default)]
pub struct Parsed {
    pub glyphs: Vec<GlyphDefinition>,
    pub diagnostics: Diagnostics,
}

/// Parse the glyph definitions in `input`.
///
/// Problems in the input are reported as diagnostics and never stop parsing.
///
/// If an identifier is declared more than once, the last definition
/// replaces the earlier ones but keeps the position of the first.
pub fn parse(input: &str) -> Parsed {
    let mut glyphs = IndexMap::new();
    let mut diagnostics = Diagnostics::default();
    let mut state = ParserState::Idle;

    for line in lines(input) {
        state = state.advance(line).apply(&mut glyphs, &mut diagnostics);
        if matches!(state, ParserState::Finished) {
            break;
        }
    }
    state.finish().apply(&mut glyphs, &mut diagnostics);

    Parsed {
        glyphs: glyphs.into_values().collect(),
        diagnostics,
    }
}

/// a wrapper around a line, so we can report errors with locations
#[derive(Clone, Debug)]
struct Line<'a> {
    text: &'a str,
    location: Location,
}

fn lines(input: &str) -> impl Iterator<Item = Line<'_>> {
    input
        .split_inclusive('\n')
        .enumerate()
        .scan(0usize, |offset, (idx, raw)| {
            let start = *offset;
            *offset += raw.len();
            let text = raw.trim_end_matches(&['\r', '\n'][..]);
            Some(Line {
                text,
                location: Location {
                    line: idx + 1,
                    span: start..start + text.len(),
                },
            })
        })
}

/// A single classified line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Statement<'a> {
    Skip,
    Glyph(&'a str),
    Dimensions { width: u16, height: u16 },
    End,
    Row(Vec<bool>),
    Malformed(DiagnosticKind),
}

impl<'a> Statement<'a> {
    fn parse(text: &'a str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.starts_with(COMMENT_MARKER) {
            return Statement::Skip;
        }
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("ID") => match tokens.next() {
                Some(id) => Statement::Glyph(id),
                None => Statement::malformed("ID", "missing identifier".into()),
            },
            Some("DIM") => match parse_dimensions(tokens) {
                Ok((width, height)) => Statement::Dimensions { width, height },
                Err(reason) => Statement::malformed("DIM", reason),
            },
            Some("END") => Statement::End,
            _ => Statement::Row(
                text.split_whitespace()
                    .map(|token| token != UNSET_PIXEL)
                    .collect(),
            ),
        }
    }

    fn malformed(directive: &'static str, reason: String) -> Self {
        Statement::Malformed(DiagnosticKind::MalformedDirective { directive, reason })
    }
}

fn parse_dimensions<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<(u16, u16), String> {
    let mut next = |name: &str| {
        let token = tokens.next().ok_or_else(|| format!("missing {name}"))?;
        match token.parse::<u16>() {
            Ok(0) => Err(format!("{name} must be positive")),
            Ok(value) => Ok(value),
            Err(e) => Err(format!("invalid {name} '{token}': {e}")),
        }
    };
    let width = next("width")?;
    let height = next("height")?;
    Ok((width, height))
}

/// A row as it appeared in the input, before it is fitted to the glyph width.
#[derive(Clone, Debug)]
struct RawRow {
    bits: Vec<bool>,
    location: Location,
}

/// A glyph that is still collecting rows.
#[derive(Clone, Debug)]
struct GlyphBuilder {
    id: String,
    location: Location,
    dimensions: Option<(u16, u16)>,
    rows: Vec<RawRow>,
}

impl GlyphBuilder {
    fn new(id: &str, location: Location) -> Self {
        GlyphBuilder {
            id: id.to_owned(),
            location,
            dimensions: None,
            rows: Vec::new(),
        }
    }

    fn diagnostic(&self, location: Location, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic::new(Some(&self.id), location, kind)
    }

    fn set_dimensions(&mut self, width: u16, height: u16, location: Location) -> Option<Diagnostic> {
        self.dimensions = Some((width, height));
        (height as usize % BAND_HEIGHT != 0)
            .then(|| self.diagnostic(location, DiagnosticKind::InvalidHeight { height }))
    }

    fn push_row(&mut self, bits: Vec<bool>, location: Location) {
        self.rows.push(RawRow { bits, location });
    }

    /// Validate the collected rows and freeze the glyph.
    fn finish(self) -> (GlyphDefinition, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let (width, height) = match self.dimensions {
            Some(dimensions) => dimensions,
            None => {
                diagnostics.push(
                    self.diagnostic(self.location.clone(), DiagnosticKind::MissingDimensions),
                );
                (0, 0)
            }
        };

        let mut rows = Vec::with_capacity(self.rows.len());
        for (idx, raw) in self.rows.iter().enumerate() {
            if raw.bits.len() < width as usize {
                diagnostics.push(self.diagnostic(
                    raw.location.clone(),
                    DiagnosticKind::ShortRow {
                        row: idx + 1,
                        expected: width,
                        found: raw.bits.len(),
                    },
                ));
            }
            rows.push(Row::with_width(&raw.bits, width as usize));
        }

        if self.dimensions.is_some() && rows.len() != height as usize {
            diagnostics.push(self.diagnostic(
                self.location.clone(),
                DiagnosticKind::RowCountMismatch {
                    expected: height,
                    found: rows.len(),
                },
            ));
        }

        let glyph = GlyphDefinition::new(self.id, width, height, rows);
        (glyph, diagnostics)
    }
}

#[derive(Clone, Debug, Default)]
enum ParserState {
    /// No glyph has been started yet.
    #[default]
    Idle,
    Building(GlyphBuilder),
    /// An `END` directive was seen; the rest of the input is ignored.
    Finished,
}

/// The outcome of feeding one line to the parser.
#[derive(Debug, Default)]
struct Transition {
    state: ParserState,
    glyph: Option<GlyphDefinition>,
    diagnostics: Vec<Diagnostic>,
}

impl ParserState {
    fn current_glyph(&self) -> Option<&str> {
        match self {
            ParserState::Building(builder) => Some(&builder.id),
            _ => None,
        }
    }

    fn advance(self, line: Line) -> Transition {
        let statement = Statement::parse(line.text);
        trace!("line {}: {statement:?}", line.location.line);
        match (self, statement) {
            (ParserState::Finished, _) => Transition::to(ParserState::Finished),
            (state, Statement::Skip) => Transition::to(state),
            (state, Statement::Glyph(id)) => {
                let builder = GlyphBuilder::new(id, line.location);
                Transition::to(ParserState::Building(builder)).finishing(state)
            }
            (state, Statement::End) => Transition::to(ParserState::Finished).finishing(state),
            (ParserState::Building(mut builder), Statement::Dimensions { width, height }) => {
                let diagnostic = builder.set_dimensions(width, height, line.location);
                Transition::to(ParserState::Building(builder)).with_diagnostics(diagnostic)
            }
            (ParserState::Building(mut builder), Statement::Row(bits)) => {
                builder.push_row(bits, line.location);
                Transition::to(ParserState::Building(builder))
            }
            (ParserState::Idle, Statement::Dimensions { .. }) => Transition::to(ParserState::Idle)
                .with_diagnostics(Some(Diagnostic::new(
                    None,
                    line.location,
                    DiagnosticKind::DimensionsBeforeGlyph,
                ))),
            (ParserState::Idle, Statement::Row(_)) => Transition::to(ParserState::Idle)
                .with_diagnostics(Some(Diagnostic::new(
                    None,
                    line.location,
                    DiagnosticKind::RowBeforeGlyph,
                ))),
            (state, Statement::Malformed(kind)) => {
                let diagnostic = Diagnostic::new(state.current_glyph(), line.location, kind);
                Transition::to(state).with_diagnostics(Some(diagnostic))
            }
        }
    }

    /// Handle the end of the input.
    fn finish(self) -> Transition {
        Transition::to(ParserState::Finished).finishing(self)
    }
}

impl Transition {
    fn to(state: ParserState) -> Self {
        Transition {
            state,
            ..Default::default()
        }
    }

    /// Finalize the glyph that `previous` was building, if any.
    fn finishing(mut self, previous: ParserState) -> Self {
        if let ParserState::Building(builder) = previous {
            let (glyph, diagnostics) = builder.finish();
            self.glyph = Some(glyph);
            self.diagnostics.extend(diagnostics);
        }
        self
    }

    fn with_diagnostics(mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    fn apply(
        self,
        glyphs: &mut IndexMap<String, GlyphDefinition>,
        diagnostics: &mut Diagnostics,
    ) -> ParserState {
        diagnostics.extend(self.diagnostics);
        if let Some(glyph) = self.glyph {
            let id = glyph.id().to_owned();
            if glyphs.insert(id.clone(), glyph).is_some() {
                warn!("glyph '{id}' is defined more than once; using the last definition");
            }
        }
        self.state
    }
}
