//! Compiling bitmap fonts for small displays.
//!
//! This crate turns a simple textual description of glyphs into compact,
//! run-length encoded bitmap data suitable for embedding in firmware, along
//! with the index, offset and size of each glyph in that data.
//!
//! Compilation happens in four steps:
//!
//! - [`parse`] reads the glyph definitions,
//! - [`pack`] packs each glyph's pixels into column-major bytes, eight rows
//!   to a byte,
//! - [`rle`] run-length encodes those bytes,
//! - [`layout`] assigns each glyph its position in the concatenated output.
//!
//! [`compile`] runs all of these. Turning the result into source code is left
//! to the caller.
//!
//! # Example
//!
//! ```
//! let input = "ID bar\nDIM 1 8\nX\nX\nX\nX\nX\nX\nX\nX\nEND\n";
//! let compilation = rune_compiler::compile(input);
//! assert!(!compilation.has_errors());
//! assert_eq!(compilation.payload(), &[0x01, 0xFF]);
//! ```

#![forbid(unsafe_code)]

mod compile;
pub mod diagnostic;
pub mod glyph;
pub mod layout;
pub mod pack;
pub mod parse;
pub mod rle;

pub use compile::{compile, Compilation, CompiledGlyph, EncodedGlyph};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Location};
pub use glyph::{GlyphDefinition, Row};
pub use layout::{Layout, LayoutEntry};
