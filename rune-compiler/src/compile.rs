//! The compilation pipeline.

use log::{debug, info};

use crate::{
    diagnostic::Diagnostics,
    glyph::GlyphDefinition,
    layout::{Layout, LayoutAccumulator, LayoutEntry},
    pack, parse, rle,
};

/// The run-length encoded data of a single glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedGlyph {
    id: String,
    bytes: Vec<u8>,
    dim: usize,
}

impl EncodedGlyph {
    /// Pack and encode `glyph`.
    pub fn new(glyph: &GlyphDefinition) -> Self {
        let packed = pack::pack(glyph).into_bytes();
        EncodedGlyph {
            id: glyph.id().to_owned(),
            bytes: rle::encode(&packed),
            dim: glyph.dim(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The number of encoded bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The size of the glyph's bitmap before compression.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// Everything known about one compiled glyph.
#[derive(Clone, Copy, Debug)]
pub struct CompiledGlyph<'a> {
    pub definition: &'a GlyphDefinition,
    pub encoded: &'a EncodedGlyph,
    pub entry: &'a LayoutEntry,
}

/// The result of compiling a set of glyph definitions.
#[derive(Clone, Debug, Default)]
pub struct Compilation {
    definitions: Vec<GlyphDefinition>,
    encoded: Vec<EncodedGlyph>,
    layout: Layout,
    payload: Vec<u8>,
    diagnostics: Diagnostics,
}

/// Compile the glyph definitions in `input`.
///
/// This never fails; problems with the input are collected in
/// [`Compilation::diagnostics`].
pub fn compile(input: &str) -> Compilation {
    let parse::Parsed {
        glyphs,
        diagnostics,
    } = parse::parse(input);

    let mut layout = LayoutAccumulator::new();
    let mut payload = Vec::new();
    let encoded = glyphs
        .iter()
        .map(|glyph| {
            let encoded = EncodedGlyph::new(glyph);
            let entry = layout.push(encoded.id(), encoded.size());
            debug!(
                "glyph '{}' #{}: {}x{}, {} bytes packed, {} encoded at offset {}",
                entry.id,
                entry.index,
                glyph.width(),
                glyph.height(),
                encoded.dim(),
                entry.size,
                entry.offset,
            );
            payload.extend_from_slice(encoded.bytes());
            encoded
        })
        .collect::<Vec<_>>();
    let layout = layout.finish();

    info!(
        "compiled {} glyphs into {} bytes with {} diagnostics",
        layout.len(),
        layout.total_size(),
        diagnostics.len()
    );

    Compilation {
        definitions: glyphs,
        encoded,
        layout,
        payload,
        diagnostics,
    }
}

impl Compilation {
    /// All glyphs, in the order they were first declared.
    pub fn glyphs(&self) -> impl ExactSizeIterator<Item = CompiledGlyph<'_>> + '_ {
        self.definitions
            .iter()
            .zip(&self.encoded)
            .zip(self.layout.entries())
            .map(|((definition, encoded), entry)| CompiledGlyph {
                definition,
                encoded,
                entry,
            })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The encoded data of all glyphs, concatenated.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn total_size(&self) -> usize {
        self.layout.total_size()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diagnostic::DiagnosticKind;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn glyph_text(id: &str, width: u16, rows: &[&str]) -> String {
        let mut text = format!("ID {id}\nDIM {width} {}\n", rows.len());
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn half_square() {
        init();
        let input = glyph_text("half", 8, &["X X X X - - - -"; 8]);
        let compilation = compile(&input);
        assert!(!compilation.has_errors());
        // packed [ff ff ff ff 00 00 00 00]
        assert_eq!(compilation.payload(), &[0x04, 0xFF, 0x04, 0x00]);
        let glyph = compilation.glyphs().next().unwrap();
        assert_eq!(glyph.encoded.dim(), 8);
        assert_eq!(glyph.entry.size, 4);
    }

    #[test]
    fn payload_is_concatenated_in_order() {
        init();
        let mut input = glyph_text("a", 2, &["X -"; 8]);
        input.push_str(&glyph_text("blank", 3, &["- - -"; 8]));
        input.push_str(&glyph_text("b", 1, &["X"; 16]));
        input.push_str("END\n");
        let compilation = compile(&input);

        let ids = compilation.glyphs().map(|g| g.entry.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["a", "blank", "b"]);
        assert_eq!(
            compilation.payload(),
            &[0x01, 0xFF, 0x00, 0x03, 0x00, 0x02, 0xFF]
        );
        assert_eq!(
            compilation.layout().offsets().collect::<Vec<_>>(),
            vec![0, 3, 5]
        );
        assert_eq!(compilation.total_size(), 7);
        assert_eq!(compilation.payload().len(), compilation.total_size());
    }

    #[test]
    fn every_glyph_decodes_to_its_dim() {
        init();
        let compilation = compile(rune_test_data::DIGITS);
        assert!(!compilation.has_errors(), "{}", compilation.diagnostics());
        assert!(compilation.glyphs().len() > 0);
        for glyph in compilation.glyphs() {
            let start = glyph.entry.offset;
            let data = &compilation.payload()[start..start + glyph.entry.size];
            assert_eq!(data, glyph.encoded.bytes());
            let decoded = rle::decode(data);
            assert_eq!(decoded.len(), glyph.encoded.dim(), "{}", glyph.entry.id);
            assert_eq!(decoded, pack::pack(glyph.definition).into_bytes());
        }
    }

    #[test]
    fn invalid_height_still_packs_one_band() {
        init();
        let compilation = compile(&glyph_text("tall", 2, &["X X"; 9]));
        let kinds = compilation
            .diagnostics()
            .iter()
            .map(|d| d.kind().clone())
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![DiagnosticKind::InvalidHeight { height: 9 }]);
        let glyph = compilation.glyphs().next().unwrap();
        // one band, two columns of 0xff; the ninth row is dropped
        assert_eq!(glyph.encoded.bytes(), &[0x02, 0xFF]);
        assert_eq!(glyph.encoded.dim(), 2);
    }

    #[test]
    fn partial_glyphs_are_still_emitted() {
        init();
        let input = "X\nID a\nDIM 1 8\nX\nID b\nDIM 1 8\nX\nX\nX\nX\nX\nX\nX\nX\n";
        let compilation = compile(input);
        assert!(compilation.has_errors());
        assert_eq!(compilation.diagnostics().len(), 2);
        let sizes = compilation.layout().sizes().collect::<Vec<_>>();
        // 'a' packs as 0b1000_0000
        assert_eq!(compilation.payload(), &[0x01, 0x80, 0x01, 0xFF]);
        assert_eq!(sizes, vec![2, 2]);
    }
}
