//! Frozen glyph definitions.

/// The number of pixel rows that are packed into a single byte.
pub const BAND_HEIGHT: usize = 8;

/// A single row of pixels.
///
/// Rows stored in a [`GlyphDefinition`] are always exactly as wide as the
/// glyph that owns them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Row {
    bits: Vec<bool>,
}

/// A single glyph, after parsing and validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphDefinition {
    id: String,
    width: u16,
    height: u16,
    rows: Vec<Row>,
}

impl Row {
    /// Create a row from an iterator of pixels, `true` meaning set.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        Row {
            bits: bits.into_iter().collect(),
        }
    }

    /// Create a row of `width` pixels, truncating or padding `bits` with
    /// unset pixels as needed.
    pub fn with_width(bits: &[bool], width: usize) -> Self {
        let bits = bits
            .iter()
            .copied()
            .chain(std::iter::repeat(false))
            .take(width)
            .collect();
        Row { bits }
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns the pixel at `column`; pixels past the end of the row are unset.
    pub fn get(&self, column: usize) -> bool {
        self.bits.get(column).copied().unwrap_or_default()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}

impl GlyphDefinition {
    pub fn new(id: impl Into<String>, width: u16, height: u16, rows: Vec<Row>) -> Self {
        GlyphDefinition {
            id: id.into(),
            width,
            height,
            rows,
        }
    }

    /// The identifier from the glyph's `ID` directive.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The declared width, in columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The declared height, in rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The rows that were collected for this glyph.
    ///
    /// This may be more or fewer than [`height`][Self::height] if the
    /// definition was inconsistent.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the pixel at the given position.
    ///
    /// Positions outside of the collected rows are unset.
    pub fn pixel(&self, row: usize, column: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.get(column))
    }

    /// The number of 8-row bands that will be packed.
    ///
    /// Trailing rows that do not fill a whole band are not counted.
    pub fn band_count(&self) -> usize {
        self.height as usize / BAND_HEIGHT
    }

    /// The size of the packed bitmap before compression, `width * height / 8`.
    pub fn dim(&self) -> usize {
        self.width as usize * self.height as usize / BAND_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_with_width_pads_and_truncates() {
        let row = Row::with_width(&[true, false, true], 5);
        assert_eq!(row.bits(), &[true, false, true, false, false]);
        let row = Row::with_width(&[true, true, true], 2);
        assert_eq!(row.bits(), &[true, true]);
    }

    #[test]
    fn pixels_outside_rows_are_unset() {
        let glyph = GlyphDefinition::new("A", 2, 8, vec![Row::from_bits([true, true])]);
        assert!(glyph.pixel(0, 1));
        assert!(!glyph.pixel(0, 2));
        assert!(!glyph.pixel(5, 0));
    }

    #[test]
    fn dim_uses_full_height() {
        let glyph = GlyphDefinition::new("A", 5, 9, Vec::new());
        assert_eq!(glyph.band_count(), 1);
        assert_eq!(glyph.dim(), 5);
        let glyph = GlyphDefinition::new("B", 8, 16, Vec::new());
        assert_eq!(glyph.band_count(), 2);
        assert_eq!(glyph.dim(), 16);
    }
}
