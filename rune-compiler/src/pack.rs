//! Packing glyph bitmaps into column-major bytes.

use crate::glyph::{GlyphDefinition, BAND_HEIGHT};

/// The packed bitmap of a glyph.
///
/// Each band covers eight pixel rows and holds one byte per column. Within a
/// byte, the band's first row is the most significant bit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedPlanes {
    bands: Vec<Vec<u8>>,
}

impl PackedPlanes {
    /// The bands, from top to bottom.
    pub fn bands(&self) -> &[Vec<u8>] {
        &self.bands
    }

    /// The total number of packed bytes.
    pub fn len(&self) -> usize {
        self.bands.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All packed bytes, bands concatenated from top to bottom.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.bands.iter().flatten().copied()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bands.into_iter().flatten().collect()
    }
}

/// Pack the pixels of `glyph`.
///
/// Only whole bands are packed: if the height is not a multiple of eight the
/// trailing rows are dropped. Rows missing from the glyph are packed as unset
/// pixels.
pub fn pack(glyph: &GlyphDefinition) -> PackedPlanes {
    let width = glyph.width() as usize;
    let bands = (0..glyph.band_count())
        .map(|band| {
            let first_row = band * BAND_HEIGHT;
            (0..width)
                .map(|column| pack_column(glyph, first_row, column))
                .collect()
        })
        .collect();
    PackedPlanes { bands }
}

fn pack_column(glyph: &GlyphDefinition, first_row: usize, column: usize) -> u8 {
    (first_row..first_row + BAND_HEIGHT)
        .fold(0u8, |byte, row| (byte << 1) | glyph.pixel(row, column) as u8)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::glyph::Row;

    fn glyph(width: u16, height: u16, rows: &[&str]) -> GlyphDefinition {
        let rows = rows
            .iter()
            .map(|row| Row::from_bits(row.chars().map(|c| c == '1')))
            .collect();
        GlyphDefinition::new("test", width, height, rows)
    }

    #[test]
    fn half_filled_square() {
        let glyph = glyph(8, 8, &["11110000"; 8]);
        let packed = pack(&glyph);
        assert_eq!(
            packed.bands(),
            &[vec![0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]]
        );
    }

    #[test]
    fn first_row_is_most_significant() {
        let glyph = glyph(
            3,
            8,
            &["100", "010", "001", "000", "000", "000", "000", "111"],
        );
        let packed = pack(&glyph);
        assert_eq!(packed.into_bytes(), vec![0b1000_0001, 0b0100_0001, 0b0010_0001]);
    }

    #[test]
    fn bands_are_top_to_bottom() {
        let mut rows = vec!["10"; 8];
        rows.extend(["01"; 8]);
        let glyph = glyph(2, 16, &rows);
        let packed = pack(&glyph);
        assert_eq!(packed.bands(), &[vec![0xFF, 0x00], vec![0x00, 0xFF]]);
        assert_eq!(packed.bytes().collect::<Vec<_>>(), vec![0xFF, 0x00, 0x00, 0xFF]);
        assert_eq!(packed.len(), glyph.dim());
    }

    #[test]
    fn trailing_rows_are_dropped() {
        let mut rows = vec!["1"; 8];
        rows.push("1");
        let glyph = glyph(1, 9, &rows);
        let packed = pack(&glyph);
        assert_eq!(packed.bands(), &[vec![0xFF]]);
    }

    #[test]
    fn missing_rows_are_unset() {
        let glyph = glyph(2, 8, &["11", "11", "11"]);
        let packed = pack(&glyph);
        assert_eq!(packed.into_bytes(), vec![0b1110_0000, 0b1110_0000]);
    }

    #[test]
    fn empty_glyph() {
        let packed = pack(&GlyphDefinition::default());
        assert!(packed.is_empty());
        assert!(packed.bands().is_empty());
    }
}
