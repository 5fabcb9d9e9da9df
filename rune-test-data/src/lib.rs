//! test data shared between the rune font crates.

/// Four well-formed glyphs, followed by an `END` directive and a glyph that
/// must be ignored.
pub static DIGITS: &str = include_str!("../test_data/glyphs/digits.txt");

/// Input that triggers every kind of diagnostic.
pub static BROKEN: &str = include_str!("../test_data/glyphs/broken.txt");

/// Input that declares the glyph `A` twice.
pub static DUPLICATES: &str = include_str!("../test_data/glyphs/duplicates.txt");

pub mod fixtures {
    include!(concat!(env!("OUT_DIR"), "/fixtures.rs"));
}

/// Expected results for [`DIGITS`].
pub mod digits {
    /// `(id, width, height, offset, size)` for each glyph.
    pub static LAYOUT: &[(&str, u16, u16, usize, usize)] = &[
        ("ZERO", 5, 8, 0, 10),
        ("ONE", 5, 8, 10, 8),
        ("SPACE", 3, 8, 18, 2),
        ("BLOCK", 4, 16, 20, 2),
    ];

    /// The header generated with the default options.
    pub static HEADER: &str = include_str!("../test_data/expected/digits.h");

    /// The data tables generated with the default options.
    pub static DATA: &str = include_str!("../test_data/expected/digits.inc");

    #[rustfmt::skip]
    pub static PAYLOAD: &[u8] = &[
        // ZERO: 7c 8a 92 a2 7c
        0x01, 0x7c, 0x01, 0x8a, 0x01, 0x92, 0x01, 0xa2, 0x01, 0x7c,
        // ONE: 00 42 fe 02 00
        0x00, 0x01, 0x42, 0x01, 0xfe, 0x01, 0x02, 0x00,
        // SPACE: 00 00 00
        0x03, 0x00,
        // BLOCK: ff * 8
        0x08, 0xff,
    ];
}
