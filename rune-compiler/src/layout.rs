//! Locating each glyph in the concatenated data stream.

/// The position of one glyph's encoded data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutEntry {
    pub id: String,
    /// The glyph's position in declaration order, starting at 0.
    pub index: usize,
    /// The byte offset of the glyph's data in the concatenated stream.
    pub offset: usize,
    /// The number of encoded bytes.
    pub size: usize,
}

/// Assigns indices and offsets to glyphs as they are encoded.
#[derive(Clone, Debug, Default)]
pub struct LayoutAccumulator {
    entries: Vec<LayoutEntry>,
    total_size: usize,
}

/// The finished layout of all glyphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
    total_size: usize,
}

impl LayoutAccumulator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add the next glyph, returning its entry.
    pub fn push(&mut self, id: impl Into<String>, size: usize) -> &LayoutEntry {
        let entry = LayoutEntry {
            id: id.into(),
            index: self.entries.len(),
            offset: self.total_size,
            size,
        };
        self.total_size += size;
        self.entries.push(entry);
        // we just pushed, so there is a last entry
        &self.entries[self.entries.len() - 1]
    }

    /// The sum of the sizes of all glyphs so far.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn finish(self) -> Layout {
        Layout {
            entries: self.entries,
            total_size: self.total_size,
        }
    }
}

impl Layout {
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Look up the entry for a glyph identifier.
    pub fn get(&self, id: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.offset)
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.size)
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
