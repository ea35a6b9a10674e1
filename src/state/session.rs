use crate::colors::generator::ColorEntry;

/// Color entries accumulated by the palette generator while the plugin is open.
///
/// Starts empty, grows with every accepted `add-color`, and only shrinks through
/// [`PaletteSession::clear`].
#[derive(Debug, Clone, Default)]
pub struct PaletteSession {
    entries: Vec<ColorEntry>,
}

impl PaletteSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping submission order.
    pub fn append(&mut self, entry: ColorEntry) {
        self.entries.push(entry);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in submission order.
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
