use std::collections::BTreeMap;

/// One table row keyed by column label.
///
/// Blank cells are never stored, so `get` returning `None` covers both a
/// missing column and an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell. A second cell under the same label is appended with ", ",
    /// which is how spanned headers over several sub-columns come through.
    pub fn insert(&mut self, label: &str, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.cells
            .entry(label.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(text);
            })
            .or_insert_with(|| text.to_string());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells.get(label).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (label, text) in iter {
            row.insert(label, text);
        }
        row
    }
}
