use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Characters that earn an extra pause while typing.
pub const PUNCTUATION: [&str; 6] = [".", ",", "!", "?", ";", ":"];

/// A phrase split into extended grapheme clusters.
///
/// Lengths and snapshots are measured in graphemes so that a snapshot never
/// splits an emoji or a combining sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    // Byte offset of the end of each grapheme.
    ends: Vec<usize>,
}

impl Phrase {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ends = text
            .grapheme_indices(true)
            .map(|(offset, g)| offset + g.len())
            .collect();
        Self { text, ends }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of graphemes.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// The first `len` graphemes. `len` is clamped to the phrase length.
    pub fn prefix(&self, len: usize) -> &str {
        match len.min(self.len()) {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    /// The grapheme at `index`, if any.
    pub fn grapheme(&self, index: usize) -> Option<&str> {
        let end = *self.ends.get(index)?;
        let start = if index == 0 { 0 } else { self.ends[index - 1] };
        Some(&self.text[start..end])
    }

    pub fn is_punctuation_at(&self, index: usize) -> bool {
        self.grapheme(index)
            .is_some_and(|g| PUNCTUATION.contains(&g))
    }

    /// Length of the longest common leading run of graphemes.
    pub fn common_prefix_len(&self, other: &Phrase) -> usize {
        (0..self.len().min(other.len()))
            .take_while(|&i| self.grapheme(i) == other.grapheme(i))
            .count()
    }
}

impl From<&str> for Phrase {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Phrase {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
