#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marker characters that flag a character for highlighting
pub const MARKERS: [char; 3] = ['+', '-', '^'];

/// An inclusive range of character indices within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HighlightRange {
    /// First highlighted character (0-based)
    pub start: usize,

    /// Last highlighted character (inclusive)
    pub end: usize,
}

impl HighlightRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

impl From<(usize, usize)> for HighlightRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Find the maximal runs of a single marker character in a hint string.
///
/// Runs of different markers stay separate even when adjacent, so `"+-"`
/// yields two ranges. Any other character is a gap between runs.
pub fn extract_ranges(hint: &str) -> Vec<HighlightRange> {
    let mut ranges = Vec::new();
    let mut run: Option<(char, usize)> = None;

    for (index, c) in hint.chars().enumerate() {
        match run {
            Some((marker, _)) if marker == c => continue,
            Some((_, start)) => {
                ranges.push(HighlightRange::new(start, index - 1));
                run = None;
            }
            None => {}
        }

        if MARKERS.contains(&c) {
            run = Some((c, index));
        }
    }

    if let Some((_, start)) = run {
        let len = hint.chars().count();
        ranges.push(HighlightRange::new(start, len - 1));
    }

    ranges
}
