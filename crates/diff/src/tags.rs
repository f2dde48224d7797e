use crate::error::{CompareError, Result};
use crate::hint::HighlightRange;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opening and closing markers wrapped around a highlighted span
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagPair {
    pub open: String,
    pub close: String,
}

impl TagPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Wrap a whole line
    pub fn wrap(&self, line: &str) -> String {
        let mut result = String::with_capacity(line.len() + self.open.len() + self.close.len());
        result.push_str(&self.open);
        result.push_str(line);
        result.push_str(&self.close);
        result
    }
}

/// The two independent tag pairs used in an annotated comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Markers {
    /// Spans removed from or changed in the left side
    pub removed: TagPair,

    /// Spans added to or changed in the right side
    pub added: TagPair,
}

impl Markers {
    pub fn new(removed: TagPair, added: TagPair) -> Self {
        Self { removed, added }
    }

    /// `<removed>...</removed>` and `<added>...</added>`
    pub fn xml() -> Self {
        Self::new(
            TagPair::new("<removed>", "</removed>"),
            TagPair::new("<added>", "</added>"),
        )
    }

    /// Streamlit colored markdown: `:red[...]` and `:green[...]`
    pub fn streamlit() -> Self {
        Self::new(TagPair::new(":red[", "]"), TagPair::new(":green[", "]"))
    }

    /// HTML spans with `removed` / `added` classes
    pub fn html() -> Self {
        Self::new(
            TagPair::new("<span class=\"removed\">", "</span>"),
            TagPair::new("<span class=\"added\">", "</span>"),
        )
    }

    /// ANSI red / green foreground escapes
    pub fn ansi() -> Self {
        Self::new(
            TagPair::new("\x1b[31m", "\x1b[0m"),
            TagPair::new("\x1b[32m", "\x1b[0m"),
        )
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::xml()
    }
}

/// Insert `tags` around each range of `line`.
///
/// Ranges index characters of the untouched line and must be sorted and
/// disjoint. The result is built in one pass, copying the text between ranges
/// and writing the tags at the range boundaries.
pub fn insert_tags(line: &str, ranges: &[HighlightRange], tags: &TagPair) -> Result<String> {
    if ranges.is_empty() {
        return Ok(line.to_string());
    }

    // Byte offset of every char, plus the end of the line
    let boundaries: Vec<usize> = line
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(line.len()))
        .collect();
    let char_count = boundaries.len() - 1;

    let tag_len = tags.open.len() + tags.close.len();
    let mut result = String::with_capacity(line.len() + ranges.len() * tag_len);
    let mut copied = 0;
    let mut previous_end: Option<usize> = None;

    for range in ranges {
        let HighlightRange { start, end } = *range;

        if start > end {
            return Err(CompareError::InvertedRange { start, end });
        }
        if end >= char_count {
            return Err(CompareError::RangeOutOfBounds {
                start,
                end,
                len: char_count,
            });
        }
        if let Some(previous_end) = previous_end {
            if start <= previous_end {
                return Err(CompareError::OverlappingRange {
                    start,
                    end,
                    previous_end,
                });
            }
        }

        let open_at = boundaries[start];
        let close_at = boundaries[end + 1];

        result.push_str(&line[copied..open_at]);
        result.push_str(&tags.open);
        result.push_str(&line[open_at..close_at]);
        result.push_str(&tags.close);

        copied = close_at;
        previous_end = Some(end);
    }

    result.push_str(&line[copied..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle() -> TagPair {
        TagPair::new("<<", ">>")
    }

    fn ranges(pairs: &[(usize, usize)]) -> Vec<HighlightRange> {
        pairs.iter().copied().map(HighlightRange::from).collect()
    }

    #[test]
    fn test_single_range() {
        let result = insert_tags("hello", &ranges(&[(1, 2)]), &angle()).unwrap();
        assert_eq!(result, "h<<el>>lo");
    }

    #[test]
    fn test_offsets_across_insertions() {
        let result = insert_tags("hello", &ranges(&[(0, 0), (2, 2)]), &angle()).unwrap();
        assert_eq!(result, "<<h>>e<<l>>lo");
    }

    #[test]
    fn test_adjacent_ranges() {
        let result = insert_tags("abcd", &ranges(&[(0, 1), (2, 3)]), &angle()).unwrap();
        assert_eq!(result, "<<ab>><<cd>>");
    }

    #[test]
    fn test_no_ranges() {
        assert_eq!(insert_tags("hello", &[], &angle()).unwrap(), "hello");
        assert_eq!(insert_tags("", &[], &angle()).unwrap(), "");
    }

    #[test]
    fn test_multibyte_characters() {
        let result = insert_tags("naïve café", &ranges(&[(2, 2), (9, 9)]), &angle()).unwrap();
        assert_eq!(result, "na<<ï>>ve caf<<é>>");
    }

    #[test]
    fn test_out_of_bounds() {
        let err = insert_tags("abc", &ranges(&[(1, 3)]), &angle()).unwrap_err();
        assert_eq!(
            err,
            CompareError::RangeOutOfBounds {
                start: 1,
                end: 3,
                len: 3
            }
        );
    }

    #[test]
    fn test_overlapping_and_inverted() {
        let err = insert_tags("abcdef", &ranges(&[(0, 2), (2, 4)]), &angle()).unwrap_err();
        assert!(matches!(err, CompareError::OverlappingRange { previous_end: 2, .. }));

        let err = insert_tags("abcdef", &ranges(&[(3, 1)]), &angle()).unwrap_err();
        assert_eq!(err, CompareError::InvertedRange { start: 3, end: 1 });
    }

    #[test]
    fn test_wrap_and_presets() {
        assert_eq!(Markers::xml().removed.wrap("gone"), "<removed>gone</removed>");
        assert_eq!(Markers::streamlit().added.wrap("new"), ":green[new]");
        assert_eq!(Markers::default(), Markers::xml());
    }
}
