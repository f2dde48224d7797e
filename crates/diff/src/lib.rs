// Side-by-side line comparison for Truthdiff
// This crate turns two line sequences into two aligned, tag-annotated columns

mod align;
mod config;
mod differ;
mod error;
mod hint;
mod tags;
mod token;

use log::debug;

pub use align::{align, AnnotatedLine, Comparison, LineStatus};
pub use config::CompareConfig;
pub use differ::{Differ, LineDiffer, DEFAULT_CUTOFF};
pub use error::{CompareError, Result, Side};
pub use hint::{extract_ranges, HighlightRange, MARKERS};
pub use similar::Algorithm;
pub use tags::{insert_tags, Markers, TagPair};
pub use token::{ndiff, DiffToken, TokenKind};

/// Compare two line sequences with the default configuration
pub fn compare<L, R>(left: &[L], right: &[R]) -> Result<Comparison>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    CompareConfig::default().compare(left, right)
}

/// Compare two line sequences using any line differ
pub fn compare_with<D, L, R>(
    differ: &D,
    markers: &Markers,
    left: &[L],
    right: &[R],
) -> Result<Comparison>
where
    D: LineDiffer + ?Sized,
    L: AsRef<str>,
    R: AsRef<str>,
{
    let left_lines: Vec<&str> = left.iter().map(|line| line.as_ref()).collect();
    let right_lines: Vec<&str> = right.iter().map(|line| line.as_ref()).collect();

    let tokens = differ.diff(&left_lines, &right_lines);
    debug!(
        "Diffed {} left / {} right lines into {} tokens",
        left_lines.len(),
        right_lines.len(),
        tokens.len()
    );

    align(&tokens, &left_lines, &right_lines, markers)
}
