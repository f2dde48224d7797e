use derive_more::Display;
use log::trace;

use crate::error::{CompareError, Result, Side};
use crate::hint::extract_ranges;
use crate::tags::{insert_tags, Markers, TagPair};
use crate::token::DiffToken;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a row entry relates to the other side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineStatus {
    /// Identical on both sides
    #[display(fmt = "Unchanged")]
    Unchanged,

    /// Paired with a similar line, differing spans highlighted
    #[display(fmt = "Changed")]
    Changed,

    /// Only on the left, whole line highlighted
    #[display(fmt = "Removed")]
    Removed,

    /// Only on the right, whole line highlighted
    #[display(fmt = "Added")]
    Added,

    /// Removed line followed by an unrelated addition, shown as is
    #[display(fmt = "Unpaired")]
    Unpaired,

    /// Empty filler keeping the two sides row-aligned
    #[display(fmt = "Placeholder")]
    Placeholder,
}

/// A line of output with its highlight tags embedded
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotatedLine {
    /// Display text, tags included
    pub text: String,

    /// Index of the original line, `None` for placeholders
    pub source: Option<usize>,

    pub status: LineStatus,
}

impl AnnotatedLine {
    fn new(text: String, source: usize, status: LineStatus) -> Self {
        Self {
            text,
            source: Some(source),
            status,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            text: String::new(),
            source: None,
            status: LineStatus::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.status == LineStatus::Placeholder
    }
}

/// Two annotated columns built from the same token stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comparison {
    pub left: Vec<AnnotatedLine>,
    pub right: Vec<AnnotatedLine>,
}

impl Comparison {
    /// Left column as plain text rows
    pub fn left_texts(&self) -> Vec<&str> {
        self.left.iter().map(|line| line.text.as_str()).collect()
    }

    /// Right column as plain text rows
    pub fn right_texts(&self) -> Vec<&str> {
        self.right.iter().map(|line| line.text.as_str()).collect()
    }

    /// Whether any row differs between the two sides
    pub fn has_changes(&self) -> bool {
        self.left
            .iter()
            .chain(&self.right)
            .any(|line| line.status != LineStatus::Unchanged)
    }

    /// Number of rows highlighted in the left column
    pub fn removed_lines(&self) -> usize {
        count_highlighted(&self.left)
    }

    /// Number of rows highlighted in the right column
    pub fn added_lines(&self) -> usize {
        count_highlighted(&self.right)
    }
}

fn count_highlighted(lines: &[AnnotatedLine]) -> usize {
    lines
        .iter()
        .filter(|line| {
            matches!(
                line.status,
                LineStatus::Changed | LineStatus::Removed | LineStatus::Added
            )
        })
        .count()
}

/// Forward-only reader over one side's original lines
struct Cursor<'a, S> {
    lines: &'a [S],
    next: usize,
    side: Side,
}

impl<'a, S: AsRef<str>> Cursor<'a, S> {
    fn new(lines: &'a [S], side: Side) -> Self {
        Self {
            lines,
            next: 0,
            side,
        }
    }

    /// Take the next line, returning its index and text
    fn take(&mut self, position: usize) -> Result<(usize, &'a str)> {
        let lines = self.lines;
        let index = self.next;
        let line = lines.get(index).ok_or(CompareError::CursorOverrun {
            side: self.side,
            position,
            len: lines.len(),
        })?;
        self.next += 1;
        Ok((index, line.as_ref()))
    }

    fn finish(&self) -> Result<()> {
        let remaining = self.lines.len() - self.next;
        if remaining > 0 {
            return Err(CompareError::UnconsumedLines {
                side: self.side,
                remaining,
            });
        }
        Ok(())
    }
}

fn highlight(line: &str, hint: &str, tags: &TagPair) -> Result<String> {
    insert_tags(line, &extract_ranges(hint), tags)
}

/// Walk a token stream and build the two annotated columns.
///
/// Each step matches the current token together with the one after it. A
/// `Hint` is only ever consumed as the lookahead of a removed or added line;
/// meeting one on its own means the stream is malformed.
pub fn align<L, R>(
    tokens: &[DiffToken<'_>],
    left_lines: &[L],
    right_lines: &[R],
    markers: &Markers,
) -> Result<Comparison>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut left = Cursor::new(left_lines, Side::Left);
    let mut right = Cursor::new(right_lines, Side::Right);
    let mut output = Comparison::default();
    let mut position = 0;

    while let Some(token) = tokens.get(position) {
        let next = tokens.get(position + 1);

        let consumed = match (token, next) {
            (DiffToken::Common(_), _) => {
                let (i, left_line) = left.take(position)?;
                let (j, right_line) = right.take(position)?;
                output.left.push(AnnotatedLine::new(
                    left_line.to_string(),
                    i,
                    LineStatus::Unchanged,
                ));
                output.right.push(AnnotatedLine::new(
                    right_line.to_string(),
                    j,
                    LineStatus::Unchanged,
                ));
                1
            }
            (DiffToken::Removed(_), Some(DiffToken::Hint(hint))) => {
                let (i, line) = left.take(position)?;
                let text = highlight(line, hint, &markers.removed)?;
                output
                    .left
                    .push(AnnotatedLine::new(text, i, LineStatus::Changed));
                2
            }
            (DiffToken::Removed(_), Some(DiffToken::Added(_))) => {
                let (i, line) = left.take(position)?;
                output
                    .left
                    .push(AnnotatedLine::new(line.to_string(), i, LineStatus::Unpaired));
                output.right.push(AnnotatedLine::placeholder());
                1
            }
            (DiffToken::Removed(_), _) => {
                let (i, line) = left.take(position)?;
                output.left.push(AnnotatedLine::new(
                    markers.removed.wrap(line),
                    i,
                    LineStatus::Removed,
                ));
                output.right.push(AnnotatedLine::placeholder());
                1
            }
            (DiffToken::Added(_), Some(DiffToken::Hint(hint))) => {
                let (j, line) = right.take(position)?;
                let text = highlight(line, hint, &markers.added)?;
                output
                    .right
                    .push(AnnotatedLine::new(text, j, LineStatus::Changed));
                2
            }
            (DiffToken::Added(_), _) => {
                let (j, line) = right.take(position)?;
                output.left.push(AnnotatedLine::placeholder());
                output.right.push(AnnotatedLine::new(
                    markers.added.wrap(line),
                    j,
                    LineStatus::Added,
                ));
                1
            }
            (DiffToken::Hint(_), _) => return Err(CompareError::OrphanHint { position }),
        };

        trace!("token {} ({}) consumed {} step(s)", position, token.kind(), consumed);
        position += consumed;
    }

    left.finish()?;
    right.finish()?;

    Ok(output)
}
