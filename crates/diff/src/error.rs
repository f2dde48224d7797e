use derive_more::Display;
use thiserror::Error;

/// Which side of a comparison a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The ground truth (old) lines
    #[display(fmt = "left")]
    Left,

    /// The candidate (new) lines
    #[display(fmt = "right")]
    Right,
}

/// Contract violations raised by the annotation pipeline.
///
/// None of these are caused by user data: they mean the token stream or the
/// highlight ranges handed to the pipeline were built incorrectly. A call that
/// hits one of them returns no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// A hint token that does not directly follow a removed or added line
    #[error("hint token at position {position} does not follow a removed or added line")]
    OrphanHint { position: usize },

    /// The token stream asked for more lines than one side holds
    #[error("token {position} reads past the end of the {side} lines ({len} available)")]
    CursorOverrun {
        side: Side,
        position: usize,
        len: usize,
    },

    /// The token stream ended before every line was consumed
    #[error("token stream ended with {remaining} {side} line(s) unconsumed")]
    UnconsumedLines { side: Side, remaining: usize },

    /// A highlight range reaching past the end of its line
    #[error("highlight range {start}..={end} exceeds line of {len} characters")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// A highlight range whose start lies after its end
    #[error("highlight range {start}..={end} is inverted")]
    InvertedRange { start: usize, end: usize },

    /// A highlight range starting at or before the end of the previous one
    #[error("highlight range {start}..={end} overlaps previous range ending at {previous_end}")]
    OverlappingRange {
        start: usize,
        end: usize,
        previous_end: usize,
    },
}

pub type Result<T> = std::result::Result<T, CompareError>;
