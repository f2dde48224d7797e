use derive_more::Display;
use std::fmt;

/// The kind of a diff token, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Line present on both sides
    #[display(fmt = "Common")]
    Common,

    /// Line only present on the left side
    #[display(fmt = "Removed")]
    Removed,

    /// Line only present on the right side
    #[display(fmt = "Added")]
    Added,

    /// Intraline markers for the preceding removed or added line
    #[display(fmt = "Hint")]
    Hint,
}

/// One step of a line-level edit script.
///
/// Line payloads borrow from the sequences that were compared. A `Hint` holds
/// a marker string aligned character-for-character with the line of the
/// token right before it: `-` deleted, `+` inserted, `^` replaced, ` ` equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffToken<'a> {
    Common(&'a str),
    Removed(&'a str),
    Added(&'a str),
    Hint(String),
}

impl DiffToken<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            DiffToken::Common(_) => TokenKind::Common,
            DiffToken::Removed(_) => TokenKind::Removed,
            DiffToken::Added(_) => TokenKind::Added,
            DiffToken::Hint(_) => TokenKind::Hint,
        }
    }

    /// The line text or marker string carried by this token
    pub fn text(&self) -> &str {
        match self {
            DiffToken::Common(line) | DiffToken::Removed(line) | DiffToken::Added(line) => line,
            DiffToken::Hint(markers) => markers,
        }
    }

    /// Two-character prefix used by the ndiff text format
    pub fn prefix(&self) -> &'static str {
        match self {
            DiffToken::Common(_) => "  ",
            DiffToken::Removed(_) => "- ",
            DiffToken::Added(_) => "+ ",
            DiffToken::Hint(_) => "? ",
        }
    }
}

impl fmt::Display for DiffToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.text())
    }
}

/// Render a token stream in ndiff form, one token per line
pub fn ndiff(tokens: &[DiffToken<'_>]) -> String {
    let mut result = String::new();

    for token in tokens {
        result.push_str(&token.to_string());
        result.push('\n');
    }

    result
}
