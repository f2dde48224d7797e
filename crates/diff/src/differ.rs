use std::collections::HashMap;
use std::ops::Range;
use std::time::{Duration, Instant};

use log::trace;
use similar::{capture_diff_slices_deadline, Algorithm, DiffTag};

use crate::token::DiffToken;

/// Similarity a pair of lines needs before it is shown as a single changed line
pub const DEFAULT_CUTOFF: f32 = 0.75;

/// Produces a line-level edit script with intraline hints.
///
/// Implementations must emit every left line as exactly one `Common` or
/// `Removed` token and every right line as exactly one `Common` or `Added`
/// token, in order. A `Hint` may only follow a `Removed` or `Added` token.
pub trait LineDiffer {
    fn diff<'a>(&self, left: &[&'a str], right: &[&'a str]) -> Vec<DiffToken<'a>>;
}

/// ndiff-style differ built on `similar`.
///
/// Replaced blocks are searched for their most similar pair of lines. Pairs at
/// or above the cutoff are emitted as a removed/added pair with character
/// markers; the lines around that pair are handled recursively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Differ {
    algorithm: Algorithm,
    cutoff: f32,
    timeout: Option<Duration>,
}

impl Default for Differ {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            cutoff: DEFAULT_CUTOFF,
            timeout: None,
        }
    }
}

impl Differ {
    pub fn new(algorithm: Algorithm, cutoff: f32, timeout: Option<Duration>) -> Self {
        Self {
            algorithm,
            cutoff,
            timeout,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn fancy_replace<'a>(
        &self,
        left: &[&'a str],
        old: Range<usize>,
        right: &[&'a str],
        new: Range<usize>,
        tokens: &mut Vec<DiffToken<'a>>,
    ) {
        let mut best: Option<(f32, usize, usize)> = None;
        let mut identical: Option<(usize, usize)> = None;

        for j in new.clone() {
            for i in old.clone() {
                if left[i] == right[j] {
                    identical.get_or_insert((i, j));
                    continue;
                }

                // Only pairs at the cutoff count, and a later pair must be
                // strictly better; both bounds are at least the real ratio
                let viable = move |bound: f32| match best {
                    Some((best_ratio, _, _)) => bound > best_ratio,
                    None => bound >= self.cutoff,
                };
                if !viable(length_bound(left[i], right[j])) || !viable(count_bound(left[i], right[j]))
                {
                    continue;
                }

                let ratio = self.similarity(left[i], right[j]);
                if viable(ratio) {
                    best = Some((ratio, i, j));
                }
            }
        }

        let (i, j, is_identical) = match (best, identical) {
            (Some((_, i, j)), _) => (i, j, false),
            (_, Some((i, j))) => (i, j, true),
            _ => {
                self.plain_replace(left, old, right, new, tokens);
                return;
            }
        };

        trace!("synch pair at left {} / right {} (identical: {})", i, j, is_identical);

        self.fancy_helper(left, old.start..i, right, new.start..j, tokens);

        if is_identical {
            tokens.push(DiffToken::Common(left[i]));
        } else {
            self.intraline(left[i], right[j], tokens);
        }

        self.fancy_helper(left, i + 1..old.end, right, j + 1..new.end, tokens);
    }

    fn fancy_helper<'a>(
        &self,
        left: &[&'a str],
        old: Range<usize>,
        right: &[&'a str],
        new: Range<usize>,
        tokens: &mut Vec<DiffToken<'a>>,
    ) {
        match (old.is_empty(), new.is_empty()) {
            (false, false) => self.fancy_replace(left, old, right, new, tokens),
            (false, true) => tokens.extend(left[old].iter().copied().map(DiffToken::Removed)),
            (true, false) => tokens.extend(right[new].iter().copied().map(DiffToken::Added)),
            (true, true) => {}
        }
    }

    /// Dump a block without pairing; the shorter side goes first
    fn plain_replace<'a>(
        &self,
        left: &[&'a str],
        old: Range<usize>,
        right: &[&'a str],
        new: Range<usize>,
        tokens: &mut Vec<DiffToken<'a>>,
    ) {
        let removed = left[old.clone()].iter().copied().map(DiffToken::Removed);
        let added = right[new.clone()].iter().copied().map(DiffToken::Added);

        if new.len() < old.len() {
            tokens.extend(added);
            tokens.extend(removed);
        } else {
            tokens.extend(removed);
            tokens.extend(added);
        }
    }

    /// Emit a changed pair with character markers for each side.
    ///
    /// Character diffs never run against the deadline, so the hints for a pair
    /// do not depend on how long the line diff took.
    fn intraline<'a>(&self, old_line: &'a str, new_line: &'a str, tokens: &mut Vec<DiffToken<'a>>) {
        let old_chars: Vec<char> = old_line.chars().collect();
        let new_chars: Vec<char> = new_line.chars().collect();

        let mut old_markers = String::with_capacity(old_chars.len());
        let mut new_markers = String::with_capacity(new_chars.len());

        let ops = capture_diff_slices_deadline(self.algorithm, &old_chars, &new_chars, None);
        for op in &ops {
            let (tag, old, new) = op.as_tag_tuple();
            let (old_marker, new_marker) = match tag {
                DiffTag::Equal => (' ', ' '),
                DiffTag::Delete => ('-', ' '),
                DiffTag::Insert => (' ', '+'),
                DiffTag::Replace => ('^', '^'),
            };
            old_markers.extend(std::iter::repeat(old_marker).take(old.len()));
            new_markers.extend(std::iter::repeat(new_marker).take(new.len()));
        }

        tokens.push(DiffToken::Removed(old_line));
        push_hint(tokens, &old_markers);
        tokens.push(DiffToken::Added(new_line));
        push_hint(tokens, &new_markers);
    }

    /// Character similarity, `2 * matches / total`
    fn similarity(&self, a: &str, b: &str) -> f32 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }

        let matches: usize = capture_diff_slices_deadline(self.algorithm, &a, &b, None)
            .iter()
            .map(|op| op.as_tag_tuple())
            .filter(|(tag, _, _)| *tag == DiffTag::Equal)
            .map(|(_, old, _)| old.len())
            .sum();

        2.0 * matches as f32 / total as f32
    }
}

/// Upper bound on `similarity` from the line lengths alone
fn length_bound(a: &str, b: &str) -> f32 {
    let (a, b) = (a.chars().count(), b.chars().count());
    match a + b {
        0 => 1.0,
        total => 2.0 * a.min(b) as f32 / total as f32,
    }
}

/// Upper bound on `similarity` from shared character counts, ignoring order
fn count_bound(a: &str, b: &str) -> f32 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }

    let mut shared = 0;
    let mut total = 0;
    for c in a.chars() {
        total += 1;
        if let Some(count) = available.get_mut(&c).filter(|count| **count > 0) {
            *count -= 1;
            shared += 1;
        }
    }
    total += b.chars().count();

    match total {
        0 => 1.0,
        total => 2.0 * shared as f32 / total as f32,
    }
}

fn push_hint(tokens: &mut Vec<DiffToken<'_>>, markers: &str) {
    let markers = markers.trim_end();
    if !markers.is_empty() {
        tokens.push(DiffToken::Hint(markers.to_string()));
    }
}

impl LineDiffer for Differ {
    fn diff<'a>(&self, left: &[&'a str], right: &[&'a str]) -> Vec<DiffToken<'a>> {
        // Only the line-level search is bounded by the timeout
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let ops = capture_diff_slices_deadline(self.algorithm, left, right, deadline);

        let mut tokens = Vec::with_capacity(left.len().max(right.len()));
        for op in &ops {
            let (tag, old, new) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => tokens.extend(left[old].iter().copied().map(DiffToken::Common)),
                DiffTag::Delete => tokens.extend(left[old].iter().copied().map(DiffToken::Removed)),
                DiffTag::Insert => tokens.extend(right[new].iter().copied().map(DiffToken::Added)),
                DiffTag::Replace => {
                    self.fancy_replace(left, old, right, new, &mut tokens)
                }
            }
        }

        tokens
    }
}
