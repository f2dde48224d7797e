use std::time::Duration;

use log::debug;
use rayon::prelude::*;
use similar::Algorithm;

use crate::align::Comparison;
use crate::differ::{Differ, LineDiffer, DEFAULT_CUTOFF};
use crate::error::Result;
use crate::tags::Markers;
use crate::token::DiffToken;

/// Settings for a side-by-side comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    /// The line and character diff algorithm
    algorithm: Algorithm,

    /// Minimum similarity for two lines to be paired as a change
    cutoff: f32,

    /// Give up on an optimal diff after this long
    timeout: Option<Duration>,

    /// Tags written around highlighted spans
    markers: Markers,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            cutoff: DEFAULT_CUTOFF,
            timeout: None,
            markers: Markers::default(),
        }
    }
}

impl CompareConfig {
    /// Set the diff algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the similarity cutoff, clamped to `0.0..=1.0`. NaN is ignored.
    pub fn cutoff(mut self, cutoff: f32) -> Self {
        if !cutoff.is_nan() {
            self.cutoff = cutoff.clamp(0.0, 1.0);
        }
        self
    }

    /// Set the diff timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the highlight tags
    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn get_markers(&self) -> &Markers {
        &self.markers
    }

    /// The differ described by this configuration
    pub fn differ(&self) -> Differ {
        Differ::new(self.algorithm, self.cutoff, self.timeout)
    }

    /// Token stream for two line sequences
    pub fn tokens<'a>(&self, left: &[&'a str], right: &[&'a str]) -> Vec<DiffToken<'a>> {
        self.differ().diff(left, right)
    }

    /// Compare two line sequences
    pub fn compare<L, R>(&self, left: &[L], right: &[R]) -> Result<Comparison>
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        crate::compare_with(&self.differ(), &self.markers, left, right)
    }

    /// Compare many pairs in parallel.
    ///
    /// Results come back in input order; a failed pair does not affect the
    /// others.
    pub fn compare_batch<L, R>(&self, pairs: &[(Vec<L>, Vec<R>)]) -> Vec<Result<Comparison>>
    where
        L: AsRef<str> + Sync,
        R: AsRef<str> + Sync,
    {
        debug!("Comparing {} pairs in parallel", pairs.len());

        pairs
            .par_iter()
            .map(|(left, right)| self.compare(left, right))
            .collect()
    }
}
