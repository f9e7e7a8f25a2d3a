//! Season and season-range types.

use crate::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// An inclusive range of seasons to extract.
///
/// Iteration is empty when `start > end`, mirroring an empty integer range
/// rather than treating it as an error: the run still produces a header-only
/// output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRange {
    pub start: Season,
    pub end: Season,
}

impl SeasonRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self {
            start: Season(start),
            end: Season(end),
        }
    }

    /// Seasons in ascending order, inclusive on both ends.
    pub fn iter(&self) -> impl Iterator<Item = Season> {
        (self.start.0..=self.end.0).map(Season)
    }

    /// Number of seasons covered (zero when the range is inverted).
    pub fn len(&self) -> usize {
        if self.start.0 > self.end.0 {
            0
        } else {
            usize::from(self.end.0 - self.start.0) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SeasonRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
