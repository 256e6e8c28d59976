//! Genomic interval value type and the overlap predicate
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// chrom : length, used to clamp expanded intervals
pub type ChromBounds = HashMap<String, u64>;

/// A region on a chromosome, 1-based with both ends inclusive.
///
/// Callers are expected to uphold `1 <= start <= stop`; the readers in
/// [`crate::io`] reject records that don't. Ordering is lexicographic on
/// `(chrom, start, stop)`, which every scan in this crate relies on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Interval {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
}

impl Interval {
    pub fn new(chrom: impl Into<String>, start: u64, stop: u64) -> Self {
        Interval {
            chrom: chrom.into(),
            start,
            stop,
        }
    }

    /// Number of bases covered
    pub fn len(&self) -> u64 {
        self.stop - self.start + 1
    }

    /// True if the two intervals share at least one base.
    ///
    /// Checks whether either end of `self` falls inside `other`, then
    /// whether `self` surrounds `other`. The last case is what the endpoint
    /// tests miss, and together the three make the predicate symmetric.
    pub fn overlaps(&self, other: &Interval) -> bool {
        if self.chrom != other.chrom {
            return false;
        }
        other.contains_point(self.start)
            || other.contains_point(self.stop)
            || (self.start <= other.start && self.stop >= other.stop)
    }

    fn contains_point(&self, pos: u64) -> bool {
        pos >= self.start && pos <= self.stop
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.stop)
    }
}
