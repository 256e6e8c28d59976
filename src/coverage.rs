//! Base coverage and interval counts of interval sets
use serde::Serialize;

use crate::collapse::collapse;
use crate::interval::Interval;

/// Bases covered and number of intervals in a set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    pub bases: u64,
    pub intervals: usize,
}

/// Sum inclusive lengths, optionally collapsing first so overlapping
/// intervals aren't counted twice. Input order doesn't matter.
pub fn summarize(intervals: &[Interval], collapse_first: bool) -> CoverageSummary {
    let collapsed;
    let set = if collapse_first {
        let mut sorted = intervals.to_vec();
        sorted.sort();
        collapsed = collapse(&sorted);
        &collapsed[..]
    } else {
        intervals
    };

    CoverageSummary {
        bases: set.iter().map(|i| i.len()).sum(),
        intervals: set.len(),
    }
}
