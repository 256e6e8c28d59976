//! Flank expansion of UCEs into clusters, and attribution of UCEs back to them
use serde::Serialize;

use crate::collapse::collapse;
use crate::error::{Error, Result};
use crate::interval::{ChromBounds, Interval};

/// Bases added per side for each kb of cluster width. The width is a total
/// window, so 2kb means 1000 bases on either side.
pub const FLANK_PER_KB: u64 = 500;

/// A cluster and the `(offset, length)` of every source interval inside it.
/// Offsets are from the cluster start, lengths are `stop - start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attribution {
    pub cluster: Interval,
    pub members: Vec<(i64, u64)>,
}

/// A cluster that no source interval falls into. Means the clusters and the
/// sources were built from different inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmptyCluster {
    pub cluster: Interval,
}

/// `to - from` as a signed distance, saturating at the i64 bounds
fn signed_offset(from: u64, to: u64) -> i64 {
    if to >= from {
        i64::try_from(to - from).unwrap_or(i64::MAX)
    } else {
        i64::try_from(from - to).map_or(i64::MIN, |d| -d)
    }
}

/// Expand every interval by `width_kb * 500` bases on both sides, clamp to
/// `[1, chromosome length]`, and collapse the result.
pub fn build_clusters(
    intervals: &[Interval],
    width_kb: u64,
    bounds: &ChromBounds,
) -> Result<Vec<Interval>> {
    let flank = width_kb
        .checked_mul(FLANK_PER_KB)
        .ok_or(Error::WidthTooLarge { width_kb })?;

    let mut expanded = intervals
        .iter()
        .map(|i| {
            let max_stop = *bounds
                .get(&i.chrom)
                .ok_or_else(|| Error::UnknownChromosome {
                    chrom: i.chrom.clone(),
                })?;
            Ok(Interval::new(
                i.chrom.clone(),
                std::cmp::max(1, i.start.saturating_sub(flank)),
                std::cmp::min(max_stop, i.stop.saturating_add(flank)),
            ))
        })
        .collect::<Result<Vec<Interval>>>()?;
    expanded.sort();
    debug!("expanded {} intervals by {}bp", expanded.len(), flank);

    Ok(collapse(&expanded))
}

/// Assign each source interval to the clusters it overlaps.
///
/// Both slices must be sorted. Clusters that end up empty are reported
/// separately and left out of the attributions; every cluster is visited.
pub fn attribute(
    clusters: &[Interval],
    sources: &[Interval],
) -> (Vec<Attribution>, Vec<EmptyCluster>) {
    let mut ret: Vec<Attribution> = vec![];
    let mut empties: Vec<EmptyCluster> = vec![];

    for c in clusters {
        let mut members: Vec<(i64, u64)> = vec![];
        for s in sources {
            if s.chrom != c.chrom || s.stop < c.start {
                continue;
            }
            // sources are sorted, nothing further along can reach this cluster
            if s.start > c.stop {
                break;
            }
            if s.overlaps(c) {
                members.push((signed_offset(c.start, s.start), s.stop - s.start));
            }
        }

        if members.is_empty() {
            empties.push(EmptyCluster { cluster: c.clone() });
        } else {
            ret.push(Attribution {
                cluster: c.clone(),
                members,
            });
        }
    }

    (ret, empties)
}
