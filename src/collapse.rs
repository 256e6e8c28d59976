//! Merging of sorted intervals into a minimal cover
use crate::interval::Interval;

/// Merge overlapping and book-ended intervals.
///
/// `intervals` must already be sorted by `(chrom, start, stop)`; nothing is
/// re-sorted here. Intervals that merely touch (`stop + 1 == next.start`)
/// are joined, a gap of one base or more starts a new run.
pub fn collapse(intervals: &[Interval]) -> Vec<Interval> {
    let mut ret: Vec<Interval> = vec![];
    let mut iter = intervals.iter();

    let mut cur = match iter.next() {
        Some(i) => i.clone(),
        None => return ret,
    };

    for i in iter {
        if i.chrom != cur.chrom || i.start > cur.stop.saturating_add(1) {
            let done = std::mem::replace(&mut cur, i.clone());
            ret.push(done);
        } else if i.stop > cur.stop {
            cur.stop = i.stop;
        }
    }
    ret.push(cur);

    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_lapper::{Interval as LapIv, Lapper};

    fn iv(chrom: &str, start: u64, stop: u64) -> Interval {
        Interval::new(chrom, start, stop)
    }

    fn random_sorted(rng: &mut fastrand::Rng) -> Vec<Interval> {
        let chroms = ["chr1", "chr2", "chrX"];
        let mut v: Vec<Interval> = (0..rng.usize(1..40))
            .map(|_| {
                let start = rng.u64(1..500);
                iv(chroms[rng.usize(..chroms.len())], start, start + rng.u64(0..40))
            })
            .collect();
        v.sort();
        v
    }

    /// Bases covered per chromosome, computed by rust-lapper on half-open coordinates
    fn lapper_cov(intervals: &[Interval], chrom: &str) -> u64 {
        let ivs: Vec<LapIv<u64, u64>> = intervals
            .iter()
            .filter(|i| i.chrom == chrom)
            .map(|i| LapIv {
                start: i.start,
                stop: i.stop + 1,
                val: 0,
            })
            .collect();
        Lapper::new(ivs).cov()
    }

    #[test]
    fn empty() {
        assert!(collapse(&[]).is_empty());
    }

    #[test]
    fn single() {
        assert_eq!(collapse(&[iv("chr1", 5, 9)]), vec![iv("chr1", 5, 9)]);
    }

    #[test]
    fn adjacent_merge() {
        let v = vec![iv("chr1", 1, 10), iv("chr1", 11, 20)];
        assert_eq!(collapse(&v), vec![iv("chr1", 1, 20)]);
    }

    #[test]
    fn one_base_gap_splits() {
        let v = vec![iv("chr1", 1, 10), iv("chr1", 12, 20)];
        assert_eq!(collapse(&v), v);
    }

    #[test]
    fn contained_keeps_outer_stop() {
        let v = vec![iv("chr1", 1, 100), iv("chr1", 5, 10), iv("chr1", 50, 60)];
        assert_eq!(collapse(&v), vec![iv("chr1", 1, 100)]);
    }

    #[test]
    fn chromosome_change_splits() {
        let v = vec![iv("chr1", 1, 100), iv("chr2", 50, 60), iv("chr2", 55, 70)];
        assert_eq!(collapse(&v), vec![iv("chr1", 1, 100), iv("chr2", 50, 70)]);
    }

    #[test]
    fn end_of_coordinate_space() {
        let v = vec![iv("chr1", 1, u64::MAX), iv("chr1", 10, 20), iv("chr1", u64::MAX, u64::MAX)];
        assert_eq!(collapse(&v), vec![iv("chr1", 1, u64::MAX)]);
        let v = vec![iv("chr1", 1, 10), iv("chr1", u64::MAX - 1, u64::MAX)];
        assert_eq!(collapse(&v), v);
    }

    #[test]
    fn idempotent() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..200 {
            let once = collapse(&random_sorted(&mut rng));
            assert_eq!(collapse(&once), once);
        }
    }

    #[test]
    fn minimal_cover() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..200 {
            let out = collapse(&random_sorted(&mut rng));
            for w in out.windows(2) {
                assert!(w[0].chrom != w[1].chrom || w[0].stop + 1 < w[1].start);
            }
        }
    }

    #[test]
    fn coverage_conserved() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..200 {
            let input = random_sorted(&mut rng);
            let out = collapse(&input);
            for chrom in ["chr1", "chr2", "chrX"] {
                let merged: u64 = out.iter().filter(|i| i.chrom == chrom).map(|i| i.len()).sum();
                assert_eq!(merged, lapper_cov(&input, chrom));
            }
        }
    }
}
