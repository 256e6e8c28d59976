//! Recurrence of reference UCEs across query interval sets
use std::io::Write;

use indexmap::IndexMap;

use crate::interval::Interval;

/// A reference UCE with one overlap counter per query set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledInterval {
    pub id: String,
    pub interval: Interval,
    /// exonic, intronic, intergenic, ...
    pub kind: String,
    pub gene: Option<String>,
    pub counts: Vec<u64>,
}

/// Reference UCEs keyed by ID, iterated in insertion order
pub type RefSet = IndexMap<String, LabeledInterval>;

/// One set of query intervals, labelled for the report header
#[derive(Clone, Debug)]
pub struct QuerySet {
    pub label: String,
    pub intervals: Vec<Interval>,
}

/// Count, for query set `n`, how many of `queries` overlap each reference.
///
/// Every query is checked against every reference, so this is
/// O(references x queries). Fine for UCE-sized reference sets.
///
/// Panics if a reference has fewer than `n + 1` counters; [`crate::io::read_uces`]
/// sizes them to the number of query sets.
pub fn tally_set(refs: &mut RefSet, n: usize, queries: &[Interval]) {
    debug_assert!(
        refs.values().all(|r| n < r.counts.len()),
        "query set {} has no counter slot",
        n
    );
    #[cfg(feature = "progbars")]
    let bar = indicatif::ProgressBar::new(queries.len() as u64);

    for q in queries {
        for r in refs.values_mut() {
            if r.interval.overlaps(q) {
                r.counts[n] += 1;
            }
        }
        #[cfg(feature = "progbars")]
        bar.inc(1);
    }

    #[cfg(feature = "progbars")]
    bar.finish_and_clear();
}

/// Fill every reference's counters from `sets`, slot `n` for `sets[n]`.
/// `refs` is updated in place; counters must already be sized to `sets.len()`.
pub fn tally(refs: &mut RefSet, sets: &[QuerySet]) {
    for (n, set) in sets.iter().enumerate() {
        info!(
            "checking for UCE recurrence in {} ({} intervals)",
            set.label,
            set.intervals.len()
        );
        tally_set(refs, n, &set.intervals);
    }
}

/// Write the tab-separated recurrence report
pub fn write_report<W: Write>(out: &mut W, refs: &RefSet, labels: &[String]) -> std::io::Result<()> {
    let header: Vec<String> = labels.iter().map(|l| format!("{} Count", l)).collect();
    writeln!(
        out,
        "UCE_ID\tChr\tStart\tStop\tType\tGene\t{}",
        header.join("\t")
    )?;
    for r in refs.values() {
        let counts: Vec<String> = r.counts.iter().map(|c| c.to_string()).collect();
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            r.id,
            r.interval,
            r.kind,
            r.gene.as_deref().unwrap_or(""),
            counts.join("\t")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uce(id: &str, chrom: &str, start: u64, stop: u64, n: usize) -> LabeledInterval {
        LabeledInterval {
            id: id.to_string(),
            interval: Interval::new(chrom, start, stop),
            kind: "intergenic".to_string(),
            gene: None,
            counts: vec![0; n],
        }
    }

    fn refset(v: Vec<LabeledInterval>) -> RefSet {
        v.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    #[test]
    fn counts_per_set() {
        let mut refs = refset(vec![uce("UCE1", "chr1", 10, 20, 2)]);
        let sets = vec![
            QuerySet {
                label: "set0".to_string(),
                intervals: vec![Interval::new("chr1", 5, 15)],
            },
            QuerySet {
                label: "set1".to_string(),
                intervals: vec![],
            },
        ];
        tally(&mut refs, &sets);
        assert_eq!(refs["UCE1"].counts, vec![1, 0]);
    }

    #[test]
    fn counts_not_booleans() {
        let mut refs = refset(vec![
            uce("UCE1", "chr1", 10, 20, 1),
            uce("UCE2", "chr1", 100, 200, 1),
            uce("UCE3", "chr2", 10, 20, 1),
        ]);
        let q = vec![
            Interval::new("chr1", 1, 10),
            Interval::new("chr1", 12, 14),
            Interval::new("chr1", 20, 150),
            Interval::new("chr1", 1000, 2000),
        ];
        tally_set(&mut refs, 0, &q);
        assert_eq!(refs["UCE1"].counts, vec![3]);
        assert_eq!(refs["UCE2"].counts, vec![1]);
        assert_eq!(refs["UCE3"].counts, vec![0]);
    }

    #[test]
    #[should_panic]
    fn set_index_past_counters() {
        let mut refs = refset(vec![uce("UCE1", "chr1", 10, 20, 1)]);
        tally_set(&mut refs, 1, &[Interval::new("chr1", 5, 15)]);
    }

    #[test]
    fn report_keeps_insertion_order() {
        let mut refs = refset(vec![
            uce("UCE9", "chr2", 10, 20, 2),
            uce("UCE1", "chr1", 10, 20, 2),
        ]);
        refs["UCE1"].gene = Some("PAX6".to_string());
        refs["UCE1"].counts = vec![2, 0];

        let mut out: Vec<u8> = vec![];
        write_report(&mut out, &refs, &["a.bed".to_string(), "b.bed".to_string()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "UCE_ID\tChr\tStart\tStop\tType\tGene\ta.bed Count\tb.bed Count",
                "UCE9\tchr2\t10\t20\tintergenic\t\t0\t0",
                "UCE1\tchr1\t10\t20\tintergenic\tPAX6\t2\t0",
            ]
        );
    }
}
