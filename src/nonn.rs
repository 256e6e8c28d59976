//! Coordinates of stretches free of Ns in FASTA records
use std::io::BufRead;
use std::path::Path;

use crate::error::{Error, Result};
use crate::interval::Interval;

fn is_gap(base: u8, mask_repeats: bool) -> bool {
    match base {
        b'N' | b'n' => true,
        b'a' | b'c' | b'g' | b't' => mask_repeats,
        _ => false,
    }
}

/// Maximal runs of sequenced bases, 1-based. The first base of `seq` sits
/// at coordinate `offset + 1`. With `mask_repeats`, lower-case (soft-masked)
/// bases are treated like N.
pub fn non_n_runs(chrom: &str, offset: u64, seq: &[u8], mask_repeats: bool) -> Vec<Interval> {
    let mut ret: Vec<Interval> = vec![];
    let mut left: Option<u64> = None;

    for (i, &base) in seq.iter().enumerate() {
        let pos = offset + i as u64 + 1;
        match (is_gap(base, mask_repeats), left) {
            (true, Some(l)) => {
                ret.push(Interval::new(chrom, l, pos - 1));
                left = None;
            }
            (false, None) => left = Some(pos),
            _ => {}
        }
    }
    if let Some(l) = left {
        ret.push(Interval::new(chrom, l, offset + seq.len() as u64));
    }

    ret
}

/// Split a fragment header `<prefix>_<chrom>_<start>[_...]` into the
/// chromosome and the 0-based offset of its first base
pub fn parse_fragment_name(name: &str) -> Option<(String, u64)> {
    let mut fields = name.trim().split('_').skip(1);
    let chrom = fields.next()?;
    let start = fields.next()?.parse::<u64>().ok()?;
    if chrom.is_empty() || start == 0 {
        return None;
    }
    Some((chrom.to_string(), start - 1))
}

/// Read every record of a FASTA file and return its non-N runs in file order.
///
/// With `genomic`, each record is a whole chromosome named by the record
/// name. Otherwise the name is a fragment header, see [`parse_fragment_name`].
pub fn scan_fasta<R: BufRead>(
    reader: R,
    path: &Path,
    genomic: bool,
    mask_repeats: bool,
) -> Result<Vec<Interval>> {
    let mut fa_in = noodles_fasta::io::Reader::new(reader);
    let mut ret: Vec<Interval> = vec![];

    for (idx, result) in fa_in.records().enumerate() {
        let record = result.map_err(|e| Error::io(e, path))?;
        let name = String::from_utf8_lossy(record.name()).to_string();

        let (chrom, offset) = if genomic {
            (name, 0)
        } else {
            parse_fragment_name(&name).ok_or_else(|| {
                Error::format(
                    path,
                    idx + 1,
                    format!("record {} is not named <prefix>_<chrom>_<start>", name),
                )
            })?
        };

        let seq: &[u8] = record.sequence().as_ref();
        let runs = non_n_runs(&chrom, offset, seq, mask_repeats);
        debug!("{}: {} bases, {} runs", chrom, seq.len(), runs.len());
        ret.extend(runs);
    }

    Ok(ret)
}
