//! Readers and writers for interval, genome, UCE and report files
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::interval::{ChromBounds, Interval};
use crate::recurrence::{LabeledInterval, RefSet};

// The output is wrapped in a Result to allow matching on errors
// Returns an Iterator to the Reader of the lines of the file.
pub fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

/// Non-blank lines of a file with their 1-based line numbers, tabs split
fn records(file: &Path) -> Result<Vec<(usize, Vec<String>)>> {
    let lines = read_lines(file).map_err(|e| Error::io(e, file))?;
    let mut ret = vec![];
    for (idx, line) in lines.enumerate() {
        let line = line.map_err(|e| Error::io(e, file))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        ret.push((idx + 1, line.split('\t').map(|s| s.to_string()).collect()));
    }
    Ok(ret)
}

fn parse_coord(file: &Path, lineno: usize, name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::format(file, lineno, format!("{} '{}' is not an integer", name, value)))
}

/// Build an interval from `chrom, start, stop` columns, rejecting
/// coordinates that aren't 1-based with `start <= stop`
fn parse_interval(file: &Path, lineno: usize, cols: &[String]) -> Result<Interval> {
    let start = parse_coord(file, lineno, "start", &cols[1])?;
    let stop = parse_coord(file, lineno, "stop", &cols[2])?;
    if start == 0 {
        return Err(Error::format(file, lineno, "coordinates are 1-based, start is 0"));
    }
    if start > stop {
        return Err(Error::format(
            file,
            lineno,
            format!("start {} is after stop {}", start, stop),
        ));
    }
    Ok(Interval::new(cols[0].clone(), start, stop))
}

/// Read a three column interval file (chrom\tstart\tstop) in file order
pub fn read_intervals(file: &Path) -> Result<Vec<Interval>> {
    info!("parsing {}", file.display());
    let mut ret: Vec<Interval> = vec![];
    for (lineno, cols) in records(file)? {
        if cols.len() != 3 {
            return Err(Error::format(
                file,
                lineno,
                format!("expected 3 columns, found {}", cols.len()),
            ));
        }
        ret.push(parse_interval(file, lineno, &cols)?);
    }
    info!("loaded {} intervals", ret.len());

    Ok(ret)
}

/// Read a two column genome file (chrom\tlength)
pub fn read_genome(file: &Path) -> Result<ChromBounds> {
    info!("parsing {}", file.display());
    let mut ret = ChromBounds::new();
    for (lineno, cols) in records(file)? {
        if cols.len() < 2 {
            return Err(Error::format(file, lineno, "malformed genome line"));
        }
        let size = parse_coord(file, lineno, "length", &cols[1])?;
        ret.insert(cols[0].clone(), size);
    }
    info!("loaded {} chromosomes", ret.len());

    Ok(ret)
}

/// Read a UCE master file (ID\tchrom\tstart\tstop\ttype[\tgene]) with
/// `num_sets` zeroed counters per UCE. A repeated ID replaces the earlier
/// record but keeps its position.
pub fn read_uces(file: &Path, num_sets: usize) -> Result<RefSet> {
    info!("parsing {}", file.display());
    let mut ret = RefSet::new();
    for (lineno, cols) in records(file)? {
        if cols.len() < 5 || cols.len() > 6 {
            return Err(Error::format(
                file,
                lineno,
                format!("expected 5 or 6 columns, found {}", cols.len()),
            ));
        }
        let interval = parse_interval(file, lineno, &cols[1..4])?;
        let gene = cols.get(5).filter(|g| !g.is_empty()).cloned();
        let uce = LabeledInterval {
            id: cols[0].clone(),
            interval,
            kind: cols[4].clone(),
            gene,
            counts: vec![0; num_sets],
        };
        if ret.insert(uce.id.clone(), uce).is_some() {
            warn!("duplicate UCE ID {} on line {}", cols[0], lineno);
        }
    }
    info!("loaded {} UCEs", ret.len());

    Ok(ret)
}

/// Decides whether an existing output file may be replaced
pub trait OverwriteGuard {
    fn allow(&self, path: &Path) -> bool;
}

impl<F: Fn(&Path) -> bool> OverwriteGuard for F {
    fn allow(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Always overwrite
pub struct Force;

impl OverwriteGuard for Force {
    fn allow(&self, _path: &Path) -> bool {
        true
    }
}

/// Ask on the terminal, empty answer means yes
pub struct Prompt;

impl OverwriteGuard for Prompt {
    fn allow(&self, path: &Path) -> bool {
        let stdin = io::stdin();
        ask_overwrite(path, &mut stdin.lock(), &mut io::stderr())
    }
}

/// Keep asking until the answer is y or n. End of input counts as no.
pub fn ask_overwrite<R: BufRead, W: Write>(path: &Path, input: &mut R, prompt: &mut W) -> bool {
    loop {
        let _ = write!(
            prompt,
            "{} already exists, overwrite? [Y/n]: ",
            path.display()
        );
        let _ = prompt.flush();
        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }
        match answer.trim().to_lowercase().as_str() {
            "" | "y" => return true,
            "n" => return false,
            _ => {
                let _ = writeln!(prompt, "Please enter [Y/n]");
            }
        }
    }
}

/// Open an output sink. `stdout` writes to the screen; an existing file is
/// only replaced if the guard allows it.
pub fn writer(output: &Path, guard: &dyn OverwriteGuard) -> Result<Box<dyn Write>> {
    if output == Path::new("stdout") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if output.is_file() && !guard.allow(output) {
        return Err(Error::OverwriteDeclined {
            path: output.to_path_buf(),
        });
    }
    let file = File::create(output).map_err(|e| Error::io(e, output))?;

    Ok(Box::new(BufWriter::new(file)))
}

pub fn reader(input: &Path) -> Result<Box<dyn BufRead>> {
    if input == Path::new("stdin") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(input).map_err(|e| Error::io(e, input))?;

    Ok(Box::new(BufReader::new(file)))
}

pub fn write_intervals<W: Write + ?Sized>(out: &mut W, intervals: &[Interval]) -> io::Result<()> {
    for i in intervals {
        writeln!(out, "{}", i)?;
    }
    Ok(())
}

/// File name without directories, used to label query sets
pub fn label(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string())
}
