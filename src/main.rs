extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use std::io::Write;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

mod cli;
mod cluster;
mod collapse;
mod coverage;
mod error;
mod interval;
mod io;
mod nonn;
mod recurrence;

use cli::{ArgParser, ClusterArgs, CollapseArgs, Command, NonnArgs, RecurArgs, SumArgs};
use io::OverwriteGuard;

fn guard(force: bool) -> Box<dyn OverwriteGuard> {
    if force {
        Box::new(io::Force)
    } else {
        Box::new(io::Prompt)
    }
}

fn run_collapse(args: &CollapseArgs) -> anyhow::Result<()> {
    let mut intervals = io::read_intervals(&args.input)?;
    intervals.sort();
    let merged = collapse::collapse(&intervals);
    info!("collapsed {} intervals into {}", intervals.len(), merged.len());

    let mut out = io::writer(&args.output, guard(args.force).as_ref())?;
    io::write_intervals(&mut out, &merged)?;
    out.flush()?;
    Ok(())
}

fn run_cluster(args: &ClusterArgs) -> anyhow::Result<()> {
    let genome = io::read_genome(&args.genome)?;
    let mut uces = io::read_intervals(&args.input)?;
    uces.sort();

    let clusters = cluster::build_clusters(&uces, args.width, &genome)
        .with_context(|| format!("clustering {}", args.input.display()))?;
    info!(
        "{} UCEs formed {} clusters at {}kb",
        uces.len(),
        clusters.len(),
        args.width
    );

    let guard = guard(args.force);
    let mut out = io::writer(&args.output, guard.as_ref())?;
    io::write_intervals(&mut out, &clusters)?;
    out.flush()?;

    let Some(sizes) = &args.sizes else {
        return Ok(());
    };
    let (attributions, empties) = cluster::attribute(&clusters, &uces);
    let mut out = io::writer(sizes, guard.as_ref())?;
    for a in &attributions {
        let members: Vec<String> = a
            .members
            .iter()
            .map(|(offset, len)| format!("{}:{}", offset, len))
            .collect();
        writeln!(out, "{}\t{}", a.cluster, members.join(","))?;
    }
    out.flush()?;

    check_empty_clusters(&empties, args.strict)
}

/// Log every cluster without UCEs; with `strict` their presence is an error
fn check_empty_clusters(empties: &[cluster::EmptyCluster], strict: bool) -> anyhow::Result<()> {
    for e in empties {
        warn!("no UCEs in cluster: {}", e.cluster);
    }
    if !empties.is_empty() {
        warn!("{} clusters without UCEs", empties.len());
        if strict {
            bail!("cluster and UCE sets are inconsistent");
        }
    }
    Ok(())
}

fn run_recur(args: &RecurArgs) -> anyhow::Result<()> {
    let mut refs = io::read_uces(&args.uces, args.against.len())?;
    let sets = args
        .against
        .iter()
        .map(|file| -> anyhow::Result<recurrence::QuerySet> {
            Ok(recurrence::QuerySet {
                label: io::label(file),
                intervals: io::read_intervals(file)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    recurrence::tally(&mut refs, &sets);

    let labels: Vec<String> = sets.into_iter().map(|s| s.label).collect();
    let guard = guard(args.force);
    let mut out = io::writer(&args.output, guard.as_ref())?;
    recurrence::write_report(&mut out, &refs, &labels)?;
    out.flush()?;
    info!("wrote to {}", args.output.display());
    Ok(())
}

#[derive(Serialize)]
struct FileSummary {
    file: String,
    #[serde(flatten)]
    summary: coverage::CoverageSummary,
}

fn run_sum(args: &SumArgs) -> anyhow::Result<()> {
    if !args.uncollapse {
        info!("collapsing overlapping intervals");
    }
    let mut out = std::io::stdout().lock();
    let mut reports: Vec<FileSummary> = vec![];

    for file in &args.files {
        let intervals = io::read_intervals(file)
            .with_context(|| format!("unable to parse lines in {}", file.display()))?;
        let summary = coverage::summarize(&intervals, !args.uncollapse);
        if args.json {
            reports.push(FileSummary {
                file: file.display().to_string(),
                summary,
            });
        } else {
            writeln!(
                out,
                "{}\t{}\t{}",
                file.display(),
                summary.intervals,
                summary.bases
            )?;
        }
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string(&reports)?)?;
    }
    Ok(())
}

fn run_nonn(args: &NonnArgs) -> anyhow::Result<()> {
    if args.nonrep {
        info!("removing repeat-masked elements");
    }
    let reader = io::reader(&args.input)?;
    let runs = nonn::scan_fasta(reader, &args.input, args.genomic, args.nonrep)?;
    info!("found {} non-N stretches", runs.len());

    let mut out = io::writer(&args.output, guard(args.force).as_ref())?;
    io::write_intervals(&mut out, &runs)?;
    out.flush()?;
    Ok(())
}

fn main() {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    let args = ArgParser::parse();
    if !args.validate() {
        error!("please fix arguments");
        std::process::exit(1);
    }

    let result = match &args.command {
        Command::Collapse(a) => run_collapse(a),
        Command::Cluster(a) => run_cluster(a),
        Command::Recur(a) => run_recur(a),
        Command::Sum(a) => run_sum(a),
        Command::Nonn(a) => run_nonn(a),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
