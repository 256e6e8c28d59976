//! Command line argument parser
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author = "Wu Lab", version, about = "Interval tools for UCE clustering and recurrence")]
pub struct ArgParser {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge overlapping and adjacent intervals
    Collapse(CollapseArgs),
    /// Expand UCEs by a flank and merge them into clusters
    Cluster(ClusterArgs),
    /// Count UCE recurrence across interval files
    Recur(RecurArgs),
    /// Total coverage and number of intervals per file
    Sum(SumArgs),
    /// Coordinates of stretches without Ns in a FASTA file
    Nonn(NonnArgs),
}

#[derive(Args)]
pub struct CollapseArgs {
    /// interval file (chrom\tstart\tstop), need not be sorted
    pub input: PathBuf,

    /// output file, `stdout` for screen
    #[arg(short, long, default_value = "stdout")]
    pub output: PathBuf,

    /// overwrite output without asking
    #[arg(short, long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args)]
pub struct ClusterArgs {
    /// UCE intervals (chrom\tstart\tstop)
    #[arg(short, long)]
    pub input: PathBuf,

    /// chromosome lengths (chrom\tlength)
    #[arg(short, long)]
    pub genome: PathBuf,

    /// total cluster window in kb; half goes on each side, so 2 means +-1000bp
    #[arg(short, long)]
    pub width: u64,

    /// output file, `stdout` for screen
    #[arg(short, long, default_value = "stdout")]
    pub output: PathBuf,

    /// also write UCE offsets and lengths per cluster to this file
    #[arg(long)]
    pub sizes: Option<PathBuf>,

    /// fail if any cluster ends up without UCEs
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// overwrite outputs without asking
    #[arg(short, long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args)]
pub struct RecurArgs {
    /// UCE master file (ID\tchrom\tstart\tstop\ttype\tgene)
    #[arg(short, long)]
    pub uces: PathBuf,

    /// one or more uncollapsed interval files
    #[arg(short, long, num_args = 1.., required = true)]
    pub against: Vec<PathBuf>,

    /// output file
    #[arg(short, long, default_value = "recurrent_UCEs.txt")]
    pub output: PathBuf,

    /// overwrite output without asking
    #[arg(short, long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args)]
pub struct SumArgs {
    /// one or more interval files
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// sum without collapsing overlapping intervals
    #[arg(short, long, default_value_t = false)]
    pub uncollapse: bool,

    /// report as json
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct NonnArgs {
    /// FASTA file, `stdin` to read from the pipe
    pub input: PathBuf,

    /// treat repeat-masked (lower-case) bases as N
    #[arg(short, long, default_value_t = false)]
    pub nonrep: bool,

    /// one record per chromosome, named by the chromosome (ex. >chr1)
    #[arg(short, long, default_value_t = false)]
    pub genomic: bool,

    /// output file, `stdout` for screen
    #[arg(short, long, default_value = "stdout")]
    pub output: PathBuf,

    /// overwrite output without asking
    #[arg(short, long, default_value_t = false)]
    pub force: bool,
}

fn check_file(path: &Path, flag: &str) -> bool {
    if !path.is_file() {
        error!("{} file {} doesn't exist", flag, path.display());
        return false;
    }
    true
}

impl ArgParser {
    /// Validate command line arguments
    pub fn validate(&self) -> bool {
        let mut is_ok = true;
        match &self.command {
            Command::Collapse(args) => {
                is_ok &= check_file(&args.input, "input");
            }
            Command::Cluster(args) => {
                is_ok &= check_file(&args.input, "--input");
                is_ok &= check_file(&args.genome, "--genome");
                if args.width == 0 {
                    error!("--width must be at least 1kb");
                    is_ok = false;
                }
            }
            Command::Recur(args) => {
                is_ok &= check_file(&args.uces, "--uces");
                for a in &args.against {
                    is_ok &= check_file(a, "--against");
                }
            }
            Command::Sum(args) => {
                for f in &args.files {
                    is_ok &= check_file(f, "input");
                }
            }
            Command::Nonn(args) => {
                if args.input != Path::new("stdin") {
                    is_ok &= check_file(&args.input, "input");
                }
            }
        }

        is_ok
    }
}
