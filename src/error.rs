//! Error kinds raised while reading inputs and building clusters
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record that can't be turned into an interval. Fatal for the file.
    #[error("malformed line {line} in {}: {msg}", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        msg: String,
    },

    /// Chromosome missing from the genome file, usually a genome build mismatch
    #[error("chromosome {chrom} not found in genome; ensure all files are based on the same genome")]
    UnknownChromosome { chrom: String },

    /// Cluster width whose flank doesn't fit in a coordinate
    #[error("cluster width of {width_kb}kb is too large")]
    WidthTooLarge { width_kb: u64 },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("did not write to {}", .path.display())]
    OverwriteDeclined { path: PathBuf },
}

impl Error {
    pub fn format(path: impl Into<PathBuf>, line: usize, msg: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            line,
            msg: msg.into(),
        }
    }

    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
