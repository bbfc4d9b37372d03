use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;

use crate::planner::default_chunks;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input file, one `<location>;<temperature>` reading per line.
    pub path: PathBuf,

    /// Number of chunks and workers. Falls back to the number of CPUs when
    /// missing, zero, or not a number.
    pub chunks: Option<String>,
}

impl Args {
    pub fn chunks(&self) -> NonZeroUsize {
        self.chunks
            .as_deref()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(default_chunks)
    }
}
