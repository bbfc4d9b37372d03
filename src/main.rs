use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::{prelude::*, EnvFilter};
use weather_stats::{
    config::Args, output::format_into, planner::default_chunks, process_file,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()?;

    let args = Args::parse();
    let chunks = args.chunks();

    // Chunks are tasks, threads stay capped at the CPU count.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(chunks.min(default_chunks()).get())
        .enable_all()
        .build()
        .context("building runtime")?;
    let results = runtime
        .block_on(process_file(&args.path, chunks))
        .with_context(|| format!("processing {}", args.path.display()))?;

    // Nothing reaches stdout unless every chunk succeeded.
    let mut output = Vec::with_capacity(64 * 1024);
    format_into(&results, &mut output)?;
    io::stdout().lock().write_all(&output)?;
    Ok(())
}
