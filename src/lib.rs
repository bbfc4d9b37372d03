//! Per-location min/mean/max over a `<location>;<temperature>` file.
//!
//! The file is cut into byte ranges, each range is scanned by its own worker
//! into a private [`map::StationMap`], and the partial maps are merged once
//! every worker has reported back.

pub mod config;
pub mod error;
pub mod map;
pub mod output;
pub mod parser;
pub mod planner;
pub mod pool;
pub mod scanner;
pub mod temperature;

pub use error::{Error, Result};
pub use pool::{process_file, ChunkPool};
