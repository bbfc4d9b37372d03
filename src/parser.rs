use std::path::Path;

use tracing::debug;

use crate::{
    error::{Error, ParseReason, Result},
    map::StationMap,
    planner::ChunkRange,
    scanner::LineScanner,
    temperature::{parse_temperature, Tenths},
};

/// Splits `<location>;<temperature>` on the last `;`, so a location may
/// itself contain the delimiter.
pub fn parse_line(line: &[u8]) -> Result<(&str, Tenths)> {
    let split = memchr::memrchr(b';', line)
        .ok_or_else(|| Error::parse(line, ParseReason::MissingDelimiter))?;
    let location = std::str::from_utf8(&line[..split])
        .map_err(|_| Error::parse(line, ParseReason::InvalidLocation))?;
    let temperature = parse_temperature(&line[split + 1..])
        .map_err(|_| Error::parse(line, ParseReason::InvalidTemperature))?;
    Ok((location, temperature))
}

/// Scans one chunk into a private map. The first error aborts the chunk and
/// nothing read so far is kept.
pub async fn aggregate_chunk(path: &Path, range: ChunkRange) -> Result<StationMap> {
    if range.is_empty() {
        return Ok(StationMap::with_capacity(0));
    }
    let mut scanner = LineScanner::open(path, range).await?;
    if range.skips_first_line() {
        scanner.next_line().await?;
    }

    let mut results = StationMap::new();
    let mut lines = 0u64;
    while let Some(line) = scanner.next_line().await? {
        let (location, temperature) = parse_line(&line)?;
        results.record(location, temperature);
        lines += 1;
    }

    debug!(
        start = range.start,
        end = ?range.end,
        stopped_at = scanner.offset(),
        lines,
        locations = results.len(),
        "chunk done"
    );
    Ok(results)
}
