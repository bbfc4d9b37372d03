use std::num::NonZeroUsize;

/// A nominal byte range of the input. `end == None` means "to end of file".
///
/// Lines are owned by the boundary protocol, not by the raw bytes: a chunk
/// that starts past zero skips its first (partial) line, and every chunk
/// finishes the line that starts at or before its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ChunkRange {
    pub const fn new(start: u64, end: Option<u64>) -> Self {
        Self { start, end }
    }

    /// A bounded range that covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.end == Some(self.start)
    }

    /// Whether the first line read belongs to the previous chunk.
    pub fn skips_first_line(&self) -> bool {
        self.start != 0
    }
}

/// Splits `file_size` bytes into `chunks` contiguous ranges. The last range is
/// open-ended and absorbs the division remainder.
pub fn plan(file_size: u64, chunks: NonZeroUsize) -> Vec<ChunkRange> {
    let count = chunks.get() as u64;
    let chunk_size = file_size / count;
    (0..count)
        .map(|index| {
            let start = index * chunk_size;
            let end = (index < count - 1).then(|| start + chunk_size);
            ChunkRange::new(start, end)
        })
        .collect()
}

/// Number of parallel execution units on this host.
pub fn default_chunks() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}
