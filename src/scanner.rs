use std::{io::SeekFrom, path::Path};

use bytes::{Bytes, BytesMut};
use tokio::{fs::File, io::AsyncSeekExt};
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};

use crate::{error::Result, planner::ChunkRange};

// Tokio MAX_BUF for blocking IO: https://github.com/tokio-rs/tokio/blob/master/tokio/src/io/blocking.rs#L26
const BUFFER_SIZE: usize = 2 * 1024 * 1024;

/// Splits on `\n` and strips it. Lines may be arbitrarily long, the buffer
/// grows until a newline shows up.
#[derive(Debug, Default)]
pub struct LineDecoder {
    searched: usize,
}

impl Decoder for LineDecoder {
    type Item = Bytes;
    type Error = std::io::Error;

    #[inline]
    fn decode(
        &mut self,
        src: &mut BytesMut,
    ) -> std::result::Result<Option<Self::Item>, Self::Error> {
        match memchr::memchr(b'\n', &src[self.searched..]) {
            Some(index) => {
                let mut line = src.split_to(self.searched + index + 1);
                line.truncate(line.len() - 1);
                self.searched = 0;
                Ok(Some(line.freeze()))
            }
            None => {
                self.searched = src.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(
        &mut self,
        src: &mut BytesMut,
    ) -> std::result::Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            None => {
                self.searched = 0;
                Ok(Some(src.split().freeze()))
            }
        }
    }
}

/// Sequential reader over one [`ChunkRange`].
///
/// Yields lines until EOF or until the running offset has moved past the
/// range end. The line that starts at or before the end is always completed,
/// even when it finishes beyond it. A bounded range with `start == end` owns
/// no bytes and yields nothing.
pub struct LineScanner {
    lines: FramedRead<File, LineDecoder>,
    offset: u64,
    end: Option<u64>,
    exhausted: bool,
}

impl LineScanner {
    pub async fn open(path: &Path, range: ChunkRange) -> Result<Self> {
        let mut file = File::open(path).await?;
        file.seek(SeekFrom::Start(range.start)).await?;
        Ok(Self {
            lines: FramedRead::with_capacity(file, LineDecoder::default(), BUFFER_SIZE),
            offset: range.start,
            end: range.end,
            exhausted: range.is_empty(),
        })
    }

    /// Byte offset of the next line to be read.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub async fn next_line(&mut self) -> Result<Option<Bytes>> {
        if self.exhausted || self.end.is_some_and(|end| self.offset > end) {
            self.exhausted = true;
            return Ok(None);
        }
        match self.lines.next().await.transpose()? {
            Some(line) => {
                self.offset += line.len() as u64 + 1;
                Ok(Some(line))
            }
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }
}
