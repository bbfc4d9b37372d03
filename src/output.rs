use std::io::{self, Write};

use crate::{map::StationMap, temperature::format_tenths};

/// Anything the summary can be written to.
pub trait Sink {
    fn append_str(&mut self, text: &str) -> io::Result<()>;
    fn append_byte(&mut self, byte: u8) -> io::Result<()>;
}

impl<W: Write + ?Sized> Sink for W {
    #[inline]
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }

    #[inline]
    fn append_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }
}

/// Writes `{Loc=min/avg/max, ...}\n` with locations in byte order.
pub fn format_into<S: Sink + ?Sized>(results: &StationMap, sink: &mut S) -> io::Result<()> {
    sink.append_byte(b'{')?;
    for (index, (location, aggregate)) in results.sorted().into_iter().enumerate() {
        if index > 0 {
            sink.append_str(", ")?;
        }
        sink.append_str(location)?;
        sink.append_byte(b'=')?;
        sink.append_str(&format_tenths(aggregate.min.into()))?;
        sink.append_byte(b'/')?;
        sink.append_str(&format_tenths(aggregate.mean_tenths()))?;
        sink.append_byte(b'/')?;
        sink.append_str(&format_tenths(aggregate.max.into()))?;
    }
    sink.append_str("}\n")
}

pub fn format(results: &StationMap) -> String {
    let mut buffer = Vec::new();
    format_into(results, &mut buffer).expect("writing to a Vec cannot fail");
    String::from_utf8(buffer).expect("locations are valid UTF-8")
}
