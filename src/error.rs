use std::{fmt, io};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    MissingDelimiter,
    InvalidTemperature,
    InvalidLocation,
}

impl fmt::Display for ParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseReason::MissingDelimiter => "missing `;` delimiter",
            ParseReason::InvalidTemperature => "invalid temperature literal",
            ParseReason::InvalidLocation => "location is not valid UTF-8",
        })
    }
}

/// Everything that can abort a run. Both variants are fatal.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse { line: String, reason: ParseReason },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(line: &[u8], reason: ParseReason) -> Self {
        Error::Parse {
            line: String::from_utf8_lossy(line).into_owned(),
            reason,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error) => write!(f, "I/O error: {error}"),
            Error::Parse { line, reason } => write!(f, "parse error: {reason}, line: {line:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            Error::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}
