use std::fmt;

/// Error taxonomy. See the crate's design notes: whole-system failures
/// (missing credentials, a corrupt descriptor) are fatal at startup only;
/// per-term and per-doc failures degrade gracefully and never reach here.
#[derive(Debug)]
pub enum ErrorKind {
    /// Credentials or bucket unreachable at startup.
    ConfigMissing,
    /// An index descriptor blob is missing or fails to decode.
    IndexLoadFailure,
    /// A posting file is missing, short, or unreadable.
    PostingReadFailure,
    /// The query string tokenized to nothing.
    MalformedQuery,
    Io,
    Parse,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: format!("csv: {}", err),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error {
            kind: ErrorKind::Internal,
            context: format!("regex: {}", err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: format!("json: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
