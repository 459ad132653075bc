use std::{error::Error, fmt, io};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Failures of the fallible entry points.
///
/// Normalization and estimation never fail, so this only covers getting
/// the raw record in: reading it and decoding it as JSON.
#[derive(Debug)]
pub enum ReportError {
    /// The record could not be read.
    Io(io::Error),
    /// The record is not a JSON document.
    Json(serde_json::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "invalid model info record: {e}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(value: serde_json::Error) -> Self {
        // serde_json surfaces reader failures as its own error kind.
        if value.is_io() {
            return Self::Io(value.into());
        }
        Self::Json(value)
    }
}
