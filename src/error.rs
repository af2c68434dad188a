use std::fmt::Display;

use bincode::ErrorKind;

/// Custom Result type for primdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for primdb
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown or duplicate table, bad column spec, unknown column
    Schema(String),
    /// Wrong value count or a literal that does not fit its column type
    Validation(String),
    /// Malformed command line, clause or quoting
    Syntax(String),
    /// Failed to write (or remove) a storage unit
    Storage(String),
}

impl Error {
    /// Prefixes the message with the column a value was meant for
    pub fn in_column(self, column: &str) -> Self {
        match self {
            Error::Validation(msg) => Error::Validation(format!("column '{}': {}", column, msg)),
            err => err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

impl From<Box<ErrorKind>> for Error {
    fn from(value: Box<ErrorKind>) -> Self {
        Error::Storage(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Schema(err) => write!(f, "schema error: {}", err),
            Error::Validation(err) => write!(f, "validation error: {}", err),
            Error::Syntax(err) => write!(f, "syntax error: {}", err),
            Error::Storage(err) => write!(f, "storage error: {}", err),
        }
    }
}
