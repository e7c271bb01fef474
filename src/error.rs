/// Error types for the tree builder library
use std::fmt;

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Main error type for tree building operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The address resolver could not parse a network string
    BadAddress(String),

    /// A v6 network was given to a v4-only tree
    InvalidFamily(String),

    /// A constructor argument was out of range (record size, ip version, ...)
    InvalidArgument(String),

    /// A host lookup landed on a NODE record, which should never happen
    StructuralError(String),

    /// I/O errors from the output sink
    Io(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::BadAddress(msg) => write!(f, "bad address: {}", msg),
            TreeError::InvalidFamily(msg) => write!(f, "invalid family: {}", msg),
            TreeError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            TreeError::StructuralError(msg) => write!(f, "structural error: {}", msg),
            TreeError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<std::io::Error> for TreeError {
    fn from(err: std::io::Error) -> Self {
        TreeError::Io(err.to_string())
    }
}

impl From<std::net::AddrParseError> for TreeError {
    fn from(err: std::net::AddrParseError) -> Self {
        TreeError::BadAddress(err.to_string())
    }
}
