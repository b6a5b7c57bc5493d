//! Error types for byte stream operations.

use std::io;

/// Result type alias for byte stream operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Byte stream operation error.
///
/// Every failure is reported to the immediate caller. A failed operation
/// leaves the stream exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Operation attempted after `close()`.
    #[error("bytesio: I/O operation on closed stream")]
    Closed,

    /// Seek origin other than start, current or end.
    #[error("bytesio: invalid whence ({0}, should be 0, 1 or 2)")]
    InvalidWhence(i32),

    /// Negative offset with a start-relative seek.
    #[error("bytesio: negative seek value {0}")]
    NegativeSeek(isize),

    /// Negative truncate size.
    #[error("bytesio: negative size value {0}")]
    NegativeSize(isize),

    /// An offset or buffer size would leave the representable range.
    #[error("bytesio: {0}")]
    Overflow(&'static str),

    /// The allocator could not satisfy a growth request.
    #[error("bytesio: out of memory (requested {requested} bytes)")]
    OutOfMemory { requested: usize },
}

impl Error {
    /// Returns true for the argument-validation family of errors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidWhence(_) | Error::NegativeSeek(_) | Error::NegativeSize(_)
        )
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::OutOfMemory { .. } => io::ErrorKind::OutOfMemory,
            _ => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, e)
    }
}
