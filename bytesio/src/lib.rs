//! In-memory seekable byte stream.
//!
//! This crate provides [`ByteStream`], a resizable byte buffer addressed by
//! a movable cursor. It behaves like a file held entirely in memory:
//!
//! - random-access [`read`](ByteStream::read) and [`write`](ByteStream::write)
//! - [`seek`](ByteStream::seek) relative to start, cursor or end, including
//!   past the end (the gap reads back as zeros once something is written)
//! - [`truncate`](ByteStream::truncate), which also moves the cursor
//! - line-oriented reads via [`readline`](ByteStream::readline),
//!   [`readlines`](ByteStream::readlines) and [`lines`](ByteStream::lines)
//!
//! The payload is always raw bytes; no text decoding is done here.
//!
//! # Example
//!
//! ```
//! use giztoy_bytesio::ByteStream;
//!
//! let mut stream = ByteStream::from_bytes(b"hello\nworld").unwrap();
//! assert_eq!(stream.tell().unwrap(), 0);
//! assert_eq!(stream.readline(None).unwrap(), &b"hello\n"[..]);
//! assert_eq!(stream.readline(None).unwrap(), &b"world"[..]);
//! assert!(stream.readline(None).unwrap().is_empty());
//! ```
//!
//! # Growth
//!
//! The buffer grows by a fixed policy: small overshoots of the current
//! allocation overallocate by about 1/8, so repeated appends reallocate
//! only a logarithmic number of times. Large jumps and truncations resize
//! to an exact fit.
//!
//! # Closing
//!
//! [`ByteStream::close`] releases the buffer. Any later operation fails with
//! [`Error::Closed`]; closing again is allowed.
//!
//! # Thread Safety
//!
//! A stream has no internal locking. Share it across threads by wrapping
//! it yourself, e.g. in a `Mutex`.
//!
//! # std::io
//!
//! `ByteStream` implements `Read`, `BufRead`, `Write` and `Seek`, so it can
//! be passed to `io::copy` and friends.

mod config;
mod error;
mod io;
mod line;
mod store;
mod stream;

pub use config::StreamConfig;
pub use error::{Error, Result};
pub use store::MAX_SIZE;
pub use stream::{ByteStream, Lines, Whence};
