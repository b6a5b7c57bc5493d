//! `std::io` adapters for [`ByteStream`].
//!
//! These let a stream stand in wherever a `Read`, `Write`, `Seek` or
//! `BufRead` is expected. Errors are converted with
//! `From<Error> for io::Error`.
//!
//! Unlike most `Seek` implementations, seeking to a negative position does
//! not fail: the cursor clamps to 0.

use std::io::{self, BufRead, Read, Seek, SeekFrom, Write};

use crate::error::Error;
use crate::stream::{ByteStream, Whence};

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl BufRead for ByteStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.unread()?)
    }

    fn consume(&mut self, amt: usize) {
        self.advance(amt);
    }
}

impl Write for ByteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(ByteStream::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(ByteStream::flush(self)?)
    }
}

impl Seek for ByteStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let too_large = || Error::Overflow("new position too large");
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => (isize::try_from(n).map_err(|_| too_large())?, Whence::Start),
            SeekFrom::Current(n) => (isize::try_from(n).map_err(|_| too_large())?, Whence::Current),
            SeekFrom::End(n) => (isize::try_from(n).map_err(|_| too_large())?, Whence::End),
        };
        let position = ByteStream::seek(self, offset, whence)?;
        Ok(position as u64)
    }
}
