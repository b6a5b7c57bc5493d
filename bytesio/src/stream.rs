//! Seekable in-memory byte stream.

use std::fmt;
use std::iter::FusedIterator;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::StreamConfig;
use crate::error::{Error, Result};
use crate::line;
use crate::store::{Store, MAX_SIZE};

/// Reference point for [`ByteStream::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Whence {
    /// Offset from the start of the stream. Must not be negative.
    #[default]
    Start,
    /// Offset from the current position.
    Current,
    /// Offset from the end of the stream (its logical length).
    End,
}

impl TryFrom<i32> for Whence {
    type Error = Error;

    fn try_from(mode: i32) -> Result<Self> {
        match mode {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            _ => Err(Error::InvalidWhence(mode)),
        }
    }
}

impl From<Whence> for i32 {
    fn from(whence: Whence) -> Self {
        match whence {
            Whence::Start => 0,
            Whence::Current => 1,
            Whence::End => 2,
        }
    }
}

/// A resizable byte buffer addressed by a movable cursor.
///
/// `ByteStream` behaves like a file kept entirely in memory: it supports
/// random-access reads and writes, seeking past the end, truncation and
/// line-oriented reads. All returned data is copied out as [`Bytes`], so
/// it stays valid whatever happens to the stream afterwards.
///
/// # Semantics
///
/// - **Write**: overwrites in place, extends the stream at the end, and
///   zero-fills the gap when the cursor was moved past the end
/// - **Read**: returns at most the bytes between the cursor and the end
/// - **Seek**: never fails for a negative result, the cursor clamps to 0
/// - **Close**: releases the buffer; every other operation then fails with
///   [`Error::Closed`]
///
/// # Example
///
/// ```
/// use giztoy_bytesio::{ByteStream, Whence};
///
/// let mut stream = ByteStream::new();
/// stream.write(b"ab").unwrap();
/// stream.seek(0, Whence::Start).unwrap();
/// stream.write(b"X").unwrap();
/// assert_eq!(stream.get_all().unwrap(), &b"Xb"[..]);
/// ```
pub struct ByteStream {
    // None once closed.
    inner: Option<Inner>,
}

struct Inner {
    store: Store,
    length: usize,
    position: usize,
}

impl Inner {
    fn new() -> Self {
        Self {
            store: Store::new(),
            length: 0,
            position: 0,
        }
    }

    fn contents(&self) -> &[u8] {
        &self.store.as_slice()[..self.length]
    }

    fn remaining(&self) -> usize {
        self.length.saturating_sub(self.position)
    }

    /// Copies `n` bytes starting at the cursor and advances past them.
    fn take(&mut self, n: usize) -> Bytes {
        if n == 0 {
            return Bytes::new();
        }
        let start = self.position;
        self.position += n;
        Bytes::copy_from_slice(&self.store.as_slice()[start..start + n])
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }

        let Some(end) = self
            .position
            .checked_add(data.len())
            .filter(|&end| end <= MAX_SIZE)
        else {
            debug!(
                "refusing write of {} bytes at position {} (limit {})",
                data.len(),
                self.position,
                MAX_SIZE
            );
            return Err(Error::Overflow("new buffer size too large"));
        };
        if end > self.store.capacity() {
            self.store.ensure_capacity(end)?;
        }

        let buf = self.store.as_mut_slice();
        if self.position > self.length {
            // Bytes past the old length may hold stale data from before a
            // truncate; the gap must read back as zero.
            buf[self.length..self.position].fill(0);
        }
        buf[self.position..end].copy_from_slice(data);

        self.position = end;
        self.length = self.length.max(end);
        Ok(data.len())
    }
}

impl Default for ByteStream {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => f
                .debug_struct("ByteStream")
                .field("length", &inner.length)
                .field("position", &inner.position)
                .field("capacity", &inner.store.capacity())
                .finish(),
            None => f.debug_struct("ByteStream").field("closed", &true).finish(),
        }
    }
}

impl ByteStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self {
            inner: Some(Inner::new()),
        }
    }

    /// Creates a stream preloaded with `data`, positioned at 0.
    pub fn from_bytes(data: impl AsRef<[u8]>) -> Result<Self> {
        let mut stream = Self::new();
        stream.reset(Some(data.as_ref()))?;
        Ok(stream)
    }

    /// Creates a stream from a [`StreamConfig`].
    pub fn with_config(config: StreamConfig) -> Result<Self> {
        let mut stream = Self::new();
        if config.capacity_hint > 0 {
            stream.open_mut()?.store.ensure_capacity(config.capacity_hint)?;
        }
        stream.reset(config.initial_value.as_deref())?;
        Ok(stream)
    }

    fn open(&self) -> Result<&Inner> {
        self.inner.as_ref().ok_or(Error::Closed)
    }

    fn open_mut(&mut self) -> Result<&mut Inner> {
        self.inner.as_mut().ok_or(Error::Closed)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Closes the stream and releases its buffer.
    ///
    /// Closing an already closed stream does nothing.
    pub fn close(&mut self) {
        if let Some(inner) = self.inner.take() {
            debug!(
                "closing stream (length={}, capacity={})",
                inner.length,
                inner.store.capacity()
            );
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Discards the contents and optionally preloads `initial`.
    ///
    /// The cursor ends at 0. The allocation is kept. On error the stream is
    /// left untouched.
    pub fn reset(&mut self, initial: Option<&[u8]>) -> Result<()> {
        let inner = self.open_mut()?;
        let data = initial.unwrap_or_default();
        if data.len() > inner.store.capacity() {
            inner.store.ensure_capacity(data.len())?;
        }
        inner.length = 0;
        inner.position = 0;
        inner.write(data)?;
        inner.position = 0;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    /// Writes `data` at the cursor and returns the number of bytes written.
    ///
    /// Existing bytes under the written range are overwritten. If the cursor
    /// is past the end, the gap is filled with zeros first.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.open_mut()?.write(data)
    }

    /// Writes each item in order. No separators are added.
    ///
    /// Stops at the first failing write; earlier items stay written.
    pub fn write_lines<I, B>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let inner = self.open_mut()?;
        for line in lines {
            inner.write(line.as_ref())?;
        }
        Ok(())
    }

    /// Does nothing; there is no device behind the stream.
    pub fn flush(&mut self) -> Result<()> {
        self.open()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Reads up to `n` bytes, or everything up to the end when `n` is `None`.
    ///
    /// Returns an empty span at end of stream.
    pub fn read(&mut self, n: Option<usize>) -> Result<Bytes> {
        let inner = self.open_mut()?;
        let available = inner.remaining();
        let k = n.map_or(available, |n| n.min(available));
        Ok(inner.take(k))
    }

    /// Same as [`read`](Self::read); a single call never needs to wait.
    pub fn read1(&mut self, n: Option<usize>) -> Result<Bytes> {
        self.read(n)
    }

    /// Copies bytes from the cursor into `buf` and returns how many.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let inner = self.open_mut()?;
        let k = buf.len().min(inner.remaining());
        if k > 0 {
            let start = inner.position;
            buf[..k].copy_from_slice(&inner.store.as_slice()[start..start + k]);
            inner.position += k;
        }
        Ok(k)
    }

    /// Reads the next line, including its `\n` if present.
    ///
    /// With `limit`, at most `limit` bytes are returned and the rest of the
    /// line is left for the next call. Returns an empty span at end of stream.
    pub fn readline(&mut self, limit: Option<usize>) -> Result<Bytes> {
        let inner = self.open_mut()?;
        let range = line::next_line(inner.contents(), inner.position, limit);
        Ok(inner.take(range.len()))
    }

    /// Reads lines until end of stream.
    ///
    /// A non-zero `hint` stops collection once the lines read so far add up
    /// to at least `hint` bytes.
    pub fn readlines(&mut self, hint: Option<usize>) -> Result<Vec<Bytes>> {
        let inner = self.open_mut()?;
        let budget = hint.filter(|&h| h > 0);
        let mut lines = Vec::new();
        let mut total = 0usize;
        loop {
            let range = line::next_line(inner.contents(), inner.position, None);
            if range.is_empty() {
                break;
            }
            total += range.len();
            lines.push(inner.take(range.len()));
            if budget.is_some_and(|b| total >= b) {
                break;
            }
        }
        Ok(lines)
    }

    /// Returns an iterator over the remaining lines.
    ///
    /// Each step reads one line from the cursor. On a closed stream the
    /// first step yields [`Error::Closed`].
    pub fn lines(&mut self) -> Lines<'_> {
        Lines {
            stream: self,
            done: false,
        }
    }

    /// Returns the whole contents without moving the cursor.
    pub fn get_all(&self) -> Result<Bytes> {
        Ok(Bytes::copy_from_slice(self.open()?.contents()))
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Moves the cursor and returns the new absolute position.
    ///
    /// A result below zero clamps to 0. The cursor may land past the end.
    pub fn seek(&mut self, offset: isize, whence: Whence) -> Result<usize> {
        let inner = self.open_mut()?;
        let base = match whence {
            Whence::Start if offset < 0 => return Err(Error::NegativeSeek(offset)),
            Whence::Start => 0,
            Whence::Current => inner.position,
            Whence::End => inner.length,
        };

        let target = isize::try_from(base)
            .ok()
            .and_then(|base| base.checked_add(offset))
            .ok_or(Error::Overflow("new position too large"))?;
        inner.position = usize::try_from(target).unwrap_or(0);
        Ok(inner.position)
    }

    /// Like [`seek`](Self::seek) with the origin given as 0, 1 or 2.
    pub fn seek_raw(&mut self, offset: isize, whence: i32) -> Result<usize> {
        self.open()?;
        let whence = Whence::try_from(whence)?;
        self.seek(offset, whence)
    }

    /// Returns the cursor position.
    pub fn tell(&self) -> Result<usize> {
        Ok(self.open()?.position)
    }

    /// Cuts the stream to `size` bytes (default: the cursor position) and
    /// moves the cursor to `size`.
    ///
    /// A `size` at or beyond the end leaves the contents alone but still
    /// moves the cursor. Returns the new size.
    pub fn truncate(&mut self, size: Option<isize>) -> Result<usize> {
        let inner = self.open_mut()?;
        let size = match size {
            Some(s) => usize::try_from(s).map_err(|_| Error::NegativeSize(s))?,
            None => inner.position,
        };

        if size < inner.length {
            inner.store.ensure_capacity(size)?;
            trace!("truncated stream {} -> {}", inner.length, size);
            inner.length = size;
        }
        inner.position = size;
        Ok(size)
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// Returns the logical length in bytes.
    pub fn len(&self) -> Result<usize> {
        Ok(self.open()?.length)
    }

    /// Returns true if the stream holds no bytes.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.open()?.length == 0)
    }

    /// Returns the size of the underlying allocation.
    pub fn capacity(&self) -> Result<usize> {
        Ok(self.open()?.store.capacity())
    }

    /// Returns how many times the buffer has been reallocated.
    pub fn reallocations(&self) -> Result<usize> {
        Ok(self.open()?.store.reallocations())
    }

    /// Always false.
    pub fn is_atty(&self) -> Result<bool> {
        self.open()?;
        Ok(false)
    }

    /// Always true.
    pub fn readable(&self) -> Result<bool> {
        self.open()?;
        Ok(true)
    }

    /// Always true.
    pub fn writable(&self) -> Result<bool> {
        self.open()?;
        Ok(true)
    }

    /// Always true.
    pub fn seekable(&self) -> Result<bool> {
        self.open()?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Hooks for the std::io adapters
    // ------------------------------------------------------------------

    /// Bytes between the cursor and the end.
    pub(crate) fn unread(&self) -> Result<&[u8]> {
        let inner = self.open()?;
        Ok(inner.contents().get(inner.position..).unwrap_or_default())
    }

    /// Moves the cursor forward by `n`, stopping at the end.
    pub(crate) fn advance(&mut self, n: usize) {
        if let Some(inner) = self.inner.as_mut() {
            inner.position += n.min(inner.remaining());
        }
    }
}

/// Iterator over the lines of a [`ByteStream`].
///
/// Created by [`ByteStream::lines`].
pub struct Lines<'a> {
    stream: &'a mut ByteStream,
    done: bool,
}

impl Iterator for Lines<'_> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stream.readline(None) {
            Ok(line) if line.is_empty() => {
                self.done = true;
                None
            }
            Ok(line) => Some(Ok(line)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Lines<'_> {}
