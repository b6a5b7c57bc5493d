//! Owned byte storage with an amortized resize policy.

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Largest byte count a stream may address.
pub const MAX_SIZE: usize = isize::MAX as usize;

/// Which branch of the resize policy a reallocation took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resize {
    /// Target fell below half the capacity; shrink to exact fit.
    Downsize,
    /// Target within 1/8 above capacity; overallocate.
    Moderate,
    /// Target far above capacity; grow to exact fit.
    Upsize,
}

/// Raw storage for a stream.
///
/// The whole allocation is addressable: `capacity()` is the length of the
/// backing vector. Bytes past the stream's logical length are left as they
/// are and must never be assumed to be zero.
#[derive(Debug, Default)]
pub(crate) struct Store {
    buf: Vec<u8>,
    reallocations: usize,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the allocated size in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns how many times the allocation has been resized.
    pub(crate) fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Makes room for `target` bytes following the resize policy.
    ///
    /// - `target < capacity / 2`: shrink to `target + 1`
    /// - `target < capacity`: keep the current allocation
    /// - `target <= capacity * 1.125`: grow to
    ///   `target + target / 8 + (3 if target < 9 else 6)`
    /// - otherwise: grow to `target + 1`
    ///
    /// On error the allocation is unchanged.
    pub(crate) fn ensure_capacity(&mut self, target: usize) -> Result<()> {
        if target > MAX_SIZE {
            debug!("refusing buffer size {} (limit {})", target, MAX_SIZE);
            return Err(Error::Overflow("new buffer size too large"));
        }

        let cap = self.capacity();
        let (alloc, branch) = if target < cap / 2 {
            (target + 1, Resize::Downsize)
        } else if target < cap {
            return Ok(());
        } else if target <= cap + (cap >> 3) {
            let extra = if target < 9 { 3 } else { 6 };
            (target + (target >> 3) + extra, Resize::Moderate)
        } else {
            (target + 1, Resize::Upsize)
        };

        if alloc > MAX_SIZE {
            debug!("refusing allocation of {} bytes for target {}", alloc, target);
            return Err(Error::Overflow("new buffer size too large"));
        }

        self.reallocate(alloc)?;
        trace!(
            "resized buffer {} -> {} ({:?}, target {})",
            cap,
            alloc,
            branch,
            target
        );
        Ok(())
    }

    fn reallocate(&mut self, alloc: usize) -> Result<()> {
        let cap = self.capacity();
        if alloc > cap {
            if self.buf.try_reserve_exact(alloc - cap).is_err() {
                debug!("allocation of {} bytes failed", alloc);
                return Err(Error::OutOfMemory { requested: alloc });
            }
            self.buf.resize(alloc, 0);
        } else {
            self.buf.truncate(alloc);
            self.buf.shrink_to(alloc);
        }
        self.reallocations += 1;
        Ok(())
    }
}
