use log::debug;

use crate::error::{Error, Result};

/// Output storage owned by a [`Context`](crate::Context).
///
/// Growth does not rely on `Vec`'s own amortisation: the capacity is doubled,
/// and if that allocation is refused a fixed `fallback` increment is tried
/// before giving up. Capacity therefore never exceeds twice what a stream
/// actually needed.
#[derive(Debug)]
pub(crate) struct OutputBuffer {
    buf: Vec<u8>,
    fallback: usize,
    limit: Option<usize>,
}

impl OutputBuffer {
    pub(crate) fn new(initial: usize, fallback: usize, limit: Option<usize>) -> Result<Self> {
        let initial = limit.map_or(initial, |limit| initial.min(limit));
        let mut buf = Vec::new();
        buf.try_reserve_exact(initial)
            .map_err(|_| Error::AllocationFailure { requested: initial })?;
        Ok(OutputBuffer { buf, fallback, limit })
    }

    /// Makes room for at least `additional` more bytes.
    pub(crate) fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let len = self.buf.len();
        let cap = self.buf.capacity();
        if cap - len >= additional {
            return Ok(());
        }
        let needed = len
            .checked_add(additional)
            .ok_or(Error::AllocationFailure { requested: additional })?;

        let doubled = cap.saturating_mul(2).max(needed);
        if self.grow_to(doubled) {
            debug!("output buffer grew {} -> {} bytes", cap, self.buf.capacity());
            return Ok(());
        }

        let stepped = cap.saturating_add(self.fallback).max(needed);
        if self.grow_to(stepped) {
            debug!(
                "output buffer could not double, grew {} -> {} bytes instead",
                cap,
                self.buf.capacity()
            );
            return Ok(());
        }

        debug!("output buffer stuck at {} bytes, {} more requested", cap, additional);
        Err(Error::AllocationFailure { requested: additional })
    }

    fn grow_to(&mut self, target: usize) -> bool {
        if self.limit.map_or(false, |limit| target > limit) {
            return false;
        }
        self.buf.try_reserve_exact(target - self.buf.len()).is_ok()
    }

    /// Copies `bytes` to the end of the buffer.
    ///
    /// `ensure_capacity` must have reserved the room beforehand.
    #[inline]
    pub(crate) fn append(&mut self, bytes: &[u8]) {
        debug_assert!(
            self.buf.capacity() - self.buf.len() >= bytes.len(),
            "append without ensure_capacity"
        );
        self.buf.extend_from_slice(bytes);
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Resets the write cursor. The allocation is kept.
    pub(crate) fn clear(&mut self) {
        self.buf.clear();
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_when_full() {
        let mut out = OutputBuffer::new(8, 256, None).unwrap();
        out.ensure_capacity(8).unwrap();
        out.append(b"01234567");
        assert_eq!(out.capacity(), 8);

        out.ensure_capacity(1).unwrap();
        assert_eq!(out.capacity(), 16);
        out.append(b"8");
        assert_eq!(out.as_slice(), b"012345678");
    }

    #[test]
    fn grows_past_double_for_large_requests() {
        let mut out = OutputBuffer::new(4, 256, None).unwrap();
        out.ensure_capacity(100).unwrap();
        assert!(out.capacity() >= 100);
    }

    #[test]
    fn falls_back_to_fixed_increment() {
        let mut out = OutputBuffer::new(300, 16, Some(320)).unwrap();
        out.ensure_capacity(300).unwrap();
        out.append(&[0; 300]);

        // Doubling to 600 exceeds the limit, 300 + 16 does not.
        out.ensure_capacity(10).unwrap();
        assert_eq!(out.capacity(), 316);
    }

    #[test]
    fn fails_when_both_strategies_fail() {
        let mut out = OutputBuffer::new(8, 16, Some(8)).unwrap();
        out.ensure_capacity(8).unwrap();
        out.append(&[1; 8]);
        assert_eq!(
            out.ensure_capacity(1),
            Err(Error::AllocationFailure { requested: 1 })
        );
        assert_eq!(out.as_slice(), &[1; 8], "contents survive a failed growth");
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut out = OutputBuffer::new(4, 256, None).unwrap();
        out.ensure_capacity(64).unwrap();
        out.append(&[7; 64]);
        let cap = out.capacity();
        out.clear();
        assert!(out.as_slice().is_empty());
        assert_eq!(out.capacity(), cap);
    }
}
