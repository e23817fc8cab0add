//! The append-only byte accumulator.

use core::fmt::{self, Debug};

use crate::error::{BufferError, Result};

/// Where the bytes live.
///
/// Fixed storage is borrowed from the caller and never grows; growable
/// storage is owned and doubles whenever a write would exceed it. The
/// vector in the growable arm is kept at `capacity` length, zero-filled
/// past the written prefix, so both arms expose the same flat region.
enum Storage<'a> {
    Fixed(&'a mut [u8]),
    Growable(Vec<u8>),
}

/// A write-once-forward byte accumulator.
///
/// Capacity strictly exceeds length at all times: the final byte of a
/// fixed region is reserved and never written, and growable storage
/// doubles until `capacity > len + count` before a write lands.
pub struct Buffer<'a> {
    storage: Storage<'a>,
    len: usize,
}

impl<'a> Buffer<'a> {
    /// Bind caller-owned storage as a fixed buffer.
    ///
    /// The storage is zero-filled. Fails with `ZeroCapacity` if it is
    /// empty.
    pub fn fixed(storage: &'a mut [u8]) -> Result<Buffer<'a>> {
        if storage.is_empty() {
            return Err(BufferError::ZeroCapacity);
        }
        storage.fill(0);
        Ok(Buffer {
            storage: Storage::Fixed(storage),
            len: 0,
        })
    }

    /// Allocate a growable buffer with the given initial capacity.
    ///
    /// Fails with `ZeroCapacity` on zero and `AllocFailed` if the
    /// allocator refuses.
    pub fn growable(initial_capacity: usize) -> Result<Buffer<'static>> {
        if initial_capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(initial_capacity)
            .map_err(|_| BufferError::AllocFailed(initial_capacity))?;
        storage.resize(initial_capacity, 0);
        Ok(Buffer {
            storage: Storage::Growable(storage),
            len: 0,
        })
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total storage, written or not.
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Fixed(slice) => slice.len(),
            Storage::Growable(vec) => vec.len(),
        }
    }

    pub fn is_growable(&self) -> bool {
        matches!(self.storage, Storage::Growable(_))
    }

    /// The written prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage_ref()[..self.len]
    }

    /// The whole storage region, including the zero tail.
    pub fn storage_bytes(&self) -> &[u8] {
        self.storage_ref()
    }

    /// Append a single byte.
    pub fn append_byte(&mut self, byte: u8) -> Result<()> {
        let needed = self.len + 1;
        if self.is_growable() {
            self.grow(needed)?;
        } else if needed >= self.capacity() {
            return Err(BufferError::CapacityFull);
        }
        let len = self.len;
        self.storage_mut()[len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Append a slice of bytes.
    ///
    /// Fails with `ZeroCount` on an empty slice. In fixed mode, fails
    /// with `CapacityFull` — without writing anything — when
    /// `len + count >= capacity`.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(BufferError::ZeroCount);
        }
        let needed = self.len + bytes.len();
        if self.is_growable() {
            self.grow(needed)?;
        } else if needed >= self.capacity() {
            return Err(BufferError::CapacityFull);
        }
        let len = self.len;
        self.storage_mut()[len..needed].copy_from_slice(bytes);
        self.len = needed;
        Ok(())
    }

    /// Append the UTF-8 bytes of a string.
    pub fn append_str(&mut self, text: &str) -> Result<()> {
        self.append_bytes(text.as_bytes())
    }

    /// Reset the length to zero and zero-fill the whole capacity.
    ///
    /// Cost is O(capacity), not O(len).
    pub fn clear(&mut self) {
        self.len = 0;
        self.storage_mut().fill(0);
    }

    /// Clear, then release owned storage.
    ///
    /// A growable buffer drops to zero capacity and refuses further
    /// appends; a fixed buffer keeps the caller's storage (zero-filled).
    /// Safe to call repeatedly.
    pub fn deinit(&mut self) {
        self.clear();
        if let Storage::Growable(vec) = &mut self.storage {
            *vec = Vec::new();
        }
    }

    /// Double the capacity until it strictly exceeds `needed`.
    /// No-op for fixed storage and when there is already room.
    fn grow(&mut self, needed: usize) -> Result<()> {
        let vec = match &mut self.storage {
            Storage::Growable(vec) => vec,
            Storage::Fixed(_) => return Ok(()),
        };
        let capacity = vec.len();
        if capacity == 0 {
            // deinitialized — nothing left to double
            return Err(BufferError::ZeroCapacity);
        }
        if capacity > needed {
            return Ok(());
        }
        let mut new_capacity = capacity;
        while new_capacity <= needed {
            new_capacity <<= 1;
        }
        vec.try_reserve_exact(new_capacity - capacity)
            .map_err(|_| BufferError::AllocFailed(new_capacity))?;
        vec.resize(new_capacity, 0);
        Ok(())
    }

    fn storage_ref(&self) -> &[u8] {
        match &self.storage {
            Storage::Fixed(slice) => slice,
            Storage::Growable(vec) => vec.as_slice(),
        }
    }

    fn storage_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Fixed(slice) => slice,
            Storage::Growable(vec) => vec.as_mut_slice(),
        }
    }
}

impl Debug for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Buffer {{ {} len = {}, cap = {}; {:x?} }}",
            if self.is_growable() { "growable," } else { "fixed," },
            self.len,
            self.capacity(),
            self.as_bytes()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_zero_fills_on_init() {
        let mut storage = [0xAAu8; 8];
        let buf = Buffer::fixed(&mut storage).unwrap();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 8);
        assert!(!buf.is_growable());
        assert!(buf.storage_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn fixed_rejects_empty_storage() {
        let mut storage: [u8; 0] = [];
        assert_eq!(
            Buffer::fixed(&mut storage).unwrap_err(),
            BufferError::ZeroCapacity
        );
    }

    #[test]
    fn growable_rejects_zero_capacity() {
        assert_eq!(
            Buffer::growable(0).unwrap_err(),
            BufferError::ZeroCapacity
        );
    }

    #[test]
    fn fixed_fills_to_capacity_minus_one() {
        // The final byte of a fixed region is reserved.
        let mut storage = [0u8; 8];
        let mut buf = Buffer::fixed(&mut storage).unwrap();
        for i in 0..7 {
            buf.append_byte(i as u8).unwrap();
        }
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.append_byte(0xFF).unwrap_err(), BufferError::CapacityFull);
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.as_bytes(), &[0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn fixed_failed_append_leaves_state_untouched() {
        let mut storage = [0u8; 8];
        let mut buf = Buffer::fixed(&mut storage).unwrap();
        buf.append_bytes(b"abc").unwrap();
        assert_eq!(
            buf.append_bytes(b"defgh").unwrap_err(),
            BufferError::CapacityFull
        );
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_bytes(), b"abc");
        assert!(buf.storage_bytes()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn fixed_hello_scenario() {
        let mut storage = [0u8; 16];
        let mut buf = Buffer::fixed(&mut storage).unwrap();
        buf.append_bytes(b"hello").unwrap();
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_bytes(), b"hello");
        assert!(buf.storage_bytes()[5..].iter().all(|&b| b == 0));
        assert_eq!(buf.storage_bytes().len(), 16);
    }

    #[test]
    fn growable_doubles_past_need() {
        let mut buf = Buffer::growable(4).unwrap();
        buf.append_bytes(b"abcdefgh").unwrap();
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.as_bytes(), b"abcdefgh");
    }

    #[test]
    fn growable_capacity_is_multiple_of_initial() {
        let mut buf = Buffer::growable(3).unwrap();
        buf.append_bytes(&[7u8; 10]).unwrap();
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.capacity(), 12); // 3 → 6 → 12
        assert!(buf.capacity() > buf.len());
    }

    #[test]
    fn growable_accumulates_across_calls() {
        let mut buf = Buffer::growable(2).unwrap();
        let mut total = 0;
        let chunks: [&[u8]; 4] = [b"ab", b"cdefg", b"h", b"ijklmnop"];
        for chunk in chunks {
            buf.append_bytes(chunk).unwrap();
            total += chunk.len();
            assert_eq!(buf.len(), total);
            assert!(buf.capacity() > buf.len());
        }
        assert_eq!(buf.as_bytes(), b"abcdefghijklmnop");
    }

    #[test]
    fn growable_zero_fills_grown_tail() {
        let mut buf = Buffer::growable(2).unwrap();
        buf.append_bytes(b"xyz").unwrap();
        assert!(buf.storage_bytes()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn append_zero_bytes_is_an_error() {
        let mut buf = Buffer::growable(4).unwrap();
        assert_eq!(buf.append_bytes(&[]).unwrap_err(), BufferError::ZeroCount);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn append_str_matches_bytes() {
        let mut buf = Buffer::growable(4).unwrap();
        buf.append_str("hello world").unwrap();
        assert_eq!(buf.as_bytes(), b"hello world");
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut buf = Buffer::growable(4).unwrap();
        buf.append_bytes(b"abcdef").unwrap();
        let capacity = buf.capacity();
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), capacity);
        assert!(buf.storage_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut storage = [0u8; 8];
        let mut buf = Buffer::fixed(&mut storage).unwrap();
        buf.append_bytes(b"abc").unwrap();
        buf.clear();
        let once: Vec<u8> = buf.storage_bytes().to_vec();
        let len_once = buf.len();
        buf.clear();
        assert_eq!(buf.storage_bytes(), once.as_slice());
        assert_eq!(buf.len(), len_once);
    }

    #[test]
    fn deinit_fixed_keeps_caller_storage() {
        let mut storage = [0u8; 8];
        {
            let mut buf = Buffer::fixed(&mut storage).unwrap();
            buf.append_bytes(b"abc").unwrap();
            buf.deinit();
            assert_eq!(buf.capacity(), 8);
        }
        // Caller storage is still valid and readable, zero-filled.
        assert_eq!(storage, [0u8; 8]);
    }

    #[test]
    fn deinit_growable_releases_storage() {
        let mut buf = Buffer::growable(4).unwrap();
        buf.append_bytes(b"abc").unwrap();
        buf.deinit();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(
            buf.append_byte(1).unwrap_err(),
            BufferError::ZeroCapacity
        );
    }

    #[test]
    fn deinit_twice_is_safe() {
        let mut buf = Buffer::growable(4).unwrap();
        buf.append_bytes(b"abc").unwrap();
        buf.deinit();
        buf.deinit();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn debug_shows_mode_and_sizes() {
        let mut buf = Buffer::growable(4).unwrap();
        buf.append_byte(0xAB).unwrap();
        let text = format!("{:?}", buf);
        assert!(text.contains("growable"));
        assert!(text.contains("len = 1"));
    }

    #[test]
    fn error_display() {
        assert_eq!(BufferError::ZeroCapacity.to_string(), "zero capacity");
        assert_eq!(
            BufferError::AllocFailed(64).to_string(),
            "allocation of 64 bytes failed"
        );
    }
}
