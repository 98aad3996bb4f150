// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! External buffers for bulk copies to and from a region.

/// A caller-owned byte buffer with a cursor.
///
/// Only *direct* buffers, whose storage never moves for the lifetime of the
/// value, may take part in the raw bulk-copy paths.
///
/// # Safety
/// The raw bulk copies trust these methods to size their copies.
/// Implementors guarantee that:
/// - `as_ptr()` and `as_mut_ptr()` are valid for `position() + remaining()`
///   bytes, reads and writes respectively;
/// - when `is_direct()` returns true, that storage does not move or shrink
///   while the buffer is borrowed.
pub unsafe trait ByteBuffer {
    /// True when the storage address is stable.
    fn is_direct(&self) -> bool;

    /// Current cursor, in bytes from the start of the storage.
    fn position(&self) -> usize;

    /// Bytes between the cursor and the end of the storage.
    fn remaining(&self) -> usize;

    /// Start of the storage (not of the cursor).
    fn as_ptr(&self) -> *const u8;

    fn as_mut_ptr(&mut self) -> *mut u8;

    /// Move the cursor forward by `len`.
    ///
    /// # Safety
    /// The `len` bytes after the cursor must have been initialized and
    /// `len <= self.remaining()`.
    unsafe fn advance(&mut self, len: usize);
}

/// Fixed-capacity buffer with a stable heap address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectBuffer {
    storage: Box<[u8]>,
    position: usize,
}

impl DirectBuffer {
    /// Zero-filled buffer of `capacity` bytes, cursor at 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
        }
    }

    /// Buffer holding a copy of `data`, cursor at 0.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            storage: data.to_vec().into_boxed_slice(),
            position: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Move the cursor. Clamped to the capacity.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.storage.len());
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Bytes written so far (everything before the cursor).
    pub fn written(&self) -> &[u8] {
        &self.storage[..self.position]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage
    }
}

// SAFETY: boxed storage of fixed length; `position <= storage.len()`
unsafe impl ByteBuffer for DirectBuffer {
    fn is_direct(&self) -> bool {
        true
    }

    fn position(&self) -> usize {
        self.position
    }

    fn remaining(&self) -> usize {
        self.storage.len() - self.position
    }

    fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    fn as_mut_ptr(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    unsafe fn advance(&mut self, len: usize) {
        debug_assert!(len <= self.remaining());
        self.position += len;
    }
}

/// A `Vec` reallocates as it grows, so it is never direct. The cursor is
/// its length and the remaining room is its spare capacity.
// SAFETY: the allocation covers `capacity()` bytes; never reported direct
unsafe impl ByteBuffer for Vec<u8> {
    fn is_direct(&self) -> bool {
        false
    }

    fn position(&self) -> usize {
        self.len()
    }

    fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    fn as_ptr(&self) -> *const u8 {
        <[u8]>::as_ptr(self)
    }

    fn as_mut_ptr(&mut self) -> *mut u8 {
        <[u8]>::as_mut_ptr(self)
    }

    unsafe fn advance(&mut self, len: usize) {
        debug_assert!(len <= ByteBuffer::remaining(self));
        self.set_len(self.len() + len);
    }
}
