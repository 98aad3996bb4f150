// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The contract structures built on a region rely on.
//!
//! Ring buffers, sequenced logs and similar collaborators only need a base
//! address, a size and the raw accessors. Borrowing the region for every
//! access keeps the mapping alive for as long as the caller uses it.

use crate::error::SharedMemoryError;
use crate::shm::access;
use crate::shm::buffer::ByteBuffer;
use crate::shm::SharedMemory;

macro_rules! delegate_accessors {
    ($(($ty:ty, $get:ident, $put:ident, $get_volatile:ident, $put_volatile:ident)),* $(,)?) => {
        $(
            /// See [`access`](crate::shm::access) for the ordering rules.
            ///
            /// # Safety
            /// `address` must lie inside this mapping with room for the value.
            #[inline]
            unsafe fn $get(&self, address: usize) -> $ty {
                access::$get(address)
            }

            /// # Safety
            /// `address` must lie inside this mapping with room for the value.
            #[inline]
            unsafe fn $put(&self, address: usize, value: $ty) {
                access::$put(address, value)
            }

            /// # Safety
            /// `address` must lie inside this mapping and be naturally aligned.
            #[inline]
            unsafe fn $get_volatile(&self, address: usize) -> $ty {
                access::$get_volatile(address)
            }

            /// # Safety
            /// `address` must lie inside this mapping and be naturally aligned.
            #[inline]
            unsafe fn $put_volatile(&self, address: usize, value: $ty) {
                access::$put_volatile(address, value)
            }
        )*
    };
}

/// Raw memory with absolute-address accessors.
pub trait Memory {
    /// Base address of the memory.
    fn address(&self) -> usize;

    /// Size in bytes.
    fn size(&self) -> u64;

    delegate_accessors!(
        (i8, get_i8, put_i8, get_i8_volatile, put_i8_volatile),
        (i16, get_i16, put_i16, get_i16_volatile, put_i16_volatile),
        (i32, get_i32, put_i32, get_i32_volatile, put_i32_volatile),
        (i64, get_i64, put_i64, get_i64_volatile, put_i64_volatile),
    );

    /// # Safety
    /// `address..address + src.len()` must lie inside this mapping.
    unsafe fn put_bytes(&self, address: usize, src: &[u8]) {
        access::put_bytes(address, src)
    }

    /// # Safety
    /// `address..address + dst.len()` must lie inside this mapping.
    unsafe fn get_bytes(&self, address: usize, dst: &mut [u8]) {
        access::get_bytes(address, dst)
    }

    /// # Safety
    /// `address..address + len` must lie inside this mapping.
    unsafe fn put_buffer<B: ByteBuffer>(
        &self,
        address: usize,
        src: &B,
        len: usize,
    ) -> Result<(), SharedMemoryError> {
        access::put_buffer(address, src, len)
    }

    /// # Safety
    /// `address..address + len` must lie inside this mapping.
    unsafe fn get_buffer<B: ByteBuffer>(
        &self,
        address: usize,
        dst: &mut B,
        len: usize,
    ) -> Result<(), SharedMemoryError> {
        access::get_buffer(address, dst, len)
    }
}

impl Memory for SharedMemory {
    fn address(&self) -> usize {
        SharedMemory::address(self)
    }

    fn size(&self) -> u64 {
        SharedMemory::size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn region(dir: &TempDir, size: u64) -> SharedMemory {
        SharedMemory::create(size, dir.path().join("memory.mmap")).unwrap()
    }

    #[test]
    fn test_trait_round_trip() {
        let dir = TempDir::new().unwrap();
        let mem = region(&dir, 4096);
        let base = Memory::address(&mem);

        unsafe {
            mem.put_i16(base + 100, -300);
            mem.put_i32_volatile(base + 200, -7);
            mem.put_i64(base + 301, i64::MAX);

            assert_eq!(mem.get_i16(base + 100), -300);
            assert_eq!(mem.get_i32_volatile(base + 200), -7);
            assert_eq!(mem.get_i64(base + 301), i64::MAX);
            assert_eq!(mem.get_i8(base + 4095), 0);
        }
        assert_eq!(Memory::size(&mem), 4096);
    }

    #[test]
    fn test_generic_publish_and_read() {
        fn publish<M: Memory>(mem: &M, offset: usize, payload: &[u8]) {
            let base = mem.address();
            unsafe {
                mem.put_bytes(base + offset + 8, payload);
                mem.put_i64_volatile(base + offset, payload.len() as i64);
            }
        }

        let dir = TempDir::new().unwrap();
        let mem = region(&dir, 1024);
        publish(&mem, 64, b"payload");

        let base = mem.address();
        let len = unsafe { mem.get_i64_volatile(base + 64) } as usize;
        let mut out = vec![0u8; len];
        unsafe { mem.get_bytes(base + 72, &mut out) };
        assert_eq!(out, b"payload");
    }
}
