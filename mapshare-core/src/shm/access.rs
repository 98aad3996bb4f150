// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Raw typed access to mapped memory.
//!
//! Every function takes an absolute address (region base plus a caller
//! computed offset). Nothing is bounds checked: keeping the address inside
//! a live mapping is the caller's job.
//!
//! Two ordering strengths are offered per width:
//!
//! - **plain**: ordinary unaligned load/store, no ordering guarantee.
//! - **volatile**: atomic load with `Acquire` / atomic store with `Release`.
//!   A writer publishes a payload with plain stores and then a single
//!   volatile store; a reader that observes that value with a volatile load
//!   may trust payload bytes read with plain loads afterwards. This holds
//!   across processes mapping the same file. Volatile addresses must be
//!   naturally aligned for their width.

use std::sync::atomic::{AtomicI16, AtomicI32, AtomicI64, AtomicI8, Ordering};

use crate::error::SharedMemoryError;
use crate::shm::buffer::ByteBuffer;

macro_rules! raw_accessors {
    ($ty:ty, $atomic:ty, $get:ident, $put:ident, $get_volatile:ident, $put_volatile:ident) => {
        #[doc = concat!("Plain load of an `", stringify!($ty), "`.")]
        ///
        /// # Safety
        /// `address` must point into a live mapping with enough room for the value.
        #[inline]
        pub unsafe fn $get(address: usize) -> $ty {
            std::ptr::read_unaligned(address as *const $ty)
        }

        #[doc = concat!("Plain store of an `", stringify!($ty), "`.")]
        ///
        /// # Safety
        /// `address` must point into a live, writable mapping with enough room.
        #[inline]
        pub unsafe fn $put(address: usize, value: $ty) {
            std::ptr::write_unaligned(address as *mut $ty, value)
        }

        #[doc = concat!("Acquire load of an `", stringify!($ty), "`.")]
        ///
        /// # Safety
        /// `address` must point into a live mapping and be naturally aligned.
        #[inline]
        pub unsafe fn $get_volatile(address: usize) -> $ty {
            debug_assert_eq!(address % std::mem::align_of::<$atomic>(), 0);
            (*(address as *const $atomic)).load(Ordering::Acquire)
        }

        #[doc = concat!("Release store of an `", stringify!($ty), "`.")]
        ///
        /// # Safety
        /// `address` must point into a live, writable mapping and be naturally aligned.
        #[inline]
        pub unsafe fn $put_volatile(address: usize, value: $ty) {
            debug_assert_eq!(address % std::mem::align_of::<$atomic>(), 0);
            (*(address as *const $atomic)).store(value, Ordering::Release)
        }
    };
}

raw_accessors!(i8, AtomicI8, get_i8, put_i8, get_i8_volatile, put_i8_volatile);
raw_accessors!(i16, AtomicI16, get_i16, put_i16, get_i16_volatile, put_i16_volatile);
raw_accessors!(i32, AtomicI32, get_i32, put_i32, get_i32_volatile, put_i32_volatile);
raw_accessors!(i64, AtomicI64, get_i64, put_i64, get_i64_volatile, put_i64_volatile);

/// Copy `src` into memory starting at `address`.
///
/// # Safety
/// `address..address + src.len()` must lie inside a live, writable mapping.
#[inline]
pub unsafe fn put_bytes(address: usize, src: &[u8]) {
    std::ptr::copy_nonoverlapping(src.as_ptr(), address as *mut u8, src.len());
}

/// Fill `dst` with the bytes starting at `address`.
///
/// # Safety
/// `address..address + dst.len()` must lie inside a live mapping.
#[inline]
pub unsafe fn get_bytes(address: usize, dst: &mut [u8]) {
    std::ptr::copy_nonoverlapping(address as *const u8, dst.as_mut_ptr(), dst.len());
}

fn require_direct(buffer: &impl ByteBuffer, operation: &str) -> Result<(), SharedMemoryError> {
    if !buffer.is_direct() {
        return Err(SharedMemoryError::UsageViolation {
            reason: format!("{} requires a direct buffer with a stable address", operation),
        });
    }
    Ok(())
}

fn require_remaining(buffer: &impl ByteBuffer, len: usize) -> Result<(), SharedMemoryError> {
    if len > buffer.remaining() {
        return Err(SharedMemoryError::InvalidArgument {
            reason: format!(
                "Length {} exceeds {} bytes remaining in buffer",
                len,
                buffer.remaining()
            ),
        });
    }
    Ok(())
}

/// Copy `len` bytes from `src` to `address`.
///
/// `src` must be direct. The copy starts at the buffer's cursor, not at the
/// start of its storage, so bytes before `position()` are never sent. The
/// cursor is left where it was.
///
/// # Safety
/// `address..address + len` must lie inside a live, writable mapping.
/// The buffer side is covered by the [`ByteBuffer`] contract and checked
/// against `remaining()`.
pub unsafe fn put_buffer(
    address: usize,
    src: &impl ByteBuffer,
    len: usize,
) -> Result<(), SharedMemoryError> {
    require_direct(src, "put_buffer")?;
    require_remaining(src, len)?;
    std::ptr::copy_nonoverlapping(src.as_ptr().add(src.position()), address as *mut u8, len);
    Ok(())
}

/// Copy `len` bytes from `address` into `dst` at its position, then
/// advance `dst` by `len`.
///
/// # Safety
/// `address..address + len` must lie inside a live mapping.
/// The buffer side is covered by the [`ByteBuffer`] contract and checked
/// against `remaining()`.
pub unsafe fn get_buffer(
    address: usize,
    dst: &mut impl ByteBuffer,
    len: usize,
) -> Result<(), SharedMemoryError> {
    require_direct(dst, "get_buffer")?;
    require_remaining(dst, len)?;
    let position = dst.position();
    std::ptr::copy_nonoverlapping(address as *const u8, dst.as_mut_ptr().add(position), len);
    dst.advance(len);
    Ok(())
}
