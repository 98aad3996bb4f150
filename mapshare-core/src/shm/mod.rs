// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Shared Memory module.
//!
//! File-backed shared memory regions mapped with `MAP_SHARED`, plus the raw
//! accessors used to read and write them without bounds checks.

pub mod access;
mod buffer;
mod memory;
mod region;

pub use buffer::{ByteBuffer, DirectBuffer};
pub use memory::Memory;
pub use region::{default_filename, file_size, SharedMemory};
