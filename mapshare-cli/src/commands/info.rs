// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare info` command - Describe an existing region.

use mapshare_core::{Capabilities, SharedMemory};

use super::CommandResult;

/// CRC32 of the whole region.
///
/// The snapshot is not atomic: concurrent writers may produce a checksum
/// matching no single moment.
pub fn checksum(region: &SharedMemory) -> u32 {
    // SAFETY: the mapping is live for the borrow; torn reads only affect the value
    crc32fast::hash(unsafe { region.as_slice() })
}

pub fn execute(file: &str) -> CommandResult {
    let region = SharedMemory::open_existing(file)?;

    println!("Region: {}", region.path().display());
    println!("  Size:      {} bytes", region.size());
    println!("  Page size: {} bytes", Capabilities::get().page_size);
    println!("  CRC32:     {:#010x}", checksum(&region));

    region.release(false)?;
    Ok(())
}
