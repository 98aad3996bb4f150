// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare poke` command - Write a typed value into a region.

use mapshare_core::{Memory, SharedMemory};

use super::{value_address, CommandResult};
use crate::Width;

/// Store `value` truncated to `width` at `offset`.
pub fn write_value(
    region: &SharedMemory,
    offset: usize,
    width: Width,
    value: i64,
    volatile: bool,
) -> Result<(), String> {
    let address = value_address(region, offset, width, volatile)?;

    // SAFETY: address was bounds and alignment checked against the live region
    unsafe {
        match (width, volatile) {
            (Width::W8, false) => region.put_i8(address, value as i8),
            (Width::W8, true) => region.put_i8_volatile(address, value as i8),
            (Width::W16, false) => region.put_i16(address, value as i16),
            (Width::W16, true) => region.put_i16_volatile(address, value as i16),
            (Width::W32, false) => region.put_i32(address, value as i32),
            (Width::W32, true) => region.put_i32_volatile(address, value as i32),
            (Width::W64, false) => region.put_i64(address, value),
            (Width::W64, true) => region.put_i64_volatile(address, value),
        }
    }
    Ok(())
}

pub fn execute(file: &str, offset: usize, width: Width, value: i64, volatile: bool) -> CommandResult {
    let region = SharedMemory::open_existing(file)?;
    write_value(&region, offset, width, value, volatile)?;

    tracing::info!(file = %file, offset = offset, value = value, volatile = volatile, "Stored value");

    region.release(false)?;
    Ok(())
}
