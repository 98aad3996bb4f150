// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare peek` command - Read a typed value from a region.

use mapshare_core::{Memory, SharedMemory};

use super::{value_address, CommandResult};
use crate::Width;

/// Read a value of `width` at `offset`, sign-extended to `i64`.
pub fn read_value(
    region: &SharedMemory,
    offset: usize,
    width: Width,
    volatile: bool,
) -> Result<i64, String> {
    let address = value_address(region, offset, width, volatile)?;

    // SAFETY: address was bounds and alignment checked against the live region
    let value = unsafe {
        match (width, volatile) {
            (Width::W8, false) => region.get_i8(address) as i64,
            (Width::W8, true) => region.get_i8_volatile(address) as i64,
            (Width::W16, false) => region.get_i16(address) as i64,
            (Width::W16, true) => region.get_i16_volatile(address) as i64,
            (Width::W32, false) => region.get_i32(address) as i64,
            (Width::W32, true) => region.get_i32_volatile(address) as i64,
            (Width::W64, false) => region.get_i64(address),
            (Width::W64, true) => region.get_i64_volatile(address),
        }
    };
    Ok(value)
}

pub fn execute(file: &str, offset: usize, width: Width, volatile: bool) -> CommandResult {
    let region = SharedMemory::open_existing(file)?;
    let value = read_value(&region, offset, width, volatile)?;

    println!("{} ({:#x})", value, value);

    region.release(false)?;
    Ok(())
}
