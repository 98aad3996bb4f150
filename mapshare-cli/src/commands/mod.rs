// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use std::path::Path;

use mapshare_core::{Config, ConfigLoader, MapshareResult, SharedMemory};

use crate::Width;

pub mod create;
pub mod dump;
pub mod info;
pub mod peek;
pub mod poke;
pub mod probe;
pub mod remove;
pub mod validate;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration file, or defaults if it does not exist.
pub fn load_config(path: &str) -> MapshareResult<Config> {
    if Path::new(path).exists() {
        ConfigLoader::load_file(path)
    } else {
        tracing::debug!(config = %path, "No configuration file, using defaults");
        Ok(Config::default())
    }
}

/// Absolute address of `offset`, after checking that `len` bytes fit in the
/// region and, for volatile access, that the offset is aligned.
///
/// The raw accessors never check bounds; the CLI takes untrusted offsets so
/// it does.
pub fn checked_address(
    region: &SharedMemory,
    offset: usize,
    len: usize,
    aligned: bool,
) -> Result<usize, String> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| format!("Offset {} + {} overflows", offset, len))?;
    if end > region.len() {
        return Err(format!(
            "Range {}..{} is outside the region ({} bytes)",
            offset,
            end,
            region.len()
        ));
    }
    if aligned && offset % len != 0 {
        return Err(format!(
            "Volatile access needs offset aligned to {} bytes, got {}",
            len, offset
        ));
    }
    Ok(region.address() + offset)
}

/// Checked address for a typed access.
pub fn value_address(
    region: &SharedMemory,
    offset: usize,
    width: Width,
    volatile: bool,
) -> Result<usize, String> {
    checked_address(region, offset, width.bytes(), volatile)
}
