// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare create` command - Create or resize a region.

use mapshare_core::shm::default_filename;
use mapshare_core::SharedMemory;

use super::{load_config, CommandResult};

pub fn execute(config_path: &str, size: Option<u64>, file: Option<&str>) -> CommandResult {
    let config = load_config(config_path)?;
    let size = size.unwrap_or_else(|| config.region.default_size.bytes());

    let path = match file {
        Some(file) => std::path::PathBuf::from(file),
        None => config.region.directory.join(default_filename(size)?),
    };

    tracing::info!(path = %path.display(), size = size, "Creating region");
    let region = SharedMemory::create(size, &path)?;

    println!("✓ Region ready");
    println!("  File: {}", region.path().display());
    println!("  Size: {} bytes", region.size());

    // Leave the backing file in place for other processes
    region.release(false)?;
    Ok(())
}
