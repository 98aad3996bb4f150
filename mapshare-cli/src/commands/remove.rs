// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare remove` command - Release a region and delete its file.

use mapshare_core::SharedMemory;

use super::CommandResult;

pub fn execute(file: &str) -> CommandResult {
    let region = SharedMemory::open_existing(file)?;
    tracing::info!(file = %file, size = region.size(), "Removing region");

    if let Err(e) = region.release(true) {
        eprintln!("✗ Release failed:");
        for err in e.errors() {
            eprintln!("  {}", err);
        }
        std::process::exit(1);
    }

    println!("✓ Removed {}", file);
    Ok(())
}
