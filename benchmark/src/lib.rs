// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! mapshare Benchmarking Support
//!
//! Criterion benches live in `benches/`:
//!
//! - **accessor**: plain vs acquire/release loads and stores per width
//! - **bulk_copy**: slice and direct-buffer copies at various sizes

use mapshare_core::{SharedMemory, SharedMemoryError};
use tempfile::TempDir;

/// A region in a private temp directory, deleted when dropped.
pub struct ScratchRegion {
    // Dropped first: unmaps before the directory is removed
    region: SharedMemory,
    _dir: TempDir,
}

impl ScratchRegion {
    pub fn new(size: u64) -> Result<Self, SharedMemoryError> {
        let dir = TempDir::new().map_err(|e| SharedMemoryError::Io {
            context: "creating temp dir for",
            path: std::env::temp_dir(),
            source: e,
        })?;
        let region = SharedMemory::create(size, dir.path().join("bench.mmap"))?;
        Ok(Self { region, _dir: dir })
    }

    pub fn region(&self) -> &SharedMemory {
        &self.region
    }

    pub fn address(&self) -> usize {
        self.region.address()
    }
}
