// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Platform capability probe.
//!
//! Checks once per process that the target offers everything the shared
//! memory layer relies on: atomic loads/stores of every access width,
//! shared file mappings, and a usable base address for a mapping.

use std::sync::OnceLock;

use crate::error::SharedMemoryError;

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Immutable description of what the platform supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Atomic 8/16/32/64-bit load and store at arbitrary addresses.
    pub atomic_widths: bool,
    /// `mmap` with `MAP_SHARED` over a regular file.
    pub shared_file_mapping: bool,
    /// A mapping exposes a raw base address usable for pointer arithmetic.
    pub base_address: bool,
    /// System page size in bytes, 0 when it could not be determined.
    pub page_size: usize,
}

impl Capabilities {
    /// Probe the platform on first call and return the cached result.
    pub fn get() -> &'static Capabilities {
        CAPABILITIES.get_or_init(|| {
            let caps = Self::probe();
            tracing::debug!(
                atomic_widths = caps.atomic_widths,
                shared_file_mapping = caps.shared_file_mapping,
                base_address = caps.base_address,
                page_size = caps.page_size,
                "Probed shared memory capabilities"
            );
            caps
        })
    }

    fn probe() -> Self {
        Self {
            atomic_widths: cfg!(all(
                target_has_atomic = "8",
                target_has_atomic = "16",
                target_has_atomic = "32",
                target_has_atomic = "64"
            )),
            shared_file_mapping: cfg!(unix),
            base_address: cfg!(unix) && std::mem::size_of::<usize>() >= 4,
            page_size: page_size(),
        }
    }

    /// Name of the first missing primitive, if any.
    pub fn missing(&self) -> Option<&'static str> {
        if !self.atomic_widths {
            Some("atomic load/store of 8, 16, 32 and 64-bit values")
        } else if !self.shared_file_mapping {
            Some("shared file-backed memory mapping")
        } else if !self.base_address {
            Some("mapping base address")
        } else {
            None
        }
    }

    pub fn is_available(&self) -> bool {
        self.missing().is_none()
    }
}

fn page_size() -> usize {
    // SAFETY: sysconf has no preconditions
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as usize
    } else {
        0
    }
}

/// Returns true if shared memory regions can be used on this platform.
pub fn is_available() -> bool {
    Capabilities::get().is_available()
}

/// Fail fast with `PlatformUnsupported` when a required primitive is missing.
pub fn ensure_available() -> Result<&'static Capabilities, SharedMemoryError> {
    let caps = Capabilities::get();
    match caps.missing() {
        Some(missing) => Err(SharedMemoryError::PlatformUnsupported { missing }),
        None => Ok(caps),
    }
}
