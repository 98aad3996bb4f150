// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! SharedMemory - file-backed shared memory region.
//!
//! Maps a regular file with `MAP_SHARED` so every process mapping the same
//! file sees the same bytes. The region owns the mapping; the file handle
//! used to create it is closed as soon as the mapping exists.

use std::fs::OpenOptions;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use crate::capability;
use crate::config::RegionConfig;
use crate::error::{ReleaseError, SharedMemoryError};
use crate::types::{RegionSize, INFER_SIZE, MAX_SIZE};

/// A mapped, file-backed shared memory region.
///
/// Base address and size never change. The mapping is torn down by
/// [`release`](Self::release), or by drop if release was never called
/// (drop never deletes the backing file).
pub struct SharedMemory {
    /// Path of the backing file.
    path: PathBuf,
    /// Base of the mapping.
    ptr: NonNull<u8>,
    /// Size of the mapping in bytes.
    size: RegionSize,
    /// Mapping length as passed to mmap.
    len: usize,
}

// SAFETY: SharedMemory owns its mapping and has no thread-affine state.
unsafe impl Send for SharedMemory {}

// SAFETY: all access to the mapped bytes goes through unsafe accessors whose
// callers provide the synchronization.
unsafe impl Sync for SharedMemory {}

impl SharedMemory {
    /// Largest supported size in bytes.
    pub const MAX_SIZE: u64 = MAX_SIZE;

    /// Sentinel size meaning "infer from the existing file".
    pub const INFER_SIZE: i64 = INFER_SIZE;

    /// Map `path`, creating it if needed.
    ///
    /// With `size == INFER_SIZE` the file must already exist and its length
    /// is used. Otherwise the file is created or resized to exactly `size`
    /// bytes; new bytes read as zero.
    ///
    /// # Errors
    /// `PlatformUnsupported`, `InvalidArgument` for a bad size or path,
    /// `NotFound`/`InvalidTarget` when inferring, `CreateDirFailed`, `Io`,
    /// or `MapFailed`.
    pub fn open(size: i64, path: impl AsRef<Path>) -> Result<Self, SharedMemoryError> {
        capability::ensure_available()?;

        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SharedMemoryError::InvalidArgument {
                reason: "Filename cannot be empty".to_string(),
            });
        }

        let size = if size == INFER_SIZE {
            let len = file_size(path)?;
            RegionSize::new(len).map_err(|e| SharedMemoryError::InvalidArgument {
                reason: format!("Cannot map {}: {}", path.display(), e),
            })?
        } else {
            RegionSize::from_signed(size)?
        };

        Self::map(size, path)
    }

    /// Create or resize `path` to `size` bytes and map it.
    pub fn create(size: u64, path: impl AsRef<Path>) -> Result<Self, SharedMemoryError> {
        let size = i64::try_from(size).map_err(|_| SharedMemoryError::InvalidArgument {
            reason: format!("This size is not supported: {} (MAX = {})", size, MAX_SIZE),
        })?;
        Self::open(size, path)
    }

    /// Map an existing file, using its length as the size.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self, SharedMemoryError> {
        Self::open(INFER_SIZE, path)
    }

    /// Map a region of `size` bytes backed by [`default_filename`] in the
    /// current directory.
    pub fn with_size(size: u64) -> Result<Self, SharedMemoryError> {
        let filename = default_filename(size)?;
        Self::create(size, filename)
    }

    /// Map a region as described by `config`.
    ///
    /// `name` is resolved inside the configured directory; without it the
    /// default filename for the configured size is used.
    pub fn from_config(config: &RegionConfig, name: Option<&str>) -> Result<Self, SharedMemoryError> {
        let size = config.default_size.bytes();
        let filename = match name {
            Some(name) => name.to_string(),
            None => default_filename(size)?,
        };
        Self::create(size, config.directory.join(filename))
    }

    fn map(size: RegionSize, path: &Path) -> Result<Self, SharedMemoryError> {
        let len = size.to_len()?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| SharedMemoryError::CreateDirFailed {
                    dir: dir.to_path_buf(),
                    source: e,
                })?;
                tracing::debug!(dir = %dir.display(), "Created backing file directory");
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| SharedMemoryError::Io {
                context: "opening",
                path: path.to_path_buf(),
                source: e,
            })?;

        file.set_len(size.bytes())
            .map_err(|e| SharedMemoryError::Io {
                context: "resizing",
                path: path.to_path_buf(),
                source: e,
            })?;

        // Map the whole file
        // SAFETY: fd is a valid open file of exactly `len` bytes
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(SharedMemoryError::MapFailed {
                path: path.to_path_buf(),
                source: io::Error::last_os_error(),
            });
        }

        // The mapping does not depend on the descriptor staying open
        drop(file);

        let ptr = NonNull::new(ptr as *mut u8).ok_or_else(|| SharedMemoryError::MapFailed {
            path: path.to_path_buf(),
            source: io::Error::other("mmap returned a null address"),
        })?;

        tracing::debug!(path = %path.display(), size = %size, "Mapped shared memory region");

        Ok(Self {
            path: path.to_path_buf(),
            ptr,
            size,
            len,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the region in bytes.
    pub fn size(&self) -> u64 {
        self.size.bytes()
    }

    /// Size of the region as a `usize`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: regions are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Base of the mapping.
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Base of the mapping as an integer, for address arithmetic with the
    /// raw accessors.
    pub fn address(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// Slice view of the whole region.
    ///
    /// # Safety
    /// No other thread or process may write the region while the slice lives.
    pub unsafe fn as_slice(&self) -> &[u8] {
        std::slice::from_raw_parts(self.ptr.as_ptr(), self.len)
    }

    /// Mutable slice view of the whole region.
    ///
    /// # Safety
    /// No other thread or process may access the region while the slice lives.
    pub unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len)
    }

    /// Unmap the region and optionally delete the backing file.
    ///
    /// Deletion is attempted even if unmapping failed. A file that is already
    /// gone is not an error. When both steps fail the unmap failure is the
    /// primary error and the delete failure is kept as secondary.
    pub fn release(mut self, delete_backing_file: bool) -> Result<(), ReleaseError> {
        let unmapped = self.unmap();
        let path = std::mem::take(&mut self.path);
        // The mapping is gone (or unusable); Drop must not unmap it again
        std::mem::forget(self);

        let mut errors = Vec::new();

        if let Err(e) = unmapped {
            tracing::error!(path = %path.display(), error = %e, "Failed to unmap shared memory");
            errors.push(SharedMemoryError::UnmapFailed {
                path: path.clone(),
                source: e,
            });
        }

        if delete_backing_file {
            if let Err(e) = delete_file(&path) {
                tracing::error!(path = %path.display(), error = %e, "Failed to delete backing file");
                errors.push(e);
            }
        }

        match ReleaseError::collect(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn unmap(&self) -> io::Result<()> {
        // SAFETY: ptr and len describe the mapping created in `map`
        let result = unsafe { libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.len) };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        tracing::debug!(path = %self.path.display(), size = %self.size, "Unmapped shared memory region");
        Ok(())
    }
}

impl Drop for SharedMemory {
    fn drop(&mut self) {
        if let Err(e) = self.unmap() {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to unmap shared memory"
            );
        }
    }
}

impl std::fmt::Debug for SharedMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedMemory")
            .field("path", &self.path)
            .field("address", &format_args!("{:#x}", self.address()))
            .field("size", &self.size.bytes())
            .finish()
    }
}

/// Length of an existing file, for size inference.
///
/// # Errors
/// `NotFound` if the file does not exist, `InvalidTarget` for a directory.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64, SharedMemoryError> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SharedMemoryError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SharedMemoryError::Io {
            context: "reading metadata of",
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if metadata.is_dir() {
        return Err(SharedMemoryError::InvalidTarget {
            path: path.to_path_buf(),
            reason: "File is a directory".to_string(),
        });
    }

    Ok(metadata.len())
}

/// Filename used when only a size is given: `SharedMemory-<size>.mmap`.
pub fn default_filename(size: u64) -> Result<String, SharedMemoryError> {
    if size == 0 {
        return Err(SharedMemoryError::InvalidArgument {
            reason: format!("Cannot create file with this size: {}", size),
        });
    }
    Ok(format!("SharedMemory-{}.mmap", size))
}

fn delete_file(path: &Path) -> Result<(), SharedMemoryError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Deleted backing file");
            Ok(())
        }
        // Someone else already removed it
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Backing file already gone");
            Ok(())
        }
        Err(e) => Err(SharedMemoryError::DeleteFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_size_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sizes.mmap");

        for size in [0, -2, -4096, i64::MIN, MAX_SIZE as i64 + 1, i64::MAX] {
            let result = SharedMemory::open(size, &path);
            assert!(
                matches!(result, Err(SharedMemoryError::InvalidArgument { .. })),
                "size {} should be rejected",
                size
            );
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_filename() {
        assert!(matches!(
            SharedMemory::open(4096, ""),
            Err(SharedMemoryError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(default_filename(4096).unwrap(), "SharedMemory-4096.mmap");
        assert!(default_filename(0).is_err());
    }

    #[test]
    fn test_with_size_uses_implied_filename() {
        // Odd size keeps the file name unique to this test
        let region = SharedMemory::with_size(4093).unwrap();
        assert_eq!(region.path(), Path::new("SharedMemory-4093.mmap"));
        assert_eq!(region.size(), 4093);
        region.release(true).unwrap();
        assert!(!Path::new("SharedMemory-4093.mmap").exists());
    }

    #[test]
    fn test_new_region_is_zeroed() {
        let dir = TempDir::new().unwrap();
        let region = SharedMemory::create(10_000, dir.path().join("zero.mmap")).unwrap();
        assert_eq!(region.size(), 10_000);
        assert_eq!(region.len(), 10_000);
        assert!(unsafe { region.as_slice() }.iter().all(|&b| b == 0));
        region.release(true).unwrap();
    }

    #[test]
    fn test_infer_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = SharedMemory::open_existing(dir.path().join("missing.mmap"));
        assert!(matches!(result, Err(SharedMemoryError::NotFound { .. })));
    }

    #[test]
    fn test_infer_directory() {
        let dir = TempDir::new().unwrap();
        let result = SharedMemory::open(INFER_SIZE, dir.path());
        assert!(matches!(result, Err(SharedMemoryError::InvalidTarget { .. })));
    }

    #[test]
    fn test_infer_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.mmap");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            SharedMemory::open_existing(&path),
            Err(SharedMemoryError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("nested.mmap");
        let region = SharedMemory::create(512, &path).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 512);
        region.release(false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let result = SharedMemory::create(512, blocker.join("sub").join("r.mmap"));
        assert!(matches!(
            result,
            Err(SharedMemoryError::CreateDirFailed { .. })
        ));
    }

    #[test]
    fn test_release_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.mmap");
        let region = SharedMemory::create(4096, &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(region.release(true).is_ok());
    }

    #[test]
    fn test_drop_unmaps_without_deleting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dropped.mmap");
        {
            let region = SharedMemory::create(4096, &path).unwrap();
            unsafe { crate::shm::access::put_i64(region.address(), 77) };
        }
        assert!(path.exists());
        let region = SharedMemory::open_existing(&path).unwrap();
        assert_eq!(unsafe { crate::shm::access::get_i64(region.address()) }, 77);
    }

    #[test]
    fn test_from_config() {
        let dir = TempDir::new().unwrap();
        let config = RegionConfig {
            directory: dir.path().join("regions"),
            default_size: RegionSize::new(8192).unwrap(),
        };

        let named = SharedMemory::from_config(&config, Some("orders.mmap")).unwrap();
        assert_eq!(named.path(), dir.path().join("regions").join("orders.mmap"));
        assert_eq!(named.size(), 8192);

        let implied = SharedMemory::from_config(&config, None).unwrap();
        assert_eq!(
            implied.path(),
            dir.path().join("regions").join("SharedMemory-8192.mmap")
        );

        named.release(true).unwrap();
        implied.release(true).unwrap();
    }
}
