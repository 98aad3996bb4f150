//! mapshare Core Library
//!
//! Raw cross-process shared memory: a file is mapped with `MAP_SHARED` into
//! every process that opens it, and typed plain or acquire/release
//! accessors operate on absolute addresses inside the mapping.

pub mod capability;
pub mod config;
pub mod error;
pub mod shm;
pub mod types;

// Re-export commonly used types
pub use capability::{is_available, Capabilities};
pub use config::{Config, ConfigLoader, RegionConfig};
pub use error::{
    ConfigError, MapshareError, MapshareResult, ReleaseError, SharedMemoryError,
};
pub use shm::{ByteBuffer, DirectBuffer, Memory, SharedMemory};
pub use types::{RegionSize, INFER_SIZE, MAX_SIZE};
