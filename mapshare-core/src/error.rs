// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for mapshare.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.
//! Nothing in this crate retries: every error is returned to the caller as-is.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for mapshare.
#[derive(Debug, Error)]
pub enum MapshareError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Shared Memory Errors
    // =========================================================================
    #[error("Shared memory error: {0}")]
    SharedMemory(#[from] SharedMemoryError),

    #[error("Release error: {0}")]
    Release(#[from] ReleaseError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration validation errors. The configuration is rejected as a whole.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Region size out of bounds: {size} bytes (min: 1, max: {max})")]
    SizeOutOfBounds { size: i128, max: u64 },
}

/// Shared memory errors - mapping, access and teardown failures.
#[derive(Debug, Error)]
pub enum SharedMemoryError {
    #[error("Platform unsupported: {missing} is not available")]
    PlatformUnsupported { missing: &'static str },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid target {path}: {reason}")]
    InvalidTarget { path: PathBuf, reason: String },

    #[error("Cannot create directory {dir}: {source}")]
    CreateDirFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error while {context} {path}: {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to map {path}: {source}")]
    MapFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to unmap {path}: {source}")]
    UnmapFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete backing file {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Usage violation: {reason}")]
    UsageViolation { reason: String },
}

impl From<ConfigError> for SharedMemoryError {
    fn from(err: ConfigError) -> Self {
        SharedMemoryError::InvalidArgument {
            reason: err.to_string(),
        }
    }
}

/// Failure of a region teardown.
///
/// `primary` is the first step that failed (unmap before delete). Failures
/// of later steps are kept in `secondary` so none of them is lost.
#[derive(Debug)]
pub struct ReleaseError {
    pub primary: SharedMemoryError,
    pub secondary: Vec<SharedMemoryError>,
}

impl ReleaseError {
    pub(crate) fn collect(mut errors: Vec<SharedMemoryError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let primary = errors.remove(0);
        Some(Self {
            primary,
            secondary: errors,
        })
    }

    /// All failures in the order they occurred, primary first.
    pub fn errors(&self) -> impl Iterator<Item = &SharedMemoryError> {
        std::iter::once(&self.primary).chain(self.secondary.iter())
    }
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        for err in &self.secondary {
            write!(f, "; also: {}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ReleaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.primary)
    }
}

/// Result type alias using MapshareError.
pub type MapshareResult<T> = Result<T, MapshareError>;
