// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! mapshare CLI
//!
//! Command-line interface for creating, inspecting and editing shared
//! memory regions.

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

/// mapshare - file-backed shared memory regions
#[derive(Parser)]
#[command(name = "mapshare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "mapshare.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Access width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Width {
    #[value(name = "8")]
    W8,
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

impl Width {
    pub fn bytes(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create (or resize) a region and its backing file
    Create {
        /// Size in bytes (defaults to the configured size)
        #[arg(short, long)]
        size: Option<u64>,

        /// Backing file (defaults to SharedMemory-<size>.mmap in the configured directory)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Show size, page size and checksum of a region
    Info {
        /// Backing file
        file: String,
    },

    /// Read a value
    Peek {
        /// Backing file
        file: String,

        /// Byte offset from the start of the region
        #[arg(short, long)]
        offset: usize,

        /// Access width in bits
        #[arg(short, long, value_enum, default_value = "64")]
        width: Width,

        /// Use an acquire load
        #[arg(long)]
        volatile: bool,
    },

    /// Write a value
    Poke {
        /// Backing file
        file: String,

        /// Byte offset from the start of the region
        #[arg(short, long)]
        offset: usize,

        /// Access width in bits
        #[arg(short, long, value_enum, default_value = "64")]
        width: Width,

        /// Value to store (truncated to the width)
        #[arg(long, allow_hyphen_values = true)]
        value: i64,

        /// Use a release store
        #[arg(long)]
        volatile: bool,
    },

    /// Hex dump a range of a region
    Dump {
        /// Backing file
        file: String,

        /// Byte offset from the start of the region
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Number of bytes (defaults to the rest of the region, at most 4096)
        #[arg(short, long)]
        len: Option<usize>,
    },

    /// Unmap a region and delete its backing file
    Remove {
        /// Backing file
        file: String,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },

    /// Show the platform capability probe
    Probe,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Create { size, file } => {
            commands::create::execute(&cli.config, size, file.as_deref())
        }
        Commands::Info { file } => commands::info::execute(&file),
        Commands::Peek {
            file,
            offset,
            width,
            volatile,
        } => commands::peek::execute(&file, offset, width, volatile),
        Commands::Poke {
            file,
            offset,
            width,
            value,
            volatile,
        } => commands::poke::execute(&file, offset, width, value, volatile),
        Commands::Dump { file, offset, len } => commands::dump::execute(&file, offset, len),
        Commands::Remove { file } => commands::remove::execute(&file),
        Commands::Validate { file } => commands::validate::execute(&file),
        Commands::Probe => commands::probe::execute(),
    }
}
