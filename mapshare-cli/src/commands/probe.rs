// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare probe` command - Show platform capabilities.

use mapshare_core::Capabilities;

use super::CommandResult;

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

pub fn execute() -> CommandResult {
    let caps = Capabilities::get();

    println!("Platform capabilities:");
    println!("  {} Atomic 8/16/32/64-bit access", mark(caps.atomic_widths));
    println!("  {} Shared file mapping", mark(caps.shared_file_mapping));
    println!("  {} Mapping base address", mark(caps.base_address));
    println!("  Page size: {} bytes", caps.page_size);
    println!();

    match caps.missing() {
        None => println!("✓ Shared memory regions are available"),
        Some(missing) => {
            eprintln!("✗ Unsupported platform: {} is missing", missing);
            std::process::exit(1);
        }
    }
    Ok(())
}
