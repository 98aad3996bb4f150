// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare validate` command - Validate configuration file.

use mapshare_core::ConfigLoader;

use super::CommandResult;

pub fn execute(file: &str) -> CommandResult {
    tracing::info!(file = %file, "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Region Settings:");
            println!(
                "  Directory:    {}",
                config.region.directory.display()
            );
            println!("  Default Size: {}", config.region.default_size);
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
