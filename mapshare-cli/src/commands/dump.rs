// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `mapshare dump` command - Hex dump part of a region.

use mapshare_core::{Memory, SharedMemory};

use super::{checked_address, CommandResult};

/// Longest dump printed when no length is given.
const DEFAULT_DUMP_LIMIT: usize = 4096;

const ROW: usize = 16;

/// Format `bytes` as rows of `offset: hex  ascii`.
pub fn format_rows(start: usize, bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(ROW)
        .enumerate()
        .map(|(i, chunk)| {
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            format!(
                "{:08x}: {:<width$}  {}",
                start + i * ROW,
                hex::encode(chunk),
                ascii,
                width = ROW * 2
            )
        })
        .collect()
}

pub fn execute(file: &str, offset: usize, len: Option<usize>) -> CommandResult {
    let region = SharedMemory::open_existing(file)?;
    let len = len.unwrap_or_else(|| region.len().saturating_sub(offset).min(DEFAULT_DUMP_LIMIT));
    let address = checked_address(&region, offset, len, false)?;

    let mut bytes = vec![0u8; len];
    // SAFETY: range was bounds checked against the live region
    unsafe { region.get_bytes(address, &mut bytes) };

    for row in format_rows(offset, &bytes) {
        println!("{}", row);
    }

    region.release(false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rows() {
        let rows = format_rows(0x20, b"Hello, mapshare!\x00\x01");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            "00000020: 48656c6c6f2c206d6170736861726521  Hello, mapshare!"
        );
        assert!(rows[1].starts_with("00000030: 0001"));
        assert!(rows[1].ends_with(".."));
    }
}
