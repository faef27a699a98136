// ABOUTME: JSON output helpers for forage-cli
// ABOUTME: Writes serializable records to stdout, pretty or single-line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};

/// Output mode chosen on the command line
#[derive(Debug, Clone, Copy)]
pub struct Output {
    compact: bool,
}

impl Output {
    pub const fn new(compact: bool) -> Self {
        Self { compact }
    }

    /// Write `value` as JSON followed by a newline
    pub fn print<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        if self.compact {
            serde_json::to_writer(&mut handle, value)
        } else {
            serde_json::to_writer_pretty(&mut handle, value)
        }
        .context("Failed to serialize output")?;

        writeln!(handle).context("Failed to write output")?;
        Ok(())
    }
}
