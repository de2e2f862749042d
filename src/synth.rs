// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The synth operation: build the platform chart and write it to disk.

use crate::config::Config;
use crate::error::Result;
use crate::platform;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Build the platform set and write it to the configured manifest path.
/// Returns the path written.
#[instrument(skip(config), fields(output_dir = %config.output_dir.display()))]
pub fn synth(config: &Config) -> Result<PathBuf> {
    let set = platform::build()?;
    let path = config.manifest_path()?;

    set.write(&path)?;
    info!("Synthesized {} resources into {}", set.len(), path.display());

    Ok(path)
}
