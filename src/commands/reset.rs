// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::services::DataResetService;
use crate::storage::CsvStorage;

pub fn handle(storage: &CsvStorage, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("Refusing to wipe {} without --yes", storage.root().display());
    }
    DataResetService::new(storage).reset()?;
    println!("All data removed from {}", storage.root().display());
    Ok(())
}
