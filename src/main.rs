// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use expense_planner::clock::SystemClock;
use expense_planner::config::StorageOptions;
use expense_planner::storage::CsvStorage;
use expense_planner::{cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let data_dir = matches.get_one::<String>("data_dir").map(Path::new);
    let storage = CsvStorage::open(StorageOptions::resolve(data_dir)?)?;
    let clock = SystemClock;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data directory ready at {}", storage.root().display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&storage, &clock, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&storage, sub)?,
        Some(("rule", sub)) => commands::rules::handle(&storage, sub)?,
        Some(("forecast", sub)) => commands::forecast::handle(&storage, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&storage, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
