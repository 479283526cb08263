// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

use crate::errors::{PlannerError, Result};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.expenseplanner", "ExpensePlanner", "expense-planner"));

/// Overrides the platform data directory when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "EXPENSE_PLANNER_DATA_DIR";

/// Where the CSV tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageOptions {
    pub root: PathBuf,
}

impl StorageOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Explicit override, then `EXPENSE_PLANNER_DATA_DIR`, then the platform data dir.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        let configured = override_dir
            .map(Path::to_path_buf)
            .or_else(|| {
                env::var_os(DATA_DIR_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            });

        let root = match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => env::current_dir()?.join(path),
            None => default_data_dir()?,
        };
        Ok(Self { root })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        PlannerError::Config("could not determine platform-specific data dir".into())
    })?;
    Ok(proj.data_dir().join("data"))
}
