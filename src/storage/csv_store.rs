// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One CSV file per entity. Tables are rewritten whole through a temp file
//! and renamed into place, so readers never observe a half-written table.

use csv::{ReaderBuilder, Writer};
use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use super::{DataReset, Record, Store};
use crate::config::StorageOptions;
use crate::errors::{PlannerError, Result};
use crate::models::{RecurrenceRule, RecurringTransaction, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub file_name: &'static str,
    pub headers: &'static [&'static str],
}

const ALL_SCHEMAS: [&TableSchema; 3] = [
    &<Transaction as CsvRecord>::SCHEMA,
    &<RecurringTransaction as CsvRecord>::SCHEMA,
    &<RecurrenceRule as CsvRecord>::SCHEMA,
];

/// Mapping between a record and a CSV row.
pub trait CsvRecord: Record + Sized {
    const SCHEMA: TableSchema;

    fn from_row(row: &CsvRow) -> Result<Self>;

    /// Values in `SCHEMA.headers` order.
    fn to_row(&self) -> Vec<String>;
}

/// A parsed line keyed by header name, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct CsvRow {
    values: HashMap<String, String>,
}

impl CsvRow {
    /// Missing columns read as empty.
    pub fn get(&self, header: &str) -> &str {
        self.values
            .get(&header.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub(crate) fn read_rows(path: &Path) -> Result<Vec<CsvRow>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let values = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(CsvRow { values });
    }
    Ok(rows)
}

pub(crate) fn write_rows_atomic<I>(path: &Path, schema: &TableSchema, rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let dir = path
        .parent()
        .ok_or_else(|| PlannerError::Config(format!("{} has no parent dir", path.display())))?;
    fs::create_dir_all(dir)?;

    let tmp = dir.join(format!("{}.{}.tmp", schema.file_name, Uuid::new_v4().simple()));
    let written = write_table(&tmp, schema, rows).and_then(|count| {
        fs::rename(&tmp, path)?;
        Ok(count)
    });
    match written {
        Ok(count) => {
            debug!(table = schema.file_name, rows = count, "persisted table");
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            Err(err)
        }
    }
}

fn write_table<I>(path: &Path, schema: &TableSchema, rows: I) -> Result<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(schema.headers)?;
    let mut count = 0;
    for row in rows {
        wtr.write_record(&row)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

/// Creates the directory and a header-only file for each missing or empty table.
pub fn ensure_created(root: &Path) -> Result<()> {
    fs::create_dir_all(root)?;
    for schema in ALL_SCHEMAS {
        let path = root.join(schema.file_name);
        let empty = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if empty {
            write_rows_atomic(&path, schema, Vec::new())?;
        }
    }
    Ok(())
}

pub struct CsvStore<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: CsvRecord> CsvStore<T> {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(T::SCHEMA.file_name),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &[T]) -> Result<()> {
        write_rows_atomic(&self.path, &T::SCHEMA, items.iter().map(T::to_row))
    }
}

impl<T: CsvRecord> Store<T> for CsvStore<T> {
    fn get_all(&self) -> Result<Vec<T>> {
        read_rows(&self.path)?.iter().map(T::from_row).collect()
    }

    fn add(&self, item: &T) -> Result<()> {
        let mut all = self.get_all()?;
        if all.iter().any(|existing| existing.id() == item.id()) {
            return Err(PlannerError::AlreadyExists {
                entity: T::ENTITY,
                id: item.id(),
            });
        }
        all.push(item.clone());
        self.persist(&all)
    }

    fn update(&self, item: &T) -> Result<()> {
        let mut all = self.get_all()?;
        let slot = all
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or(PlannerError::NotFound {
                entity: T::ENTITY,
                id: item.id(),
            })?;
        *slot = item.clone();
        self.persist(&all)
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut all = self.get_all()?;
        let before = all.len();
        all.retain(|item| item.id() != id);
        if all.len() == before {
            return Ok(());
        }
        self.persist(&all)
    }
}

/// The three tables under one data directory.
pub struct CsvStorage {
    options: StorageOptions,
    transactions: CsvStore<Transaction>,
    recurring: CsvStore<RecurringTransaction>,
    rules: CsvStore<RecurrenceRule>,
}

impl CsvStorage {
    pub fn open(options: StorageOptions) -> Result<Self> {
        ensure_created(&options.root)?;
        info!(root = %options.root.display(), "opened csv storage");
        Ok(Self {
            transactions: CsvStore::new(&options.root),
            recurring: CsvStore::new(&options.root),
            rules: CsvStore::new(&options.root),
            options,
        })
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    pub fn transactions(&self) -> &CsvStore<Transaction> {
        &self.transactions
    }

    pub fn recurring(&self) -> &CsvStore<RecurringTransaction> {
        &self.recurring
    }

    pub fn rules(&self) -> &CsvStore<RecurrenceRule> {
        &self.rules
    }
}

impl DataReset for CsvStorage {
    fn reset(&self) -> Result<()> {
        fs::create_dir_all(self.root())?;
        for schema in ALL_SCHEMAS {
            write_rows_atomic(&self.root().join(schema.file_name), schema, Vec::new())?;
        }
        info!(root = %self.root().display(), "reset all tables");
        Ok(())
    }
}
