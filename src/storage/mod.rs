// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seams. The forecast engine never touches these; services load
//! full snapshots through them and hand plain slices to the pure functions.

pub mod csv_store;
mod records;

use uuid::Uuid;

use crate::errors::Result;
use crate::models::{RecurrenceRule, RecurringTransaction, Transaction};

pub use csv_store::{CsvStorage, CsvStore, TableSchema};

/// An entity addressable by id.
pub trait Record: Clone {
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
}

impl Record for Transaction {
    const ENTITY: &'static str = "Transaction";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for RecurringTransaction {
    const ENTITY: &'static str = "Recurring transaction";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for RecurrenceRule {
    const ENTITY: &'static str = "Recurrence rule";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Unordered collection of one entity type.
pub trait Store<T: Record> {
    fn get_all(&self) -> Result<Vec<T>>;

    fn get_by_id(&self, id: Uuid) -> Result<Option<T>> {
        Ok(self.get_all()?.into_iter().find(|item| item.id() == id))
    }

    /// Fails with `AlreadyExists` when the id is taken.
    fn add(&self, item: &T) -> Result<()>;

    /// Fails with `NotFound` when the id is unknown.
    fn update(&self, item: &T) -> Result<()>;

    /// Removing an unknown id is a no-op.
    fn delete(&self, id: Uuid) -> Result<()>;
}

/// Wipes every table at once.
pub trait DataReset {
    fn reset(&self) -> Result<()>;
}
