// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{PlannerError, Result};
use crate::models::Transaction;
use crate::storage::{Record, Store};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionScope {
    #[default]
    All,
    /// Dated today or earlier.
    Past,
    /// Dated after today.
    Future,
}

impl FromStr for TransactionScope {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TransactionScope::All),
            "past" => Ok(TransactionScope::Past),
            "future" => Ok(TransactionScope::Future),
            other => Err(PlannerError::Parse(format!(
                "Invalid scope '{}', expected all|past|future",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub scope: TransactionScope,
}

pub struct TransactionService<'a> {
    store: &'a dyn Store<Transaction>,
    clock: &'a dyn Clock,
}

impl<'a> TransactionService<'a> {
    pub fn new(store: &'a dyn Store<Transaction>, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Matching transactions, oldest first.
    pub fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let today = self.clock.today();
        let mut items: Vec<Transaction> = self
            .store
            .get_all()?
            .into_iter()
            .filter(|tx| filter.from.is_none_or(|from| tx.date >= from))
            .filter(|tx| filter.to.is_none_or(|to| tx.date <= to))
            .filter(|tx| match filter.scope {
                TransactionScope::All => true,
                TransactionScope::Past => tx.date <= today,
                TransactionScope::Future => tx.date > today,
            })
            .collect();
        items.sort_by_key(|tx| tx.date);
        Ok(items)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Transaction>> {
        self.store.get_by_id(id)
    }

    /// Persists `transaction`, assigning a fresh id when it has none.
    pub fn add(&self, mut transaction: Transaction) -> Result<Transaction> {
        transaction.validate()?;
        if transaction.id.is_nil() {
            transaction.id = Uuid::new_v4();
        }
        self.store.add(&transaction)?;
        info!(id = %transaction.id, date = %transaction.date, "added transaction");
        Ok(transaction)
    }

    pub fn update(&self, transaction: &Transaction) -> Result<()> {
        self.ensure_exists(transaction.id)?;
        transaction.validate()?;
        self.store.update(transaction)?;
        info!(id = %transaction.id, "updated transaction");
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.ensure_exists(id)?;
        self.store.delete(id)?;
        info!(%id, "deleted transaction");
        Ok(())
    }

    fn ensure_exists(&self, id: Uuid) -> Result<Transaction> {
        self.store.get_by_id(id)?.ok_or(PlannerError::NotFound {
            entity: Transaction::ENTITY,
            id,
        })
    }
}
