// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::forecast;
use crate::models::{ForecastResult, RecurrenceRule, RecurringTransaction, Transaction};
use crate::storage::Store;

/// Loads full snapshots from the stores and hands them to [`forecast`].
pub struct ForecastService<'a> {
    transactions: &'a dyn Store<Transaction>,
    recurring: &'a dyn Store<RecurringTransaction>,
    rules: &'a dyn Store<RecurrenceRule>,
}

impl<'a> ForecastService<'a> {
    pub fn new(
        transactions: &'a dyn Store<Transaction>,
        recurring: &'a dyn Store<RecurringTransaction>,
        rules: &'a dyn Store<RecurrenceRule>,
    ) -> Self {
        Self {
            transactions,
            recurring,
            rules,
        }
    }

    pub fn forecast(&self, from: NaiveDate, to: NaiveDate) -> Result<ForecastResult> {
        let (transactions, recurring, rules) = self.snapshot()?;
        forecast::daily_balances(&transactions, &recurring, &rules, from, to)
    }

    pub fn balance_at(&self, date: NaiveDate) -> Result<Decimal> {
        let (transactions, recurring, rules) = self.snapshot()?;
        forecast::balance_at(&transactions, &recurring, &rules, date)
    }

    fn snapshot(
        &self,
    ) -> Result<(
        Vec<Transaction>,
        Vec<RecurringTransaction>,
        Vec<RecurrenceRule>,
    )> {
        Ok((
            self.transactions.get_all()?,
            self.recurring.get_all()?,
            self.rules.get_all()?,
        ))
    }
}
