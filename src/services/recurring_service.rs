// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;
use uuid::Uuid;

use crate::errors::{PlannerError, Result};
use crate::models::{RecurrenceRule, RecurringTransaction};
use crate::storage::{Record, Store};

/// CRUD over recurring templates. Every write checks that the referenced rule exists.
pub struct RecurringTransactionService<'a> {
    recurring: &'a dyn Store<RecurringTransaction>,
    rules: &'a dyn Store<RecurrenceRule>,
}

impl<'a> RecurringTransactionService<'a> {
    pub fn new(
        recurring: &'a dyn Store<RecurringTransaction>,
        rules: &'a dyn Store<RecurrenceRule>,
    ) -> Self {
        Self { recurring, rules }
    }

    /// All templates ordered by start date.
    pub fn list(&self) -> Result<Vec<RecurringTransaction>> {
        let mut items = self.recurring.get_all()?;
        items.sort_by_key(|item| item.start_date);
        Ok(items)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<RecurringTransaction>> {
        self.recurring.get_by_id(id)
    }

    pub fn add(&self, mut recurring: RecurringTransaction) -> Result<RecurringTransaction> {
        recurring.validate()?;
        self.ensure_rule_exists(recurring.recurrence_rule_id)?;
        if recurring.id.is_nil() {
            recurring.id = Uuid::new_v4();
        }
        self.recurring.add(&recurring)?;
        info!(
            id = %recurring.id,
            rule_id = %recurring.recurrence_rule_id,
            "added recurring transaction"
        );
        Ok(recurring)
    }

    pub fn update(&self, recurring: &RecurringTransaction) -> Result<()> {
        self.ensure_exists(recurring.id)?;
        recurring.validate()?;
        self.ensure_rule_exists(recurring.recurrence_rule_id)?;
        self.recurring.update(recurring)?;
        info!(id = %recurring.id, "updated recurring transaction");
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.ensure_exists(id)?;
        self.recurring.delete(id)?;
        info!(%id, "deleted recurring transaction");
        Ok(())
    }

    /// Returns whether the flag changed; an already paused template is left untouched.
    pub fn pause(&self, id: Uuid) -> Result<bool> {
        self.set_paused(id, true)
    }

    /// Returns whether the flag changed.
    pub fn resume(&self, id: Uuid) -> Result<bool> {
        self.set_paused(id, false)
    }

    fn set_paused(&self, id: Uuid, paused: bool) -> Result<bool> {
        let mut recurring = self.ensure_exists(id)?;
        if recurring.is_paused == paused {
            return Ok(false);
        }
        recurring.is_paused = paused;
        self.recurring.update(&recurring)?;
        info!(%id, paused, "toggled recurring transaction");
        Ok(true)
    }

    fn ensure_exists(&self, id: Uuid) -> Result<RecurringTransaction> {
        self.recurring.get_by_id(id)?.ok_or(PlannerError::NotFound {
            entity: RecurringTransaction::ENTITY,
            id,
        })
    }

    fn ensure_rule_exists(&self, rule_id: Uuid) -> Result<()> {
        match self.rules.get_by_id(rule_id)? {
            Some(_) => Ok(()),
            None => Err(PlannerError::NotFound {
                entity: RecurrenceRule::ENTITY,
                id: rule_id,
            }),
        }
    }
}
