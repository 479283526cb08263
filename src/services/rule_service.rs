// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;
use uuid::Uuid;

use crate::errors::{PlannerError, Result};
use crate::models::RecurrenceRule;
use crate::storage::{Record, Store};

pub struct RecurrenceRuleService<'a> {
    rules: &'a dyn Store<RecurrenceRule>,
}

impl<'a> RecurrenceRuleService<'a> {
    pub fn new(rules: &'a dyn Store<RecurrenceRule>) -> Self {
        Self { rules }
    }

    pub fn list(&self) -> Result<Vec<RecurrenceRule>> {
        self.rules.get_all()
    }

    pub fn get(&self, id: Uuid) -> Result<Option<RecurrenceRule>> {
        self.rules.get_by_id(id)
    }

    pub fn add(&self, mut rule: RecurrenceRule) -> Result<RecurrenceRule> {
        rule.validate()?;
        if rule.id.is_nil() {
            rule.id = Uuid::new_v4();
        }
        self.rules.add(&rule)?;
        info!(id = %rule.id, unit = %rule.unit, "added recurrence rule");
        Ok(rule)
    }

    pub fn update(&self, rule: &RecurrenceRule) -> Result<()> {
        if self.rules.get_by_id(rule.id)?.is_none() {
            return Err(PlannerError::NotFound {
                entity: RecurrenceRule::ENTITY,
                id: rule.id,
            });
        }
        rule.validate()?;
        self.rules.update(rule)?;
        info!(id = %rule.id, "updated recurrence rule");
        Ok(())
    }

    /// Templates that still reference the rule are not touched; a later
    /// forecast reports them as missing-rule errors.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.rules.delete(id)?;
        info!(%id, "deleted recurrence rule");
        Ok(())
    }
}
