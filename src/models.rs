// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PlannerError, Result};

pub const MAX_DESCRIPTION_LEN: usize = 250;
pub const MAX_RULE_INTERVAL: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Income counts positive, expense negative.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => f.write_str("Income"),
            TransactionType::Expense => f.write_str("Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(PlannerError::Parse(format!(
                "Invalid transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecurrenceUnit {
    Week,
    Month,
    Year,
}

impl RecurrenceUnit {
    /// Valid day-index values for the unit. Months stop at 28 so every month has the day.
    pub fn day_index_range(self) -> RangeInclusive<u32> {
        match self {
            RecurrenceUnit::Week => 1..=7,
            RecurrenceUnit::Month => 1..=28,
            RecurrenceUnit::Year => 1..=366,
        }
    }
}

impl fmt::Display for RecurrenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceUnit::Week => f.write_str("Week"),
            RecurrenceUnit::Month => f.write_str("Month"),
            RecurrenceUnit::Year => f.write_str("Year"),
        }
    }
}

impl FromStr for RecurrenceUnit {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(RecurrenceUnit::Week),
            "month" => Ok(RecurrenceUnit::Month),
            "year" => Ok(RecurrenceUnit::Year),
            _ => Err(PlannerError::UnsupportedUnit(s.trim().to_string())),
        }
    }
}

/// A single income or expense, past or planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub source_recurring_transaction_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(r#type: TransactionType, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            r#type,
            amount,
            date,
            description: None,
            source_recurring_transaction_id: None,
        }
    }

    pub fn signed_amount(&self) -> Decimal {
        self.r#type.signed(self.amount)
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        validate_description(self.description.as_deref())
    }
}

/// Template for a transaction that repeats according to a [`RecurrenceRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub r#type: TransactionType,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub recurrence_rule_id: Uuid,
    pub description: Option<String>,
    pub is_paused: bool,
}

impl RecurringTransaction {
    pub fn new(
        r#type: TransactionType,
        amount: Decimal,
        start_date: NaiveDate,
        recurrence_rule_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            r#type,
            amount,
            start_date,
            recurrence_rule_id,
            description: None,
            is_paused: false,
        }
    }

    pub fn signed_amount(&self) -> Decimal {
        self.r#type.signed(self.amount)
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        if self.recurrence_rule_id.is_nil() {
            return Err(PlannerError::Validation(
                "recurrence rule id is required".into(),
            ));
        }
        validate_description(self.description.as_deref())
    }
}

/// Recurrence pattern. `day_index` is interpreted per unit:
/// weekday 1..=7 (Monday first), day of month 1..=28, or day of year 1..=366.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub id: Uuid,
    pub unit: RecurrenceUnit,
    pub interval: u32,
    pub day_index: u32,
}

impl RecurrenceRule {
    pub fn new(unit: RecurrenceUnit, interval: u32, day_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit,
            interval,
            day_index,
        }
    }

    pub fn has_valid_day_index(&self) -> bool {
        self.unit.day_index_range().contains(&self.day_index)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_RULE_INTERVAL).contains(&self.interval) {
            return Err(PlannerError::Validation(format!(
                "interval must be between 1 and {}, got {}",
                MAX_RULE_INTERVAL, self.interval
            )));
        }
        if !self.has_valid_day_index() {
            let range = self.unit.day_index_range();
            return Err(PlannerError::Validation(format!(
                "day index {} is out of range {}..={} for unit {}",
                self.day_index,
                range.start(),
                range.end(),
                self.unit
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalancePoint {
    pub date: NaiveDate,
    pub daily_net: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub daily_balances: Vec<DailyBalancePoint>,
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(PlannerError::Validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LEN => {
            Err(PlannerError::Validation(format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )))
        }
        _ => Ok(()),
    }
}
