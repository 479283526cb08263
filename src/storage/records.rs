// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::csv_store::{CsvRecord, CsvRow, TableSchema};
use crate::errors::{PlannerError, Result};
use crate::models::{
    RecurrenceRule, RecurrenceUnit, RecurringTransaction, Transaction, TransactionType,
};

const DATE_FMT: &str = "%Y-%m-%d";

impl CsvRecord for Transaction {
    const SCHEMA: TableSchema = TableSchema {
        file_name: "transactions.csv",
        headers: &[
            "Id",
            "Type",
            "Amount",
            "Date",
            "Description",
            "SourceRecurringTransactionId",
        ],
    };

    fn from_row(row: &CsvRow) -> Result<Self> {
        Ok(Transaction {
            id: uuid_col(row, "Id")?,
            r#type: row.get("Type").parse::<TransactionType>()?,
            amount: decimal_col(row, "Amount")?,
            date: date_col(row, "Date")?,
            description: text_col(row, "Description"),
            source_recurring_transaction_id: optional_uuid_col(row, "SourceRecurringTransactionId")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.r#type.to_string(),
            self.amount.to_string(),
            self.date.format(DATE_FMT).to_string(),
            self.description.clone().unwrap_or_default(),
            self.source_recurring_transaction_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ]
    }
}

impl CsvRecord for RecurringTransaction {
    const SCHEMA: TableSchema = TableSchema {
        file_name: "recurring_transactions.csv",
        headers: &[
            "Id",
            "Type",
            "Amount",
            "StartDate",
            "RecurrenceRuleId",
            "Description",
            "IsPaused",
        ],
    };

    fn from_row(row: &CsvRow) -> Result<Self> {
        Ok(RecurringTransaction {
            id: uuid_col(row, "Id")?,
            r#type: row.get("Type").parse::<TransactionType>()?,
            amount: decimal_col(row, "Amount")?,
            start_date: date_col(row, "StartDate")?,
            recurrence_rule_id: uuid_col(row, "RecurrenceRuleId")?,
            description: text_col(row, "Description"),
            is_paused: bool_col(row, "IsPaused")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.r#type.to_string(),
            self.amount.to_string(),
            self.start_date.format(DATE_FMT).to_string(),
            self.recurrence_rule_id.to_string(),
            self.description.clone().unwrap_or_default(),
            self.is_paused.to_string(),
        ]
    }
}

impl CsvRecord for RecurrenceRule {
    const SCHEMA: TableSchema = TableSchema {
        file_name: "recurrence_rules.csv",
        headers: &["Id", "Unit", "Interval", "DayIndex"],
    };

    fn from_row(row: &CsvRow) -> Result<Self> {
        Ok(RecurrenceRule {
            id: uuid_col(row, "Id")?,
            unit: row.get("Unit").parse::<RecurrenceUnit>()?,
            interval: u32_col(row, "Interval")?,
            day_index: u32_col(row, "DayIndex")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.unit.to_string(),
            self.interval.to_string(),
            self.day_index.to_string(),
        ]
    }
}

fn bad(header: &str, value: &str, expected: &str) -> PlannerError {
    PlannerError::Parse(format!(
        "column {} has '{}', expected {}",
        header, value, expected
    ))
}

fn uuid_col(row: &CsvRow, header: &str) -> Result<Uuid> {
    let raw = row.get(header).trim();
    Uuid::parse_str(raw).map_err(|_| bad(header, raw, "a UUID"))
}

fn optional_uuid_col(row: &CsvRow, header: &str) -> Result<Option<Uuid>> {
    if row.get(header).trim().is_empty() {
        return Ok(None);
    }
    uuid_col(row, header).map(Some)
}

fn decimal_col(row: &CsvRow, header: &str) -> Result<Decimal> {
    let raw = row.get(header).trim();
    raw.parse::<Decimal>()
        .map_err(|_| bad(header, raw, "a decimal"))
}

fn date_col(row: &CsvRow, header: &str) -> Result<NaiveDate> {
    let raw = row.get(header).trim();
    NaiveDate::parse_from_str(raw, DATE_FMT).map_err(|_| bad(header, raw, "YYYY-MM-DD"))
}

fn u32_col(row: &CsvRow, header: &str) -> Result<u32> {
    let raw = row.get(header).trim();
    raw.parse::<u32>()
        .map_err(|_| bad(header, raw, "a non-negative integer"))
}

fn bool_col(row: &CsvRow, header: &str) -> Result<bool> {
    let raw = row.get(header).trim();
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(bad(header, raw, "true|false")),
    }
}

fn text_col(row: &CsvRow, header: &str) -> Option<String> {
    let raw = row.get(header);
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
