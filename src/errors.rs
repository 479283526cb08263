// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by the planner library.
///
/// `MissingRecurrenceRule`, `UnsupportedUnit` and `InvalidRule` mean the stored
/// data is inconsistent; callers should report them rather than retry.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(
        "Recurrence rule '{rule_id}' was not found for recurring transaction '{recurring_transaction_id}'"
    )]
    MissingRecurrenceRule {
        rule_id: Uuid,
        recurring_transaction_id: Uuid,
    },
    #[error("Unsupported recurrence unit '{0}' (expected week|month|year)")]
    UnsupportedUnit(String),
    #[error("Invalid recurrence rule '{rule_id}': {reason}")]
    InvalidRule { rule_id: Uuid, reason: String },
    #[error("{entity} '{id}' was not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: &'static str, id: Uuid },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
