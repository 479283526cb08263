// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::models::{RecurringTransaction, TransactionType};
use crate::services::RecurringTransactionService;
use crate::storage::CsvStorage;
use crate::utils::{
    fmt_money, maybe_print_json, optional_text, parse_date, parse_decimal, parse_uuid,
    pretty_table, required,
};

pub fn handle(storage: &CsvStorage, m: &clap::ArgMatches) -> Result<()> {
    let service = RecurringTransactionService::new(storage.recurring(), storage.rules());
    match m.subcommand() {
        Some(("add", sub)) => add(&service, sub)?,
        Some(("list", sub)) => list(&service, sub)?,
        Some(("update", sub)) => update(&service, sub)?,
        Some(("rm", sub)) => {
            let id = parse_uuid(required(sub, "id")?)?;
            service.delete(id)?;
            println!("Deleted recurring transaction {}", id);
        }
        Some(("pause", sub)) => {
            let id = parse_uuid(required(sub, "id")?)?;
            if service.pause(id)? {
                println!("Paused {}", id);
            } else {
                println!("{} is already paused", id);
            }
        }
        Some(("resume", sub)) => {
            let id = parse_uuid(required(sub, "id")?)?;
            if service.resume(id)? {
                println!("Resumed {}", id);
            } else {
                println!("{} is already active", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn from_args(sub: &clap::ArgMatches) -> Result<RecurringTransaction> {
    let r#type: TransactionType = required(sub, "type")?.parse()?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let start = parse_date(required(sub, "start")?)?;
    let rule_id = parse_uuid(required(sub, "rule")?)?;
    let mut recurring = RecurringTransaction::new(r#type, amount, start, rule_id);
    recurring.description = optional_text(sub, "description");
    Ok(recurring)
}

fn add(service: &RecurringTransactionService, sub: &clap::ArgMatches) -> Result<()> {
    let mut recurring = from_args(sub)?;
    recurring.is_paused = sub.get_flag("paused");
    let recurring = service.add(recurring)?;
    println!(
        "Scheduled {} {} from {} (id: {})",
        recurring.r#type,
        fmt_money(&recurring.amount),
        recurring.start_date,
        recurring.id
    );
    Ok(())
}

/// The paused flag is only changed through `pause`/`resume`.
fn update(service: &RecurringTransactionService, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_uuid(required(sub, "id")?)?;
    let existing = service
        .get(id)?
        .ok_or_else(|| anyhow!("Recurring transaction {} not found", id))?;
    let mut recurring = from_args(sub)?;
    recurring.id = id;
    recurring.is_paused = existing.is_paused;
    service.update(&recurring)?;
    println!("Updated recurring transaction {}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RecurringRow {
    pub id: String,
    pub r#type: String,
    pub amount: String,
    pub start_date: String,
    pub recurrence_rule_id: String,
    pub description: String,
    pub paused: bool,
}

pub fn query_rows(service: &RecurringTransactionService) -> Result<Vec<RecurringRow>> {
    Ok(service
        .list()?
        .into_iter()
        .map(|r| RecurringRow {
            id: r.id.to_string(),
            r#type: r.r#type.to_string(),
            amount: fmt_money(&r.signed_amount()),
            start_date: r.start_date.to_string(),
            recurrence_rule_id: r.recurrence_rule_id.to_string(),
            description: r.description.unwrap_or_default(),
            paused: r.is_paused,
        })
        .collect())
}

fn list(service: &RecurringTransactionService, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(service)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.start_date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.recurrence_rule_id.clone(),
                    if r.paused { "yes".into() } else { "".into() },
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Start", "Type", "Amount", "Description", "Rule", "Paused", "Id"],
                rows,
            )
        );
    }
    Ok(())
}
