// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::clock::Clock;
use crate::models::{Transaction, TransactionType};
use crate::services::{TransactionFilter, TransactionScope, TransactionService};
use crate::storage::CsvStorage;
use crate::utils::{
    fmt_money, maybe_print_json, optional_text, parse_date, parse_decimal, parse_uuid,
    pretty_table, required,
};

pub fn handle(storage: &CsvStorage, clock: &dyn Clock, m: &clap::ArgMatches) -> Result<()> {
    let service = TransactionService::new(storage.transactions(), clock);
    match m.subcommand() {
        Some(("add", sub)) => add(&service, sub)?,
        Some(("list", sub)) => list(&service, sub)?,
        Some(("update", sub)) => update(&service, sub)?,
        Some(("rm", sub)) => {
            let id = parse_uuid(required(sub, "id")?)?;
            service.delete(id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn from_args(sub: &clap::ArgMatches) -> Result<Transaction> {
    let r#type: TransactionType = required(sub, "type")?.parse()?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let date = parse_date(required(sub, "date")?)?;
    let mut tx = Transaction::new(r#type, amount, date);
    tx.description = optional_text(sub, "description");
    Ok(tx)
}

fn add(service: &TransactionService, sub: &clap::ArgMatches) -> Result<()> {
    let tx = service.add(from_args(sub)?)?;
    println!(
        "Recorded {} {} on {} (id: {})",
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date,
        tx.id
    );
    Ok(())
}

fn update(service: &TransactionService, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_uuid(required(sub, "id")?)?;
    let existing = service
        .get(id)?
        .ok_or_else(|| anyhow!("Transaction {} not found", id))?;
    let mut tx = from_args(sub)?;
    tx.id = id;
    tx.source_recurring_transaction_id = existing.source_recurring_transaction_id;
    service.update(&tx)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(service: &TransactionService, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(service, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Amount", "Description", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub description: String,
    pub source_recurring_transaction_id: String,
}

pub fn query_rows(
    service: &TransactionService,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let filter = TransactionFilter {
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        scope: sub
            .get_one::<String>("scope")
            .map(|s| s.parse::<TransactionScope>())
            .transpose()?
            .unwrap_or_default(),
    };

    let data = service
        .list(&filter)?
        .into_iter()
        .map(|tx| TransactionRow {
            id: tx.id.to_string(),
            date: tx.date.to_string(),
            r#type: tx.r#type.to_string(),
            amount: fmt_money(&tx.signed_amount()),
            description: tx.description.unwrap_or_default(),
            source_recurring_transaction_id: tx
                .source_recurring_transaction_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        })
        .collect();
    Ok(data)
}
