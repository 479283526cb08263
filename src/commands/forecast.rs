// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Serialize;

use crate::services::ForecastService;
use crate::storage::CsvStorage;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, required};

pub fn handle(storage: &CsvStorage, m: &clap::ArgMatches) -> Result<()> {
    let service = ForecastService::new(storage.transactions(), storage.recurring(), storage.rules());
    match m.subcommand() {
        Some(("range", sub)) => {
            let from = parse_date(required(sub, "from")?)?;
            let to = parse_date(required(sub, "to")?)?;
            let data = compute(&service, from, to)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|r| vec![r.date.clone(), r.daily_net.clone(), r.balance.clone()])
                    .collect();
                println!("{}", pretty_table(&["Date", "Net", "Balance"], rows));
            }
        }
        Some(("balance", sub)) => {
            let date = parse_date(required(sub, "date")?)?;
            let balance = service.balance_at(date)?;
            let row = BalanceRow {
                date: date.to_string(),
                balance: fmt_money(&balance),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
                println!("Balance on {}: {}", row.date, row.balance);
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ForecastRow {
    pub date: String,
    pub daily_net: String,
    pub balance: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceRow {
    pub date: String,
    pub balance: String,
}

/// Daily rows for `[from, to]`. An inverted range is a usage error here.
pub fn compute(service: &ForecastService, from: NaiveDate, to: NaiveDate) -> Result<Vec<ForecastRow>> {
    if from > to {
        bail!("--from ({}) must not be after --to ({})", from, to);
    }
    Ok(service
        .forecast(from, to)?
        .daily_balances
        .into_iter()
        .map(|p| ForecastRow {
            date: p.date.to_string(),
            daily_net: fmt_money(&p.daily_net),
            balance: fmt_money(&p.balance),
        })
        .collect())
}
