// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{RecurrenceRule, RecurrenceUnit};
use crate::services::RecurrenceRuleService;
use crate::storage::CsvStorage;
use crate::utils::{maybe_print_json, parse_u32, parse_uuid, pretty_table, required};

pub fn handle(storage: &CsvStorage, m: &clap::ArgMatches) -> Result<()> {
    let service = RecurrenceRuleService::new(storage.rules());
    match m.subcommand() {
        Some(("add", sub)) => {
            let rule = service.add(from_args(sub)?)?;
            println!(
                "Created rule every {} {}(s) on day {} (id: {})",
                rule.interval, rule.unit, rule.day_index, rule.id
            );
        }
        Some(("list", sub)) => {
            let data = query_rows(&service)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|r| {
                        vec![
                            r.unit.clone(),
                            r.interval.to_string(),
                            r.day_index.to_string(),
                            r.id.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Unit", "Interval", "Day", "Id"], rows)
                );
            }
        }
        Some(("update", sub)) => {
            let mut rule = from_args(sub)?;
            rule.id = parse_uuid(required(sub, "id")?)?;
            service.update(&rule)?;
            println!("Updated rule {}", rule.id);
        }
        Some(("rm", sub)) => {
            let id = parse_uuid(required(sub, "id")?)?;
            service.delete(id)?;
            println!("Deleted rule {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn from_args(sub: &clap::ArgMatches) -> Result<RecurrenceRule> {
    let unit: RecurrenceUnit = required(sub, "unit")?.parse()?;
    let interval = parse_u32(required(sub, "interval")?)?;
    let day = parse_u32(required(sub, "day")?)?;
    Ok(RecurrenceRule::new(unit, interval, day))
}

#[derive(Debug, Serialize)]
pub struct RuleRow {
    pub id: String,
    pub unit: String,
    pub interval: u32,
    pub day_index: u32,
}

pub fn query_rows(service: &RecurrenceRuleService) -> Result<Vec<RuleRow>> {
    let mut rules = service.list()?;
    rules.sort_by_key(|r| (r.unit.to_string(), r.interval, r.day_index));
    Ok(rules
        .into_iter()
        .map(|r| RuleRow {
            id: r.id.to_string(),
            unit: r.unit.to_string(),
            interval: r.interval,
            day_index: r.day_index,
        })
        .collect())
}
