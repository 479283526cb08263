// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Day-granular balance forecast over one-time and recurring cash flows.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{PlannerError, Result};
use crate::models::{
    DailyBalancePoint, ForecastResult, RecurrenceRule, RecurringTransaction, Transaction,
};
use crate::recurrence;

/// Computes one point per calendar day in `[from, to]`.
///
/// The opening balance is the sum of every signed amount dated before `from`,
/// so recurring templates are expanded from their own start date rather than
/// from `from`. An inverted range yields an empty result.
///
/// Every recurring transaction must reference a rule present in `rules`, even
/// one that would contribute nothing to the window; otherwise the whole call
/// fails with [`PlannerError::MissingRecurrenceRule`]. Two rules sharing an id
/// fail with [`PlannerError::InvalidRule`], and a sum that leaves the `Decimal`
/// range fails with [`PlannerError::Validation`].
pub fn daily_balances(
    transactions: &[Transaction],
    recurring: &[RecurringTransaction],
    rules: &[RecurrenceRule],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<ForecastResult> {
    if from > to {
        return Ok(ForecastResult::default());
    }

    let net_by_date = net_changes(transactions, recurring, rules, to)?;

    let mut opening = Decimal::ZERO;
    for (date, net) in net_by_date.range(..from) {
        opening = accumulate(opening, *net, *date)?;
    }

    let mut balance = opening;
    let mut daily_balances = Vec::new();
    for date in from.iter_days().take_while(|date| *date <= to) {
        let daily_net = net_by_date.get(&date).copied().unwrap_or(Decimal::ZERO);
        balance = accumulate(balance, daily_net, date)?;
        daily_balances.push(DailyBalancePoint {
            date,
            daily_net,
            balance,
        });
    }

    debug!(
        %from,
        %to,
        %opening,
        days = daily_balances.len(),
        "computed daily balances"
    );
    Ok(ForecastResult { daily_balances })
}

/// Running balance at the end of `date`.
pub fn balance_at(
    transactions: &[Transaction],
    recurring: &[RecurringTransaction],
    rules: &[RecurrenceRule],
    date: NaiveDate,
) -> Result<Decimal> {
    let forecast = daily_balances(transactions, recurring, rules, date, date)?;
    Ok(forecast
        .daily_balances
        .first()
        .map(|point| point.balance)
        .unwrap_or(Decimal::ZERO))
}

/// Signed net change per date for everything dated on or before `to`.
fn net_changes(
    transactions: &[Transaction],
    recurring: &[RecurringTransaction],
    rules: &[RecurrenceRule],
    to: NaiveDate,
) -> Result<BTreeMap<NaiveDate, Decimal>> {
    let mut rule_by_id: HashMap<Uuid, &RecurrenceRule> = HashMap::with_capacity(rules.len());
    for rule in rules {
        if rule_by_id.insert(rule.id, rule).is_some() {
            return Err(PlannerError::InvalidRule {
                rule_id: rule.id,
                reason: "duplicate recurrence rule id".into(),
            });
        }
    }
    let mut net_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| tx.date <= to) {
        add_to_day(&mut net_by_date, tx.date, tx.signed_amount())?;
    }

    for template in recurring {
        let rule = rule_by_id
            .get(&template.recurrence_rule_id)
            .copied()
            .ok_or_else(|| {
                warn!(
                    recurring_transaction_id = %template.id,
                    rule_id = %template.recurrence_rule_id,
                    "recurring transaction references a missing recurrence rule"
                );
                PlannerError::MissingRecurrenceRule {
                    rule_id: template.recurrence_rule_id,
                    recurring_transaction_id: template.id,
                }
            })?;

        let signed = template.signed_amount();
        for date in recurrence::occurrences(template, rule, template.start_date, to)? {
            add_to_day(&mut net_by_date, date, signed)?;
        }
    }

    Ok(net_by_date)
}

fn add_to_day(
    net_by_date: &mut BTreeMap<NaiveDate, Decimal>,
    date: NaiveDate,
    amount: Decimal,
) -> Result<()> {
    let slot = net_by_date.entry(date).or_insert(Decimal::ZERO);
    *slot = accumulate(*slot, amount, date)?;
    Ok(())
}

fn accumulate(total: Decimal, amount: Decimal, date: NaiveDate) -> Result<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        PlannerError::Validation(format!("balance overflow on {}", date))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecurrenceUnit, TransactionType};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn tx(r#type: TransactionType, amount: i64, date: NaiveDate) -> Transaction {
        Transaction::new(r#type, Decimal::from(amount), date)
    }

    fn balances(result: &ForecastResult) -> Vec<Decimal> {
        result.daily_balances.iter().map(|p| p.balance).collect()
    }

    #[test]
    fn aggregates_one_time_and_weekly_recurring() {
        let monday = RecurrenceRule::new(RecurrenceUnit::Week, 1, 1);
        let rent = RecurringTransaction::new(
            TransactionType::Expense,
            Decimal::from(100),
            d(2025, 1, 1),
            monday.id,
        );
        let txs = vec![
            tx(TransactionType::Income, 1000, d(2025, 1, 1)),
            tx(TransactionType::Expense, 200, d(2025, 1, 2)),
            tx(TransactionType::Income, 50, d(2025, 1, 5)),
        ];

        let result = daily_balances(&txs, &[rent], &[monday], d(2025, 1, 1), d(2025, 1, 7)).unwrap();

        let expected: Vec<Decimal> = [1000, 800, 800, 800, 850, 750, 750]
            .into_iter()
            .map(Decimal::from)
            .collect();
        assert_eq!(balances(&result), expected);
        assert_eq!(result.daily_balances[5].date, d(2025, 1, 6));
        assert_eq!(result.daily_balances[5].daily_net, Decimal::from(-100));
        assert_eq!(result.daily_balances[2].daily_net, Decimal::ZERO);
    }

    #[test]
    fn history_before_range_becomes_opening_balance() {
        let txs = vec![
            tx(TransactionType::Income, 100, d(2025, 1, 1)),
            tx(TransactionType::Expense, 30, d(2025, 1, 3)),
            tx(TransactionType::Income, 40, d(2025, 1, 8)),
        ];
        let result = daily_balances(&txs, &[], &[], d(2025, 1, 5), d(2025, 1, 8)).unwrap();
        let expected: Vec<Decimal> = [70, 70, 70, 110].into_iter().map(Decimal::from).collect();
        assert_eq!(balances(&result), expected);
    }

    #[test]
    fn recurring_occurrences_before_range_count_towards_opening_balance() {
        let monthly = RecurrenceRule::new(RecurrenceUnit::Month, 1, 1);
        let salary = RecurringTransaction::new(
            TransactionType::Income,
            Decimal::from(500),
            d(2025, 1, 1),
            monthly.id,
        );
        let result =
            daily_balances(&[], &[salary], &[monthly], d(2025, 3, 15), d(2025, 4, 1)).unwrap();
        assert_eq!(result.daily_balances.first().unwrap().balance, Decimal::from(1500));
        assert_eq!(result.daily_balances.last().unwrap().balance, Decimal::from(2000));
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let result = daily_balances(&[], &[], &[], d(2025, 2, 1), d(2025, 1, 1)).unwrap();
        assert!(result.daily_balances.is_empty());
    }

    #[test]
    fn zero_fills_every_day_in_range() {
        let result = daily_balances(&[], &[], &[], d(2024, 2, 1), d(2024, 3, 31)).unwrap();
        assert_eq!(result.daily_balances.len(), 60);
        assert!(
            result
                .daily_balances
                .windows(2)
                .all(|w| (w[1].date - w[0].date).num_days() == 1)
        );
        assert!(result.daily_balances.iter().all(|p| p.balance.is_zero()));
    }

    #[test]
    fn missing_rule_fails_even_without_other_data() {
        let orphan = RecurringTransaction::new(
            TransactionType::Expense,
            Decimal::from(10),
            d(2030, 1, 1),
            Uuid::new_v4(),
        );
        let err = daily_balances(&[], &[orphan.clone()], &[], d(2025, 1, 1), d(2025, 1, 31))
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::MissingRecurrenceRule { recurring_transaction_id, .. }
                if recurring_transaction_id == orphan.id
        ));
    }

    #[test]
    fn transactions_after_range_are_ignored() {
        let txs = vec![
            tx(TransactionType::Income, 10, d(2025, 1, 1)),
            tx(TransactionType::Income, 999, d(2025, 2, 1)),
        ];
        let result = daily_balances(&txs, &[], &[], d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        assert_eq!(result.daily_balances.last().unwrap().balance, Decimal::from(10));
    }

    #[test]
    fn balance_at_matches_single_day_range() {
        let weekly = RecurrenceRule::new(RecurrenceUnit::Week, 1, 5);
        let groceries = RecurringTransaction::new(
            TransactionType::Expense,
            Decimal::new(4550, 2),
            d(2025, 1, 1),
            weekly.id,
        );
        let txs = vec![tx(TransactionType::Income, 2000, d(2025, 1, 1))];
        let date = d(2025, 2, 14);

        let single = balance_at(&txs, &[groceries.clone()], &[weekly.clone()], date).unwrap();
        let range = daily_balances(&txs, &[groceries], &[weekly], date, date).unwrap();
        assert_eq!(range.daily_balances.len(), 1);
        assert_eq!(single, range.daily_balances[0].balance);
        // Seven Fridays from 2025-01-03 through 2025-02-14.
        assert_eq!(single, Decimal::from(2000) - Decimal::new(4550, 2) * Decimal::from(7));
    }

    #[test]
    fn extending_range_backwards_keeps_balances_stable() {
        let rule = RecurrenceRule::new(RecurrenceUnit::Month, 1, 10);
        let bill = RecurringTransaction::new(
            TransactionType::Expense,
            Decimal::from(75),
            d(2024, 11, 20),
            rule.id,
        );
        let txs = vec![
            tx(TransactionType::Income, 300, d(2024, 12, 24)),
            tx(TransactionType::Expense, 20, d(2025, 1, 15)),
        ];
        let short = daily_balances(&txs, &[bill.clone()], &[rule.clone()], d(2025, 1, 1), d(2025, 1, 31))
            .unwrap();
        let long = daily_balances(&txs, &[bill], &[rule], d(2024, 10, 1), d(2025, 1, 31)).unwrap();
        let tail = &long.daily_balances[long.daily_balances.len() - short.daily_balances.len()..];
        assert_eq!(tail, short.daily_balances.as_slice());
    }

    #[test]
    fn same_day_overflow_is_an_error() {
        let day = d(2025, 1, 1);
        let huge = Transaction::new(TransactionType::Income, Decimal::MAX, day);
        let txs = vec![huge.clone(), Transaction { id: Uuid::new_v4(), ..huge }];
        assert!(txs.iter().all(|t| t.validate().is_ok()));

        let err = daily_balances(&txs, &[], &[], day, day).unwrap_err();
        assert!(matches!(err, PlannerError::Validation(msg) if msg.contains("overflow")));
    }

    #[test]
    fn running_balance_overflow_is_an_error() {
        let txs = vec![
            Transaction::new(TransactionType::Income, Decimal::MAX, d(2025, 1, 1)),
            Transaction::new(TransactionType::Income, Decimal::MAX, d(2025, 1, 2)),
        ];
        assert!(daily_balances(&txs, &[], &[], d(2025, 1, 1), d(2025, 1, 2)).is_err());
        // Same history folded into the opening balance.
        assert!(balance_at(&txs, &[], &[], d(2025, 1, 5)).is_err());
    }

    #[test]
    fn duplicate_rule_ids_are_rejected() {
        let rule = RecurrenceRule::new(RecurrenceUnit::Month, 1, 1);
        let mut twin = RecurrenceRule::new(RecurrenceUnit::Week, 1, 1);
        twin.id = rule.id;
        let err = daily_balances(&[], &[], &[rule.clone(), twin], d(2025, 1, 1), d(2025, 1, 31))
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRule { rule_id, .. } if rule_id == rule.id));
    }

    #[test]
    fn weekly_schedule_near_calendar_end_stops_cleanly() {
        let rule = RecurrenceRule::new(RecurrenceUnit::Week, 1, 1);
        let start = NaiveDate::MAX - chrono::Duration::days(10);
        let rent = RecurringTransaction::new(TransactionType::Expense, Decimal::from(100), start, rule.id);

        let balance = balance_at(&[], &[rent], &[rule], NaiveDate::MAX).unwrap();
        assert!(balance < Decimal::ZERO);
        assert_eq!(balance % Decimal::from(100), Decimal::ZERO);
    }
}
