// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expense_planner::clock::FixedClock;
use expense_planner::config::StorageOptions;
use expense_planner::errors::PlannerError;
use expense_planner::models::{
    RecurrenceRule, RecurrenceUnit, RecurringTransaction, Transaction, TransactionType,
};
use expense_planner::services::{
    DataResetService, RecurrenceRuleService, RecurringTransactionService, TransactionFilter,
    TransactionScope, TransactionService,
};
use expense_planner::storage::{CsvStorage, Store};
use rust_decimal::Decimal;
use std::fs;
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn setup() -> (tempfile::TempDir, CsvStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = CsvStorage::open(StorageOptions::new(dir.path())).unwrap();
    (dir, storage)
}

#[test]
fn transaction_scope_uses_clock() {
    let (_dir, storage) = setup();
    let clock = FixedClock(d(2025, 6, 15));
    let service = TransactionService::new(storage.transactions(), &clock);
    for day in [20, 15, 10] {
        service
            .add(Transaction::new(TransactionType::Expense, Decimal::from(day), d(2025, 6, day)))
            .unwrap();
    }

    let all = service.list(&TransactionFilter::default()).unwrap();
    let dates: Vec<_> = all.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![d(2025, 6, 10), d(2025, 6, 15), d(2025, 6, 20)]);

    let past = service
        .list(&TransactionFilter {
            scope: TransactionScope::Past,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(past.len(), 2);
    assert!(past.iter().all(|t| t.date <= d(2025, 6, 15)));

    let future = service
        .list(&TransactionFilter {
            scope: TransactionScope::Future,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(future.len(), 1);
    assert_eq!(future[0].date, d(2025, 6, 20));

    let bounded = service
        .list(&TransactionFilter {
            from: Some(d(2025, 6, 11)),
            to: Some(d(2025, 6, 20)),
            scope: TransactionScope::All,
        })
        .unwrap();
    assert_eq!(bounded.len(), 2);
}

#[test]
fn transaction_validation_blocks_persisting() {
    let (_dir, storage) = setup();
    let clock = FixedClock(d(2025, 1, 1));
    let service = TransactionService::new(storage.transactions(), &clock);

    let zero = Transaction::new(TransactionType::Income, Decimal::ZERO, d(2025, 1, 1));
    assert!(matches!(service.add(zero), Err(PlannerError::Validation(_))));

    let mut wordy = Transaction::new(TransactionType::Income, Decimal::ONE, d(2025, 1, 1));
    wordy.description = Some("x".repeat(251));
    assert!(matches!(service.add(wordy), Err(PlannerError::Validation(_))));

    assert!(storage.transactions().get_all().unwrap().is_empty());
}

#[test]
fn transaction_add_assigns_id_and_update_requires_existing() {
    let (_dir, storage) = setup();
    let clock = FixedClock(d(2025, 1, 1));
    let service = TransactionService::new(storage.transactions(), &clock);

    let mut tx = Transaction::new(TransactionType::Income, Decimal::from(40), d(2025, 1, 3));
    tx.id = Uuid::nil();
    let saved = service.add(tx).unwrap();
    assert!(!saved.id.is_nil());

    let mut changed = saved.clone();
    changed.amount = Decimal::from(45);
    service.update(&changed).unwrap();
    assert_eq!(service.get(saved.id).unwrap().unwrap().amount, Decimal::from(45));

    let ghost = Transaction::new(TransactionType::Income, Decimal::ONE, d(2025, 1, 1));
    assert!(matches!(service.update(&ghost), Err(PlannerError::NotFound { .. })));
    assert!(matches!(service.delete(ghost.id), Err(PlannerError::NotFound { .. })));

    service.delete(saved.id).unwrap();
    assert!(service.get(saved.id).unwrap().is_none());
}

#[test]
fn recurring_add_with_unknown_rule_leaves_storage_unchanged() {
    let (dir, storage) = setup();
    let service = RecurringTransactionService::new(storage.recurring(), storage.rules());
    let path = dir.path().join("recurring_transactions.csv");
    let before = fs::read_to_string(&path).unwrap();

    let missing_rule = Uuid::new_v4();
    let recurring = RecurringTransaction::new(
        TransactionType::Expense,
        Decimal::from(100),
        d(2025, 1, 1),
        missing_rule,
    );
    let err = service.add(recurring).unwrap_err();
    assert!(matches!(err, PlannerError::NotFound { id, .. } if id == missing_rule));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn recurring_update_checks_rule() {
    let (_dir, storage) = setup();
    let rules = RecurrenceRuleService::new(storage.rules());
    let service = RecurringTransactionService::new(storage.recurring(), storage.rules());
    let rule = rules.add(RecurrenceRule::new(RecurrenceUnit::Month, 1, 1)).unwrap();
    let saved = service
        .add(RecurringTransaction::new(
            TransactionType::Income,
            Decimal::from(3000),
            d(2025, 1, 1),
            rule.id,
        ))
        .unwrap();

    let mut broken = saved.clone();
    broken.recurrence_rule_id = Uuid::new_v4();
    assert!(matches!(service.update(&broken), Err(PlannerError::NotFound { .. })));
    assert_eq!(service.get(saved.id).unwrap(), Some(saved));
}

#[test]
fn pause_and_resume_are_idempotent() {
    let (dir, storage) = setup();
    let rules = RecurrenceRuleService::new(storage.rules());
    let service = RecurringTransactionService::new(storage.recurring(), storage.rules());
    let rule = rules.add(RecurrenceRule::new(RecurrenceUnit::Week, 1, 5)).unwrap();
    let saved = service
        .add(RecurringTransaction::new(
            TransactionType::Expense,
            Decimal::from(20),
            d(2025, 1, 3),
            rule.id,
        ))
        .unwrap();

    assert!(service.pause(saved.id).unwrap());
    let path = dir.path().join("recurring_transactions.csv");
    let modified = fs::metadata(&path).unwrap().modified().unwrap();
    let contents = fs::read_to_string(&path).unwrap();

    assert!(!service.pause(saved.id).unwrap());
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    assert!(service.get(saved.id).unwrap().unwrap().is_paused);

    assert!(service.resume(saved.id).unwrap());
    assert!(!service.resume(saved.id).unwrap());
    assert!(!service.get(saved.id).unwrap().unwrap().is_paused);

    assert!(matches!(
        service.pause(Uuid::new_v4()),
        Err(PlannerError::NotFound { .. })
    ));
}

#[test]
fn rule_validation_bounds() {
    let (_dir, storage) = setup();
    let rules = RecurrenceRuleService::new(storage.rules());
    let rejected = [
        RecurrenceRule::new(RecurrenceUnit::Month, 1, 29),
        RecurrenceRule::new(RecurrenceUnit::Month, 1, 31),
        RecurrenceRule::new(RecurrenceUnit::Week, 1, 0),
        RecurrenceRule::new(RecurrenceUnit::Week, 1, 8),
        RecurrenceRule::new(RecurrenceUnit::Year, 1, 367),
        RecurrenceRule::new(RecurrenceUnit::Month, 0, 1),
        RecurrenceRule::new(RecurrenceUnit::Month, 53, 1),
    ];
    for rule in rejected {
        assert!(
            matches!(rules.add(rule.clone()), Err(PlannerError::Validation(_))),
            "{:?} should be rejected",
            rule
        );
    }
    assert!(rules.list().unwrap().is_empty());

    let accepted = rules.add(RecurrenceRule::new(RecurrenceUnit::Year, 52, 366)).unwrap();
    let mut invalid = accepted.clone();
    invalid.day_index = 400;
    assert!(matches!(rules.update(&invalid), Err(PlannerError::Validation(_))));
    let unknown = RecurrenceRule::new(RecurrenceUnit::Week, 1, 1);
    assert!(matches!(rules.update(&unknown), Err(PlannerError::NotFound { .. })));
}

#[test]
fn deleting_rule_does_not_cascade() {
    let (_dir, storage) = setup();
    let rules = RecurrenceRuleService::new(storage.rules());
    let service = RecurringTransactionService::new(storage.recurring(), storage.rules());
    let rule = rules.add(RecurrenceRule::new(RecurrenceUnit::Month, 1, 10)).unwrap();
    service
        .add(RecurringTransaction::new(
            TransactionType::Expense,
            Decimal::from(9),
            d(2025, 1, 10),
            rule.id,
        ))
        .unwrap();

    rules.delete(rule.id).unwrap();
    assert!(rules.list().unwrap().is_empty());
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn reset_service_wipes_everything() {
    let (_dir, storage) = setup();
    let clock = FixedClock(d(2025, 1, 1));
    TransactionService::new(storage.transactions(), &clock)
        .add(Transaction::new(TransactionType::Income, Decimal::ONE, d(2025, 1, 1)))
        .unwrap();
    RecurrenceRuleService::new(storage.rules())
        .add(RecurrenceRule::new(RecurrenceUnit::Week, 1, 1))
        .unwrap();

    DataResetService::new(&storage).reset().unwrap();

    assert!(storage.transactions().get_all().unwrap().is_empty());
    assert!(storage.rules().get_all().unwrap().is_empty());
}
