// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Occurrence dates for recurring transactions.
//!
//! Everything here is a pure function of its inputs: the same template, rule
//! and window always produce the same ascending list of dates.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::errors::{PlannerError, Result};
use crate::models::{MAX_RULE_INTERVAL, RecurrenceRule, RecurrenceUnit, RecurringTransaction};

/// Returns every date in `[from, to]` (both inclusive) on which `recurring` fires.
///
/// Paused templates and windows that end before the template starts yield an
/// empty list. A rule whose interval or day index cannot be turned into
/// calendar dates is reported as [`PlannerError::InvalidRule`].
pub fn occurrences(
    recurring: &RecurringTransaction,
    rule: &RecurrenceRule,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    if recurring.is_paused {
        return Ok(Vec::new());
    }

    let effective_from = recurring.start_date.max(from);
    if effective_from > to {
        return Ok(Vec::new());
    }

    check_rule(rule)?;

    match rule.unit {
        RecurrenceUnit::Week => weekly(rule, recurring.start_date, effective_from, to),
        RecurrenceUnit::Month => monthly(rule, recurring.start_date, effective_from, to),
        RecurrenceUnit::Year => Ok(yearly(rule, recurring.start_date, effective_from, to)),
    }
}

fn check_rule(rule: &RecurrenceRule) -> Result<()> {
    if !(1..=MAX_RULE_INTERVAL).contains(&rule.interval) {
        return Err(invalid(
            rule,
            format!("interval {} is not in 1..={}", rule.interval, MAX_RULE_INTERVAL),
        ));
    }
    if !rule.has_valid_day_index() {
        return Err(invalid(
            rule,
            format!("day index {} is not valid for unit {}", rule.day_index, rule.unit),
        ));
    }
    Ok(())
}

fn invalid(rule: &RecurrenceRule, reason: String) -> PlannerError {
    PlannerError::InvalidRule {
        rule_id: rule.id,
        reason,
    }
}

fn weekly(
    rule: &RecurrenceRule,
    start: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let target = weekday_for(rule)?;
    let lead = (7 + target.num_days_from_monday() - start.weekday().num_days_from_monday()) % 7;
    let overflow = |date: NaiveDate| invalid(rule, format!("date overflow advancing from {}", date));
    let mut current = start
        .checked_add_signed(Duration::days(i64::from(lead)))
        .ok_or_else(|| overflow(start))?;

    let step_days = i64::from(rule.interval) * 7;
    if current < from {
        let gap = (from - current).num_days();
        let steps = (gap + step_days - 1) / step_days;
        current = current
            .checked_add_signed(Duration::days(steps * step_days))
            .ok_or_else(|| overflow(current))?;
    }

    let step = Duration::days(step_days);
    let mut dates = Vec::new();
    while current <= to {
        dates.push(current);
        current = match current.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(dates)
}

fn weekday_for(rule: &RecurrenceRule) -> Result<Weekday> {
    match rule.day_index {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        other => Err(invalid(rule, format!("weekday index {} is not in 1..=7", other))),
    }
}

fn monthly(
    rule: &RecurrenceRule,
    start: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let step = Months::new(rule.interval);
    let advance = |date: NaiveDate| {
        date.checked_add_months(step)
            .ok_or_else(|| invalid(rule, format!("date overflow advancing from {}", date)))
    };

    let mut current = NaiveDate::from_ymd_opt(start.year(), start.month(), rule.day_index)
        .ok_or_else(|| invalid(rule, format!("day {} does not exist", rule.day_index)))?;
    if current < start {
        current = advance(current)?;
    }
    while current < from {
        current = advance(current)?;
    }

    let mut dates = Vec::new();
    while current <= to {
        dates.push(current);
        current = match current.checked_add_months(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(dates)
}

fn yearly(rule: &RecurrenceRule, start: NaiveDate, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let Some(anchor) = first_yearly_on_or_after(rule.day_index, start) else {
        return Vec::new();
    };
    if anchor > to {
        return Vec::new();
    }

    let mut current = Some(anchor);
    while let Some(date) = current.filter(|d| *d < from) {
        current = next_yearly(date.year(), rule.interval, rule.day_index);
    }

    let mut dates = Vec::new();
    while let Some(date) = current.filter(|d| *d <= to) {
        dates.push(date);
        current = next_yearly(date.year(), rule.interval, rule.day_index);
    }
    dates
}

/// Scans year by year from `start`'s year; day 366 only lands in leap years.
fn first_yearly_on_or_after(day_index: u32, start: NaiveDate) -> Option<NaiveDate> {
    (start.year()..=NaiveDate::MAX.year())
        .filter_map(|year| NaiveDate::from_yo_opt(year, day_index))
        .find(|candidate| *candidate >= start)
}

/// Steps forward by `interval` years, skipping years that lack `day_index`.
fn next_yearly(year: i32, interval: u32, day_index: u32) -> Option<NaiveDate> {
    let step = i32::try_from(interval).ok()?;
    let mut next = year.checked_add(step)?;
    while next <= NaiveDate::MAX.year() {
        if let Some(date) = NaiveDate::from_yo_opt(next, day_index) {
            return Some(date);
        }
        next = next.checked_add(step)?;
    }
    None
}
