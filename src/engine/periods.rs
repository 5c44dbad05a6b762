// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly and annual income/expense buckets.
//!
//! Sums are accumulated at full precision and rounded to 2 decimals only when
//! the bucket is produced. Zero amounts count as neither income nor expense.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::models::{MonthToken, Movement, PeriodBucket, PeriodTotals};
use crate::utils::round2;

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    income: Decimal,
    expenses: Decimal,
}

impl Accumulator {
    fn add(&mut self, amount: Decimal) {
        if amount > Decimal::ZERO {
            self.income += amount;
        } else if amount < Decimal::ZERO {
            self.expenses += amount.abs();
        }
    }

    fn totals(self) -> PeriodTotals {
        let income = round2(self.income);
        let expenses = round2(self.expenses);
        PeriodTotals {
            income,
            expenses,
            net: income - expenses,
        }
    }
}

/// Buckets one year's movements by month.
///
/// Movements dated in other years are ignored, so callers may pass an
/// unfiltered list. All 12 months are present; empty months are zero.
pub fn aggregate_by_month(movements: &[Movement], year: i32) -> BTreeMap<MonthToken, PeriodTotals> {
    let mut acc: BTreeMap<MonthToken, Accumulator> =
        MonthToken::ALL.iter().map(|m| (*m, Accumulator::default())).collect();
    for mv in movements.iter().filter(|m| m.year() == year) {
        acc.entry(mv.month()).or_default().add(mv.amount);
    }
    acc.into_iter().map(|(m, a)| (m, a.totals())).collect()
}

/// Annual totals over every movement given. The caller selects the year.
pub fn aggregate_by_year(movements: &[Movement]) -> PeriodTotals {
    let mut acc = Accumulator::default();
    for mv in movements {
        acc.add(mv.amount);
    }
    acc.totals()
}

/// One annual bucket per calendar year that has movements.
pub fn aggregate_years(movements: &[Movement]) -> BTreeMap<i32, PeriodTotals> {
    let mut acc: BTreeMap<i32, Accumulator> = BTreeMap::new();
    for mv in movements {
        acc.entry(mv.year()).or_default().add(mv.amount);
    }
    acc.into_iter().map(|(y, a)| (y, a.totals())).collect()
}

pub fn month_totals(movements: &[Movement], year: i32, month: MonthToken) -> PeriodTotals {
    let mut acc = Accumulator::default();
    for mv in movements
        .iter()
        .filter(|m| m.year() == year && m.month() == month)
    {
        acc.add(mv.amount);
    }
    acc.totals()
}

pub fn in_year(movements: &[Movement], year: i32) -> Vec<Movement> {
    movements.iter().filter(|m| m.year() == year).cloned().collect()
}

pub fn years_present(movements: &[Movement]) -> BTreeSet<i32> {
    movements.iter().map(Movement::year).collect()
}

/// Flattens a monthly map into rows in calendar order.
pub fn monthly_buckets(year: i32, months: &BTreeMap<MonthToken, PeriodTotals>) -> Vec<PeriodBucket> {
    months
        .iter()
        .map(|(m, t)| PeriodBucket {
            year,
            month: Some(*m),
            income: t.income,
            expenses: t.expenses,
            net: t.net,
        })
        .collect()
}

pub fn annual_buckets(years: &BTreeMap<i32, PeriodTotals>) -> Vec<PeriodBucket> {
    years
        .iter()
        .map(|(y, t)| PeriodBucket {
            year: *y,
            month: None,
            income: t.income,
            expenses: t.expenses,
            net: t.net,
        })
        .collect()
}
