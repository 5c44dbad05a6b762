// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::periods::month_totals;
use crate::models::{MonthToken, Movement, PeriodTotals};
use crate::utils::round2;

/// Percentage change from `previous` to `current`, rounded to 2 decimals.
///
/// A zero baseline yields 0 when nothing changed and 100 otherwise. The sign
/// is left to the caller to interpret.
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
    }
    round2((current - previous) / previous * Decimal::ONE_HUNDRED)
}

/// The calendar month before `(year, month)`; January rolls back to December.
pub fn previous_month(year: i32, month: MonthToken) -> (i32, MonthToken) {
    match month {
        MonthToken::Jan => (year - 1, MonthToken::Dec),
        m => (year, MonthToken::ALL[(m.number() - 2) as usize]),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub year: i32,
    pub month: MonthToken,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub income_change: Decimal,
    pub expenses_change: Decimal,
    pub net_change: Decimal,
}

pub fn compare_with_previous_month(
    movements: &[Movement],
    year: i32,
    month: MonthToken,
) -> PeriodComparison {
    let (py, pm) = previous_month(year, month);
    let current = month_totals(movements, year, month);
    let previous = month_totals(movements, py, pm);
    PeriodComparison {
        year,
        month,
        current,
        previous,
        income_change: percentage_change(current.income, previous.income),
        expenses_change: percentage_change(current.expenses, previous.expenses),
        net_change: percentage_change(current.net, previous.net),
    }
}
