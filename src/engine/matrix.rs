// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-by-account grid used for stacked account reports.
//!
//! A column only holds accounts whose summed value for that month is
//! nonzero once rounded to 2 decimals, and its total is the sum of those
//! cells. `MonthColumn::cell` makes the zero-vs-absent distinction
//! explicit: `Cell::Absent` means "draw nothing", never "draw a zero".

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, MonthToken};
use crate::utils::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    Present(Decimal),
    Absent,
}

impl Cell {
    pub fn value_or_zero(self) -> Decimal {
        match self {
            Cell::Present(v) => v,
            Cell::Absent => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthColumn {
    pub month: MonthToken,
    /// Account id to value; only nonzero values are stored.
    pub values: BTreeMap<i64, Decimal>,
    pub total: Decimal,
}

impl MonthColumn {
    pub fn cell(&self, account_id: i64) -> Cell {
        match self.values.get(&account_id) {
            Some(v) => Cell::Present(*v),
            None => Cell::Absent,
        }
    }
}

/// Sum of an account's records for one month. Duplicate records add up.
pub fn balance_for_month(account: &Account, year: i32, month: MonthToken) -> Decimal {
    round2(
        account
            .records
            .iter()
            .filter(|r| r.year == year && r.month == month)
            .map(|r| r.value)
            .sum(),
    )
}

/// Twelve columns, Jan through Dec, for the given year.
pub fn build_month_matrix(accounts: &[Account], year: i32) -> Vec<MonthColumn> {
    MonthToken::ALL
        .iter()
        .map(|&month| {
            let mut values = BTreeMap::new();
            let mut total = Decimal::ZERO;
            for account in accounts {
                let v = balance_for_month(account, year, month);
                if !v.is_zero() {
                    total += v;
                    values.insert(account.id, v);
                }
            }
            MonthColumn {
                month,
                values,
                total,
            }
        })
        .collect()
}

/// Sum of every record an account holds for a year.
pub fn account_year_total(account: &Account, year: i32) -> Decimal {
    round2(
        account
            .records
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.value)
            .sum(),
    )
}

/// Every year any account has a record for, ascending.
pub fn record_years(accounts: &[Account]) -> BTreeSet<i32> {
    accounts
        .iter()
        .flat_map(|a| a.records.iter().map(|r| r.year))
        .collect()
}
