// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{Category, Movement};
use crate::utils::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBalance {
    pub category_id: i64,
    pub category_name: String,
    pub color: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupKey {
    Name,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollupOrder {
    pub key: RollupKey,
    pub descending: bool,
}

/// Signed net per category, one row per known category in the given order.
///
/// Categories without movements get a zero balance. Movements pointing at a
/// category not in `categories` are left out.
pub fn rollup_by_category(movements: &[Movement], categories: &[Category]) -> Vec<CategoryBalance> {
    let mut sums: HashMap<i64, Decimal> = HashMap::with_capacity(categories.len());
    for mv in movements {
        *sums.entry(mv.category_id).or_insert(Decimal::ZERO) += mv.amount;
    }

    let rows: Vec<CategoryBalance> = categories
        .iter()
        .map(|c| CategoryBalance {
            category_id: c.id,
            category_name: c.name.clone(),
            color: c.color.clone(),
            balance: round2(sums.get(&c.id).copied().unwrap_or(Decimal::ZERO)),
        })
        .collect();

    let unknown = movements
        .iter()
        .filter(|mv| !categories.iter().any(|c| c.id == mv.category_id))
        .count();
    if unknown > 0 {
        debug!(unknown, "skipped movements referencing unknown categories");
    }
    rows
}

pub fn sort_rollup(rows: &mut [CategoryBalance], order: RollupOrder) {
    rows.sort_by(|a, b| {
        let ord = match order.key {
            RollupKey::Name => a
                .category_name
                .to_lowercase()
                .cmp(&b.category_name.to_lowercase()),
            RollupKey::Balance => a.balance.cmp(&b.balance),
        };
        let ord = if order.descending { ord.reverse() } else { ord };
        match ord {
            Ordering::Equal => a.category_id.cmp(&b.category_id),
            o => o,
        }
    });
}
