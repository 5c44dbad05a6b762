// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use moneytrail::engine::rollup::{rollup_by_category, sort_rollup, RollupKey, RollupOrder};
use moneytrail::models::{Category, Movement};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn mv(date: &str, amount: Decimal, category_id: i64) -> Movement {
    Movement {
        id: None,
        date: NaiveDateTime::parse_from_str(&format!("{}T00:00:00", date), "%Y-%m-%dT%H:%M:%S")
            .unwrap(),
        description: "x".into(),
        amount,
        category_id,
    }
}

fn cat(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.into(),
        color: "#123456".into(),
    }
}

fn categories() -> Vec<Category> {
    vec![cat(1, "A"), cat(2, "B"), cat(3, "c idle")]
}

#[test]
fn signed_balance_per_category() {
    let movements = vec![
        mv("2024-06-05", dec!(100), 1),
        mv("2024-06-20", dec!(-40), 2),
        mv("2024-07-01", dec!(200), 1),
    ];
    let rows = rollup_by_category(&movements, &categories());
    assert_eq!(rows.len(), 3);
    assert_eq!((rows[0].category_id, rows[0].balance), (1, dec!(300)));
    assert_eq!((rows[1].category_id, rows[1].balance), (2, dec!(-40)));
    assert_eq!(rows[2].balance, Decimal::ZERO);
    assert_eq!(rows[0].category_name, "A");
    assert_eq!(rows[0].color, "#123456");
}

#[test]
fn mixed_signs_net_out() {
    let movements = vec![mv("2024-01-01", dec!(25.10), 2), mv("2024-01-02", dec!(-30.05), 2)];
    let rows = rollup_by_category(&movements, &categories());
    assert_eq!(rows[1].balance, dec!(-4.95));
}

#[test]
fn unknown_categories_are_skipped() {
    let movements = vec![mv("2024-01-01", dec!(10), 99), mv("2024-01-01", dec!(10), 1)];
    let rows = rollup_by_category(&movements, &categories());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].balance, dec!(10));
}

#[test]
fn sorting_is_a_separate_step() {
    let movements = vec![
        mv("2024-01-01", dec!(5), 1),
        mv("2024-01-01", dec!(50), 2),
    ];
    let mut rows = rollup_by_category(&movements, &categories());

    sort_rollup(
        &mut rows,
        RollupOrder {
            key: RollupKey::Balance,
            descending: true,
        },
    );
    let ids: Vec<i64> = rows.iter().map(|r| r.category_id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    sort_rollup(
        &mut rows,
        RollupOrder {
            key: RollupKey::Name,
            descending: false,
        },
    );
    let names: Vec<&str> = rows.iter().map(|r| r.category_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "c idle"]);
}

#[test]
fn rollup_is_repeatable() {
    let movements = vec![mv("2024-01-01", dec!(5), 1)];
    assert_eq!(
        rollup_by_category(&movements, &categories()),
        rollup_by_category(&movements, &categories())
    );
}
