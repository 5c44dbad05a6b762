// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use moneytrail::engine::periods::{
    aggregate_by_month, aggregate_by_year, aggregate_years, annual_buckets, in_year,
    monthly_buckets, years_present,
};
use moneytrail::models::{MonthToken, Movement, PeriodTotals};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn mv(date: &str, amount: Decimal, category_id: i64) -> Movement {
    Movement {
        id: None,
        date: NaiveDateTime::parse_from_str(&format!("{}T12:00:00", date), "%Y-%m-%dT%H:%M:%S")
            .unwrap(),
        description: "test".into(),
        amount,
        category_id,
    }
}

fn sample() -> Vec<Movement> {
    vec![
        mv("2024-06-05", dec!(100), 1),
        mv("2024-06-20", dec!(-40), 2),
        mv("2024-07-01", dec!(200), 1),
    ]
}

fn totals(income: Decimal, expenses: Decimal, net: Decimal) -> PeriodTotals {
    PeriodTotals {
        income,
        expenses,
        net,
    }
}

#[test]
fn monthly_buckets_cover_all_twelve_months() {
    let by_month = aggregate_by_month(&sample(), 2024);
    assert_eq!(by_month.len(), 12);
    assert_eq!(
        by_month.keys().copied().collect::<Vec<_>>(),
        MonthToken::ALL.to_vec()
    );
    assert_eq!(by_month[&MonthToken::Jun], totals(dec!(100), dec!(40), dec!(60)));
    assert_eq!(by_month[&MonthToken::Jul], totals(dec!(200), dec!(0), dec!(200)));
    for m in MonthToken::ALL {
        if m != MonthToken::Jun && m != MonthToken::Jul {
            assert_eq!(by_month[&m], PeriodTotals::default(), "{}", m);
        }
    }
}

#[test]
fn other_years_are_filtered_out() {
    let mut movements = sample();
    movements.push(mv("2023-06-10", dec!(999), 1));
    movements.push(mv("2025-06-10", dec!(-999), 1));
    let by_month = aggregate_by_month(&movements, 2024);
    assert_eq!(by_month[&MonthToken::Jun], totals(dec!(100), dec!(40), dec!(60)));
}

#[test]
fn zero_amounts_count_as_neither_side() {
    let movements = vec![mv("2024-03-01", Decimal::ZERO, 1), mv("2024-03-02", dec!(5), 1)];
    let by_month = aggregate_by_month(&movements, 2024);
    assert_eq!(by_month[&MonthToken::Mar], totals(dec!(5), dec!(0), dec!(5)));
    assert_eq!(aggregate_by_year(&movements[..1]), PeriodTotals::default());
}

#[test]
fn rounding_happens_after_accumulation() {
    let movements = vec![mv("2024-01-01", dec!(0.335), 1), mv("2024-01-02", dec!(0.335), 1)];
    assert_eq!(aggregate_by_year(&movements).income, dec!(0.67));
}

#[test]
fn months_add_up_to_the_year() {
    let movements = vec![
        mv("2024-01-03", dec!(1200.50), 1),
        mv("2024-01-09", dec!(-80.25), 2),
        mv("2024-04-14", dec!(-19.99), 2),
        mv("2024-09-30", dec!(310.10), 1),
        mv("2024-12-31", dec!(-1000), 3),
        mv("2023-12-31", dec!(-5000), 3),
    ];
    let by_month = aggregate_by_month(&movements, 2024);
    let income: Decimal = by_month.values().map(|t| t.income).sum();
    let expenses: Decimal = by_month.values().map(|t| t.expenses).sum();
    let year = aggregate_by_year(&in_year(&movements, 2024));
    assert_eq!(income - expenses, year.net);
    assert_eq!(year, totals(dec!(1510.60), dec!(1100.24), dec!(410.36)));
}

#[test]
fn repeated_calls_are_identical() {
    let movements = sample();
    assert_eq!(
        aggregate_by_month(&movements, 2024),
        aggregate_by_month(&movements, 2024)
    );
    assert_eq!(aggregate_years(&movements), aggregate_years(&movements));
}

#[test]
fn annual_buckets_per_year() {
    let mut movements = sample();
    movements.push(mv("2023-02-01", dec!(-10), 1));
    let years = aggregate_years(&movements);
    assert_eq!(years_present(&movements).into_iter().collect::<Vec<_>>(), vec![2023, 2024]);
    assert_eq!(years[&2023], totals(dec!(0), dec!(10), dec!(-10)));
    assert_eq!(years[&2024], totals(dec!(300), dec!(40), dec!(260)));

    let rows = annual_buckets(&years);
    let v = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(v["year"], 2023);
    assert!(v.get("month").is_none());
}

#[test]
fn monthly_rows_carry_month_tokens() {
    let rows = monthly_buckets(2024, &aggregate_by_month(&sample(), 2024));
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[5].month, Some(MonthToken::Jun));
    let v = serde_json::to_value(&rows[5]).unwrap();
    assert_eq!(v["month"], "Jun");
}
