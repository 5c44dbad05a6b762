// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneytrail::engine::matrix::{
    account_year_total, balance_for_month, build_month_matrix, record_years, Cell,
};
use moneytrail::models::{Account, AccountRecord, DisplayConfig, MonthToken};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn rec(year: i32, month: MonthToken, value: Decimal) -> AccountRecord {
    AccountRecord { year, month, value }
}

fn account(id: i64, records: Vec<AccountRecord>) -> Account {
    Account {
        id,
        name: format!("acct{}", id),
        records,
        display: DisplayConfig::default(),
    }
}

fn accounts() -> Vec<Account> {
    vec![
        account(
            1,
            vec![
                rec(2024, MonthToken::Jan, dec!(100)),
                rec(2024, MonthToken::Feb, dec!(0)),
                rec(2023, MonthToken::Jan, dec!(7)),
            ],
        ),
        account(
            2,
            vec![
                rec(2024, MonthToken::Jan, dec!(50.25)),
                rec(2024, MonthToken::Mar, dec!(10)),
                rec(2024, MonthToken::Mar, dec!(5)),
            ],
        ),
    ]
}

#[test]
fn twelve_columns_in_calendar_order() {
    let matrix = build_month_matrix(&accounts(), 2024);
    assert_eq!(matrix.len(), 12);
    let months: Vec<MonthToken> = matrix.iter().map(|c| c.month).collect();
    assert_eq!(months, MonthToken::ALL.to_vec());
}

#[test]
fn columns_hold_only_nonzero_values() {
    let matrix = build_month_matrix(&accounts(), 2024);
    let jan = &matrix[0];
    assert_eq!(jan.values.len(), 2);
    assert_eq!(jan.cell(1), Cell::Present(dec!(100)));
    assert_eq!(jan.cell(2), Cell::Present(dec!(50.25)));
    assert_eq!(jan.total, dec!(150.25));

    let feb = &matrix[1];
    assert!(feb.values.is_empty());
    assert_eq!(feb.cell(1), Cell::Absent);
    assert_eq!(feb.cell(1).value_or_zero(), Decimal::ZERO);
    assert_eq!(feb.total, Decimal::ZERO);
}

#[test]
fn duplicate_records_are_summed() {
    let matrix = build_month_matrix(&accounts(), 2024);
    assert_eq!(matrix[2].cell(2), Cell::Present(dec!(15)));
    assert_eq!(matrix[2].total, dec!(15));
    assert_eq!(
        balance_for_month(&accounts()[1], 2024, MonthToken::Mar),
        dec!(15)
    );
}

#[test]
fn single_account_balance() {
    let accts = accounts();
    assert_eq!(balance_for_month(&accts[0], 2024, MonthToken::Jan), dec!(100));
    assert_eq!(balance_for_month(&accts[0], 2023, MonthToken::Jan), dec!(7));
    assert_eq!(balance_for_month(&accts[0], 2024, MonthToken::Dec), Decimal::ZERO);
}

#[test]
fn other_years_do_not_leak() {
    let matrix = build_month_matrix(&accounts(), 2023);
    assert_eq!(matrix[0].cell(1), Cell::Present(dec!(7)));
    assert_eq!(matrix[0].cell(2), Cell::Absent);
    assert!(matrix.iter().skip(1).all(|c| c.values.is_empty()));
}

#[test]
fn multi_year_helpers() {
    let accts = accounts();
    assert_eq!(record_years(&accts).into_iter().collect::<Vec<_>>(), vec![2023, 2024]);
    assert_eq!(account_year_total(&accts[1], 2024), dec!(65.25));
    assert_eq!(account_year_total(&accts[1], 2023), Decimal::ZERO);
}

#[test]
fn matrix_is_repeatable() {
    let accts = accounts();
    assert_eq!(build_month_matrix(&accts, 2024), build_month_matrix(&accts, 2024));
}

#[test]
fn sub_cent_values_round_away_to_absent() {
    let accts = vec![account(1, vec![rec(2024, MonthToken::Apr, dec!(0.004))])];
    let matrix = build_month_matrix(&accts, 2024);
    assert_eq!(matrix[3].cell(1), Cell::Absent);
    assert!(matrix[3].values.is_empty());
    assert_eq!(matrix[3].total, Decimal::ZERO);
}

#[test]
fn total_matches_sum_of_shown_cells() {
    let accts = vec![
        account(1, vec![rec(2024, MonthToken::May, dec!(0.005))]),
        account(2, vec![rec(2024, MonthToken::May, dec!(0.005))]),
    ];
    let may = &build_month_matrix(&accts, 2024)[4];
    assert_eq!(may.cell(1), Cell::Present(dec!(0.01)));
    assert_eq!(may.cell(2), Cell::Present(dec!(0.01)));
    let shown: Decimal = may.values.values().copied().sum();
    assert_eq!(shown, dec!(0.02));
    assert_eq!(may.total, shown);
}
