// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::compare::{compare_with_previous_month, previous_month, PeriodComparison};
use crate::engine::matrix::{
    account_year_total, build_month_matrix, record_years, Cell, MonthColumn,
};
use crate::engine::periods::{
    aggregate_by_month, aggregate_by_year, aggregate_years, annual_buckets, monthly_buckets,
};
use crate::engine::rollup::{rollup_by_category, sort_rollup, CategoryBalance, RollupKey, RollupOrder};
use crate::models::{Account, MonthToken, PeriodBucket};
use crate::source::{DataSource, Session, SqliteSource};
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Local};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, session, sub)?,
        Some(("year", sub)) => year(conn, session, sub)?,
        Some(("compare", sub)) => compare(conn, session, sub)?,
        Some(("categories", sub)) => categories(conn, session, sub)?,
        Some(("accounts", sub)) => accounts(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn bucket_rows(buckets: &[PeriodBucket]) -> Vec<Vec<String>> {
    buckets
        .iter()
        .map(|b| {
            let label = match b.month {
                Some(m) => format!("{} {}", m, b.year),
                None => b.year.to_string(),
            };
            vec![
                label,
                fmt_money(&b.income),
                fmt_money(&b.expenses),
                fmt_money(&b.net),
            ]
        })
        .collect()
}

/// Twelve monthly buckets for `year`.
pub fn month_report(conn: &Connection, session: &Session, year: i32) -> Result<Vec<PeriodBucket>> {
    let movements = SqliteSource::new(conn).list_movements(session, Some(year))?;
    Ok(monthly_buckets(year, &aggregate_by_month(&movements, year)))
}

/// One annual bucket for `year`, or one per year with data when `None`.
pub fn year_report(
    conn: &Connection,
    session: &Session,
    year: Option<i32>,
) -> Result<Vec<PeriodBucket>> {
    let source = SqliteSource::new(conn);
    match year {
        Some(y) => {
            let t = aggregate_by_year(&source.list_movements(session, Some(y))?);
            Ok(vec![PeriodBucket {
                year: y,
                month: None,
                income: t.income,
                expenses: t.expenses,
                net: t.net,
            }])
        }
        None => Ok(annual_buckets(&aggregate_years(
            &source.list_movements(session, None)?,
        ))),
    }
}

pub fn compare_report(
    conn: &Connection,
    session: &Session,
    year: i32,
    month: MonthToken,
) -> Result<PeriodComparison> {
    let source = SqliteSource::new(conn);
    let mut movements = source.list_movements(session, Some(year))?;
    let (prev_year, _) = previous_month(year, month);
    if prev_year != year {
        movements.extend(source.list_movements(session, Some(prev_year))?);
    }
    debug!(year, %month, movements = movements.len(), "comparing with previous month");
    Ok(compare_with_previous_month(&movements, year, month))
}

pub fn category_report(
    conn: &Connection,
    session: &Session,
    year: i32,
    order: RollupOrder,
) -> Result<Vec<CategoryBalance>> {
    let source = SqliteSource::new(conn);
    let movements = source.list_movements(session, Some(year))?;
    let categories = source.list_categories(session)?;
    let mut rows = rollup_by_category(&movements, &categories);
    sort_rollup(&mut rows, order);
    Ok(rows)
}

fn shown_accounts(conn: &Connection, session: &Session) -> Result<Vec<Account>> {
    Ok(SqliteSource::new(conn)
        .list_accounts(session)?
        .into_iter()
        .filter(|a| a.display.show_in_report)
        .collect())
}

/// Accounts shown in reports and their month matrix for `year`.
pub fn account_report(
    conn: &Connection,
    session: &Session,
    year: i32,
) -> Result<(Vec<Account>, Vec<MonthColumn>)> {
    let accounts = shown_accounts(conn, session)?;
    let matrix = build_month_matrix(&accounts, year);
    Ok((accounts, matrix))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountYearRow {
    pub year: i32,
    /// One value per shown account, in the order of the account list.
    pub totals: Vec<Decimal>,
    pub total: Decimal,
}

/// Per-year totals of every shown account, over every year with records.
pub fn account_years_report(
    conn: &Connection,
    session: &Session,
) -> Result<(Vec<Account>, Vec<AccountYearRow>)> {
    let accounts = shown_accounts(conn, session)?;
    let rows = record_years(&accounts)
        .into_iter()
        .map(|year| {
            let totals: Vec<Decimal> = accounts
                .iter()
                .map(|a| account_year_total(a, year))
                .collect();
            let total = totals.iter().copied().sum();
            AccountYearRow {
                year,
                totals,
                total,
            }
        })
        .collect();
    Ok((accounts, rows))
}

fn month(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let year = *sub.get_one::<i32>("year").unwrap();
    let buckets = month_report(conn, session, year)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], bucket_rows(&buckets))
        );
    }
    Ok(())
}

fn year(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let buckets = year_report(conn, session, sub.get_one::<i32>("year").copied())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        println!(
            "{}",
            pretty_table(&["Year", "Income", "Expenses", "Net"], bucket_rows(&buckets))
        );
    }
    Ok(())
}

fn compare(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), MonthToken::ALL[today.month0() as usize])
        }
    };
    let cmp = compare_report(conn, session, year, month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cmp)? {
        let (py, pm) = previous_month(year, month);
        let line = |label: &str, cur: Decimal, prev: Decimal, change: Decimal| {
            vec![
                label.to_string(),
                fmt_money(&cur),
                fmt_money(&prev),
                format!("{:+.2}%", change),
            ]
        };
        let data = vec![
            line("Income", cmp.current.income, cmp.previous.income, cmp.income_change),
            line(
                "Expenses",
                cmp.current.expenses,
                cmp.previous.expenses,
                cmp.expenses_change,
            ),
            line("Net", cmp.current.net, cmp.previous.net, cmp.net_change),
        ];
        let cur_h = format!("{} {}", month, year);
        let prev_h = format!("{} {}", pm, py);
        println!(
            "{}",
            pretty_table(&["", cur_h.as_str(), prev_h.as_str(), "Change"], data)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let year = *sub.get_one::<i32>("year").unwrap();
    let key = match sub.get_one::<String>("sort").map(String::as_str) {
        Some("balance") => RollupKey::Balance,
        _ => RollupKey::Name,
    };
    let rows = category_report(
        conn,
        session,
        year,
        RollupOrder {
            key,
            descending: sub.get_flag("desc"),
        },
    )?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .into_iter()
            .map(|r| vec![r.category_name, r.color, fmt_money(&r.balance)])
            .collect();
        let balance_h = format!("Balance {}", year);
        println!(
            "{}",
            pretty_table(&["Category", "Color", balance_h.as_str()], data)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct MatrixView<'a> {
    year: i32,
    accounts: &'a [Account],
    months: &'a [MonthColumn],
}

fn accounts(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let Some(year) = sub.get_one::<i32>("year").copied() else {
        return account_years(conn, session, sub);
    };
    let (accounts, matrix) = account_report(conn, session, year)?;
    let view = MatrixView {
        year,
        accounts: &accounts,
        months: &matrix,
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        let mut headers: Vec<&str> = vec!["Month"];
        headers.extend(accounts.iter().map(|a| a.name.as_str()));
        headers.push("Total");
        let data = matrix
            .iter()
            .map(|col| {
                let mut row = vec![col.month.to_string()];
                for a in &accounts {
                    // absent cells stay blank rather than showing 0.00
                    row.push(match col.cell(a.id) {
                        Cell::Present(v) => fmt_money(&v),
                        Cell::Absent => String::new(),
                    });
                }
                row.push(fmt_money(&col.total));
                row
            })
            .collect();
        println!("{}", pretty_table(&headers, data));
    }
    Ok(())
}

fn account_years(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let (accounts, rows) = account_years_report(conn, session)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let mut headers: Vec<&str> = vec!["Year"];
        headers.extend(accounts.iter().map(|a| a.name.as_str()));
        headers.push("Total");
        let data = rows
            .iter()
            .map(|r| {
                let mut row = vec![r.year.to_string()];
                row.extend(r.totals.iter().map(fmt_money));
                row.push(fmt_money(&r.total));
                row
            })
            .collect();
        println!("{}", pretty_table(&headers, data));
    }
    Ok(())
}
