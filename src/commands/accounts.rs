// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::categories::parse_color;
use crate::engine::matrix::balance_for_month;
use crate::models::{Account, MonthToken};
use crate::source::{DataSource, Session, SqliteSource};
use crate::utils::{
    fmt_money, id_for_account, maybe_print_json, parse_decimal, parse_month, pretty_table,
};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let color = parse_color(sub.get_one::<String>("color").unwrap())?;
            let shown = !sub.get_flag("hidden");
            conn.execute(
                "INSERT INTO accounts(user_id, name, color, show_in_report) VALUES (?1, ?2, ?3, ?4)",
                params![session.user_id, name, color, shown],
            )?;
            println!("Added account '{}'", name);
        }
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let id = id_for_account(conn, session.user_id, name)?;
            conn.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
            println!("Removed account '{}'", name);
        }
        Some(("set", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
            let value = parse_decimal(sub.get_one::<String>("value").unwrap().trim())?;
            set_record(conn, session, name, year, month, &value.to_string())?;
            println!("{} {} {} = {}", name, month, year, fmt_money(&value));
        }
        Some(("balance", sub)) => balance(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Upserts the single record an account holds for `(year, month)`.
pub fn set_record(
    conn: &Connection,
    session: &Session,
    account: &str,
    year: i32,
    month: MonthToken,
    value: &str,
) -> Result<()> {
    let id = id_for_account(conn, session.user_id, account)?;
    conn.execute(
        "INSERT INTO account_records(account_id, year, month, value) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(account_id, year, month) DO UPDATE SET value=excluded.value",
        params![id, year, month.as_str(), value],
    )?;
    Ok(())
}

pub fn find_account(conn: &Connection, session: &Session, name: &str) -> Result<Account> {
    SqliteSource::new(conn)
        .list_accounts(session)?
        .into_iter()
        .find(|a| a.name == name)
        .with_context(|| format!("Account '{}' not found", name))
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = SqliteSource::new(conn).list_accounts(session)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        let data = accounts
            .into_iter()
            .map(|a| {
                vec![
                    a.name,
                    a.display.color,
                    if a.display.show_in_report { "yes" } else { "no" }.to_string(),
                    a.records.len().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Color", "In report", "Records"], data)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct BalanceRow {
    account: String,
    year: i32,
    month: MonthToken,
    balance: String,
}

fn balance(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let (year, month) = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), MonthToken::ALL[today.month0() as usize])
        }
    };
    let account = find_account(conn, session, name)?;
    let row = BalanceRow {
        account: account.name.clone(),
        year,
        month,
        balance: fmt_money(&balance_for_month(&account, year, month)),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        println!(
            "{}",
            pretty_table(
                &["Account", "Month", "Balance"],
                vec![vec![row.account, format!("{} {}", row.month, row.year), row.balance]],
            )
        );
    }
    Ok(())
}
