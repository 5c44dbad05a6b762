// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use crate::models::MonthToken;
use crate::utils::{parse_datetime, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn find_issues(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();

    // 1) Movements the data source would refuse to load
    let mut stmt = conn.prepare("SELECT id, date, amount FROM movements ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let amount: String = r.get(2)?;
        if parse_datetime(&date).is_err() {
            issues.push(("bad_movement_date".into(), format!("movement {}: {}", id, date)));
        }
        if amount.trim().parse::<Decimal>().is_err() {
            issues.push((
                "bad_movement_amount".into(),
                format!("movement {}: {}", id, amount),
            ));
        }
    }

    // 2) Movements filed under another user's category
    let mut stmt2 = conn.prepare(
        "SELECT m.id FROM movements m JOIN categories c ON m.category_id=c.id
         WHERE m.user_id != c.user_id ORDER BY m.id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        issues.push(("foreign_category".into(), format!("movement {}", id)));
    }

    // 3) Account records: tokens, values and duplicate months
    let mut stmt3 = conn.prepare(
        "SELECT a.name, r.year, r.month, r.value FROM account_records r
         JOIN accounts a ON r.account_id=a.id ORDER BY a.name, r.year",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        let year: i32 = r.get(1)?;
        let month: String = r.get(2)?;
        let value: String = r.get(3)?;
        if MonthToken::from_str(&month).is_err() {
            issues.push(("bad_record_month".into(), format!("{} {} {}", name, year, month)));
        }
        if value.trim().parse::<Decimal>().is_err() {
            issues.push(("bad_record_value".into(), format!("{} {} {}", name, year, month)));
        }
    }

    // The schema enforces one record per month, but tables created by hand
    // or restored from older dumps may lack that constraint.
    let mut stmt4 = conn.prepare(
        "SELECT a.name, r.year, r.month, COUNT(*) FROM account_records r
         JOIN accounts a ON r.account_id=a.id
         GROUP BY r.account_id, r.year, r.month HAVING COUNT(*) > 1",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let name: String = r.get(0)?;
        let year: i32 = r.get(1)?;
        let month: String = r.get(2)?;
        let n: i64 = r.get(3)?;
        issues.push((
            "duplicate_record".into(),
            format!("{} {} {} x{}", name, year, month, n),
        ));
    }

    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows: Vec<Vec<String>> = find_issues(conn)?
        .into_iter()
        .map(|(k, d)| vec![k, d])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
