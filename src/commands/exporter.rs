// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::source::{DataSource, Session, SqliteSource};
use crate::utils::{fmt_datetime, fmt_money};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("movements", sub)) => export_movements(conn, session, sub),
        _ => Ok(()),
    }
}

fn export_movements(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let year = sub.get_one::<i32>("year").copied();

    let source = SqliteSource::new(conn);
    let names: HashMap<i64, String> = source
        .list_categories(session)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let movements = source.list_movements(session, year)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "description", "amount", "category"])?;
            for m in &movements {
                wtr.write_record([
                    fmt_datetime(&m.date),
                    m.description.clone(),
                    fmt_money(&m.amount),
                    names.get(&m.category_id).cloned().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = movements
                .iter()
                .map(|m| {
                    json!({
                        "id": m.id,
                        "date": fmt_datetime(&m.date),
                        "description": m.description,
                        "amount": fmt_money(&m.amount),
                        "category": names.get(&m.category_id),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported {} movements to {}", movements.len(), out);
    Ok(())
}
