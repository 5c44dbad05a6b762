// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Movement;
use crate::source::{DataSource, Session, SqliteSource};
use crate::utils::{id_for_category, parse_amount, parse_datetime};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::collections::{hash_map::Entry, HashMap};
use tracing::info;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("movements", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let n = import_movements(conn, session, path)?;
            println!("Imported {} movements from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Reads `date,description,amount,category` rows. Any bad row aborts the
/// whole import.
pub fn import_movements(conn: &Connection, session: &Session, path: &str) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.unchecked_transaction()?;
    let source = SqliteSource::new(&tx);
    let mut category_cache: HashMap<String, i64> = HashMap::new();
    let mut count = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let description = rec.get(1).context("description missing")?.trim().to_string();
        let amount_raw = rec.get(2).context("amount missing")?.trim();
        let category = rec.get(3).context("category missing")?.trim().to_string();

        let date = parse_datetime(date_raw).with_context(|| format!("Row {}", row))?;
        let amount = parse_amount(amount_raw).with_context(|| format!("Row {}", row))?;
        let category_id = match category_cache.entry(category) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let fetched = id_for_category(&tx, session.user_id, entry.key())?;
                *entry.insert(fetched)
            }
        };

        source.create_movement(
            session,
            Movement {
                id: None,
                date,
                description,
                amount,
                category_id,
            },
        )?;
        count += 1;
    }
    tx.commit()?;
    info!(count, path, "movements imported");
    Ok(count)
}
