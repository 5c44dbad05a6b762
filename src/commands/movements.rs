// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::engine::recurrence::{
    default_generation_time, expand_at, parse_end_bound, parse_start,
};
use crate::models::{Frequency, Movement, MovementTemplate, RecurrenceSpec};
use crate::source::{DataSource, Session, SqliteSource};
use crate::utils::{
    fmt_datetime, fmt_money, get_setting, id_for_category, maybe_print_json, parse_amount,
    parse_datetime, parse_month, parse_time, pretty_table,
};
use anyhow::{anyhow, Result};
use chrono::NaiveTime;
use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, session, sub)?,
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("rm", sub)) => rm(conn, session, sub)?,
        Some(("recurring", sub)) => recurring(conn, session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_datetime(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let category = sub.get_one::<String>("category").unwrap().trim();
    let category_id = id_for_category(conn, session.user_id, category)?;

    let stored = SqliteSource::new(conn).create_movement(
        session,
        Movement {
            id: None,
            date,
            description,
            amount,
            category_id,
        },
    )?;
    println!(
        "Recorded {} on {} '{}' ({})",
        fmt_money(&stored.amount),
        fmt_datetime(&stored.date),
        stored.description,
        category
    );
    Ok(())
}

fn rm(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM movements WHERE id=?1 AND user_id=?2",
        params![id, session.user_id],
    )?;
    if n == 0 {
        return Err(anyhow!("Movement {} not found", id));
    }
    println!("Removed movement {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct MovementRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

fn category_names(conn: &Connection, session: &Session) -> Result<HashMap<i64, String>> {
    Ok(SqliteSource::new(conn)
        .list_categories(session)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

fn to_rows(movements: &[Movement], names: &HashMap<i64, String>) -> Vec<MovementRow> {
    movements
        .iter()
        .map(|m| MovementRow {
            id: m.id.unwrap_or_default(),
            date: fmt_datetime(&m.date),
            description: m.description.clone(),
            amount: fmt_money(&m.amount),
            category: names.get(&m.category_id).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Newest first, filtered by the list subcommand's options.
pub fn query_rows(
    conn: &Connection,
    session: &Session,
    sub: &clap::ArgMatches,
) -> Result<Vec<MovementRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s)?),
        None => None,
    };
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .or(month.map(|(y, _)| y));

    let names = category_names(conn, session)?;
    let category_id = match sub.get_one::<String>("category") {
        Some(c) => Some(id_for_category(conn, session.user_id, c.trim())?),
        None => None,
    };

    let mut movements = SqliteSource::new(conn).list_movements(session, year)?;
    movements.retain(|mv| {
        month.map_or(true, |(_, mt)| mv.month() == mt)
            && category_id.map_or(true, |c| mv.category_id == c)
    });
    movements.reverse();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        movements.truncate(*limit);
    }
    Ok(to_rows(&movements, &names))
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.id.to_string(), r.date, r.description, r.amount, r.category])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Amount", "Category"], rows)
        );
    }
    Ok(())
}

/// Generation time for monthly follow-ups, from the `recurring_time` setting.
pub fn generation_time(conn: &Connection) -> Result<NaiveTime> {
    match get_setting(conn, "recurring_time")? {
        Some(s) => parse_time(&s),
        None => Ok(default_generation_time()),
    }
}

pub fn recurring_spec(
    conn: &Connection,
    session: &Session,
    sub: &clap::ArgMatches,
) -> Result<RecurrenceSpec> {
    let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let start = parse_start(sub.get_one::<String>("start").unwrap())?;
    let end = parse_end_bound(frequency, sub.get_one::<String>("until").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    Ok(RecurrenceSpec {
        base: MovementTemplate {
            description: sub.get_one::<String>("description").unwrap().trim().to_string(),
            amount,
            category_id: id_for_category(conn, session.user_id, category)?,
        },
        start,
        frequency,
        end,
    })
}

/// Expands the template and stores every occurrence, all or nothing.
pub fn add_recurring(
    conn: &Connection,
    session: &Session,
    sub: &clap::ArgMatches,
) -> Result<Vec<Movement>> {
    let spec = recurring_spec(conn, session, sub)?;
    let expanded = expand_at(&spec, generation_time(conn)?)?;

    let tx = conn.unchecked_transaction()?;
    let stored = SqliteSource::new(&tx).create_movements(session, expanded)?;
    tx.commit()?;
    info!(
        count = stored.len(),
        description = %spec.base.description,
        "recurring movements created"
    );
    Ok(stored)
}

fn recurring(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let stored = add_recurring(conn, session, sub)?;
    let names = category_names(conn, session)?;
    let data = to_rows(&stored, &names);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("Created {} movements", data.len());
        let rows = data
            .into_iter()
            .map(|r| vec![r.id.to_string(), r.date, r.description, r.amount])
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Description", "Amount"], rows)
        );
    }
    Ok(())
}
