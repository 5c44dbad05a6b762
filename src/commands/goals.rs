// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SavingsGoal;
use crate::source::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, session, sub)?,
        Some(("list", sub)) => list(conn, session, sub)?,
        Some(("fund", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let goal = fund(conn, session, name, amount)?;
            println!(
                "{}: {} of {} saved ({}%)",
                goal.name,
                fmt_money(&goal.saved),
                fmt_money(&goal.target),
                goal.progress()
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let n = conn.execute(
                "DELETE FROM goals WHERE user_id=?1 AND name=?2",
                params![session.user_id, name],
            )?;
            if n == 0 {
                return Err(anyhow!("Goal '{}' not found", name));
            }
            println!("Removed goal '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
    if target < Decimal::ZERO {
        return Err(anyhow!("Goal target must not be negative"));
    }
    let due = match sub.get_one::<String>("due") {
        Some(d) => Some(parse_date(d.trim())?),
        None => None,
    };
    conn.execute(
        "INSERT INTO goals(user_id, name, target, due) VALUES (?1, ?2, ?3, ?4)",
        params![
            session.user_id,
            name,
            target.to_string(),
            due.map(|d| d.to_string())
        ],
    )?;
    println!("Added goal '{}' for {}", name, fmt_money(&target));
    Ok(())
}

fn row_to_goal(
    id: i64,
    name: String,
    target: String,
    saved: String,
    due: Option<String>,
) -> Result<SavingsGoal> {
    let target = target
        .parse::<Decimal>()
        .with_context(|| format!("Invalid target '{}' on goal {}", target, name))?;
    let saved = saved
        .parse::<Decimal>()
        .with_context(|| format!("Invalid saved amount '{}' on goal {}", saved, name))?;
    let due = match due {
        Some(d) => Some(parse_date(&d)?),
        None => None,
    };
    Ok(SavingsGoal {
        id,
        name,
        target,
        saved,
        due,
    })
}

pub fn load_goals(conn: &Connection, session: &Session) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target, saved, due FROM goals WHERE user_id=?1 ORDER BY due IS NULL, due, name",
    )?;
    let rows = stmt.query_map(params![session.user_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, target, saved, due) = row?;
        out.push(row_to_goal(id, name, target, saved, due)?);
    }
    Ok(out)
}

/// Adds `amount` to a goal's saved total; negative amounts withdraw.
pub fn fund(
    conn: &Connection,
    session: &Session,
    name: &str,
    amount: Decimal,
) -> Result<SavingsGoal> {
    let row = conn
        .query_row(
            "SELECT id, name, target, saved, due FROM goals WHERE user_id=?1 AND name=?2",
            params![session.user_id, name],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, Option<String>>(4)?,
                ))
            },
        )
        .optional()?
        .with_context(|| format!("Goal '{}' not found", name))?;
    let (id, name, target, saved, due) = row;
    let mut goal = row_to_goal(id, name, target, saved, due)?;
    goal.saved += amount;
    if goal.saved < Decimal::ZERO {
        return Err(anyhow!(
            "Cannot withdraw more than the {} saved for '{}'",
            fmt_money(&(goal.saved - amount)),
            goal.name
        ));
    }
    conn.execute(
        "UPDATE goals SET saved=?1 WHERE id=?2",
        params![goal.saved.to_string(), goal.id],
    )?;
    Ok(goal)
}

fn list(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let goals = load_goals(conn, session)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        let data = goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    fmt_money(&g.target),
                    fmt_money(&g.saved),
                    fmt_money(&g.remaining()),
                    format!("{:.2}%", g.progress()),
                    g.due.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Goal", "Target", "Saved", "Remaining", "Progress", "Due"],
                data
            )
        );
    }
    Ok(())
}
