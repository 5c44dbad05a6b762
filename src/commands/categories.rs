// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::source::{DataSource, Session, SqliteSource};
use crate::utils::{id_for_category, maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static color pattern"));

pub fn parse_color(s: &str) -> Result<String> {
    let t = s.trim();
    if COLOR_RE.is_match(t) {
        Ok(t.to_lowercase())
    } else {
        Err(anyhow!("Invalid color '{}', expected #RRGGBB", s))
    }
}

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let color = parse_color(sub.get_one::<String>("color").unwrap())?;
            conn.execute(
                "INSERT INTO categories(user_id, name, color) VALUES (?1, ?2, ?3)",
                params![session.user_id, name, color],
            )?;
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            let cats = SqliteSource::new(conn).list_categories(session)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .into_iter()
                    .map(|c| vec![c.name, c.color])
                    .collect();
                println!("{}", pretty_table(&["Category", "Color"], data));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let id = id_for_category(conn, session.user_id, name)?;
            conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
            println!("Removed category '{}'", name);
        }
        Some(("color", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let color = parse_color(sub.get_one::<String>("color").unwrap())?;
            let id = id_for_category(conn, session.user_id, name)?;
            conn.execute(
                "UPDATE categories SET color=?1 WHERE id=?2",
                params![color, id],
            )?;
            println!("Category '{}' is now {}", name, color);
        }
        _ => {}
    }
    Ok(())
}
