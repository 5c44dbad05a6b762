// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Data access consumed by the engine and the commands.
//!
//! Every call takes the caller's `Session` explicitly; nothing here reads
//! ambient user state.

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::debug;

use crate::db::DEFAULT_USER;
use crate::errors::EngineError;
use crate::models::{Account, AccountRecord, Category, DisplayConfig, MonthToken, Movement};
use crate::utils::{fmt_datetime, get_setting, id_for_user, parse_datetime};

/// The user every data-source call acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
}

/// Resolves the acting user once per invocation: an explicit name wins, then
/// the `current_user` setting, then the built-in default user.
pub fn resolve_session(conn: &Connection, user: Option<&str>) -> Result<Session> {
    let name = match user {
        Some(u) => u.trim().to_string(),
        None => get_setting(conn, "current_user")?.unwrap_or_else(|| DEFAULT_USER.to_string()),
    };
    let user_id = id_for_user(conn, &name)?;
    debug!(user = %name, user_id, "session resolved");
    Ok(Session { user_id })
}

pub trait DataSource {
    fn list_movements(&self, session: &Session, year: Option<i32>) -> Result<Vec<Movement>>;
    fn list_accounts(&self, session: &Session) -> Result<Vec<Account>>;
    fn list_categories(&self, session: &Session) -> Result<Vec<Category>>;
    fn create_movement(&self, session: &Session, movement: Movement) -> Result<Movement>;

    fn create_movements(&self, session: &Session, movements: Vec<Movement>) -> Result<Vec<Movement>> {
        movements
            .into_iter()
            .map(|m| self.create_movement(session, m))
            .collect()
    }
}

pub struct SqliteSource<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteSource { conn }
    }
}

fn stored_decimal(raw: &str, what: &str) -> Result<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| EngineError::MalformedAmount(raw.to_string()))
        .with_context(|| format!("Corrupt {}", what))
}

impl DataSource for SqliteSource<'_> {
    fn list_movements(&self, session: &Session, year: Option<i32>) -> Result<Vec<Movement>> {
        let mut sql = String::from(
            "SELECT id, date, description, amount, category_id FROM movements WHERE user_id=?1",
        );
        if year.is_some() {
            sql.push_str(" AND substr(date,1,4)=?2");
        }
        sql.push_str(" ORDER BY date, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match year {
            Some(y) => stmt.query(params![session.user_id, format!("{:04}", y)])?,
            None => stmt.query(params![session.user_id])?,
        };

        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let date_s: String = r.get(1)?;
            let amount_s: String = r.get(3)?;
            let date = parse_datetime(&date_s)
                .with_context(|| format!("Corrupt date on movement {}", id))?;
            let amount = stored_decimal(&amount_s, &format!("amount on movement {}", id))?;
            out.push(Movement {
                id: Some(id),
                date,
                description: r.get(2)?,
                amount,
                category_id: r.get(4)?,
            });
        }
        Ok(out)
    }

    fn list_accounts(&self, session: &Session) -> Result<Vec<Account>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, show_in_report FROM accounts WHERE user_id=?1 ORDER BY name",
        )?;
        let heads = stmt.query_map(params![session.user_id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, bool>(3)?,
            ))
        })?;

        let mut rec_stmt = self.conn.prepare(
            "SELECT year, month, value FROM account_records WHERE account_id=?1 ORDER BY year, id",
        )?;
        let mut out = Vec::new();
        for head in heads {
            let (id, name, color, show_in_report) = head?;
            let mut records = Vec::new();
            let mut rows = rec_stmt.query(params![id])?;
            while let Some(r) = rows.next()? {
                let year: i32 = r.get(0)?;
                let month_s: String = r.get(1)?;
                let value_s: String = r.get(2)?;
                let month = MonthToken::from_str(&month_s)
                    .with_context(|| format!("Corrupt month on account '{}'", name))?;
                let value = stored_decimal(&value_s, &format!("value on account '{}'", name))?;
                records.push(AccountRecord { year, month, value });
            }
            out.push(Account {
                id,
                name,
                records,
                display: DisplayConfig {
                    color,
                    show_in_report,
                },
            });
        }
        Ok(out)
    }

    fn list_categories(&self, session: &Session) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM categories WHERE user_id=?1 ORDER BY name")?;
        let rows = stmt.query_map(params![session.user_id], |r| {
            Ok(Category {
                id: r.get(0)?,
                name: r.get(1)?,
                color: r.get(2)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn create_movement(&self, session: &Session, movement: Movement) -> Result<Movement> {
        let owner: Option<i64> = self
            .conn
            .query_row(
                "SELECT user_id FROM categories WHERE id=?1",
                params![movement.category_id],
                |r| r.get(0),
            )
            .optional()?;
        if owner != Some(session.user_id) {
            return Err(anyhow!(
                "Category {} not found for this user",
                movement.category_id
            ));
        }
        self.conn.execute(
            "INSERT INTO movements(user_id, date, description, amount, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.user_id,
                fmt_datetime(&movement.date),
                movement.description,
                movement.amount.to_string(),
                movement.category_id
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, date = %movement.date, "movement stored");
        Ok(Movement {
            id: Some(id),
            ..movement
        })
    }
}
