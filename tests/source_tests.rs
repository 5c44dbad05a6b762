// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use moneytrail::db;
use moneytrail::errors::EngineError;
use moneytrail::models::{MonthToken, Movement};
use moneytrail::source::{resolve_session, DataSource, Session, SqliteSource};
use moneytrail::utils::set_setting;
use rusqlite::{params, Connection};
use rust_decimal_macros::dec;

fn setup() -> (Connection, Session) {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let session = resolve_session(&conn, None).unwrap();
    conn.execute(
        "INSERT INTO categories(id, user_id, name, color) VALUES (1, ?1, 'Salary', '#00ff00')",
        params![session.user_id],
    )
    .unwrap();
    (conn, session)
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn movement(date: &str) -> Movement {
    Movement {
        id: None,
        date: at(date),
        description: "Pay".into(),
        amount: dec!(2500.00),
        category_id: 1,
    }
}

#[test]
fn session_resolution_prefers_explicit_then_setting() {
    let (conn, default) = setup();
    conn.execute("INSERT INTO users(name) VALUES ('alice')", [])
        .unwrap();
    let alice = resolve_session(&conn, Some("alice")).unwrap();
    assert_ne!(alice, default);

    set_setting(&conn, "current_user", "alice").unwrap();
    assert_eq!(resolve_session(&conn, None).unwrap(), alice);
    assert!(resolve_session(&conn, Some("nobody")).is_err());
}

#[test]
fn created_movements_round_trip() {
    let (conn, session) = setup();
    let source = SqliteSource::new(&conn);
    let stored = source
        .create_movement(&session, movement("2024-03-01T10:00:00"))
        .unwrap();
    assert!(stored.id.is_some());

    let date_s: String = conn
        .query_row("SELECT date FROM movements", [], |r| r.get(0))
        .unwrap();
    assert_eq!(date_s, "2024-03-01T10:00:00");

    let listed = source.list_movements(&session, None).unwrap();
    assert_eq!(listed, vec![stored]);
}

#[test]
fn year_filter_and_ordering() {
    let (conn, session) = setup();
    let source = SqliteSource::new(&conn);
    for d in ["2024-05-01T10:00:00", "2023-12-31T23:59:59", "2024-01-02T09:00:00"] {
        source.create_movement(&session, movement(d)).unwrap();
    }
    let y2024 = source.list_movements(&session, Some(2024)).unwrap();
    assert_eq!(y2024.len(), 2);
    assert_eq!(y2024[0].date, at("2024-01-02T09:00:00"));
    assert_eq!(source.list_movements(&session, None).unwrap().len(), 3);
}

#[test]
fn users_only_see_their_own_data() {
    let (conn, session) = setup();
    conn.execute("INSERT INTO users(name) VALUES ('bob')", [])
        .unwrap();
    let bob = resolve_session(&conn, Some("bob")).unwrap();
    let source = SqliteSource::new(&conn);
    source
        .create_movement(&session, movement("2024-03-01T10:00:00"))
        .unwrap();

    assert!(source.list_movements(&bob, None).unwrap().is_empty());
    assert!(source.list_categories(&bob).unwrap().is_empty());
    // bob cannot file under the default user's category
    assert!(source
        .create_movement(&bob, movement("2024-03-01T10:00:00"))
        .is_err());
}

#[test]
fn corrupt_stored_date_is_fatal() {
    let (conn, session) = setup();
    conn.execute(
        "INSERT INTO movements(user_id, date, description, amount, category_id)
         VALUES (?1, '2024-13-45', 'broken', '10', 1)",
        params![session.user_id],
    )
    .unwrap();
    let err = SqliteSource::new(&conn)
        .list_movements(&session, None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::MalformedDate(_))
    ));
}

#[test]
fn corrupt_stored_amount_is_fatal() {
    let (conn, session) = setup();
    conn.execute(
        "INSERT INTO movements(user_id, date, description, amount, category_id)
         VALUES (?1, '2024-01-01T00:00:00', 'broken', 'ten', 1)",
        params![session.user_id],
    )
    .unwrap();
    let err = SqliteSource::new(&conn)
        .list_movements(&session, None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::MalformedAmount(_))
    ));
}

#[test]
fn accounts_load_with_records_and_display() {
    let (conn, session) = setup();
    conn.execute(
        "INSERT INTO accounts(id, user_id, name, color, show_in_report) VALUES (7, ?1, 'Savings', '#0000ff', 0)",
        params![session.user_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO account_records(account_id, year, month, value) VALUES (7, 2024, 'Feb', '1234.50')",
        [],
    )
    .unwrap();
    let accounts = SqliteSource::new(&conn).list_accounts(&session).unwrap();
    assert_eq!(accounts.len(), 1);
    let a = &accounts[0];
    assert_eq!(a.name, "Savings");
    assert!(!a.display.show_in_report);
    assert_eq!(a.display.color, "#0000ff");
    assert_eq!(a.records.len(), 1);
    assert_eq!(a.records[0].month, MonthToken::Feb);
    assert_eq!(a.records[0].value, dec!(1234.50));
}
