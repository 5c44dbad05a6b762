// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneytrail::commands::{doctor, settings};
use moneytrail::db;
use moneytrail::utils::get_setting;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn settings_are_validated() {
    let conn = setup();
    settings::set(&conn, "recurring_time", "08:30").unwrap();
    assert_eq!(
        get_setting(&conn, "recurring_time").unwrap().as_deref(),
        Some("08:30")
    );
    assert!(settings::set(&conn, "recurring_time", "25:00").is_err());
    assert!(settings::set(&conn, "current_user", "ghost").is_err());
    settings::set(&conn, "current_user", "default").unwrap();
    assert!(settings::set(&conn, "colour", "blue").is_err());
}

#[test]
fn clean_database_has_no_issues() {
    let conn = setup();
    assert!(doctor::find_issues(&conn).unwrap().is_empty());
}

#[test]
fn doctor_flags_corrupt_rows() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO categories(id, user_id, name) VALUES (1, 1, 'Food');
        INSERT INTO users(id, name) VALUES (2, 'other');
        INSERT INTO movements(user_id, date, description, amount, category_id)
            VALUES (1, 'yesterday', 'a', '1', 1);
        INSERT INTO movements(user_id, date, description, amount, category_id)
            VALUES (1, '2024-01-01T00:00:00', 'b', 'x', 1);
        INSERT INTO movements(user_id, date, description, amount, category_id)
            VALUES (2, '2024-01-01T00:00:00', 'c', '1', 1);
        INSERT INTO accounts(id, user_id, name) VALUES (1, 1, 'Cash');
        INSERT INTO account_records(account_id, year, month, value) VALUES (1, 2024, 'Smarch', '1');
        "#,
    )
    .unwrap();
    let kinds: Vec<String> = doctor::find_issues(&conn)
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        kinds,
        vec![
            "bad_movement_date",
            "bad_movement_amount",
            "foreign_category",
            "bad_record_month",
        ]
    );
}

#[test]
fn doctor_flags_duplicate_records_in_unconstrained_tables() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE account_records(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            year INTEGER NOT NULL,
            month TEXT NOT NULL,
            value TEXT NOT NULL
        );
        "#,
    )
    .unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO accounts(id, user_id, name) VALUES (1, 1, 'Cash');
        INSERT INTO account_records(account_id, year, month, value) VALUES (1, 2024, 'Mar', '10');
        INSERT INTO account_records(account_id, year, month, value) VALUES (1, 2024, 'Mar', '5');
        "#,
    )
    .unwrap();
    let issues = doctor::find_issues(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "duplicate_record");
    assert_eq!(issues[0].1, "Cash 2024 Mar x2");
}
