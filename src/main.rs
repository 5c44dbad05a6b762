// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneytrail::{cli, commands, db, logging, source};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init_tracing(matches.get_flag("verbose"));

    let conn = db::open_or_init()?;
    let user = matches.get_one::<String>("user").map(String::as_str);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        Some((name, sub)) => {
            let session = source::resolve_session(&conn, user)?;
            match name {
                "category" => commands::categories::handle(&conn, &session, sub)?,
                "movement" => commands::movements::handle(&conn, &session, sub)?,
                "account" => commands::accounts::handle(&conn, &session, sub)?,
                "goal" => commands::goals::handle(&conn, &session, sub)?,
                "report" => commands::reports::handle(&conn, &session, sub)?,
                "import" => commands::importer::handle(&conn, &session, sub)?,
                "export" => commands::exporter::handle(&conn, &session, sub)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
