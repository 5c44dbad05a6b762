// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn name_arg() -> Arg {
    Arg::new("name").long("name").required(true)
}

fn year_arg(required: bool) -> Arg {
    Arg::new("year")
        .long("year")
        .required(required)
        .value_parser(value_parser!(i32))
}

pub fn build_cli() -> Command {
    Command::new("moneytrail")
        .version(clap::crate_version!())
        .about("Track income, expenses, recurring movements, accounts and savings goals")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Act as this user instead of the configured current user"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(Command::new("add").arg(name_arg()))
                .subcommand(Command::new("list"))
                .subcommand(Command::new("use").arg(name_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(name_arg())
                        .arg(Arg::new("color").long("color").default_value("#808080")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(name_arg()))
                .subcommand(
                    Command::new("color")
                        .arg(name_arg())
                        .arg(Arg::new("color").long("color").required(true)),
                ),
        )
        .subcommand(
            Command::new("movement")
                .about("Record and list movements")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(year_arg(false))
                        .arg(Arg::new("month").long("month").conflicts_with("year"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("recurring")
                        .about("Create one movement per occurrence of a recurring template")
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .default_value("monthly")
                                .help("monthly|yearly"),
                        )
                        .arg(
                            Arg::new("until")
                                .long("until")
                                .required(true)
                                .help("YYYY-MM for monthly, YYYY for yearly"),
                        ),
                )),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts and their monthly values")
                .subcommand(
                    Command::new("add")
                        .arg(name_arg())
                        .arg(Arg::new("color").long("color").default_value("#808080"))
                        .arg(
                            Arg::new("hidden")
                                .long("hidden")
                                .action(ArgAction::SetTrue)
                                .help("Leave out of the account report"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(name_arg()))
                .subcommand(
                    Command::new("set")
                        .arg(name_arg())
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("balance")
                        .arg(name_arg())
                        .arg(Arg::new("month").long("month")),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(name_arg())
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("due").long("due")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("fund").arg(name_arg()).arg(
                        Arg::new("amount")
                            .long("amount")
                            .required(true)
                            .allow_hyphen_values(true),
                    ),
                )
                .subcommand(Command::new("rm").arg(name_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views")
                .subcommand(json_flags(Command::new("month").arg(year_arg(true))))
                .subcommand(json_flags(Command::new("year").arg(year_arg(false))))
                .subcommand(json_flags(
                    Command::new("compare").arg(
                        Arg::new("month")
                            .long("month")
                            .help("YYYY-MM, defaults to the current month"),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .arg(year_arg(true))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["name", "balance"])
                                .default_value("name"),
                        )
                        .arg(Arg::new("desc").long("desc").action(ArgAction::SetTrue)),
                ))
                .subcommand(json_flags(
                    Command::new("accounts")
                        .arg(year_arg(false).help("Month matrix for one year; omit for yearly totals")),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("movements").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("movements")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(year_arg(false)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Persistent settings")
                .subcommand(Command::new("get").arg(Arg::new("key").long("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity problems"))
}
