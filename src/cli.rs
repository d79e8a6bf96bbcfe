// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON document per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendlens")
        .version(crate_version!())
        .about("Expense statistics, period comparison and list filtering")
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .global(true)
                .env("SPENDLENS_FILE")
                .help("Expense records (.csv or .json); defaults to the platform data dir"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .env("SPENDLENS_LOG")
                .help("Log filter used when RUST_LOG is unset [default: warn]"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .global(true)
                .env("SPENDLENS_TOP")
                .value_parser(value_parser!(usize))
                .help("Number of top categories to rank [default: 5]"),
        )
        .arg(
            Arg::new("recent")
                .long("recent")
                .global(true)
                .env("SPENDLENS_RECENT")
                .value_parser(value_parser!(usize))
                .help("Number of recent expenses on the dashboard [default: 3]"),
        )
        .subcommand(json_args(
            Command::new("stats")
                .about("Statistics for a period, compared with the previous one")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .short('p')
                        .default_value("month")
                        .help("week | month | year | 30d"),
                ),
        ))
        .subcommand(json_args(
            Command::new("list")
                .about("Filtered and sorted expense list")
                .arg(Arg::new("search").long("search").short('s'))
                .arg(Arg::new("category").long("category").short('c'))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .requires("to")
                        .help("YYYY-MM-DD, inclusive"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .requires("from")
                        .help("YYYY-MM-DD, inclusive"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .default_value("date-desc")
                        .help("date-desc | date-asc | amount-desc | amount-asc | category"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_args(
            Command::new("dashboard").about("Current month at a glance"),
        ))
        .subcommand(json_args(
            Command::new("periods").about("Resolved current and previous ranges per period"),
        ))
}
