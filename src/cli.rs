// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id (UUID)")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .required(true)
        .value_parser(["income", "expense"])
        .ignore_case(true)
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(true)
        .allow_hyphen_values(true)
        .help("Positive amount")
}

fn description_arg() -> Arg {
    Arg::new("description").long("description").short('d')
}

fn transaction_fields(cmd: Command) -> Command {
    cmd.arg(type_arg())
        .arg(amount_arg())
        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
        .arg(description_arg())
}

fn recurring_fields(cmd: Command) -> Command {
    cmd.arg(type_arg())
        .arg(amount_arg())
        .arg(
            Arg::new("start")
                .long("start")
                .required(true)
                .help("First eligible date, YYYY-MM-DD"),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .required(true)
                .help("Recurrence rule id"),
        )
        .arg(description_arg())
}

fn rule_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("unit")
            .long("unit")
            .required(true)
            .help("week|month|year"),
    )
    .arg(
        Arg::new("interval")
            .long("interval")
            .default_value("1")
            .help("Units between occurrences (1-52)"),
    )
    .arg(
        Arg::new("day")
            .long("day")
            .required(true)
            .help("Weekday 1-7 (Mon=1), day of month 1-28, or day of year 1-366"),
    )
}

pub fn build_cli() -> Command {
    Command::new("expense-planner")
        .version(crate_version!())
        .about("Plan one-time and recurring income/expenses and forecast your balance")
        .arg(
            Arg::new("data_dir")
                .long("data-dir")
                .global(true)
                .help("Directory holding the CSV tables (default: $EXPENSE_PLANNER_DATA_DIR or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the data directory and empty tables"))
        .subcommand(
            Command::new("tx")
                .about("One-time transactions")
                .subcommand(transaction_fields(Command::new("add")))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                        .arg(
                            Arg::new("scope")
                                .long("scope")
                                .value_parser(["all", "past", "future"])
                                .default_value("all"),
                        ),
                ))
                .subcommand(transaction_fields(Command::new("update").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring transaction templates")
                .subcommand(recurring_fields(Command::new("add")).arg(
                    Arg::new("paused")
                        .long("paused")
                        .action(ArgAction::SetTrue)
                        .help("Create the template paused"),
                ))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(recurring_fields(Command::new("update").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("pause").arg(id_arg()))
                .subcommand(Command::new("resume").arg(id_arg())),
        )
        .subcommand(
            Command::new("rule")
                .about("Recurrence rules")
                .subcommand(rule_fields(Command::new("add")))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(rule_fields(Command::new("update").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("forecast")
                .about("Projected balances")
                .subcommand(json_flags(
                    Command::new("range")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("balance").arg(Arg::new("date").long("date").required(true)),
                )),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete every transaction, recurring transaction and rule")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the wipe"),
                ),
        )
}
