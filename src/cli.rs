// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("dealerdesk")
        .about("Car-import dealership back office: inventory, orders, invoicing, FX, attendance")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("car")
                .about("Manage inventory")
                .subcommand(
                    Command::new("add")
                        .about("Add a car")
                        .arg(Arg::new("brand").long("brand").required(true))
                        .arg(Arg::new("model").long("model").required(true))
                        .arg(Arg::new("year").long("year").value_parser(value_parser!(i32)))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("vin").long("vin"))
                        .arg(
                            Arg::new("mileage")
                                .long("mileage")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("price").long("price"))
                        .arg(Arg::new("currency").long("currency").default_value("DZD")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List cars")
                        .arg(Arg::new("status").long("status")),
                ))
                .subcommand(
                    Command::new("status")
                        .about("Update a car's status")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("status").required(true)),
                ),
        )
        .subcommand(
            Command::new("order")
                .about("Manage customer orders")
                .subcommand(
                    Command::new("add")
                        .about("Add an order")
                        .arg(Arg::new("customer").long("customer").required(true))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("wilaya").long("wilaya"))
                        .arg(Arg::new("address").long("address"))
                        .arg(Arg::new("id_card").long("id-card"))
                        .arg(Arg::new("brand").long("brand"))
                        .arg(Arg::new("model").long("model")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List orders")
                        .arg(Arg::new("status").long("status")),
                ))
                .subcommand(
                    Command::new("status")
                        .about("Update an order's status")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("status").required(true)),
                )
                .subcommand(
                    Command::new("assign")
                        .about("Assign a car to an order and record the sale")
                        .arg(
                            Arg::new("car")
                                .long("car")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("order")
                                .long("order")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Financial transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("paid").long("paid"))
                        .arg(Arg::new("currency").long("currency").default_value("DZD"))
                        .arg(Arg::new("method").long("method"))
                        .arg(Arg::new("pay_status").long("pay-status"))
                        .arg(
                            Arg::new("order")
                                .long("order")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("car").long("car").value_parser(value_parser!(i64)))
                        .arg(Arg::new("customer").long("customer"))
                        .arg(Arg::new("customer_phone").long("customer-phone"))
                        .arg(Arg::new("customer_address").long("customer-address"))
                        .arg(Arg::new("customer_id_card").long("customer-id-card"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("rates")
                .about("Exchange rates (USDT->DZD, USDT->KRW)")
                .subcommand(Command::new("show").about("Show current rates"))
                .subcommand(
                    Command::new("set")
                        .about("Set rates")
                        .arg(Arg::new("usdt_dzd").long("usdt-dzd"))
                        .arg(Arg::new("usdt_krw").long("usdt-krw")),
                )
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between DZD, KRW, and USDT")
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("direction")
                                .long("direction")
                                .required(true)
                                .value_parser(["usdt-dzd", "krw-dzd", "dzd-usdt", "krw-usdt"]),
                        )
                        .arg(Arg::new("extra").long("extra"))
                        .arg(
                            Arg::new("extra_currency")
                                .long("extra-currency")
                                .default_value("DZD")
                                .value_parser(["DZD", "KRW", "USDT", "dzd", "krw", "usdt"]),
                        ),
                ),
        )
        .subcommand(
            Command::new("invoice").about("Invoices").subcommand(json_flags(
                Command::new("show")
                    .about("Render the invoice for a transaction")
                    .arg(Arg::new("id").required(true)),
            )),
        )
        .subcommand(
            Command::new("attendance")
                .about("Staff attendance")
                .subcommand(
                    Command::new("in")
                        .about("Check an employee in for today")
                        .arg(Arg::new("employee").required(true)),
                )
                .subcommand(
                    Command::new("out")
                        .about("Check an employee out for today")
                        .arg(Arg::new("employee").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List attendance records")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("employee").long("employee")),
                )),
        )
        .subcommand(
            Command::new("docs")
                .about("Shipping document references")
                .subcommand(
                    Command::new("add")
                        .about("Register a document for an order")
                        .arg(
                            Arg::new("order")
                                .long("order")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("kind").long("kind").required(true))
                        .arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List documents")
                        .arg(
                            Arg::new("order")
                                .long("order")
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the ledger")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check data integrity"))
}
