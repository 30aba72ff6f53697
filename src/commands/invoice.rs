// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::invoice::build_invoice;
use crate::utils::{get_car, get_order, get_transaction, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub),
        _ => Ok(()),
    }
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let tx = get_transaction(conn, id)?
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;
    let order = match tx.related_order_id {
        Some(oid) => get_order(conn, oid)?,
        None => None,
    };
    let car = match tx.related_car_id {
        Some(cid) => get_car(conn, cid)?,
        None => None,
    };

    let view = build_invoice(&tx, order.as_ref(), car.as_ref());

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    println!("Invoice #{} — {}", view.invoice_number, view.date);
    let rows = vec![
        vec!["Customer".into(), view.customer_name.clone()],
        vec!["Phone".into(), view.customer_phone.clone()],
        vec!["Address".into(), view.customer_address.clone()],
        vec!["ID Card".into(), view.customer_id_card.clone()],
        vec![
            "Car".into(),
            format!("{} {} {}", view.car_brand, view.car_model, view.car_year)
                .trim()
                .to_string(),
        ],
        vec!["VIN".into(), view.car_vin.clone()],
        vec!["Mileage".into(), view.car_mileage.clone()],
        vec![
            "Selling price".into(),
            format!("{} {}", view.selling_price, view.currency),
        ],
        vec![
            "Paid".into(),
            format!("{} {}", view.paid_amount, view.currency),
        ],
        vec![
            "Remaining".into(),
            format!("{} {}", view.remaining_amount, view.currency),
        ],
        vec!["Payment".into(), view.payment_method.clone()],
        vec!["Status".into(), view.payment_status.clone()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
