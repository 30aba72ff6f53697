// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let tx_type = sub.get_one::<String>("type").unwrap();
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let paid = sub
        .get_one::<String>("paid")
        .map(|s| parse_decimal(s))
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();

    let id = uuid::Uuid::new_v4().simple().to_string();
    let today = Utc::now().date_naive().to_string();
    conn.execute(
        "INSERT INTO transactions(id, date, type, category, description, amount, paid_amount,
                                  currency, payment_method, payment_status,
                                  related_order_id, related_car_id,
                                  customer_name, customer_phone, customer_address, customer_id_card)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            id,
            today,
            tx_type,
            category,
            sub.get_one::<String>("description"),
            amount.to_string(),
            paid.to_string(),
            currency,
            sub.get_one::<String>("method"),
            sub.get_one::<String>("pay_status"),
            sub.get_one::<i64>("order"),
            sub.get_one::<i64>("car"),
            sub.get_one::<String>("customer"),
            sub.get_one::<String>("customer_phone"),
            sub.get_one::<String>("customer_address"),
            sub.get_one::<String>("customer_id_card"),
        ],
    )?;
    println!("Recorded {} {} '{}' (id: {})", tx_type, amount, category, id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub tx_type: String,
    pub category: String,
    pub amount: String,
    pub paid: String,
    pub currency: String,
    pub status: String,
    pub customer: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, date, type, category, amount, paid_amount, currency, payment_status,
                customer_name
         FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month.trim())?;
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY date DESC, created_at DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let status: Option<String> = r.get(7)?;
        let customer: Option<String> = r.get(8)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            tx_type: r.get(2)?,
            category: r.get(3)?,
            amount: r.get(4)?,
            paid: r.get(5)?,
            currency: r.get(6)?,
            status: status.unwrap_or_default(),
            customer: customer.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    crate::invoice::invoice_number(&t.id),
                    t.date.clone(),
                    t.tx_type.clone(),
                    t.category.clone(),
                    t.amount.clone(),
                    t.paid.clone(),
                    t.currency.clone(),
                    t.status.clone(),
                    t.customer.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Ref", "Date", "Type", "Category", "Amount", "Paid", "CCY", "Status", "Customer"],
                rows
            )
        );
    }
    Ok(())
}
