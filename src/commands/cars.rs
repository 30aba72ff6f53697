// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CAR_STATUSES;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => set_status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let brand = sub.get_one::<String>("brand").unwrap();
    let model = sub.get_one::<String>("model").unwrap();
    let year = sub.get_one::<i32>("year").copied();
    let color = sub.get_one::<String>("color");
    let vin = sub.get_one::<String>("vin");
    let mileage = sub.get_one::<i64>("mileage").copied();
    let price = sub
        .get_one::<String>("price")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();

    conn.execute(
        "INSERT INTO cars(brand, model, year, color, vin, mileage, price, currency)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            brand,
            model,
            year,
            color,
            vin,
            mileage,
            price.map(|p| p.to_string()),
            currency
        ],
    )?;
    println!(
        "Added car {} {} (id: {})",
        brand,
        model,
        conn.last_insert_rowid()
    );
    Ok(())
}

#[derive(Serialize)]
pub struct CarRow {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub vin: String,
    pub price: String,
    pub currency: String,
    pub status: String,
    pub order_id: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<CarRow>> {
    let mut sql = String::from(
        "SELECT id, brand, model, year, vin, price, currency, status, order_id FROM cars WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(status) = sub.get_one::<String>("status") {
        sql.push_str(" AND status=?");
        params_vec.push(status.to_lowercase());
    }
    sql.push_str(" ORDER BY id");

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
        let year: Option<i32> = r.get(3)?;
        let vin: Option<String> = r.get(4)?;
        let price: Option<String> = r.get(5)?;
        let order_id: Option<i64> = r.get(8)?;
        data.push(CarRow {
            id: r.get(0)?,
            brand: r.get(1)?,
            model: r.get(2)?,
            year: year.map(|y| y.to_string()).unwrap_or_default(),
            vin: vin.unwrap_or_default(),
            price: price.unwrap_or_default(),
            currency: r.get(6)?,
            status: r.get(7)?,
            order_id: order_id.map(|o| o.to_string()).unwrap_or_default(),
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
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.brand.clone(),
                    c.model.clone(),
                    c.year.clone(),
                    c.vin.clone(),
                    c.price.clone(),
                    c.currency.clone(),
                    c.status.clone(),
                    c.order_id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Brand", "Model", "Year", "VIN", "Price", "CCY", "Status", "Order"],
                rows
            )
        );
    }
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let status = sub.get_one::<String>("status").unwrap().to_lowercase();
    if !CAR_STATUSES.contains(&status.as_str()) {
        return Err(anyhow!(
            "Unknown car status '{}' (use {})",
            status,
            CAR_STATUSES.join("|")
        ));
    }
    let n = conn.execute(
        "UPDATE cars SET status=?1 WHERE id=?2",
        params![status, id],
    )?;
    if n == 0 {
        return Err(anyhow!("Car {} not found", id));
    }
    println!("Car {} is now {}", id, status);
    Ok(())
}
