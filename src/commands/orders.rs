// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Car, Order};
use crate::utils::{get_car, get_order, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => set_status(conn, sub)?,
        Some(("assign", sub)) => assign(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let customer = sub.get_one::<String>("customer").unwrap();
    conn.execute(
        "INSERT INTO orders(customer_name, customer_phone, customer_wilaya, custom_address,
                            id_card_number, requested_brand, requested_model)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            customer,
            sub.get_one::<String>("phone"),
            sub.get_one::<String>("wilaya"),
            sub.get_one::<String>("address"),
            sub.get_one::<String>("id_card"),
            sub.get_one::<String>("brand"),
            sub.get_one::<String>("model"),
        ],
    )?;
    println!(
        "Added order for '{}' (id: {})",
        customer,
        conn.last_insert_rowid()
    );
    Ok(())
}

#[derive(Serialize)]
pub struct OrderRow {
    pub id: i64,
    pub customer: String,
    pub phone: String,
    pub wilaya: String,
    pub requested: String,
    pub status: String,
    pub car_id: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<OrderRow>> {
    let mut sql = String::from(
        "SELECT id, customer_name, customer_phone, customer_wilaya, requested_brand,
                requested_model, status, car_id
         FROM orders WHERE 1=1",
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
        let phone: Option<String> = r.get(2)?;
        let wilaya: Option<String> = r.get(3)?;
        let brand: Option<String> = r.get(4)?;
        let model: Option<String> = r.get(5)?;
        let car_id: Option<i64> = r.get(7)?;
        data.push(OrderRow {
            id: r.get(0)?,
            customer: r.get(1)?,
            phone: phone.unwrap_or_default(),
            wilaya: wilaya.unwrap_or_default(),
            requested: format!(
                "{} {}",
                brand.unwrap_or_default(),
                model.unwrap_or_default()
            )
            .trim()
            .to_string(),
            status: r.get(6)?,
            car_id: car_id.map(|c| c.to_string()).unwrap_or_default(),
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
            .map(|o| {
                vec![
                    o.id.to_string(),
                    o.customer.clone(),
                    o.phone.clone(),
                    o.wilaya.clone(),
                    o.requested.clone(),
                    o.status.clone(),
                    o.car_id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Customer", "Phone", "Wilaya", "Requested", "Status", "Car"],
                rows
            )
        );
    }
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let status = sub.get_one::<String>("status").unwrap().to_lowercase();
    if !crate::models::ORDER_STATUSES.contains(&status.as_str()) {
        return Err(anyhow!(
            "Unknown order status '{}' (use {})",
            status,
            crate::models::ORDER_STATUSES.join("|")
        ));
    }
    let n = conn.execute(
        "UPDATE orders SET status=?1 WHERE id=?2",
        params![status, id],
    )?;
    if n == 0 {
        return Err(anyhow!("Order {} not found", id));
    }
    println!("Order {} is now {}", id, status);
    Ok(())
}

/// Non-fatal outcomes of the assignment steps after the car was reserved.
#[derive(Debug)]
pub enum AssignWarning {
    OrderUpdateFailed(String),
    BillingNotRecorded(String),
}

impl std::fmt::Display for AssignWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignWarning::OrderUpdateFailed(e) => {
                write!(f, "car reserved, but order update failed: {}", e)
            }
            AssignWarning::BillingNotRecorded(e) => {
                write!(f, "car assigned, but billing was not recorded: {}", e)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct AssignmentResult {
    pub warnings: Vec<AssignWarning>,
}

/// First line summarizes the car; customer lines are appended only when the
/// order actually carries the value.
pub fn sale_description(car: &Car, order: Option<&Order>) -> String {
    let mut lines = Vec::new();
    let year = car
        .year
        .map(|y| format!(" {}", y))
        .unwrap_or_default();
    lines.push(format!("Car sale: {} {}{}", car.brand, car.model, year));
    if let Some(o) = order {
        if !o.customer_name.trim().is_empty() {
            lines.push(format!("Customer: {}", o.customer_name.trim()));
        }
        if let Some(id_card) = o.id_card_number.as_deref().map(str::trim) {
            if !id_card.is_empty() {
                lines.push(format!("ID Card: {}", id_card));
            }
        }
        let address = o
            .custom_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .or_else(|| o.customer_wilaya.as_deref().map(str::trim))
            .filter(|a| !a.is_empty());
        if let Some(addr) = address {
            lines.push(format!("Address: {}", addr));
        }
    }
    lines.join("\n")
}

/// Three sequential mutations with distinct failure semantics: reserving the
/// car is fatal on error; marking the order bought and synthesizing the sale
/// transaction each degrade to a warning. There is no rollback of earlier
/// steps, so callers must report partial success as such.
pub fn assign_car_to_order(conn: &Connection, car_id: i64, order_id: i64) -> Result<AssignmentResult> {
    let car = get_car(conn, car_id)?.ok_or_else(|| anyhow!("Car {} not found", car_id))?;

    // Step 1: reserve the car. Any failure aborts the assignment.
    let n = conn.execute(
        "UPDATE cars SET status='reserved', order_id=?1 WHERE id=?2",
        params![order_id, car_id],
    )?;
    if n == 0 {
        return Err(anyhow!("Car {} not found", car_id));
    }

    let mut result = AssignmentResult::default();

    // Step 2: mark the order bought.
    match conn.execute(
        "UPDATE orders SET status='bought', car_id=?1 WHERE id=?2",
        params![car_id, order_id],
    ) {
        Ok(0) => result.warnings.push(AssignWarning::OrderUpdateFailed(
            format!("order {} not found", order_id),
        )),
        Ok(_) => {}
        Err(e) => result
            .warnings
            .push(AssignWarning::OrderUpdateFailed(e.to_string())),
    }

    // Step 3: synthesize the income transaction for the sale.
    let order = get_order(conn, order_id).unwrap_or(None);
    let description = sale_description(&car, order.as_ref());
    let amount = car.price.unwrap_or(Decimal::ZERO);
    let tx_id = uuid::Uuid::new_v4().simple().to_string();
    let today = Utc::now().date_naive().to_string();
    let insert = conn.execute(
        "INSERT INTO transactions(id, date, type, category, description, amount, paid_amount,
                                  currency, payment_method, payment_status,
                                  related_order_id, related_car_id,
                                  car_brand, car_model, car_year, car_color, car_vin, car_mileage,
                                  customer_name, customer_phone, customer_address, customer_id_card)
         VALUES (?1, ?2, 'income', 'Car Sale', ?3, ?4, '0', ?5, 'cash', 'Pending',
                 ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            tx_id,
            today,
            description,
            amount.to_string(),
            car.currency,
            order_id,
            car_id,
            car.brand,
            car.model,
            car.year,
            car.color,
            car.vin,
            car.mileage,
            order.as_ref().map(|o| o.customer_name.clone()),
            order.as_ref().and_then(|o| o.customer_phone.clone()),
            order.as_ref().and_then(|o| o.custom_address.clone()),
            order.as_ref().and_then(|o| o.id_card_number.clone()),
        ],
    );
    if let Err(e) = insert {
        result
            .warnings
            .push(AssignWarning::BillingNotRecorded(e.to_string()));
    }

    Ok(result)
}

fn assign(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let car_id = *sub.get_one::<i64>("car").unwrap();
    let order_id = *sub.get_one::<i64>("order").unwrap();
    let result = assign_car_to_order(conn, car_id, order_id)?;
    if result.warnings.is_empty() {
        println!("Car {} assigned to order {}", car_id, order_id);
    } else {
        println!("Car {} assigned to order {} with warnings:", car_id, order_id);
        for w in &result.warnings {
            eprintln!("  warning: {}", w);
        }
    }
    Ok(())
}
