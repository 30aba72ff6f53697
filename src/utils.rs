// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Car, FinancialTransaction, Order};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

pub fn parse_month(s: &str) -> Result<String> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn car_from_row(r: &Row<'_>) -> rusqlite::Result<Car> {
    let price: Option<String> = r.get("price")?;
    Ok(Car {
        id: r.get("id")?,
        brand: r.get("brand")?,
        model: r.get("model")?,
        year: r.get("year")?,
        color: r.get("color")?,
        vin: r.get("vin")?,
        mileage: r.get("mileage")?,
        price: price.and_then(|s| s.parse::<Decimal>().ok()),
        currency: r.get("currency")?,
        status: r.get("status")?,
        order_id: r.get("order_id")?,
    })
}

pub fn get_car(conn: &Connection, id: i64) -> Result<Option<Car>> {
    let car = conn
        .query_row(
            "SELECT id, brand, model, year, color, vin, mileage, price, currency, status, order_id
             FROM cars WHERE id=?1",
            params![id],
            car_from_row,
        )
        .optional()?;
    Ok(car)
}

fn order_from_row(r: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: r.get("id")?,
        customer_name: r.get("customer_name")?,
        customer_phone: r.get("customer_phone")?,
        customer_wilaya: r.get("customer_wilaya")?,
        custom_address: r.get("custom_address")?,
        id_card_number: r.get("id_card_number")?,
        requested_brand: r.get("requested_brand")?,
        requested_model: r.get("requested_model")?,
        status: r.get("status")?,
        car_id: r.get("car_id")?,
    })
}

pub fn get_order(conn: &Connection, id: i64) -> Result<Option<Order>> {
    let order = conn
        .query_row(
            "SELECT id, customer_name, customer_phone, customer_wilaya, custom_address,
                    id_card_number, requested_brand, requested_model, status, car_id
             FROM orders WHERE id=?1",
            params![id],
            order_from_row,
        )
        .optional()?;
    Ok(order)
}

fn tx_from_row(r: &Row<'_>) -> rusqlite::Result<FinancialTransaction> {
    let amount: String = r.get("amount")?;
    let paid: String = r.get("paid_amount")?;
    Ok(FinancialTransaction {
        id: r.get("id")?,
        date: r.get("date")?,
        tx_type: r.get("type")?,
        category: r.get("category")?,
        description: r.get("description")?,
        amount: amount.parse::<Decimal>().unwrap_or(Decimal::ZERO),
        paid_amount: paid.parse::<Decimal>().unwrap_or(Decimal::ZERO),
        currency: r.get("currency")?,
        payment_method: r.get("payment_method")?,
        payment_status: r.get("payment_status")?,
        related_order_id: r.get("related_order_id")?,
        related_car_id: r.get("related_car_id")?,
        car_brand: r.get("car_brand")?,
        car_model: r.get("car_model")?,
        car_year: r.get("car_year")?,
        car_color: r.get("car_color")?,
        car_vin: r.get("car_vin")?,
        car_mileage: r.get("car_mileage")?,
        customer_name: r.get("customer_name")?,
        customer_phone: r.get("customer_phone")?,
        customer_address: r.get("customer_address")?,
        customer_id_card: r.get("customer_id_card")?,
    })
}

pub fn get_transaction(conn: &Connection, id: &str) -> Result<Option<FinancialTransaction>> {
    let tx = conn
        .query_row(
            "SELECT id, date, type, category, description, amount, paid_amount, currency,
                    payment_method, payment_status, related_order_id, related_car_id,
                    car_brand, car_model, car_year, car_color, car_vin, car_mileage,
                    customer_name, customer_phone, customer_address, customer_id_card
             FROM transactions WHERE id=?1",
            params![id],
            tx_from_row,
        )
        .optional()?;
    Ok(tx)
}
