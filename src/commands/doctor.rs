// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rates::{KEY_USDT_DZD, KEY_USDT_KRW};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Stored rates that would make conversions unavailable
    for key in [KEY_USDT_DZD, KEY_USDT_KRW] {
        let v: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        if let Some(raw) = v {
            match raw.trim().parse::<Decimal>() {
                Ok(d) if d > Decimal::ZERO => {}
                _ => rows.push(vec!["bad_rate".into(), format!("{} = '{}'", key, raw)]),
            }
        }
    }

    // 2) Ledger rows pointing at missing cars or orders
    let mut stmt = conn.prepare(
        "SELECT id, related_car_id FROM transactions
         WHERE related_car_id IS NOT NULL
           AND related_car_id NOT IN (SELECT id FROM cars)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let car: i64 = r.get(1)?;
        rows.push(vec!["missing_car".into(), format!("tx {} -> car {}", id, car)]);
    }
    let mut stmt2 = conn.prepare(
        "SELECT id, related_order_id FROM transactions
         WHERE related_order_id IS NOT NULL
           AND related_order_id NOT IN (SELECT id FROM orders)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: String = r.get(0)?;
        let order: i64 = r.get(1)?;
        rows.push(vec![
            "missing_order".into(),
            format!("tx {} -> order {}", id, order),
        ]);
    }

    // 3) Reserved cars without an order reference
    let mut stmt3 =
        conn.prepare("SELECT id FROM cars WHERE status='reserved' AND order_id IS NULL")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["reserved_no_order".into(), format!("car {}", id)]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
