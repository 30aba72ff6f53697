// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_order, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let order_id = *sub.get_one::<i64>("order").unwrap();
    let kind = sub.get_one::<String>("kind").unwrap();
    let path = sub.get_one::<String>("path").unwrap();
    if get_order(conn, order_id)?.is_none() {
        return Err(anyhow!("Order {} not found", order_id));
    }
    conn.execute(
        "INSERT INTO documents(order_id, kind, path) VALUES (?1, ?2, ?3)",
        params![order_id, kind, path],
    )?;
    println!("Registered {} document for order {}", kind, order_id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut sql = String::from(
        "SELECT id, order_id, kind, path, added_at FROM documents WHERE 1=1",
    );
    let mut params_vec: Vec<i64> = Vec::new();
    if let Some(order_id) = sub.get_one::<i64>("order") {
        sql.push_str(" AND order_id=?");
        params_vec.push(*order_id);
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        stmt.query(params![params_vec[0]])?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(vec![
            r.get::<_, i64>(0)?.to_string(),
            r.get::<_, i64>(1)?.to_string(),
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ]);
    }
    println!(
        "{}",
        pretty_table(&["ID", "Order", "Kind", "Path", "Added"], data)
    );
    Ok(())
}
