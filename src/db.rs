// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.dealerdesk", "Dealerdesk", "dealerdesk"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("dealerdesk.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS cars(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand TEXT NOT NULL,
        model TEXT NOT NULL,
        year INTEGER,
        color TEXT,
        vin TEXT UNIQUE,
        mileage INTEGER,
        price TEXT,
        currency TEXT NOT NULL DEFAULT 'DZD',
        status TEXT NOT NULL DEFAULT 'available'
            CHECK(status IN ('available','reserved','sold','in-transit')),
        order_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_cars_status ON cars(status);

    CREATE TABLE IF NOT EXISTS orders(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_name TEXT NOT NULL,
        customer_phone TEXT,
        customer_wilaya TEXT,
        custom_address TEXT,
        id_card_number TEXT,
        requested_brand TEXT,
        requested_model TEXT,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK(status IN ('pending','bought','shipped','delivered','cancelled')),
        car_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Financial ledger. Amounts stored as TEXT decimals; ids are opaque
    -- strings whose first 8 chars double as the invoice display number.
    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        description TEXT,
        amount TEXT NOT NULL,
        paid_amount TEXT NOT NULL DEFAULT '0',
        currency TEXT NOT NULL DEFAULT 'DZD',
        payment_method TEXT,
        payment_status TEXT,
        related_order_id INTEGER,
        related_car_id INTEGER,
        car_brand TEXT,
        car_model TEXT,
        car_year INTEGER,
        car_color TEXT,
        car_vin TEXT,
        car_mileage INTEGER,
        customer_name TEXT,
        customer_phone TEXT,
        customer_address TEXT,
        customer_id_card TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS attendance(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee TEXT NOT NULL,
        date TEXT NOT NULL,
        check_in TEXT,
        check_out TEXT,
        UNIQUE(employee, date)
    );

    -- Pointers to shipping paperwork kept on disk or in a bucket; no upload
    -- machinery here, just the references.
    CREATE TABLE IF NOT EXISTS documents(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER NOT NULL,
        kind TEXT NOT NULL,
        path TEXT NOT NULL,
        added_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
