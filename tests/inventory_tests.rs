// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dealerdesk::{
    cli,
    commands::{cars, tx},
    db,
};
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO cars(brand, model, status) VALUES ('Kia', 'Sportage', 'available')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO cars(brand, model, status) VALUES ('Hyundai', 'Tucson', 'sold')",
        [],
    )
    .unwrap();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(id, date, type, category, amount) \
             VALUES (?1, ?2, 'expense', 'Shipping', '100')",
            params![format!("tx{}", i), format!("2025-06-0{}", i)],
        )
        .unwrap();
    }
    conn
}

#[test]
fn car_list_filters_by_status() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["dealerdesk", "car", "list", "--status", "sold"]);
    if let Some(("car", car_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = car_m.subcommand() {
            let rows = cars::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].brand, "Hyundai");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no car subcommand");
    }
}

#[test]
fn car_status_update_rejects_unknown_status() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["dealerdesk", "car", "status", "1", "scrapped"]);
    if let Some(("car", car_m)) = matches.subcommand() {
        assert!(cars::handle(&conn, car_m).is_err());
    } else {
        panic!("no car subcommand");
    }
    let status: String = conn
        .query_row("SELECT status FROM cars WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(status, "available");
}

#[test]
fn tx_list_rejects_invalid_month() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["dealerdesk", "tx", "list", "--month", "June-2025"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            assert!(tx::query_rows(&conn, list_m).is_err());
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn tx_list_limit_respected() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["dealerdesk", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = tx::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-06-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}
