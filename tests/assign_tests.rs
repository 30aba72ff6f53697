// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dealerdesk::commands::orders::{AssignWarning, assign_car_to_order};
use dealerdesk::db;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO cars(id, brand, model, year, price, currency) \
         VALUES (1, 'Kia', 'Sportage', 2022, '2000000', 'DZD')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO orders(id, customer_name, id_card_number, custom_address) \
         VALUES (1, 'Ali', '556677', '12 Rue Didouche')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn assignment_reserves_car_marks_order_and_records_sale() {
    let conn = setup();
    let result = assign_car_to_order(&conn, 1, 1).unwrap();
    assert!(result.warnings.is_empty());

    let (car_status, car_order): (String, Option<i64>) = conn
        .query_row("SELECT status, order_id FROM cars WHERE id=1", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(car_status, "reserved");
    assert_eq!(car_order, Some(1));

    let (order_status, order_car): (String, Option<i64>) = conn
        .query_row("SELECT status, car_id FROM orders WHERE id=1", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(order_status, "bought");
    assert_eq!(order_car, Some(1));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
    let (tx_type, category, amount, description, method, status): (
        String,
        String,
        String,
        String,
        String,
        String,
    ) = conn
        .query_row(
            "SELECT type, category, amount, description, payment_method, payment_status \
             FROM transactions",
            [],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                ))
            },
        )
        .unwrap();
    assert_eq!(tx_type, "income");
    assert_eq!(category, "Car Sale");
    assert_eq!(amount, "2000000");
    assert!(description.contains("Customer: Ali"));
    assert!(description.contains("ID Card: 556677"));
    assert!(description.contains("Address: 12 Rue Didouche"));
    assert_eq!(method, "cash");
    assert_eq!(status, "Pending");
}

#[test]
fn missing_order_is_a_warning_not_an_error() {
    let conn = setup();
    let result = assign_car_to_order(&conn, 1, 99).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0],
        AssignWarning::OrderUpdateFailed(_)
    ));

    // Step 1 stands: the car is reserved against the requested order id.
    let car_status: String = conn
        .query_row("SELECT status FROM cars WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(car_status, "reserved");

    // The sale is still recorded, just without customer lines.
    let description: String = conn
        .query_row("SELECT description FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert!(description.contains("Car sale: Kia Sportage"));
    assert!(!description.contains("Customer:"));
}

#[test]
fn billing_failure_leaves_car_reserved_with_warning() {
    let conn = setup();
    conn.execute_batch("DROP TABLE transactions;").unwrap();

    let result = assign_car_to_order(&conn, 1, 1).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0],
        AssignWarning::BillingNotRecorded(_)
    ));

    let car_status: String = conn
        .query_row("SELECT status FROM cars WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(car_status, "reserved");
    let order_status: String = conn
        .query_row("SELECT status FROM orders WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(order_status, "bought");
}

#[test]
fn missing_car_aborts_the_assignment() {
    let conn = setup();
    assert!(assign_car_to_order(&conn, 42, 1).is_err());

    // Nothing was touched.
    let order_status: String = conn
        .query_row("SELECT status FROM orders WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(order_status, "pending");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn priceless_car_bills_zero() {
    let conn = setup();
    conn.execute(
        "INSERT INTO cars(id, brand, model) VALUES (2, 'Hyundai', 'Tucson')",
        [],
    )
    .unwrap();
    conn.execute("INSERT INTO orders(id, customer_name) VALUES (2, 'Lina')", [])
        .unwrap();
    let result = assign_car_to_order(&conn, 2, 2).unwrap();
    assert!(result.warnings.is_empty());
    let amount: String = conn
        .query_row(
            "SELECT amount FROM transactions WHERE related_car_id=2",
            params![],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(amount, "0");
}
