// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Invoice view assembly. A transaction is the authoritative source; the
//! related order and car only fill the gaps, field by field. Older records
//! carried customer details embedded in the description text, so a
//! line-prefix scrape remains as the legacy fallback.

use crate::models::{Car, FinancialTransaction, Order};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

pub const WALK_IN_CLIENT: &str = "walk-in client";

static ADDRESS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Address:\s*(.+)$").unwrap());
static ID_CARD_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^ID Card:\s*(.+)$").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
    pub invoice_number: String,
    pub date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_id_card: String,
    pub car_brand: String,
    pub car_model: String,
    pub car_year: String,
    pub car_color: String,
    pub car_vin: String,
    pub car_mileage: String,
    pub category: String,
    pub description: String,
    pub selling_price: Decimal,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub payment_status: String,
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn first_non_empty(candidates: &[Option<String>]) -> String {
    candidates
        .iter()
        .flatten()
        .next()
        .cloned()
        .unwrap_or_default()
}

fn mined(re: &Regex, description: Option<&str>) -> Option<String> {
    description
        .and_then(|d| re.captures(d))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Uppercased first 8 chars of the transaction id.
pub fn invoice_number(tx_id: &str) -> String {
    tx_id.chars().take(8).collect::<String>().to_uppercase()
}

pub fn build_invoice(
    tx: &FinancialTransaction,
    order: Option<&Order>,
    car: Option<&Car>,
) -> InvoiceView {
    let desc = tx.description.as_deref();

    let customer_name = first_non_empty(&[
        non_empty(tx.customer_name.as_deref()),
        non_empty(order.map(|o| o.customer_name.as_str())),
        Some(WALK_IN_CLIENT.to_string()),
    ]);

    let customer_address = first_non_empty(&[
        mined(&ADDRESS_LINE, desc),
        non_empty(tx.customer_address.as_deref()),
        non_empty(order.and_then(|o| o.customer_wilaya.as_deref())),
        non_empty(order.and_then(|o| o.custom_address.as_deref())),
    ]);

    let customer_id_card = first_non_empty(&[
        mined(&ID_CARD_LINE, desc),
        non_empty(order.and_then(|o| o.id_card_number.as_deref())),
    ]);

    let car_brand = first_non_empty(&[
        non_empty(tx.car_brand.as_deref()),
        non_empty(car.map(|c| c.brand.as_str())),
        non_empty(order.and_then(|o| o.requested_brand.as_deref())),
    ]);
    let car_model = first_non_empty(&[
        non_empty(tx.car_model.as_deref()),
        non_empty(car.map(|c| c.model.as_str())),
        non_empty(order.and_then(|o| o.requested_model.as_deref())),
    ]);
    let car_year = first_non_empty(&[
        tx.car_year.map(|y| y.to_string()),
        car.and_then(|c| c.year).map(|y| y.to_string()),
    ]);
    let car_color = first_non_empty(&[
        non_empty(tx.car_color.as_deref()),
        non_empty(car.and_then(|c| c.color.as_deref())),
    ]);
    let car_vin = first_non_empty(&[
        non_empty(tx.car_vin.as_deref()),
        non_empty(car.and_then(|c| c.vin.as_deref())),
    ]);
    let car_mileage = first_non_empty(&[
        tx.car_mileage.map(|m| m.to_string()),
        car.and_then(|c| c.mileage).map(|m| m.to_string()),
    ]);

    let remaining = (tx.amount - tx.paid_amount).max(Decimal::ZERO);
    let currency = if tx.currency.trim().is_empty() {
        "DZD".to_string()
    } else {
        tx.currency.clone()
    };

    InvoiceView {
        invoice_number: invoice_number(&tx.id),
        date: tx.date.clone(),
        customer_name,
        customer_phone: first_non_empty(&[
            non_empty(tx.customer_phone.as_deref()),
            non_empty(order.and_then(|o| o.customer_phone.as_deref())),
        ]),
        customer_address,
        customer_id_card,
        car_brand,
        car_model,
        car_year,
        car_color,
        car_vin,
        car_mileage,
        category: tx.category.clone(),
        description: tx.description.clone().unwrap_or_default(),
        selling_price: tx.amount,
        paid_amount: tx.paid_amount,
        remaining_amount: remaining,
        currency,
        payment_method: tx.payment_method.clone().unwrap_or_default(),
        payment_status: tx.payment_status.clone().unwrap_or_default(),
    }
}
