// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three currency units the dealership operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Dzd,
    Krw,
    Usdt,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Dzd => "DZD",
            Currency::Krw => "KRW",
            Currency::Usdt => "USDT",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DZD" => Ok(Currency::Dzd),
            "KRW" => Ok(Currency::Krw),
            "USDT" => Ok(Currency::Usdt),
            other => Err(anyhow::anyhow!(
                "Unknown currency '{}' (use DZD|KRW|USDT)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i64>,
    pub price: Option<Decimal>,
    pub currency: String,
    pub status: String,
    pub order_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_wilaya: Option<String>,
    pub custom_address: Option<String>,
    pub id_card_number: Option<String>,
    pub requested_brand: Option<String>,
    pub requested_model: Option<String>,
    pub status: String,
    pub car_id: Option<i64>,
}

/// One row of the financial ledger. Created manually or synthesized when a
/// car is assigned to an order; never edited after an invoice is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: String,
    pub date: String,
    pub tx_type: String,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub currency: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub related_order_id: Option<i64>,
    pub related_car_id: Option<i64>,
    pub car_brand: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    pub car_color: Option<String>,
    pub car_vin: Option<String>,
    pub car_mileage: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_id_card: Option<String>,
}

pub const CAR_STATUSES: [&str; 4] = ["available", "reserved", "sold", "in-transit"];
pub const ORDER_STATUSES: [&str; 5] = ["pending", "bought", "shipped", "delivered", "cancelled"];
