// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure conversion engine over the two base rates. DZD is the pivot: every
//! amount is taken to DZD first, then to the result unit if that is USDT.

use crate::models::Currency;
use crate::rates::ExchangeRateSet;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    UsdtToDzd,
    KrwToDzd,
    DzdToUsdt,
    KrwToUsdt,
}

impl Direction {
    pub fn result_currency(&self) -> Currency {
        match self {
            Direction::UsdtToDzd | Direction::KrwToDzd => Currency::Dzd,
            Direction::DzdToUsdt | Direction::KrwToUsdt => Currency::Usdt,
        }
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usdt-dzd" => Ok(Direction::UsdtToDzd),
            "krw-dzd" => Ok(Direction::KrwToDzd),
            "dzd-usdt" => Ok(Direction::DzdToUsdt),
            "krw-usdt" => Ok(Direction::KrwToUsdt),
            other => Err(anyhow::anyhow!(
                "Unknown direction '{}' (use usdt-dzd|krw-dzd|dzd-usdt|krw-usdt)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub direction: Direction,
    /// Added to the primary result after conversion into the result unit.
    pub extra_amount: Decimal,
    pub extra_currency: Currency,
}

impl ConversionRequest {
    pub fn new(amount: Decimal, direction: Direction) -> Self {
        ConversionRequest {
            amount,
            direction,
            extra_amount: Decimal::ZERO,
            extra_currency: Currency::Dzd,
        }
    }

    pub fn with_extra(mut self, amount: Decimal, currency: Currency) -> Self {
        self.extra_amount = amount;
        self.extra_currency = currency;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    /// At most two fractional digits, thousand separators, unit suffix.
    pub fn display(&self) -> String {
        format!("{} {}", group_thousands(self.amount), self.currency)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConvertError {
    /// A base rate is zero or negative; no numeric result exists.
    #[error("exchange rate unavailable")]
    RateUnavailable,
}

pub fn convert(req: &ConversionRequest, rates: &ExchangeRateSet) -> Result<Money, ConvertError> {
    if rates.usdt_to_dzd <= Decimal::ZERO || rates.usdt_to_krw <= Decimal::ZERO {
        return Err(ConvertError::RateUnavailable);
    }
    let d = rates.usdt_to_dzd;
    let k = rates.usdt_to_krw;

    let primary = match req.direction {
        Direction::UsdtToDzd => req.amount * d,
        Direction::KrwToDzd => (req.amount / k) * d,
        Direction::DzdToUsdt => req.amount / d,
        Direction::KrwToUsdt => req.amount / k,
    };

    let extra_in_dzd = match req.extra_currency {
        Currency::Dzd => req.extra_amount,
        Currency::Krw => (req.extra_amount / k) * d,
        Currency::Usdt => req.extra_amount * d,
    };
    let currency = req.direction.result_currency();
    let extra = match currency {
        Currency::Usdt => extra_in_dzd / d,
        _ => extra_in_dzd,
    };

    Ok(Money {
        amount: (primary + extra).round_dp(2),
        currency,
    })
}

/// "1234567.5" -> "1,234,567.5". Trailing fractional zeros are dropped.
pub fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let raw = rounded.to_string();
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
