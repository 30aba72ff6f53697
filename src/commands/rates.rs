// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::convert::{ConversionRequest, ConvertError, Direction, convert};
use crate::models::Currency;
use crate::rates::{FileRateCache, SaveOutcome, load_rates, save_rates};
use crate::utils::{parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let cache = FileRateCache::at_default_path()?;
            let rates = load_rates(conn, &cache);
            println!(
                "{}",
                pretty_table(
                    &["Pair", "Rate"],
                    vec![
                        vec!["USDT -> DZD".into(), rates.usdt_to_dzd.to_string()],
                        vec!["USDT -> KRW".into(), rates.usdt_to_krw.to_string()],
                    ]
                )
            );
        }
        Some(("set", sub)) => set(conn, sub)?,
        Some(("convert", sub)) => convert_amount(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cache = FileRateCache::at_default_path()?;
    let mut rates = load_rates(conn, &cache);
    if let Some(raw) = sub.get_one::<String>("usdt_dzd") {
        rates.usdt_to_dzd = parse_positive(raw, "USDT->DZD")?;
    }
    if let Some(raw) = sub.get_one::<String>("usdt_krw") {
        rates.usdt_to_krw = parse_positive(raw, "USDT->KRW")?;
    }
    match save_rates(&rates, conn, &cache)? {
        SaveOutcome::Remote => println!(
            "Rates saved: USDT->DZD {}, USDT->KRW {}",
            rates.usdt_to_dzd, rates.usdt_to_krw
        ),
        SaveOutcome::LocalOnly => println!(
            "Settings store unreachable; rates saved locally only (USDT->DZD {}, USDT->KRW {})",
            rates.usdt_to_dzd, rates.usdt_to_krw
        ),
    }
    Ok(())
}

fn parse_positive(raw: &str, label: &str) -> Result<Decimal> {
    let v = parse_decimal(raw)?;
    if v <= Decimal::ZERO {
        return Err(anyhow!("{} rate must be positive, got {}", label, raw));
    }
    Ok(v)
}

fn convert_amount(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let direction = Direction::from_str(sub.get_one::<String>("direction").unwrap())?;

    // A non-numeric amount is a display concern, not an error.
    let amount = match parse_decimal(sub.get_one::<String>("amount").unwrap()) {
        Ok(a) => a,
        Err(_) => {
            println!("unavailable");
            return Ok(());
        }
    };

    let mut req = ConversionRequest::new(amount, direction);
    if let Some(raw) = sub.get_one::<String>("extra") {
        let extra = parse_decimal(raw)?;
        let ccy = Currency::from_str(sub.get_one::<String>("extra_currency").unwrap())?;
        req = req.with_extra(extra, ccy);
    }

    let cache = FileRateCache::at_default_path()?;
    let rates = load_rates(conn, &cache);
    match convert(&req, &rates) {
        Ok(money) => println!("{}", money.display()),
        Err(ConvertError::RateUnavailable) => println!("unavailable"),
    }
    Ok(())
}
