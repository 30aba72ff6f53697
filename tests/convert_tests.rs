// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dealerdesk::convert::{
    ConversionRequest, ConvertError, Direction, convert, group_thousands,
};
use dealerdesk::models::Currency;
use dealerdesk::rates::ExchangeRateSet;
use rust_decimal::Decimal;

fn rates(dzd: &str, krw: &str) -> ExchangeRateSet {
    ExchangeRateSet {
        usdt_to_dzd: dzd.parse().unwrap(),
        usdt_to_krw: krw.parse().unwrap(),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn usdt_to_dzd_is_exact_multiplication() {
    let r = rates("200", "1300");
    let res = convert(&ConversionRequest::new(dec("100"), Direction::UsdtToDzd), &r).unwrap();
    assert_eq!(res.amount, dec("20000"));
    assert_eq!(res.currency, Currency::Dzd);
}

#[test]
fn usdt_dzd_round_trip_within_rounding() {
    let r = rates("147.35", "1412.9");
    let x = dec("123.45");
    let to_dzd = convert(&ConversionRequest::new(x, Direction::UsdtToDzd), &r).unwrap();
    let back = convert(
        &ConversionRequest::new(to_dzd.amount, Direction::DzdToUsdt),
        &r,
    )
    .unwrap();
    assert!((back.amount - x).abs() <= dec("0.01"));
}

#[test]
fn zero_extra_equals_no_extra() {
    let r = rates("200", "1300");
    for dir in [
        Direction::UsdtToDzd,
        Direction::KrwToDzd,
        Direction::DzdToUsdt,
        Direction::KrwToUsdt,
    ] {
        let plain = convert(&ConversionRequest::new(dec("77.7"), dir), &r).unwrap();
        let with_zero = convert(
            &ConversionRequest::new(dec("77.7"), dir).with_extra(Decimal::ZERO, Currency::Krw),
            &r,
        )
        .unwrap();
        assert_eq!(plain, with_zero);
    }
}

#[test]
fn krw_to_dzd_with_usdt_extra() {
    // primary = (100 / 1300) * 200 ~= 15.38; extra = 50 * 200 = 10000
    let r = rates("200", "1300");
    let req = ConversionRequest::new(dec("100"), Direction::KrwToDzd)
        .with_extra(dec("50"), Currency::Usdt);
    let res = convert(&req, &r).unwrap();
    assert_eq!(res.amount, dec("10015.38"));
    assert_eq!(res.display(), "10,015.38 DZD");
}

#[test]
fn extra_is_converted_into_usdt_result_unit() {
    // 1300 KRW -> 1 USDT; extra 200 DZD -> 1 USDT
    let r = rates("200", "1300");
    let req = ConversionRequest::new(dec("1300"), Direction::KrwToUsdt)
        .with_extra(dec("200"), Currency::Dzd);
    let res = convert(&req, &r).unwrap();
    assert_eq!(res.amount, dec("2"));
    assert_eq!(res.currency, Currency::Usdt);
}

#[test]
fn zero_or_negative_rate_is_unavailable() {
    let req = ConversionRequest::new(dec("100"), Direction::KrwToDzd);
    assert_eq!(
        convert(&req, &rates("0", "1300")),
        Err(ConvertError::RateUnavailable)
    );
    assert_eq!(
        convert(&req, &rates("200", "-5")),
        Err(ConvertError::RateUnavailable)
    );
}

#[test]
fn thousand_grouping_and_two_decimals() {
    assert_eq!(group_thousands(dec("1234567.5")), "1,234,567.5");
    assert_eq!(group_thousands(dec("1000000")), "1,000,000");
    assert_eq!(group_thousands(dec("999")), "999");
    assert_eq!(group_thousands(dec("-4321.999")), "-4,322");
    assert_eq!(group_thousands(dec("15.384615")), "15.38");
}
