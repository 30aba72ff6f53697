// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Exchange-rate store: two operator-set rates (USDT->DZD, USDT->KRW) kept in
//! the settings table, with a JSON file cache as fallback when the table
//! cannot be read, and hardcoded defaults behind that.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const KEY_USDT_DZD: &str = "exchange_rate_dzd_usdt";
pub const KEY_USDT_KRW: &str = "exchange_rate_usdt_krw";

pub const DEFAULT_USDT_DZD: u32 = 200;
pub const DEFAULT_USDT_KRW: u32 = 1400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateSet {
    pub usdt_to_dzd: Decimal,
    pub usdt_to_krw: Decimal,
}

impl Default for ExchangeRateSet {
    fn default() -> Self {
        ExchangeRateSet {
            usdt_to_dzd: Decimal::from(DEFAULT_USDT_DZD),
            usdt_to_krw: Decimal::from(DEFAULT_USDT_KRW),
        }
    }
}

/// Key/value settings backend. The production impl is the SQLite settings
/// table; tests substitute in-memory or failing fakes.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

impl SettingsStore for Connection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Last-saved rate set, durable even when the settings table is unreachable.
pub trait RateCache {
    fn load(&self) -> Result<Option<ExchangeRateSet>>;
    fn store(&self, rates: &ExchangeRateSet) -> Result<()>;
}

pub struct FileRateCache {
    path: PathBuf,
}

impl FileRateCache {
    pub fn new(path: PathBuf) -> Self {
        FileRateCache { path }
    }

    pub fn at_default_path() -> Result<Self> {
        Ok(FileRateCache::new(
            crate::db::data_dir()?.join("exchange_rates.json"),
        ))
    }
}

impl RateCache for FileRateCache {
    fn load(&self) -> Result<Option<ExchangeRateSet>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Read rate cache at {}", self.path.display()))?;
        let rates: ExchangeRateSet =
            serde_json::from_str(&raw).context("Malformed rate cache file")?;
        Ok(Some(rates))
    }

    fn store(&self, rates: &ExchangeRateSet) -> Result<()> {
        let raw = serde_json::to_string_pretty(rates)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Write rate cache at {}", self.path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persisted to the settings table (and the cache).
    Remote,
    /// Settings-table write failed; the cache file is the only durable copy.
    LocalOnly,
}

fn parse_or_default(raw: Option<String>, default: u32) -> Decimal {
    raw.and_then(|s| s.trim().parse::<Decimal>().ok())
        .unwrap_or_else(|| Decimal::from(default))
}

fn load_remote(store: &dyn SettingsStore) -> Result<ExchangeRateSet> {
    let dzd = store.get(KEY_USDT_DZD)?;
    let krw = store.get(KEY_USDT_KRW)?;
    Ok(ExchangeRateSet {
        usdt_to_dzd: parse_or_default(dzd, DEFAULT_USDT_DZD),
        usdt_to_krw: parse_or_default(krw, DEFAULT_USDT_KRW),
    })
}

/// Settings table first; on read failure the cached copy; defaults last.
/// A key that is absent or unparseable gets its hardcoded default without
/// failing the whole load.
pub fn load_rates(store: &dyn SettingsStore, cache: &dyn RateCache) -> ExchangeRateSet {
    match load_remote(store) {
        Ok(rates) => rates,
        Err(_) => cache
            .load()
            .ok()
            .flatten()
            .unwrap_or_default(),
    }
}

/// Cache write first (failure here is fatal: nothing would be durable), then
/// the settings upsert. A failed upsert is reported, not propagated.
pub fn save_rates(
    rates: &ExchangeRateSet,
    store: &dyn SettingsStore,
    cache: &dyn RateCache,
) -> Result<SaveOutcome> {
    cache.store(rates)?;
    let remote = store
        .put(KEY_USDT_DZD, &rates.usdt_to_dzd.to_string())
        .and_then(|_| store.put(KEY_USDT_KRW, &rates.usdt_to_krw.to_string()));
    match remote {
        Ok(()) => Ok(SaveOutcome::Remote),
        Err(_) => Ok(SaveOutcome::LocalOnly),
    }
}
