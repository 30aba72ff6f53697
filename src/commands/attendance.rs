// Copyright (c) 2025 Dealerdesk Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use chrono::{Local, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("in", sub)) => check_in(conn, sub)?,
        Some(("out", sub)) => check_out(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn check_in(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let employee = sub.get_one::<String>("employee").unwrap().trim().to_string();
    let date = Utc::now().date_naive().to_string();
    let time = Local::now().format("%H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO attendance(employee, date, check_in) VALUES (?1, ?2, ?3)
         ON CONFLICT(employee, date) DO UPDATE SET check_in=COALESCE(check_in, excluded.check_in)",
        params![employee, date, time],
    )?;
    println!("{} checked in at {}", employee, time);
    Ok(())
}

fn check_out(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let employee = sub.get_one::<String>("employee").unwrap().trim().to_string();
    let date = Utc::now().date_naive().to_string();
    let time = Local::now().format("%H:%M:%S").to_string();
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM attendance WHERE employee=?1 AND date=?2",
            params![employee, date],
            |r| r.get(0),
        )
        .optional()?;
    let Some(id) = existing else {
        return Err(anyhow!("{} has not checked in today", employee));
    };
    conn.execute(
        "UPDATE attendance SET check_out=?1 WHERE id=?2",
        params![time, id],
    )?;
    println!("{} checked out at {}", employee, time);
    Ok(())
}

#[derive(Serialize)]
pub struct AttendanceRow {
    pub employee: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<AttendanceRow>> {
    let mut sql = String::from(
        "SELECT employee, date, check_in, check_out FROM attendance WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month.trim())?;
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month);
    }
    if let Some(emp) = sub.get_one::<String>("employee") {
        sql.push_str(" AND employee=?");
        params_vec.push(emp.into());
    }
    sql.push_str(" ORDER BY date DESC, employee");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let check_in: Option<String> = r.get(2)?;
        let check_out: Option<String> = r.get(3)?;
        data.push(AttendanceRow {
            employee: r.get(0)?,
            date: r.get(1)?,
            check_in: check_in.unwrap_or_default(),
            check_out: check_out.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|a| {
                vec![
                    a.employee.clone(),
                    a.date.clone(),
                    a.check_in.clone(),
                    a.check_out.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Employee", "Date", "In", "Out"], rows)
        );
    }
    Ok(())
}
