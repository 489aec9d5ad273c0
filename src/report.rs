// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::engine::RunContext;
use crate::error::Failure;
use crate::storage::Nested;
use crate::stores::StoreKind;

pub const NO_UPDATES: &str = "No updates";

/// How a table renders an app/key pair that has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absent {
    NoUpdates,
    Zero,
}

impl Absent {
    fn as_str(&self) -> &'static str {
        match self {
            Absent::NoUpdates => NO_UPDATES,
            Absent::Zero => "0",
        }
    }
}

pub fn header(regions: &[String]) -> Vec<String> {
    let mut columns = vec![
        "Application".to_string(),
        StoreKind::PlayStore.to_string(),
    ];
    for cc in regions {
        columns.push(format!("{} - {}", StoreKind::AppStore, cc.to_uppercase()));
    }
    columns
}

/// One row per application: name, Play reading, then one App Store reading
/// per region.
pub fn build_rows<T: Display>(
    data: &Nested<T>,
    regions: &[String],
    absent: Absent,
) -> Vec<Vec<String>> {
    data.iter()
        .map(|(app, readings)| {
            let mut row = vec![app.clone()];
            row.push(cell(readings, StoreKind::PlayStore.reading_key(None), absent));
            for cc in regions {
                row.push(cell(readings, StoreKind::AppStore.reading_key(Some(cc)), absent));
            }
            row
        })
        .collect()
}

fn cell<T: Display>(
    readings: &BTreeMap<String, T>,
    key: Option<String>,
    absent: Absent,
) -> String {
    key.and_then(|k| readings.get(&k))
        .map(|v| v.to_string())
        .unwrap_or_else(|| absent.as_str().to_string())
}

/// ASCII grid with a header row, columns padded to their widest cell.
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(value.chars().count());
            }
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let value = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", value, width = w)
            })
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut output = String::new();
    output.push_str(&separator);
    output.push('\n');
    output.push_str(&line(header));
    output.push('\n');
    output.push_str(&separator);
    output.push('\n');
    for row in rows {
        output.push_str(&line(row));
        output.push('\n');
    }
    output.push_str(&separator);
    output
}

pub fn updates_section(updated: &Nested<String>, regions: &[String]) -> String {
    if updated.is_empty() {
        return "No App Updates Found.\n".to_string();
    }
    let rows = build_rows(updated, regions, Absent::NoUpdates);
    format!(
        "The below apps have updates.\n{}\n",
        render_table(&header(regions), &rows)
    )
}

pub fn counter_section(counter: &Nested<u32>, regions: &[String]) -> String {
    if counter.is_empty() {
        return String::new();
    }
    let rows = build_rows(counter, regions, Absent::Zero);
    format!(
        "Summary of number of app updates for this month:\n{}\n",
        render_table(&header(regions), &rows)
    )
}

pub fn failures_section(failures: &[Failure]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let mut output =
        String::from("The following errors were encountered while trying to fetch the details:\n");
    for failure in failures {
        output.push_str(&failure.to_string());
        output.push('\n');
    }
    output
}

/// Full end-of-run report: updates, this month's counts, then failures.
pub fn render_report(ctx: &RunContext, regions: &[String]) -> String {
    let mut output = updates_section(&ctx.updated, regions);
    output.push_str(&counter_section(&ctx.counter, regions));
    output.push_str(&failures_section(&ctx.failures));
    output
}
