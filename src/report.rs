//! Tabular comparison of the selected countries' latest values.

use crate::format::{format_value, trade_balance};
use crate::indicators::IndicatorRegistry;
use crate::models::{Country, CountrySeries, FormatKind, Observation};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub const TRADE_BALANCE_LABEL: &str = "Trade Balance (Exports - Imports)";

/// One selected country paired with its fetched series.
#[derive(Debug, Clone)]
pub struct ComparedCountry {
    pub country: Arc<Country>,
    pub data: Arc<CountrySeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    /// Year of the displayed observation, when there is one.
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// Header row is "Indicator" followed by the country names in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl ComparisonTable {
    /// One row per registry indicator (registry order) plus a trailing trade-balance row.
    pub fn build(registry: &IndicatorRegistry, compared: &[ComparedCountry]) -> Self {
        let mut headers = vec!["Indicator".to_string()];
        headers.extend(compared.iter().map(|c| c.country.name.clone()));

        let mut rows: Vec<TableRow> = registry
            .iter()
            .map(|def| TableRow {
                label: def.name.clone(),
                cells: compared
                    .iter()
                    .map(|c| {
                        let latest = c.data.get(&def.code).and_then(|s| s.latest());
                        Cell {
                            text: format_value(latest.map(|o| o.value), def.format),
                            year: latest.map(|o| o.year),
                        }
                    })
                    .collect(),
            })
            .collect();

        rows.push(TableRow {
            label: TRADE_BALANCE_LABEL.to_string(),
            cells: compared
                .iter()
                .map(|c| Cell {
                    text: format_value(trade_balance(&c.data), FormatKind::Currency),
                    year: None,
                })
                .collect(),
        });

        Self { headers, rows }
    }
}

impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            widths[0] = widths[0].max(row.label.chars().count());
            for (i, cell) in row.cells.iter().enumerate().take(cols.saturating_sub(1)) {
                widths[i + 1] = widths[i + 1].max(cell.text.chars().count());
            }
        }

        let header_refs: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        write_line(f, &header_refs, &widths)?;
        for row in &self.rows {
            let mut cells = vec![row.label.as_str()];
            cells.extend(row.cells.iter().map(|c| c.text.as_str()));
            write_line(f, &cells, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    writeln!(f, "{}", padded.join("  ").trim_end())
}

/// `Data: FIRST - LAST` for a non-empty ascending window, otherwise `No data available`.
pub fn timestamp_label(observations: &[Observation]) -> String {
    match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => format!("Data: {} - {}", first.year, last.year),
        _ => "No data available".to_string(),
    }
}

