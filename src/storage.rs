use crate::error::Result;
use crate::report::ComparedCountry;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Tidy export row (one row = one observation of one country+indicator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub country_code: String,
    pub country_name: String,
    pub indicator_code: String,
    pub indicator_name: String,
    pub unit: String,
    pub year: i32,
    pub value: f64,
}

/// Flatten compared countries into rows, in selection order then series key order.
pub fn rows(compared: &[ComparedCountry]) -> Vec<ExportRow> {
    let mut out = Vec::new();
    for c in compared {
        for (code, series) in &c.data.series {
            for o in &series.observations {
                out.push(ExportRow {
                    country_code: c.country.code.clone(),
                    country_name: c.country.name.clone(),
                    indicator_code: code.clone(),
                    indicator_name: series.definition.name.clone(),
                    unit: series.definition.unit.clone(),
                    year: o.year,
                    value: o.value,
                });
            }
        }
    }
    out
}

/// Prefix cells a spreadsheet would evaluate as a formula.
fn sanitize(cell: &str) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{}", cell),
        _ => cell.to_string(),
    }
}

/// Save rows as CSV with header.
pub fn save_csv<P: AsRef<Path>>(rows: &[ExportRow], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record([
        "country_code",
        "country_name",
        "indicator_code",
        "indicator_name",
        "unit",
        "year",
        "value",
    ])?;
    for r in rows {
        wtr.write_record([
            sanitize(&r.country_code),
            sanitize(&r.country_name),
            sanitize(&r.indicator_code),
            sanitize(&r.indicator_name),
            sanitize(&r.unit),
            r.year.to_string(),
            r.value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[ExportRow], path: P) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, rows).map_err(std::io::Error::from)?;
    w.flush()?;
    Ok(())
}
