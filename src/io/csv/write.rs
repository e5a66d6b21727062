//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

/// Write a DataFrame to a CSV file.
fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write a DataFrame to a CSV string.
fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(df)
        .with_context(|| "[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .with_context(|| "[io::csv::write] CSV output is not valid UTF-8")
}

/// Build a `unit,name,district` frame from (unit, name, district) rows.
fn assignments_frame(rows: &[(usize, &str, u32)]) -> Result<DataFrame> {
    let units = rows.iter().map(|&(u, _, _)| u as u32).collect::<Vec<_>>();
    let names = rows.iter().map(|&(_, name, _)| name).collect::<Vec<_>>();
    let districts = rows.iter().map(|&(_, _, d)| d).collect::<Vec<_>>();

    DataFrame::new(vec![
        Series::new("unit".into(), units).into(),
        Series::new("name".into(), names).into(),
        Series::new("district".into(), districts).into(),
    ])
    .context("[io::csv::write] Failed to build assignment frame")
}

/// Write plan assignments to a CSV file.
pub(crate) fn write_plan_assignments(rows: &[(usize, &str, u32)], path: &Path) -> Result<()> {
    write_csv(&mut assignments_frame(rows)?, path)
}

/// Write plan assignments to a CSV string.
pub(crate) fn write_plan_assignments_string(rows: &[(usize, &str, u32)]) -> Result<String> {
    write_csv_string(&mut assignments_frame(rows)?)
}
