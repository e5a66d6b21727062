//! Reader for the county adjacency text format.
//!
//! ```text
//! 3            <- number of units
//! Adams        <- name
//! 120          <- count A
//! 80           <- count B
//! 2            <- 1-based neighbor indices, one per line
//! `            <- end of neighbor list
//! Brown
//! ...
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result, bail, ensure};

use crate::graph::{Graph, UnitRecord};

/// Line that terminates a unit's neighbor list.
pub const SENTINEL: &str = "`";

/// Fewest lines a unit can take: name, two counts and the sentinel.
const MIN_LINES_PER_UNIT: usize = 4;

/// Line cursor that reports 1-based line numbers in errors.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self { Self { inner: text.lines().enumerate() } }

    fn next(&mut self, what: &str) -> Result<(usize, &'a str)> {
        match self.inner.next() {
            Some((i, line)) => Ok((i + 1, line.trim())),
            None => bail!("[io::counties] Unexpected end of input while reading {what}"),
        }
    }

    /// Number of lines not yet consumed.
    fn remaining(&self) -> usize { self.inner.clone().count() }

    fn next_number<T: std::str::FromStr>(&mut self, what: &str) -> Result<(usize, T)> {
        let (line_no, line) = self.next(what)?;
        let value = line.parse::<T>()
            .map_err(|_| anyhow::anyhow!("[io::counties] Line {line_no}: expected {what}, found '{line}'"))?;
        Ok((line_no, value))
    }
}

/// Parse county records from text, converting 1-based neighbor indices to 0-based.
pub fn parse_counties(text: &str) -> Result<Vec<UnitRecord>> {
    let mut lines = Lines::new(text);
    let (line_no, count) = lines.next_number::<usize>("unit count")?;
    let remaining = lines.remaining();
    ensure!(
        count.checked_mul(MIN_LINES_PER_UNIT).is_some_and(|needed| needed <= remaining),
        "[io::counties] Line {line_no}: {count} units cannot fit in the {remaining} lines that follow"
    );

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let (line_no, name) = lines.next("unit name")?;
        ensure!(!name.is_empty(), "[io::counties] Line {line_no}: unit {} has an empty name", i + 1);
        let (_, count_a) = lines.next_number::<u32>("count A")?;
        let (_, count_b) = lines.next_number::<u32>("count B")?;

        let mut adjacent = Vec::new();
        loop {
            let (line_no, line) = lines.next("neighbor index or sentinel")?;
            if line == SENTINEL { break }
            let index = line.parse::<usize>()
                .map_err(|_| anyhow::anyhow!("[io::counties] Line {line_no}: expected neighbor index, found '{line}'"))?;
            ensure!(
                (1..=count).contains(&index),
                "[io::counties] Line {line_no}: neighbor index {index} out of range 1..={count}"
            );
            adjacent.push(index - 1);
        }

        records.push(UnitRecord { name: name.to_string(), count_a, count_b, adjacent });
    }

    Ok(records)
}

/// Read a county file into a graph.
pub fn read_counties(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("[io::counties] Failed to read {}", path.display()))?;
    let records = parse_counties(&text)
        .with_context(|| format!("[io::counties] Failed to parse {}", path.display()))?;
    Graph::from_records(records)
}
