use std::path::Path;

use anyhow::Result;

use crate::plan::Plan;

impl Plan {
    /// Write a `unit,name,district` CSV with one row per unit.
    pub fn write_to_csv(&self, path: &Path) -> Result<()> {
        crate::io::csv::write_plan_assignments(&self.rows(), path)
    }

    /// Generate the assignment CSV as a string.
    pub fn to_csv(&self) -> Result<String> {
        crate::io::csv::write_plan_assignments_string(&self.rows())
    }
}
