use std::path::Path;

use anyhow::Result;

use crate::plan::Plan;

impl Plan {
    /// Write the plan (party, district summaries, assignments) as JSON.
    pub fn write_to_json(&self, path: &Path) -> Result<()> {
        crate::io::json::write_json(self, path)
    }

    /// Generate the plan JSON as a string.
    pub fn to_json(&self) -> Result<String> {
        crate::io::json::to_json_string(self)
    }
}
