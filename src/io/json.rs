//! JSON writing operations.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

/// Write any serializable value to `path` as pretty-printed JSON.
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::json] Failed to create JSON file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("[io::json] Failed to write JSON to {}", path.display()))
}

/// Serialize any value to a pretty-printed JSON string.
pub(crate) fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("[io::json] Failed to serialize JSON")
}
