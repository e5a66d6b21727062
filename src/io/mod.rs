//! Format-specific reading and writing.
//!
//! - `counties` - the line-oriented county adjacency format read by the CLI
//! - `csv` - plan assignments as CSV
//! - `json` - plans and statistics as JSON

pub mod counties;
pub(crate) mod csv;
pub(crate) mod json;
