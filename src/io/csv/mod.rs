//! CSV format operations.

mod write;

pub(crate) use write::{write_plan_assignments, write_plan_assignments_string};
