mod io;
mod plan;

pub use plan::{DistrictSummary, Plan};
