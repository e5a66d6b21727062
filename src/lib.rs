#![doc = "Districtor public API"]
mod config;
mod graph;
mod partition;
mod plan;
mod progress;
mod search;

pub mod io;

#[doc(inline)]
pub use config::{Party, SearchConfig};

#[doc(inline)]
pub use graph::{Graph, Unit, UnitRecord};

#[doc(inline)]
pub use partition::{District, PartitionState};

#[doc(inline)]
pub use plan::{DistrictSummary, Plan};

#[doc(inline)]
pub use progress::{ProgressProbe, ProgressReporter, ProgressSnapshot, ReporterConfig};

#[doc(inline)]
pub use search::{Search, SearchEngine, SearchOutcome, SearchReport, SearchStats};
