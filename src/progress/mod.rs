mod probe;
mod reporter;

pub use probe::{ProgressProbe, ProgressSnapshot};
pub use reporter::{ProgressReporter, ReporterConfig};
