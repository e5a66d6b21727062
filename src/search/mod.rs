mod engine;
mod heuristic;
mod outcome;
mod session;

pub use engine::SearchEngine;
pub use outcome::{SearchOutcome, SearchReport, SearchStats};
pub use session::Search;
