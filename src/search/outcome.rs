use std::time::Duration;

use serde::Serialize;

use crate::{partition::PartitionState, plan::Plan};

/// Terminal state of a search run.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A partition satisfying the bounds and disagreement tolerance.
    Solved(Plan),
    /// The search space was exhausted without an acceptable partition.
    Exhausted,
    /// The run was stopped by its stop flag or time limit.
    Cancelled,
}

impl SearchOutcome {
    #[inline] pub fn is_solved(&self) -> bool { matches!(self, SearchOutcome::Solved(_)) }

    /// The accepted plan, if any.
    #[inline]
    pub fn plan(&self) -> Option<&Plan> {
        match self { SearchOutcome::Solved(plan) => Some(plan), _ => None }
    }
}

/// Counters collected during a search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Units placed (one per recursive call).
    pub placements: u64,
    /// Placements undone on backtrack.
    pub backtracks: u64,
    /// Times a following district was seeded.
    pub district_advances: u64,
    /// District advances skipped because the member set was already attempted.
    pub memo_hits: u64,
    /// Neighbors skipped because they would exceed the maximum population.
    pub bound_prunes: u64,
    /// Complete assignments rejected by the final check.
    pub rejected_leaves: u64,
    /// Deepest recursion reached (number of placed units).
    pub max_depth: u64,
    /// Wall time of the search.
    pub elapsed: Duration,
}

/// Everything a search run produces.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    /// Final state: the accepted partition on success, fully unwound on exhaustion.
    pub state: PartitionState,
}
