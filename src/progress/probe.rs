use std::{
    fmt::Write,
    sync::atomic::{AtomicU32, AtomicU64, Ordering},
    time::Duration,
};

use crate::graph::Graph;

/// Lock-free view of search progress, written by the search thread and read by the reporter.
///
/// Reads are not synchronized with the search: a snapshot may mix values from
/// before and after a single placement.
#[derive(Debug)]
pub struct ProgressProbe {
    attempts: AtomicU64,
    assignment: Box<[AtomicU32]>, // 0 = unassigned, d + 1 = district d
    num_districts: usize,
}

impl ProgressProbe {
    pub fn new(num_units: usize, num_districts: usize) -> Self {
        Self {
            attempts: AtomicU64::new(0),
            assignment: (0..num_units).map(|_| AtomicU32::new(0)).collect(),
            num_districts,
        }
    }

    #[inline]
    pub(crate) fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_place(&self, node: usize, district: usize) {
        self.assignment[node].store(district as u32 + 1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_unplace(&self, node: usize) {
        self.assignment[node].store(0, Ordering::Relaxed);
    }

    /// Number of placement attempts so far.
    #[inline] pub fn attempts(&self) -> u64 { self.attempts.load(Ordering::Relaxed) }

    /// Assemble a best-effort snapshot of the current district members.
    pub fn snapshot(&self, elapsed: Duration) -> ProgressSnapshot {
        let mut districts = vec![Vec::new(); self.num_districts];
        for (node, slot) in self.assignment.iter().enumerate() {
            match slot.load(Ordering::Relaxed) {
                0 => {}
                d => if let Some(members) = districts.get_mut(d as usize - 1) { members.push(node) },
            }
        }

        ProgressSnapshot { attempts: self.attempts(), elapsed, districts }
    }
}

/// A point-in-time (possibly torn) copy of search progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Placement attempts made so far.
    pub attempts: u64,
    /// Time since the reporter started.
    pub elapsed: Duration,
    /// Members of each district, in ascending unit index.
    pub districts: Vec<Vec<usize>>,
}

impl ProgressSnapshot {
    /// Number of units currently placed in some district.
    pub fn placed(&self) -> usize { self.districts.iter().map(Vec::len).sum() }

    /// One-line description with unit names, e.g.
    /// `attempts: 120  elapsed: 1.002s  [[Adams, Brown], [Clark]]`.
    pub fn describe(&self, graph: &Graph) -> String {
        let mut line = format!("attempts: {}  elapsed: {:.3}s  [", self.attempts, self.elapsed.as_secs_f64());
        for (i, members) in self.districts.iter().enumerate() {
            if i > 0 { line.push_str(", ") }
            line.push('[');
            for (j, &node) in members.iter().enumerate() {
                if j > 0 { line.push_str(", ") }
                let name = graph.units().get(node).map_or("?", |u| u.name());
                let _ = write!(line, "{name}");
            }
            line.push(']');
        }
        line.push(']');
        line
    }
}
