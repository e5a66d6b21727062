use std::{collections::BTreeSet, sync::Arc};

use crate::{
    graph::Graph,
    partition::{AttemptMemo, District},
};

/// Mutable search state: which units are placed in which district.
///
/// Every unit is either unassigned or a member of exactly one district. Mutation is
/// restricted to single-unit `place`/`unplace` deltas, undone in LIFO order.
#[derive(Clone, Debug)]
pub struct PartitionState {
    graph: Arc<Graph>,
    districts: Vec<District>,
    assignment: Vec<Option<u32>>,   // assignment[u] = Some(d) when u is in districts[d]
    unassigned: BTreeSet<usize>,    // iterated in ascending unit index
    attempted: Vec<AttemptMemo>,    // attempted[d] = failed member sets of district d
}

impl PartitionState {
    /// Create a state with every unit unassigned and `num_districts` empty districts.
    pub fn new(graph: impl Into<Arc<Graph>>, num_districts: usize) -> Self {
        assert!(num_districts > 0, "num_districts must be at least 1");
        let graph: Arc<Graph> = graph.into();
        let capacity = graph.node_count() / num_districts + 1;

        Self {
            districts: (0..num_districts).map(|_| District::with_capacity(capacity)).collect(),
            assignment: vec![None; graph.node_count()],
            unassigned: (0..graph.node_count()).collect(),
            attempted: vec![AttemptMemo::default(); num_districts],
            graph,
        }
    }

    /// Get a reference to the underlying graph.
    #[inline] pub fn graph(&self) -> &Graph { &self.graph }

    /// Get a shared handle to the underlying graph.
    #[inline] pub fn graph_handle(&self) -> Arc<Graph> { self.graph.clone() }

    /// Get the number of districts.
    #[inline] pub fn num_districts(&self) -> usize { self.districts.len() }

    /// Get a district by index.
    #[inline] pub fn district(&self, district: usize) -> &District { &self.districts[district] }

    /// Get all districts.
    #[inline] pub fn districts(&self) -> &[District] { &self.districts }

    /// Get the district a unit is placed in, if any.
    #[inline] pub fn assignment(&self, node: usize) -> Option<usize> { self.assignment[node].map(|d| d as usize) }

    #[inline] pub fn is_unassigned(&self, node: usize) -> bool { self.assignment[node].is_none() }

    /// Number of units not yet placed.
    #[inline] pub fn unassigned_count(&self) -> usize { self.unassigned.len() }

    /// Iterator over unplaced units in ascending index order.
    #[inline]
    pub fn unassigned(&self) -> impl Iterator<Item = usize> + '_ { self.unassigned.iter().copied() }

    /// First unplaced unit in iteration order.
    #[inline] pub fn first_unassigned(&self) -> Option<usize> { self.unassigned.first().copied() }

    /// Total population of unplaced units.
    pub fn unassigned_population(&self) -> i64 {
        self.unassigned().map(|u| self.graph.unit(u).population()).sum()
    }

    /// Move `node` from the unassigned pool into `district`.
    pub fn place(&mut self, node: usize, district: usize) {
        assert!(self.unassigned.remove(&node), "unit {node} is already placed");
        debug_assert!(district < self.districts.len(), "district out of range");

        self.assignment[node] = Some(district as u32);
        self.districts[district].push(node, self.graph.unit(node));
    }

    /// Exact inverse of `place`; `node` must be the last unit placed in `district`.
    pub fn unplace(&mut self, node: usize, district: usize) {
        debug_assert_eq!(self.assignment(node), Some(district), "unit is not in this district");

        self.districts[district].pop(node, self.graph.unit(node));
        self.assignment[node] = None;
        self.unassigned.insert(node);
    }

    /// Record the current member set of `district` as attempted.
    pub fn remember(&mut self, district: usize) {
        self.attempted[district].insert(self.districts[district].members());
    }

    /// Returns true if the current member set of `district` was already attempted.
    pub fn was_attempted(&self, district: usize) -> bool {
        self.attempted[district].contains(self.districts[district].members())
    }

    /// Clear the attempted member sets of `district`.
    pub fn forget_attempts(&mut self, district: usize) {
        self.attempted[district].clear();
    }

    /// Number of attempted member sets recorded for `district`.
    #[inline] pub fn attempt_count(&self, district: usize) -> usize { self.attempted[district].len() }

    /// Get a complete vector of assignments for each unit.
    pub fn assignments(&self) -> Vec<Option<usize>> {
        (0..self.assignment.len()).map(|u| self.assignment(u)).collect()
    }
}

impl PartialEq for PartitionState {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph)
            && self.districts == other.districts
            && self.assignment == other.assignment
            && self.unassigned == other.unassigned
            && self.attempted == other.attempted
    }
}

impl Eq for PartitionState {}
