use anyhow::{Result, ensure};

use crate::graph::{Unit, UnitRecord};

/// An immutable adjacency graph of units in compressed sparse row format.
///
/// Adjacency is directed as given: `edges(u)` lists exactly the neighbors the input
/// declared for `u`, in input order. No symmetrization is performed.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    units: Vec<Unit>,
    offsets: Vec<u32>,
    edges: Vec<u32>,
}

impl Graph {
    /// Construct a graph from units and their 0-based adjacency lists.
    pub fn new(units: Vec<Unit>, edges: &[Vec<usize>]) -> Result<Self> {
        ensure!(
            edges.len() == units.len(),
            "[Graph::new] edges.len() ({}) must equal number of units ({})", edges.len(), units.len()
        );
        for (i, list) in edges.iter().enumerate() {
            if let Some(&bad) = list.iter().find(|&&v| v >= units.len()) {
                anyhow::bail!(
                    "[Graph::new] unit {} ('{}') references neighbor {bad}, but only {} units exist",
                    i, units[i].name(), units.len()
                );
            }
        }

        Ok(Self {
            offsets: std::iter::once(0u32).chain(
                edges.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            edges: edges.iter().flatten().map(|&v| v as u32).collect(),
            units,
        })
    }

    /// Construct a graph from loader records.
    pub fn from_records(records: Vec<UnitRecord>) -> Result<Self> {
        let (units, edges): (Vec<_>, Vec<_>) = records.into_iter()
            .map(|r| (Unit::new(r.name, r.count_a, r.count_b), r.adjacent))
            .unzip();
        Self::new(units, &edges)
    }

    /// Get the number of units in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.units.len() }

    /// Get the number of directed adjacency entries.
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Get a unit by index.
    #[inline] pub fn unit(&self, node: usize) -> &Unit { &self.units[node] }

    /// Get all units in input order.
    #[inline] pub fn units(&self) -> &[Unit] { &self.units }

    /// Sum of all unit populations.
    pub fn total_population(&self) -> i64 { self.units.iter().map(Unit::population).sum() }

    /// Get the range of edges for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node, in input order.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Returns true if `v` appears in the adjacency list of `u`.
    #[inline]
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.edges(u).any(|w| w == v)
    }
}
