use smallvec::SmallVec;

use crate::{config::Party, graph::Graph};

/// Margin a neighbor should ideally have to pull a district toward `party`:
/// the district's own margin, negated and signed by the party.
#[inline]
pub(crate) fn target_margin(district_margin: i64, party: Party) -> i64 {
    -district_margin * party.sign()
}

/// Neighbors of `node` ordered by ascending distance of their margin from `target`.
///
/// The sort is stable, so ties keep adjacency order and the result depends only on
/// the graph and `target`.
pub(crate) fn expansion_order(graph: &Graph, node: usize, target: i64) -> SmallVec<[usize; 8]> {
    let mut order = graph.edges(node).collect::<SmallVec<[usize; 8]>>();
    order.sort_by_key(|&v| graph.unit(v).margin().abs_diff(target));
    order
}
