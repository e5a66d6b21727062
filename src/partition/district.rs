use crate::graph::Unit;

/// A district under construction: members in insertion order plus running totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct District {
    members: Vec<usize>,
    population: i64,
    margin: i64,
}

impl District {
    /// Create an empty district with room for `capacity` members.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { members: Vec::with_capacity(capacity), population: 0, margin: 0 }
    }

    /// Members in the order they were placed.
    #[inline] pub fn members(&self) -> &[usize] { &self.members }

    /// Sum of member populations.
    #[inline] pub fn population(&self) -> i64 { self.population }

    /// Sum of member margins.
    #[inline] pub fn margin(&self) -> i64 { self.margin }

    #[inline] pub fn len(&self) -> usize { self.members.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.members.is_empty() }

    pub(super) fn push(&mut self, node: usize, unit: &Unit) {
        self.members.push(node);
        self.population += unit.population();
        self.margin += unit.margin();
    }

    /// Remove the most recently placed member, which must be `node`.
    pub(super) fn pop(&mut self, node: usize, unit: &Unit) {
        let last = self.members.pop();
        assert_eq!(last, Some(node), "unplace must remove the most recently placed member");
        self.population -= unit.population();
        self.margin -= unit.margin();
    }
}
