use serde::{Deserialize, Serialize};

/// A geographic unit (county): a node of the adjacency graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    name: String,
    count_a: u32,
    count_b: u32,
}

impl Unit {
    pub fn new(name: impl Into<String>, count_a: u32, count_b: u32) -> Self {
        Self { name: name.into(), count_a, count_b }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn count_a(&self) -> u32 { self.count_a }

    #[inline] pub fn count_b(&self) -> u32 { self.count_b }

    /// Total population, `count_a + count_b`.
    #[inline] pub fn population(&self) -> i64 { self.count_a as i64 + self.count_b as i64 }

    /// Signed margin, `count_b - count_a`.
    #[inline] pub fn margin(&self) -> i64 { self.count_b as i64 - self.count_a as i64 }
}

/// A unit as delivered by the input loader: counts plus 0-based adjacency indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub name: String,
    pub count_a: u32,
    pub count_b: u32,
    pub adjacent: Vec<usize>,
}
