mod graph;
mod unit;

pub use graph::Graph;
pub use unit::{Unit, UnitRecord};
