use std::fmt;

use serde::Serialize;

use crate::{config::Party, partition::PartitionState};

/// Totals and members of one district of an accepted plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistrictSummary {
    pub index: usize,
    /// Member unit indices in the order they were placed.
    pub members: Vec<usize>,
    /// Member unit names, parallel to `members`.
    pub names: Vec<String>,
    pub population: i64,
    pub margin: i64,
    pub count_a: i64,
    pub count_b: i64,
}

/// An accepted districting: every unit assigned to exactly one district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Plan {
    party: Party,
    districts: Vec<DistrictSummary>,
    assignments: Vec<u32>, // assignments[u] = district of unit u
}

impl Plan {
    /// Summarize a fully assigned partition state.
    pub(crate) fn from_state(state: &PartitionState, party: Party) -> Self {
        assert!(state.unassigned_count() == 0, "plan requires every unit to be assigned");
        let graph = state.graph();

        let districts = state.districts().iter().enumerate()
            .map(|(index, district)| {
                let units = district.members().iter().map(|&u| graph.unit(u));
                DistrictSummary {
                    index,
                    members: district.members().to_vec(),
                    names: units.clone().map(|u| u.name().to_string()).collect(),
                    population: district.population(),
                    margin: district.margin(),
                    count_a: units.clone().map(|u| u.count_a() as i64).sum(),
                    count_b: units.map(|u| u.count_b() as i64).sum(),
                }
            })
            .collect();

        let assignments = (0..graph.node_count())
            .map(|u| state.assignment(u).map_or(u32::MAX, |d| d as u32))
            .collect();

        Self { party, districts, assignments }
    }

    /// Get the party the plan was searched for.
    #[inline] pub fn party(&self) -> Party { self.party }

    /// Get the number of districts in this plan.
    #[inline] pub fn num_districts(&self) -> usize { self.districts.len() }

    #[inline] pub fn districts(&self) -> &[DistrictSummary] { &self.districts }

    #[inline] pub fn district(&self, district: usize) -> &DistrictSummary { &self.districts[district] }

    /// Get the district of a given unit.
    #[inline] pub fn assignment(&self, node: usize) -> usize { self.assignments[node] as usize }

    /// Get a complete vector of assignments for each unit.
    #[inline] pub fn assignments(&self) -> &[u32] { &self.assignments }

    /// Number of districts whose margin strictly favors `party`.
    pub fn wins(&self, party: Party) -> usize {
        self.districts.iter().filter(|d| party.agrees(d.margin)).count()
    }

    /// Number of districts whose margin does not favor the plan's party.
    pub fn disagreements(&self) -> usize {
        self.num_districts() - self.wins(self.party)
    }

    /// Sum of district populations.
    pub fn total_population(&self) -> i64 {
        self.districts.iter().map(|d| d.population).sum()
    }

    /// (unit index, unit name, district) for every unit, in unit order.
    pub(crate) fn rows(&self) -> Vec<(usize, &str, u32)> {
        let mut rows = self.districts.iter()
            .flat_map(|d| {
                d.members.iter().zip(&d.names).map(move |(&u, name)| (u, name.as_str(), d.index as u32))
            })
            .collect::<Vec<_>>();
        rows.sort_unstable_by_key(|&(u, _, _)| u);
        rows
    }
}

impl fmt::Display for Plan {
    /// Lists districts by member name, e.g. `[[Adams, Brown], [Clark]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, district) in self.districts.iter().enumerate() {
            if i > 0 { write!(f, ", ")? }
            write!(f, "[{}]", district.names.join(", "))?;
        }
        write!(f, "]")
    }
}
