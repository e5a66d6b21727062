use std::{
    sync::{Arc, atomic::{AtomicBool, Ordering}},
    time::{Duration, Instant},
};

use anyhow::Result;

use crate::{
    config::SearchConfig,
    graph::Graph,
    partition::PartitionState,
    plan::Plan,
    progress::ProgressProbe,
    search::{SearchOutcome, SearchReport, SearchStats, heuristic},
};

/// Number of placements between clock reads when a time limit is set.
const CLOCK_CHECK_MASK: u64 = 4095;

/// Result of one placement decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    /// Every unit is placed and the partition was accepted. Nothing is undone.
    Solved,
    /// This subtree holds no acceptable partition. The placement was undone.
    Failed,
    /// The run was stopped. Nothing is undone.
    Cancelled,
}

/// Recursive backtracking search for a districting of a `Graph`.
///
/// Each call places one unit, tries to close the current district and seed the next
/// one, then tries each unassigned neighbor in heuristic order, and undoes its own
/// placement if nothing below it succeeds.
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    state: PartitionState,
    disagreements: usize,
    stats: SearchStats,
    probe: Option<Arc<ProgressProbe>>,
    stop: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
    time_limit: Option<Duration>,
}

impl SearchEngine {
    /// Create an engine over `graph`, checking `config` against it.
    pub fn new(graph: impl Into<Arc<Graph>>, config: SearchConfig) -> Result<Self> {
        let graph: Arc<Graph> = graph.into();
        config.validate(&graph)?;

        Ok(Self {
            state: PartitionState::new(graph, config.districts),
            config,
            disagreements: 0,
            stats: SearchStats::default(),
            probe: None,
            stop: None,
            deadline: None,
            time_limit: None,
        })
    }

    /// Publish placements to `probe` for a progress reporter.
    pub fn with_probe(mut self, probe: Arc<ProgressProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Stop the search when `flag` becomes true.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Stop the search once `limit` has elapsed since `run` was called.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline] pub fn config(&self) -> &SearchConfig { &self.config }

    #[inline] pub fn state(&self) -> &PartitionState { &self.state }

    /// Run the search from the configured seed unit to a terminal state.
    pub fn run(mut self) -> SearchReport {
        let start = Instant::now();
        self.deadline = self.time_limit.map(|limit| start + limit);

        let step = self.extend(self.config.seed_unit, 0);
        self.stats.elapsed = start.elapsed();

        let outcome = match step {
            Step::Solved => SearchOutcome::Solved(Plan::from_state(&self.state, self.config.party)),
            Step::Failed => SearchOutcome::Exhausted,
            Step::Cancelled => SearchOutcome::Cancelled,
        };

        SearchReport { outcome, stats: self.stats, state: self.state }
    }

    /// Returns true if the margin of `district` does not favor the target party.
    #[inline]
    fn disagrees(&self, district: usize) -> bool {
        !self.config.party.agrees(self.state.district(district).margin())
    }

    fn cancelled(&self) -> bool {
        if self.stop.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return true;
        }
        match self.deadline {
            Some(deadline) if self.stats.placements & CLOCK_CHECK_MASK == 0 => Instant::now() >= deadline,
            _ => false,
        }
    }

    fn place(&mut self, node: usize, district: usize) {
        self.state.place(node, district);
        self.stats.placements += 1;
        let depth = (self.state.graph().node_count() - self.state.unassigned_count()) as u64;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if let Some(probe) = &self.probe {
            probe.record_attempt();
            probe.record_place(node, district);
        }
    }

    fn unplace(&mut self, node: usize, district: usize) {
        self.state.unplace(node, district);
        self.stats.backtracks += 1;

        if let Some(probe) = &self.probe { probe.record_unplace(node) }
    }

    /// Final check once every unit is placed in `district`'s subtree.
    ///
    /// Every district must be non-empty and within the population bounds, and the
    /// closing district may only disagree with the target party if the tolerance
    /// is not yet used up.
    fn accepts(&self, district: usize) -> bool {
        let (min, max) = (self.config.min_population, self.config.max_population);
        let last = self.state.district(self.state.num_districts() - 1);
        if last.population() < min { return false }

        if self.disagrees(district) && self.disagreements >= self.config.tolerance() {
            return false;
        }

        self.state.districts().iter()
            .all(|d| !d.is_empty() && (min..=max).contains(&d.population()))
    }

    /// Place `node` in `district` and search everything below that decision.
    fn extend(&mut self, node: usize, district: usize) -> Step {
        if self.cancelled() { return Step::Cancelled }

        self.place(node, district);

        if self.state.unassigned_count() == 0 {
            if self.accepts(district) { return Step::Solved }
            self.stats.rejected_leaves += 1;
            self.unplace(node, district);
            return Step::Failed;
        }

        // Close this district and seed the next one.
        let current = self.state.district(district);
        let can_disagree = self.disagreements < self.config.tolerance();
        if current.population() > self.config.min_population
            && district + 1 < self.state.num_districts()
            && (!self.disagrees(district) || can_disagree)
        {
            if self.state.was_attempted(district) {
                self.stats.memo_hits += 1;
            } else if let Some(seed) = self.state.first_unassigned() {
                self.state.remember(district);
                let disagreed = self.disagrees(district);
                if disagreed { self.disagreements += 1 }
                self.stats.district_advances += 1;

                match self.extend(seed, district + 1) {
                    Step::Failed => {
                        self.state.forget_attempts(district + 1);
                        if disagreed { self.disagreements -= 1 }
                    }
                    step => return step,
                }
            }
        }

        // Grow this district through unassigned neighbors.
        let current = self.state.district(district);
        let population = current.population();
        let target = heuristic::target_margin(current.margin(), self.config.party);
        let order = heuristic::expansion_order(self.state.graph(), node, target);

        for neighbor in order {
            if !self.state.is_unassigned(neighbor) { continue }
            if population + self.state.graph().unit(neighbor).population() > self.config.max_population {
                self.stats.bound_prunes += 1;
                continue;
            }

            match self.extend(neighbor, district) {
                Step::Failed => continue,
                step => return step,
            }
        }

        self.unplace(node, district);
        Step::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Party, graph::Unit};

    /// Units of the given (count_a, count_b) in a path 0 - 1 - ... - n-1, both directions.
    fn path(counts: &[(u32, u32)]) -> Graph {
        let n = counts.len();
        let units = counts.iter().enumerate()
            .map(|(i, &(a, b))| Unit::new(format!("U{i}"), a, b))
            .collect();
        let edges = (0..n)
            .map(|i| {
                let mut adj = vec![];
                if i > 0 { adj.push(i - 1) }
                if i + 1 < n { adj.push(i + 1) }
                adj
            })
            .collect::<Vec<_>>();
        Graph::new(units, &edges).unwrap()
    }

    fn config(districts: usize, min: i64, max: i64) -> SearchConfig {
        SearchConfig { districts, min_population: min, max_population: max, ..Default::default() }
    }

    #[test]
    fn single_district_line_is_solved() {
        let graph = path(&[(300_000, 300_000), (300_000, 300_000), (300_000, 300_000)]);
        let report = SearchEngine::new(graph, config(1, 500_000, 2_000_000)).unwrap().run();

        let plan = report.outcome.plan().expect("line should be solvable");
        assert_eq!(plan.district(0).members, vec![0, 1, 2]);
        assert_eq!(plan.district(0).population, 1_800_000);
        assert_eq!(report.state.unassigned_count(), 0);
    }

    #[test]
    fn disconnected_units_exhaust() {
        let graph = Graph::new(
            vec![Unit::new("A", 100, 100), Unit::new("B", 100, 100)],
            &[vec![], vec![]],
        ).unwrap();
        let report = SearchEngine::new(graph, config(1, 100, 1_000)).unwrap().run();

        assert!(matches!(report.outcome, SearchOutcome::Exhausted));
        assert_eq!(report.state.unassigned_count(), 2);
        assert!(report.state.district(0).is_empty());
        assert_eq!(report.stats.placements, 1);
        assert_eq!(report.stats.backtracks, 1);
    }

    #[test]
    fn advances_to_next_district_once_minimum_is_passed() {
        let graph = path(&[(0, 60), (0, 60), (0, 60), (0, 60)]);
        let report = SearchEngine::new(graph, config(2, 100, 130)).unwrap().run();

        let plan = report.outcome.plan().expect("two districts of two units each");
        assert_eq!(plan.district(0).members, vec![0, 1]);
        assert_eq!(plan.district(1).members, vec![2, 3]);
        assert_eq!(report.stats.district_advances, 1);
    }

    #[test]
    fn max_population_prunes_neighbors() {
        let graph = path(&[(0, 60), (0, 60), (0, 60)]);
        let report = SearchEngine::new(graph, config(1, 100, 150)).unwrap().run();

        assert!(matches!(report.outcome, SearchOutcome::Exhausted));
        assert!(report.stats.bound_prunes > 0);
    }

    #[test]
    fn seed_unit_above_maximum_is_rejected() {
        let graph = path(&[(0, 500), (0, 10)]);
        let report = SearchEngine::new(graph, config(1, 0, 100)).unwrap().run();
        assert!(matches!(report.outcome, SearchOutcome::Exhausted));
    }

    #[test]
    fn disagreement_tolerance_is_enforced() {
        // Every unit favors party A; party B with zero tolerance can never be satisfied.
        let graph = path(&[(60, 0), (60, 0), (60, 0), (60, 0)]);
        let strict = SearchConfig { party: Party::B, max_disagreements: Some(0), ..config(2, 100, 130) };
        let report = SearchEngine::new(graph.clone(), strict).unwrap().run();
        assert!(matches!(report.outcome, SearchOutcome::Exhausted));

        let lenient = SearchConfig { party: Party::B, max_disagreements: Some(2), ..config(2, 100, 130) };
        let report = SearchEngine::new(graph, lenient).unwrap().run();
        assert_eq!(report.outcome.plan().unwrap().disagreements(), 2);
    }

    #[test]
    fn tolerance_of_one_allows_exactly_one_disagreeing_district() {
        // Units 0, 1 favor B; units 2, 3 favor A.
        let graph = path(&[(0, 60), (0, 60), (60, 0), (60, 0)]);
        let cfg = SearchConfig { party: Party::B, max_disagreements: Some(1), ..config(2, 100, 130) };
        let report = SearchEngine::new(graph, cfg).unwrap().run();

        let plan = report.outcome.plan().expect("one disagreeing district is tolerated");
        assert_eq!(plan.disagreements(), 1);
        assert_eq!(plan.wins(Party::B), 1);
    }

    #[test]
    fn memo_prunes_repeated_member_sets() {
        // A triangle reaches {0, 1, 2} through several orders; a failing second district
        // makes the search revisit the closed first district.
        let graph = Graph::new(
            vec![
                Unit::new("A", 0, 40),
                Unit::new("B", 0, 40),
                Unit::new("C", 0, 40),
                Unit::new("D", 0, 10),
            ],
            &[vec![1, 2], vec![0, 2], vec![0, 1], vec![]],
        ).unwrap();
        let report = SearchEngine::new(graph, config(2, 100, 200)).unwrap().run();

        assert!(matches!(report.outcome, SearchOutcome::Exhausted));
        assert!(report.stats.memo_hits > 0);
    }

    #[test]
    fn failed_advance_clears_memo_of_next_district() {
        // {1, 4} fails as district 1 behind {0, 2} (unit 3 is stranded) but
        // succeeds behind {0, 3}, so its memo entry must not survive the retry.
        let units = (0..6).map(|i| Unit::new(format!("U{i}"), 40, 60)).collect();
        let edges = [vec![2, 3], vec![4], vec![0, 5], vec![0], vec![1], vec![2]];
        let graph = Graph::new(units, &edges).unwrap();
        let report = SearchEngine::new(graph, config(3, 150, 200)).unwrap().run();

        let plan = report.outcome.plan().expect("retry from {0, 3} should succeed");
        assert_eq!(plan.district(0).members, vec![0, 3]);
        assert_eq!(plan.district(1).members, vec![1, 4]);
        assert_eq!(plan.district(2).members, vec![2, 5]);
        assert_eq!(report.stats.memo_hits, 0);
        assert_eq!(report.stats.district_advances, 4);
        assert_eq!(report.state.attempt_count(1), 1);
    }

    #[test]
    fn exhaustion_unwinds_state_completely() {
        let graph = path(&[(0, 60), (0, 60), (0, 60), (0, 5)]);
        let engine = SearchEngine::new(graph.clone(), config(2, 100, 130)).unwrap();
        let fresh = PartitionState::new(engine.state().graph_handle(), 2);
        let report = engine.run();

        assert!(matches!(report.outcome, SearchOutcome::Exhausted));
        assert_eq!(report.state.districts(), fresh.districts());
        assert_eq!(report.state.unassigned_count(), graph.node_count());
        assert_eq!(report.stats.placements, report.stats.backtracks);
    }

    #[test]
    fn stop_flag_cancels_before_first_placement() {
        let graph = path(&[(0, 60), (0, 60)]);
        let flag = Arc::new(AtomicBool::new(true));
        let report = SearchEngine::new(graph, config(1, 0, 1_000)).unwrap()
            .with_stop_flag(flag)
            .run();

        assert!(matches!(report.outcome, SearchOutcome::Cancelled));
        assert_eq!(report.stats.placements, 0);
    }

    #[test]
    fn probe_sees_every_placement() {
        let graph = path(&[(0, 60), (0, 60), (0, 60)]);
        let probe = Arc::new(ProgressProbe::new(3, 1));
        let report = SearchEngine::new(graph, config(1, 0, 1_000)).unwrap()
            .with_probe(probe.clone())
            .run();

        assert!(report.outcome.is_solved());
        assert_eq!(probe.attempts(), report.stats.placements);
        assert_eq!(probe.snapshot(Duration::ZERO).districts, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn invalid_config_is_rejected_before_search() {
        let graph = path(&[(0, 60)]);
        assert!(SearchEngine::new(graph, SearchConfig { seed_unit: 5, ..config(1, 0, 100) }).is_err());
    }
}
