mod common;

use districtor::{Graph, PartitionState, Party, SearchConfig, SearchEngine, SearchOutcome, Unit};
use proptest::prelude::*;

use common::assert_valid_plan;

/// Small graphs with arbitrary (possibly one-way) adjacency.
fn graphs() -> impl Strategy<Value = Graph> {
    (2usize..=7).prop_flat_map(|n| {
        let counts = prop::collection::vec((0u32..100, 0u32..100), n);
        let adjacency = prop::collection::vec(prop::collection::vec(any::<bool>(), n), n);
        (counts, adjacency).prop_map(|(counts, adjacency)| {
            let units = counts.iter().enumerate()
                .map(|(i, &(a, b))| Unit::new(format!("P{i}"), a, b))
                .collect();
            let edges = adjacency.iter().enumerate()
                .map(|(u, row)| (0..row.len()).filter(|&v| v != u && row[v]).collect())
                .collect::<Vec<Vec<usize>>>();
            Graph::new(units, &edges).unwrap()
        })
    })
}

fn configs() -> impl Strategy<Value = SearchConfig> {
    (1usize..=3).prop_flat_map(|districts| {
        (Just(districts), 0i64..200, 0i64..300, prop::option::of(0..=districts), any::<bool>())
    })
    .prop_map(|(districts, min, width, tolerance, favor_a)| SearchConfig {
        districts,
        min_population: min,
        max_population: min + width,
        party: if favor_a { Party::A } else { Party::B },
        max_disagreements: tolerance,
        ..Default::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unplace_restores_previous_state(
        graph in graphs(),
        choices in prop::collection::vec((any::<prop::sample::Index>(), 0usize..3), 1..8),
    ) {
        let mut state = PartitionState::new(graph, 3);
        let mut history = vec![];

        for (pick, district) in choices {
            if state.unassigned_count() == 0 { break }
            let free = state.unassigned().collect::<Vec<_>>();
            let node = *pick.get(&free);
            history.push((state.clone(), node, district));
            state.place(node, district);
        }

        while let Some((before, node, district)) = history.pop() {
            state.unplace(node, district);
            prop_assert_eq!(&state, &before);
        }
        prop_assert_eq!(state.unassigned_count(), state.graph().node_count());
    }

    #[test]
    fn accepted_plans_satisfy_every_constraint(graph in graphs(), config in configs()) {
        let report = SearchEngine::new(graph.clone(), config.clone()).unwrap().run();

        match &report.outcome {
            SearchOutcome::Solved(plan) => assert_valid_plan(&graph, &config, plan),
            SearchOutcome::Exhausted => {
                prop_assert_eq!(report.state.unassigned_count(), graph.node_count());
                prop_assert!(report.state.districts().iter().all(|d| d.is_empty()));
            }
            SearchOutcome::Cancelled => prop_assert!(false, "no stop flag was set"),
        }
    }

    #[test]
    fn search_is_deterministic(graph in graphs(), config in configs()) {
        let first = SearchEngine::new(graph.clone(), config.clone()).unwrap().run();
        let second = SearchEngine::new(graph, config).unwrap().run();

        prop_assert_eq!(first.outcome.plan(), second.outcome.plan());
        prop_assert_eq!(first.stats.placements, second.stats.placements);
    }
}
