#![allow(dead_code)]

use districtor::{Graph, Plan, SearchConfig, Unit};

/// Graph of `counts` joined in a path 0 - 1 - ... - n-1, adjacency listed both ways.
pub fn path_graph(counts: &[(u32, u32)]) -> Graph {
    let units = counts.iter().enumerate()
        .map(|(i, &(a, b))| Unit::new(format!("U{i}"), a, b))
        .collect();
    let edges = (0..counts.len())
        .map(|i| (i.saturating_sub(1)..=(i + 1).min(counts.len() - 1)).filter(|&j| j != i).collect())
        .collect::<Vec<Vec<usize>>>();
    Graph::new(units, &edges).unwrap()
}

/// `rows x cols` grid of identical units with 4-neighbor adjacency.
pub fn grid_graph(rows: usize, cols: usize, count_a: u32, count_b: u32) -> Graph {
    let index = |r: usize, c: usize| r * cols + c;
    let units = (0..rows * cols).map(|i| Unit::new(format!("G{i}"), count_a, count_b)).collect();
    let edges = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| {
            let mut adj = vec![];
            if r > 0 { adj.push(index(r - 1, c)) }
            if c > 0 { adj.push(index(r, c - 1)) }
            if c + 1 < cols { adj.push(index(r, c + 1)) }
            if r + 1 < rows { adj.push(index(r + 1, c)) }
            adj
        })
        .collect::<Vec<_>>();
    Graph::new(units, &edges).unwrap()
}

/// Check every property an accepted plan must have.
pub fn assert_valid_plan(graph: &Graph, config: &SearchConfig, plan: &Plan) {
    assert_eq!(plan.num_districts(), config.districts);

    // Every unit in exactly one district.
    let mut seen = vec![0usize; graph.node_count()];
    for district in plan.districts() {
        for &u in &district.members { seen[u] += 1 }
    }
    assert!(seen.iter().all(|&count| count == 1), "unit placement counts {seen:?}");
    for (u, &d) in plan.assignments().iter().enumerate() {
        assert!(plan.district(d as usize).members.contains(&u));
    }
    assert_eq!(plan.total_population(), graph.total_population());

    for district in plan.districts() {
        // Each member after the seed was reached from an earlier member.
        for (i, &member) in district.members.iter().enumerate().skip(1) {
            assert!(
                district.members[..i].iter().any(|&p| graph.is_adjacent(p, member)),
                "district {} member {member} is not adjacent to an earlier member", district.index
            );
        }

        let population = district.members.iter().map(|&u| graph.unit(u).population()).sum::<i64>();
        let margin = district.members.iter().map(|&u| graph.unit(u).margin()).sum::<i64>();
        assert_eq!(district.population, population);
        assert_eq!(district.margin, margin);
        assert!(!district.members.is_empty());
        assert!(
            (config.min_population..=config.max_population).contains(&district.population),
            "district {} population {} outside bounds", district.index, district.population
        );
    }

    assert!(plan.disagreements() <= config.tolerance());
}
