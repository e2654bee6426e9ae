//! Property-based tests using proptest

use proptest::prelude::*;
use textrank_core::*;

/// Random weighted edge lists over up to `max_nodes` nodes
fn edges(max_nodes: u32) -> impl Strategy<Value = Vec<(u32, u32, f64)>> {
    prop::collection::vec((0..max_nodes, 0..max_nodes, 0.1f64..10.0), 0..60)
}

fn solve(edges: &[(u32, u32, f64)], config: PageRankConfig) -> PageRankResult<u32> {
    let mut pr = PageRank::new(config).unwrap();
    for &(s, d, w) in edges {
        pr.add_weighted(s, d, w).unwrap();
    }
    pr.calculate_detailed(None)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn test_pagerank_scores_sum_to_one(
        edges in edges(15),
        damping in 0.05f64..0.95,
        tolerance in 1e-8f64..1e-3,
    ) {
        let config = PageRankConfig::default()
            .with_damping(damping)
            .with_tolerance(tolerance);
        let result = solve(&edges, config);

        if !result.ranks.is_empty() {
            let sum = result.ranks.total();
            prop_assert!((sum - 1.0).abs() < 1e-9, "Scores sum to {} instead of 1", sum);
        }
        prop_assert!(result.ranks.values().all(|v| v >= 0.0));
    }

    #[test]
    fn test_dense_and_sparse_agree(edges in edges(12), damping in 0.1f64..0.95) {
        let config = PageRankConfig::default()
            .with_damping(damping)
            .with_tolerance(1e-10);
        let dense = solve(&edges, config.with_strategy(SolverStrategy::Dense));
        let sparse = solve(&edges, config.with_strategy(SolverStrategy::Sparse));

        prop_assert_eq!(dense.ranks.len(), sparse.ranks.len());
        for (node, score) in dense.ranks.iter() {
            let other = sparse.ranks.get(node).unwrap_or(f64::NAN);
            prop_assert!((score - other).abs() < 1e-7, "node {}: {} vs {}", node, score, other);
        }
    }

    #[test]
    fn test_sorting_result_is_noop(edges in edges(15)) {
        let result = solve(&edges, PageRankConfig::default());
        prop_assert!(result.ranks.is_sorted_descending());

        let mut resorted = result.ranks.clone();
        resorted.sort_descending();
        prop_assert_eq!(resorted, result.ranks);
    }

    #[test]
    fn test_budget_is_respected(edges in edges(10), budget in 0usize..5) {
        let config = PageRankConfig::default().with_tolerance(0.0);
        let mut pr = PageRank::new(config).unwrap();
        for &(s, d, w) in &edges {
            pr.add_weighted(s, d, w).unwrap();
        }
        let result = pr.calculate_detailed(Some(budget));
        if !result.ranks.is_empty() {
            prop_assert!(result.iterations <= budget);
        }
    }

    #[test]
    fn test_fingerprint_reflexive(values in prop::collection::vec("[a-z]{1,6}", 0..12)) {
        let fp = Fingerprint::new(values);
        prop_assert_eq!(fp.similarity(&fp.clone()).unwrap(), 1.0);
    }

    #[test]
    fn test_fingerprint_symmetric_and_bounded(
        pairs in prop::collection::vec((0u8..20, 0u8..20), 1..15)
    ) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        let ab = similarity(a.as_slice(), b.as_slice()).unwrap();
        let ba = similarity(b.as_slice(), a.as_slice()).unwrap();

        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_collapsed_keys_are_runs_of_input_keys(
        words in prop::collection::vec("[a-c]{1,2}", 1..30)
    ) {
        let text = words.join(" ");
        let mut seen = Vec::new();
        for w in &words {
            if !seen.contains(w) {
                seen.push(w.clone());
            }
        }
        let ranks: RankMap<String> = seen
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), 1.0 / (i + 1) as f64))
            .collect();

        let filter = CollapseAdjacent::new(CollapseConfig::default()).unwrap();
        let out = filter.collapse(ranks.clone(), &text).unwrap();

        prop_assert!(out.is_sorted_descending());
        // every key is an input key or a space-joined run of input keys
        for key in out.keys() {
            prop_assert!(key.split(' ').all(|t| ranks.contains_key(&t.to_string())));
        }
    }
}
