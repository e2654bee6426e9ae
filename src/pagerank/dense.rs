//! Dense PageRank solver
//!
//! Materializes the full column-stochastic transition matrix once, with the
//! damping, teleport and dangling terms folded in, so each iteration is a
//! single matrix–vector product. O(N²) time and space: meant for small or
//! densely connected graphs, and as a reference for the sparse solver.

use super::RankSolver;
use crate::graph::model::GraphModel;

/// Matrix-based PageRank step
#[derive(Debug, Clone)]
pub struct DenseSolver {
    num_nodes: usize,
    /// Row-major `num_nodes × num_nodes`; entry `[dest * n + source]`
    matrix: Vec<f64>,
}

impl DenseSolver {
    /// Build the transition matrix for a graph snapshot.
    ///
    /// Column `source` holds `d·P(source, dest) + (1 − d)/N` for a source with
    /// outgoing weight, and `1/N` everywhere for a dangling source.
    pub fn new<N>(graph: &GraphModel<N>, damping: f64) -> Self {
        let n = graph.node_count();
        let uniform = if n > 0 { 1.0 / n as f64 } else { 0.0 };
        let teleport = (1.0 - damping) * uniform;

        let mut matrix = vec![0.0; n * n];
        for (source, out) in graph.sources() {
            let col = source as usize;
            if out.is_dangling() {
                for dest in 0..n {
                    matrix[dest * n + col] = uniform;
                }
                continue;
            }
            for dest in 0..n {
                let p = out.weight(dest as u32) / out.total_weight;
                matrix[dest * n + col] = damping * p + teleport;
            }
        }

        Self {
            num_nodes: n,
            matrix,
        }
    }

    /// Transition probability from `source` to `dest` (damping included)
    pub fn entry(&self, dest: usize, source: usize) -> f64 {
        self.matrix[dest * self.num_nodes + source]
    }
}

impl RankSolver for DenseSolver {
    fn node_count(&self) -> usize {
        self.num_nodes
    }

    fn step(&self, ranks: &[f64], next: &mut [f64]) {
        let n = self.num_nodes;
        for (dest, slot) in next.iter_mut().enumerate() {
            let row = &self.matrix[dest * n..(dest + 1) * n];
            *slot = row.iter().zip(ranks).map(|(m, r)| m * r).sum();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_stochastic() {
        let mut graph = GraphModel::new();
        graph.add("a", "b");
        graph.add_weighted("a", "c", 3.0).unwrap();
        graph.add("b", "c");

        let solver = DenseSolver::new(&graph, 0.85);
        for source in 0..3 {
            let col_sum: f64 = (0..3).map(|dest| solver.entry(dest, source)).sum();
            assert!((col_sum - 1.0).abs() < 1e-12, "column {} sums to {}", source, col_sum);
        }

        // c is dangling
        assert!((solver.entry(0, 2) - 1.0 / 3.0).abs() < 1e-12);
        // a -> c carries 3/4 of a's mass
        let expected = 0.85 * 0.75 + 0.15 / 3.0;
        assert!((solver.entry(2, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_step_preserves_mass() {
        let mut graph = GraphModel::new();
        graph.add("a", "b");
        graph.add("b", "c");
        graph.add("c", "a");
        graph.add("c", "b");

        let solver = DenseSolver::new(&graph, 0.85);
        let ranks = vec![0.5, 0.3, 0.2];
        let mut next = vec![0.0; 3];
        solver.step(&ranks, &mut next);

        let sum: f64 = next.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
