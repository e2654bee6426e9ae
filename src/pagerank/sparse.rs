//! Sparse PageRank solver
//!
//! Stores only realized edges in a destination-major CSR. Each iteration
//! sums, for every node, the contributions along its actual in-edges, then
//! adds the dangling mass pooled once per iteration. O(E) per iteration.

use super::RankSolver;
use crate::graph::csr::InboundCsr;
use crate::graph::model::GraphModel;

/// Edge-list PageRank step
#[derive(Debug, Clone)]
pub struct SparseSolver {
    damping: f64,
    inbound: InboundCsr,
}

impl SparseSolver {
    /// Build the reverse index for a graph snapshot
    pub fn new<N>(graph: &GraphModel<N>, damping: f64) -> Self {
        Self {
            damping,
            inbound: InboundCsr::from_model(graph),
        }
    }

    /// The reverse index this solver iterates over
    pub fn inbound(&self) -> &InboundCsr {
        &self.inbound
    }
}

impl RankSolver for SparseSolver {
    fn node_count(&self) -> usize {
        self.inbound.num_nodes
    }

    fn step(&self, ranks: &[f64], next: &mut [f64]) {
        let n = self.inbound.num_nodes as f64;
        let teleport = (1.0 - self.damping) / n;

        // Dangling nodes spread their mass uniformly over every node.
        let dangling_share: f64 = self
            .inbound
            .dangling
            .iter()
            .map(|&u| ranks[u as usize])
            .sum::<f64>()
            / n;

        for (dest, slot) in next.iter_mut().enumerate() {
            let linked: f64 = self
                .inbound
                .in_edges(dest as u32)
                .map(|(source, p)| ranks[source as usize] * p)
                .sum();
            *slot = self.damping * (linked + dangling_share) + teleport;
        }
    }
}
