//! Destination-major Compressed Sparse Row (CSR) representation
//!
//! The sparse solver walks every node's *incoming* edges, so this CSR is the
//! transpose of the forward index: row `v` lists the sources that point at
//! `v`, each with its normalized transition probability.

use super::model::GraphModel;

/// Reverse index of a [`GraphModel`] in CSR form
#[derive(Debug, Clone, Default)]
pub struct InboundCsr {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node v's in-edges are at indices row_ptr[v]..row_ptr[v+1]
    pub row_ptr: Vec<usize>,
    /// Source node for each in-edge
    pub sources: Vec<u32>,
    /// P(source, v) for each in-edge
    pub probabilities: Vec<f64>,
    /// Nodes with no outgoing weight
    pub dangling: Vec<u32>,
}

impl InboundCsr {
    /// Build the reverse index from a graph model
    pub fn from_model<N>(graph: &GraphModel<N>) -> Self {
        let num_nodes = graph.node_count();

        // Bucket in-edges per destination. Sources are visited in ID order so
        // each row comes out sorted by source.
        let mut inbound: Vec<Vec<(u32, f64)>> = vec![Vec::new(); num_nodes];
        for (source, out) in graph.sources() {
            for (dest, p) in out.normalized() {
                inbound[dest as usize].push((source, p));
            }
        }

        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut sources = Vec::new();
        let mut probabilities = Vec::new();
        row_ptr.push(0);

        for row in inbound {
            for (source, p) in row {
                sources.push(source);
                probabilities.push(p);
            }
            row_ptr.push(sources.len());
        }

        Self {
            num_nodes,
            row_ptr,
            sources,
            probabilities,
            dangling: graph.dangling_nodes(),
        }
    }

    /// Iterate over `(source, probability)` for the in-edges of a node
    pub fn in_edges(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.sources[i], self.probabilities[i]))
    }

    /// Total number of stored edges
    pub fn num_edges(&self) -> usize {
        self.sources.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_rows() {
        let mut graph = GraphModel::new();
        graph.add("a", "b");
        graph.add("a", "c");
        graph.add("c", "b");

        let csr = InboundCsr::from_model(&graph);
        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.num_edges(), 3);

        let into_b: Vec<_> = csr.in_edges(1).collect();
        assert_eq!(into_b, vec![(0, 0.5), (2, 1.0)]);
        assert_eq!(csr.in_edges(0).count(), 0);
        assert_eq!(csr.dangling, vec![1]);
    }

    #[test]
    fn test_empty_model() {
        let graph: GraphModel<String> = GraphModel::new();
        let csr = InboundCsr::from_model(&graph);
        assert_eq!(csr.num_nodes, 0);
        assert_eq!(csr.row_ptr, vec![0]);
    }
}
