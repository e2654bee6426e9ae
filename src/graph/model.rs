//! Weighted directed graph accumulator
//!
//! Nodes are interned to dense `u32` indices in first-registration order, and
//! outgoing edges live in an FxHashMap per source for O(1) accumulation.
//! Both solvers read the same model, so they also share its node ordering.

use crate::errors::{Result, TextRankError};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Outgoing edges of one source node
#[derive(Debug, Clone, Default)]
pub struct OutEdges {
    /// Target node ID -> accumulated edge weight
    pub edges: FxHashMap<u32, f64>,
    /// Sum of all outgoing weights
    pub total_weight: f64,
}

impl OutEdges {
    /// Edge weight toward `dest`, zero when there is no such edge
    pub fn weight(&self, dest: u32) -> f64 {
        self.edges.get(&dest).copied().unwrap_or(0.0)
    }

    /// A source is dangling when it has no outgoing weight to hand out
    pub fn is_dangling(&self) -> bool {
        self.total_weight <= 0.0
    }

    /// Outgoing edges as a probability distribution, sorted by target ID.
    ///
    /// Empty for a dangling source.
    pub fn normalized(&self) -> Vec<(u32, f64)> {
        if self.is_dangling() {
            return Vec::new();
        }
        let mut edges: Vec<_> = self
            .edges
            .iter()
            .map(|(&dest, &w)| (dest, w / self.total_weight))
            .collect();
        edges.sort_by_key(|(dest, _)| *dest);
        edges
    }
}

/// Add-only accumulator of weighted directed edges over opaque node keys.
///
/// Self-loops are dropped before either endpoint is registered, and repeated
/// edges sum their weights.
#[derive(Debug, Clone)]
pub struct GraphModel<N> {
    /// Maps node key -> node ID
    node_to_id: FxHashMap<N, u32>,
    /// Node keys in registration order
    nodes: Vec<N>,
    /// Outgoing edges, indexed by source node ID
    out_edges: Vec<OutEdges>,
}

impl<N> Default for GraphModel<N> {
    fn default() -> Self {
        Self {
            node_to_id: FxHashMap::default(),
            nodes: Vec::new(),
            out_edges: Vec::new(),
        }
    }
}

impl<N: Eq + Hash + Clone> GraphModel<N> {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with pre-allocated node capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            node_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
            out_edges: Vec::with_capacity(node_capacity),
        }
    }

    /// Add an edge of weight 1.0
    pub fn add(&mut self, source: N, dest: N) {
        self.accumulate(source, dest, 1.0);
    }

    /// Add an edge with an explicit weight.
    ///
    /// Negative or non-finite weights are rejected. Zero registers both
    /// endpoints but stores no edge.
    pub fn add_weighted(&mut self, source: N, dest: N, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(TextRankError::invalid_weight(weight));
        }
        self.accumulate(source, dest, weight);
        Ok(())
    }

    fn accumulate(&mut self, source: N, dest: N, weight: f64) {
        if source == dest {
            return;
        }
        let from = self.get_or_create_node(source);
        let to = self.get_or_create_node(dest);
        if weight == 0.0 {
            return;
        }

        let out = &mut self.out_edges[from as usize];
        *out.edges.entry(to).or_insert(0.0) += weight;
        out.total_weight += weight;
    }

    fn get_or_create_node(&mut self, key: N) -> u32 {
        if let Some(&id) = self.node_to_id.get(&key) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.node_to_id.insert(key.clone(), id);
        self.nodes.push(key);
        self.out_edges.push(OutEdges::default());
        id
    }

    /// Get a node ID by key
    pub fn node_id(&self, key: &N) -> Option<u32> {
        self.node_to_id.get(key).copied()
    }

    /// Check whether a key has been registered
    pub fn contains_node(&self, key: &N) -> bool {
        self.node_to_id.contains_key(key)
    }

    /// Accumulated weight of `source -> dest`, zero if either is unknown
    pub fn weight(&self, source: &N, dest: &N) -> f64 {
        match (self.node_id(source), self.node_id(dest)) {
            (Some(from), Some(to)) => self.out_edges[from as usize].weight(to),
            _ => 0.0,
        }
    }

    /// Total outgoing weight of a node, zero if unknown
    pub fn out_weight(&self, source: &N) -> f64 {
        self.node_id(source)
            .map(|id| self.out_edges[id as usize].total_weight)
            .unwrap_or(0.0)
    }
}

impl<N> GraphModel<N> {
    /// Number of distinct registered nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct directed edges with positive weight
    pub fn edge_count(&self) -> usize {
        self.out_edges.iter().map(|o| o.edges.len()).sum()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node keys in registration order (the solvers' index order)
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Get the key for a node ID
    pub fn node(&self, id: u32) -> Option<&N> {
        self.nodes.get(id as usize)
    }

    /// Outgoing edges of a node ID
    pub fn out_edges(&self, id: u32) -> Option<&OutEdges> {
        self.out_edges.get(id as usize)
    }

    /// Iterate over `(source ID, outgoing edges)` for every node
    pub fn sources(&self) -> impl Iterator<Item = (u32, &OutEdges)> {
        self.out_edges.iter().enumerate().map(|(i, o)| (i as u32, o))
    }

    /// IDs of nodes with zero total outgoing weight
    pub fn dangling_nodes(&self) -> Vec<u32> {
        self.sources()
            .filter(|(_, out)| out.is_dangling())
            .map(|(id, _)| id)
            .collect()
    }
}
