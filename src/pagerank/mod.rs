//! PageRank solvers
//!
//! Two interchangeable strategies share one contract: [`dense::DenseSolver`]
//! multiplies by a materialized N×N transition matrix, while
//! [`sparse::SparseSolver`] only touches realized in-edges plus the pooled
//! dangling mass. Both implement [`RankSolver`] (a single power-iteration
//! step) and are driven to convergence by [`power_iterate`].
//!
//! The update rule, identical for both strategies:
//!
//! ```text
//! rank'(v) = d * ( Σ_{u→v} rank(u)·P(u,v) + Σ_{u dangling} rank(u)/N ) + (1 − d)/N
//! ```

pub mod dense;
pub mod sparse;

use crate::errors::Result;
use crate::graph::model::GraphModel;
use crate::types::{PageRankConfig, RankMap, SolverStrategy};
use dense::DenseSolver;
use sparse::SparseSolver;
use std::hash::Hash;

// ============================================================================
// Solver capability
// ============================================================================

/// One step of damped power iteration over a fixed graph snapshot.
///
/// Implementations are built once per solve from a [`GraphModel`] and index
/// nodes in the model's registration order.
pub trait RankSolver {
    /// Number of nodes in the snapshot
    fn node_count(&self) -> usize;

    /// Write the next rank vector into `next`, given the current `ranks`.
    ///
    /// Both slices have length [`RankSolver::node_count`].
    fn step(&self, ranks: &[f64], next: &mut [f64]);
}

/// Closed set of solver strategies, chosen by [`SolverStrategy`]
#[derive(Debug, Clone)]
pub enum Solver {
    Dense(DenseSolver),
    Sparse(SparseSolver),
}

impl Solver {
    /// Build the solver for `strategy` from a graph snapshot
    pub fn build<N>(strategy: SolverStrategy, graph: &GraphModel<N>, damping: f64) -> Self {
        match strategy {
            SolverStrategy::Dense => Solver::Dense(DenseSolver::new(graph, damping)),
            SolverStrategy::Sparse => Solver::Sparse(SparseSolver::new(graph, damping)),
        }
    }
}

impl RankSolver for Solver {
    fn node_count(&self) -> usize {
        match self {
            Solver::Dense(s) => s.node_count(),
            Solver::Sparse(s) => s.node_count(),
        }
    }

    fn step(&self, ranks: &[f64], next: &mut [f64]) {
        match self {
            Solver::Dense(s) => s.step(ranks, next),
            Solver::Sparse(s) => s.step(ranks, next),
        }
    }
}

// ============================================================================
// Power iteration
// ============================================================================

/// How a solve terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The distance between successive vectors fell below the tolerance
    Converged,
    /// The iteration budget ran out first
    BudgetExhausted,
}

/// Raw output of [`power_iterate`], indexed by node ID
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    /// Normalized scores (sum to 1 for a non-empty graph)
    pub scores: Vec<f64>,
    /// Number of steps performed
    pub iterations: usize,
    /// Euclidean distance of the last step (infinite if no step ran)
    pub delta: f64,
    /// Terminal state
    pub convergence: Convergence,
}

/// Run damped power iteration from the uniform vector.
///
/// `max_iterations = None` iterates until the tolerance is met. `Some(0)`
/// performs no step and returns the uniform distribution.
pub fn power_iterate<S: RankSolver + ?Sized>(
    solver: &S,
    tolerance: f64,
    max_iterations: Option<usize>,
) -> IterationOutcome {
    let n = solver.node_count();
    if n == 0 {
        return IterationOutcome {
            scores: Vec::new(),
            iterations: 0,
            delta: 0.0,
            convergence: Convergence::Converged,
        };
    }

    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];
    let mut remaining = max_iterations;
    let mut iterations = 0;
    let mut delta = f64::INFINITY;

    let convergence = loop {
        if remaining == Some(0) {
            break Convergence::BudgetExhausted;
        }

        solver.step(&scores, &mut next);
        iterations += 1;
        delta = euclidean_distance(&scores, &next);
        std::mem::swap(&mut scores, &mut next);

        trace_event!(trace, iteration = iterations, delta, "pagerank step");

        if delta < tolerance {
            break Convergence::Converged;
        }
        if let Some(left) = remaining.as_mut() {
            *left -= 1;
        }
    };

    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in &mut scores {
            *score /= sum;
        }
    }

    IterationOutcome {
        scores,
        iterations,
        delta,
        convergence,
    }
}

/// Euclidean distance between two rank vectors of equal length
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

// ============================================================================
// PageRank facade
// ============================================================================

/// Result of a PageRank computation, keyed by node
#[derive(Debug, Clone)]
pub struct PageRankResult<N> {
    /// Node scores, summing to 1.0, highest first
    pub ranks: RankMap<N>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Terminal state of the solve
    pub convergence: Convergence,
}

impl<N: Eq + Hash + Clone> PageRankResult<N> {
    /// Whether the solve met its tolerance
    pub fn converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }

    /// Get the top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(N, f64)> {
        self.ranks.iter().take(n).map(|(k, v)| (k.clone(), v)).collect()
    }

    /// Get the score for a node, zero if absent
    pub fn score(&self, node: &N) -> f64 {
        self.ranks.get(node).unwrap_or(0.0)
    }
}

/// A graph under construction plus the validated settings to solve it.
///
/// # Example
///
/// ```
/// use textrank_core::{PageRank, PageRankConfig, SolverStrategy};
///
/// let config = PageRankConfig::default()
///     .with_damping(0.8)
///     .with_strategy(SolverStrategy::Dense);
/// let mut pr = PageRank::new(config).unwrap();
/// pr.add("nodeA", "nodeC");
/// pr.add_weighted("nodeA", "nodeE", 2.1).unwrap();
/// pr.add_weighted("nodeE", "nodeD", 1.9).unwrap();
///
/// let ranks = pr.calculate(Some(100));
/// assert_eq!(ranks.len(), 4);
/// assert!((ranks.total() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PageRank<N> {
    config: PageRankConfig,
    graph: GraphModel<N>,
}

impl<N: Eq + Hash + Clone> PageRank<N> {
    /// Create an empty PageRank problem. Fails if the config is invalid.
    pub fn new(config: PageRankConfig) -> Result<Self> {
        Self::from_graph(config, GraphModel::new())
    }

    /// Wrap an already populated graph. Fails if the config is invalid.
    pub fn from_graph(config: PageRankConfig, graph: GraphModel<N>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, graph })
    }

    /// Build, populate and solve in one go.
    ///
    /// ```
    /// use textrank_core::{PageRank, PageRankConfig};
    ///
    /// let ranks = PageRank::calculate_with(PageRankConfig::default(), None, |pr| {
    ///     pr.add("a", "b");
    ///     pr.add_weighted("b", "c", 2.0)
    /// })
    /// .unwrap();
    /// assert_eq!(ranks.first().map(|(k, _)| *k), Some("c"));
    /// ```
    pub fn calculate_with<F>(
        config: PageRankConfig,
        max_iterations: Option<usize>,
        populate: F,
    ) -> Result<RankMap<N>>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut pr = Self::new(config)?;
        populate(&mut pr)?;
        Ok(pr.calculate(max_iterations))
    }

    /// Add an edge of weight 1.0 (self-loops are ignored)
    pub fn add(&mut self, source: N, dest: N) {
        self.graph.add(source, dest);
    }

    /// Add a weighted edge (self-loops are ignored)
    pub fn add_weighted(&mut self, source: N, dest: N, weight: f64) -> Result<()> {
        self.graph.add_weighted(source, dest, weight)
    }

    /// The graph built so far
    pub fn graph(&self) -> &GraphModel<N> {
        &self.graph
    }

    /// The validated configuration
    pub fn config(&self) -> &PageRankConfig {
        &self.config
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Solve, returning node scores (sum 1.0) in descending order.
    ///
    /// `None` means no iteration cap; the solve then ends only on
    /// convergence. Equal scores keep node registration order.
    pub fn calculate(&self, max_iterations: Option<usize>) -> RankMap<N> {
        self.calculate_detailed(max_iterations).ranks
    }

    /// Like [`PageRank::calculate`], also reporting how the solve ended
    pub fn calculate_detailed(&self, max_iterations: Option<usize>) -> PageRankResult<N> {
        trace_span!(
            debug_span,
            "pagerank",
            strategy = self.config.strategy.as_str(),
            nodes = self.graph.node_count()
        );

        let solver = Solver::build(self.config.strategy, &self.graph, self.config.damping);
        let outcome = power_iterate(&solver, self.config.tolerance, max_iterations);

        trace_event!(
            debug,
            iterations = outcome.iterations,
            delta = outcome.delta,
            converged = (outcome.convergence == Convergence::Converged),
            "pagerank finished"
        );

        let mut ranks: RankMap<N> = self
            .graph
            .nodes()
            .iter()
            .cloned()
            .zip(outcome.scores)
            .collect();
        ranks.sort_descending();

        PageRankResult {
            ranks,
            iterations: outcome.iterations,
            delta: outcome.delta,
            convergence: outcome.convergence,
        }
    }
}
