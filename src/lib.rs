//! # textrank_core
//!
//! The computational core of a TextRank keyword extractor.
//!
//! This library solves a weighted directed graph with PageRank and then
//! refines the resulting ranking: adjacent top-ranked tokens are collapsed
//! back into phrases, and two ranked keyword lists can be compared with a
//! prefix-overlap fingerprint.
//!
//! ## Features
//!
//! - **Two solvers, one contract**: dense (matrix) and sparse (edge list)
//!   power iteration with dangling-node redistribution
//! - **Phrase collapsing**: multi-pass, memoized scanning of the original text
//! - **Fingerprints**: O(K) prefix overlap with log-weighted similarity
//! - **Tracing**: structured logging behind the `tracing` feature

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Emit a tracing event (when the `tracing` feature is enabled).
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
    };
}

/// Enter a tracing span until the end of the enclosing block (when the
/// `tracing` feature is enabled).
macro_rules! trace_span {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::$level!($($arg)+).entered();
    };
}

pub mod errors;
pub mod fingerprint;
pub mod graph;
pub mod pagerank;
pub mod pipeline;
pub mod rank_filter;
pub mod types;

// Re-export commonly used types
pub use errors::{Result, TextRankError};
pub use types::{CollapseConfig, PageRankConfig, RankMap, SolverStrategy};

// Re-export main functionality
pub use fingerprint::{similarity, Fingerprint};
pub use graph::{csr::InboundCsr, model::GraphModel};
pub use pagerank::{
    dense::DenseSolver, sparse::SparseSolver, Convergence, PageRank, PageRankResult,
    RankSolver, Solver,
};
pub use pipeline::{GraphStrategy, KeywordRanker, KeywordRankerBuilder};
pub use rank_filter::{
    CollapseAdjacent, NormalizeProbability, NormalizeUnitVector, RankFilter, SortByValue,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
