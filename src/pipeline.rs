//! Keyword ranking pipeline
//!
//! Composes the stages around the solver: a [`GraphStrategy`] turns a token
//! sequence into edges, PageRank solves the graph, and an ordered list of
//! [`RankFilter`]s post-processes the ranks. Stages are plain values chosen
//! once by [`KeywordRankerBuilder`]; nothing is looked up per call.
//!
//! Tokenization and token filtering happen upstream; the pipeline starts from
//! already filtered tokens plus the original text.

use crate::errors::Result;
use crate::graph::model::GraphModel;
use crate::pagerank::PageRank;
use crate::rank_filter::RankFilter;
use crate::types::{PageRankConfig, RankMap};

/// Enter a tracing span for a ranking stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rank_stage", stage = $name).entered();
    };
}

// ============================================================================
// GraphStrategy
// ============================================================================

/// Builds the graph to be ranked from a token sequence.
///
/// # Contract
///
/// - **Input**: the filtered tokens, in text order.
/// - **Output**: `add`/`add_weighted` calls on a fresh [`GraphModel`].
/// - **Deterministic**: the same tokens must produce the same edges in the
///   same order, or tie-breaking in the result will vary.
pub trait GraphStrategy {
    /// Populate `graph` from `tokens`
    fn build_graph(&self, tokens: &[String], graph: &mut GraphModel<String>) -> Result<()>;
}

impl<F> GraphStrategy for F
where
    F: Fn(&[String], &mut GraphModel<String>) -> Result<()>,
{
    fn build_graph(&self, tokens: &[String], graph: &mut GraphModel<String>) -> Result<()> {
        self(tokens, graph)
    }
}

// ============================================================================
// KeywordRanker
// ============================================================================

/// A fully configured ranking pipeline
pub struct KeywordRanker {
    strategy: Box<dyn GraphStrategy>,
    config: PageRankConfig,
    max_iterations: Option<usize>,
    filters: Vec<Box<dyn RankFilter>>,
}

impl KeywordRanker {
    /// Start building a pipeline around a graph strategy
    pub fn builder<S: GraphStrategy + 'static>(strategy: S) -> KeywordRankerBuilder {
        KeywordRankerBuilder::new(strategy)
    }

    /// The solver settings
    pub fn config(&self) -> &PageRankConfig {
        &self.config
    }

    /// Names of the rank filters, in run order
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Rank `tokens`, then run every filter against `original_text`
    pub fn rank(&self, tokens: &[String], original_text: &str) -> Result<RankMap<String>> {
        let mut graph = GraphModel::with_capacity(tokens.len());
        {
            trace_stage!("graph");
            self.strategy.build_graph(tokens, &mut graph)?;
        }

        let mut ranks = {
            trace_stage!("pagerank");
            PageRank::from_graph(self.config, graph)?.calculate(self.max_iterations)
        };

        for filter in &self.filters {
            trace_stage!(filter.name());
            ranks = filter.filter(ranks, original_text)?;
        }

        Ok(ranks)
    }
}

impl std::fmt::Debug for KeywordRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordRanker")
            .field("config", &self.config)
            .field("max_iterations", &self.max_iterations)
            .field("filters", &self.filter_names())
            .finish()
    }
}

/// Builder for [`KeywordRanker`]; validation happens once, in `build`
pub struct KeywordRankerBuilder {
    strategy: Box<dyn GraphStrategy>,
    config: PageRankConfig,
    max_iterations: Option<usize>,
    filters: Vec<Box<dyn RankFilter>>,
}

impl KeywordRankerBuilder {
    /// Start with default PageRank settings and no filters
    pub fn new<S: GraphStrategy + 'static>(strategy: S) -> Self {
        Self {
            strategy: Box::new(strategy),
            config: PageRankConfig::default(),
            max_iterations: None,
            filters: Vec::new(),
        }
    }

    /// Set the solver configuration
    pub fn pagerank(mut self, config: PageRankConfig) -> Self {
        self.config = config;
        self
    }

    /// Cap solver iterations (default: until converged)
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Append a rank filter; filters run in the order they are added
    pub fn rank_filter<R: RankFilter + 'static>(mut self, filter: R) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Validate and build the pipeline
    pub fn build(self) -> Result<KeywordRanker> {
        self.config.validate()?;
        Ok(KeywordRanker {
            strategy: self.strategy,
            config: self.config,
            max_iterations: self.max_iterations,
            filters: self.filters,
        })
    }
}
