//! Rank filters
//!
//! A rank filter post-processes the output of a PageRank solve: mapping in,
//! mapping out. Filters run in the order a [`crate::pipeline::KeywordRanker`]
//! lists them. Apart from [`SortByValue`], no filter promises to leave the
//! map sorted, so a sort is normally the last stage.

pub mod collapse_adjacent;
pub mod normalize;
pub mod sort;

pub use collapse_adjacent::CollapseAdjacent;
pub use normalize::{NormalizeProbability, NormalizeUnitVector};
pub use sort::SortByValue;

use crate::errors::Result;
use crate::types::RankMap;

/// Post-processing stage over a ranked keyword map.
///
/// # Contract
///
/// - **Input**: the ranks produced so far and the original, unfiltered text.
/// - **Output**: a new rank map; ownership of the input is taken so filters
///   can rewrite it in place.
/// - **Deterministic**: same input, same output.
pub trait RankFilter {
    /// Short stage name, used in log spans
    fn name(&self) -> &'static str;

    /// Filter the ranks
    fn filter(&self, ranks: RankMap<String>, original_text: &str) -> Result<RankMap<String>>;
}
