//! Core types for textrank_core
//!
//! This module defines the ordered rank mapping shared by the solvers and the
//! rank filters, plus the serde-backed configuration structs.

use crate::errors::{Result, TextRankError};
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

// ============================================================================
// Rank Map
// ============================================================================

/// An insertion-ordered mapping from key to score.
///
/// Solvers hand this out in descending-score order. Rank filters take one in
/// and return one, and may leave it unsorted; [`RankMap::sort_descending`]
/// restores the order. Lookups go through a hash index so `get` stays O(1)
/// on large graphs.
#[derive(Clone)]
pub struct RankMap<K> {
    entries: Vec<(K, f64)>,
    index: FxHashMap<K, usize>,
}

impl<K> Default for RankMap<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> RankMap<K> {
    /// Create an empty rank map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rank map with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert or replace a score.
    ///
    /// A replaced key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: K, score: f64) -> Option<f64> {
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, score));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, score));
        None
    }

    /// Get the score for a key
    pub fn get(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keep only the entries for which the predicate holds, preserving order
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, f64) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|(k, v)| keep(k, *v));
        if self.entries.len() != before {
            self.reindex();
        }
    }

    /// Stable sort by score, highest first.
    ///
    /// Keys with exactly equal scores keep their current relative order.
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        self.reindex();
    }

    /// Stable sort by score, lowest first
    pub fn sort_ascending(&mut self) {
        self.entries.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.reindex();
    }

    /// Check whether the entries are in non-increasing score order
    pub fn is_sorted_descending(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].1 >= w[1].1)
    }

    /// Apply a function to every score in place
    pub fn map_scores<F>(&mut self, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        for (_, score) in &mut self.entries {
            *score = f(*score);
        }
    }

    /// Convert the keys with a mapping function, keeping order and scores.
    ///
    /// Keys that collide after mapping keep the first score seen.
    pub fn map_keys<J, F>(self, mut f: F) -> RankMap<J>
    where
        J: Eq + Hash + Clone,
        F: FnMut(K) -> J,
    {
        let mut out = RankMap::with_capacity(self.entries.len());
        for (k, v) in self.entries {
            let key = f(k);
            if !out.contains_key(&key) {
                out.insert(key, v);
            }
        }
        out
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, (k, _)) in self.entries.iter().enumerate() {
            self.index.insert(k.clone(), pos);
        }
    }
}

impl<K> RankMap<K> {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, score)` pairs in map order
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Iterate over keys in map order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate over scores in map order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// The first entry in map order
    pub fn first(&self) -> Option<(&K, f64)> {
        self.entries.first().map(|(k, v)| (k, *v))
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Consume the map, returning its entries in order
    pub fn into_vec(self) -> Vec<(K, f64)> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, f64)> for RankMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: PartialEq> PartialEq for RankMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: fmt::Debug> fmt::Debug for RankMap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Serialize> Serialize for RankMap<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ============================================================================
// Solver Strategy
// ============================================================================

/// Which numerical strategy solves the PageRank system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverStrategy {
    /// Full N×N transition matrix; O(N²) per iteration
    Dense,
    /// Realized edges only; O(E) per iteration
    #[default]
    Sparse,
}

impl SolverStrategy {
    /// The lowercase name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStrategy::Dense => "dense",
            SolverStrategy::Sparse => "sparse",
        }
    }
}

impl FromStr for SolverStrategy {
    type Err = TextRankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dense" => Ok(SolverStrategy::Dense),
            "sparse" => Ok(SolverStrategy::Sparse),
            other => Err(TextRankError::invalid_config(format!(
                "unknown solver strategy '{}' (expected 'dense' or 'sparse')",
                other
            ))),
        }
    }
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PageRank Configuration
// ============================================================================

/// Construction-time settings for a PageRank solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a real edge instead of teleporting
    pub damping: f64,
    /// Stop when the Euclidean distance between iterations drops below this
    pub tolerance: f64,
    /// Numerical strategy
    pub strategy: SolverStrategy,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-4,
            strategy: SolverStrategy::Sparse,
        }
    }
}

impl PageRankConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config. Missing fields take their defaults; the result is
    /// validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Written so that NaN fails both checks.
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(TextRankError::invalid_config(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }

        if !(self.tolerance >= 0.0 && self.tolerance < 1.0) {
            return Err(TextRankError::invalid_config(format!(
                "tolerance must be in [0, 1), got {}",
                self.tolerance
            )));
        }

        Ok(())
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: set solver strategy
    pub fn with_strategy(mut self, strategy: SolverStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

// ============================================================================
// Collapse Configuration
// ============================================================================

/// Settings for collapsing adjacent top-ranked tokens into phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    /// How many of the top keys are eligible for collapsing
    pub ranks_to_collapse: usize,
    /// Longest run of tokens that may be combined into one key
    pub max_tokens_to_combine: usize,
    /// Match the original text case-insensitively
    pub ignore_case: bool,
    /// Joins tokens in a combined key; runs of it are tolerated in the text
    pub delimiter: String,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            ranks_to_collapse: 10,
            max_tokens_to_combine: 2,
            ignore_case: true,
            delimiter: " ".to_string(),
        }
    }
}

impl CollapseConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ranks_to_collapse == 0 {
            return Err(TextRankError::invalid_config(
                "ranks_to_collapse must be > 0",
            ));
        }

        if self.max_tokens_to_combine == 0 {
            return Err(TextRankError::invalid_config(
                "max_tokens_to_combine must be > 0",
            ));
        }

        Ok(())
    }

    /// The delimiter actually used; an empty one falls back to a space
    pub fn effective_delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            " "
        } else {
            &self.delimiter
        }
    }

    /// Builder method: set the number of top ranks to consider
    pub fn with_ranks_to_collapse(mut self, ranks_to_collapse: usize) -> Self {
        self.ranks_to_collapse = ranks_to_collapse;
        self
    }

    /// Builder method: set the maximum tokens per combined key
    pub fn with_max_tokens_to_combine(mut self, max_tokens_to_combine: usize) -> Self {
        self.max_tokens_to_combine = max_tokens_to_combine;
        self
    }

    /// Builder method: set case-insensitive matching
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Builder method: set the delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_map_insert_keeps_position() {
        let mut map = RankMap::new();
        map.insert("a", 0.1);
        map.insert("b", 0.2);
        assert_eq!(map.insert("a", 0.5), Some(0.1));

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get(&"a"), Some(0.5));
    }

    #[test]
    fn test_rank_map_sort_is_stable() {
        let mut map: RankMap<&str> =
            vec![("x", 0.2), ("y", 0.5), ("z", 0.2), ("w", 0.9)].into_iter().collect();
        map.sort_descending();

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["w", "y", "x", "z"]);
        assert!(map.is_sorted_descending());
        // index follows the new order
        assert_eq!(map.get(&"z"), Some(0.2));
    }

    #[test]
    fn test_rank_map_retain() {
        let mut map: RankMap<String> = ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, k)| (k.to_string(), i as f64))
            .collect();

        map.retain(|k, _| k != "b" && k != "c");
        assert!(!map.contains_key(&"b".to_string()));

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "d"]);
        assert_eq!(map.get(&"d".to_string()), Some(3.0));
    }

    #[test]
    fn test_rank_map_serializes_in_order() {
        let map: RankMap<&str> = vec![("zeta", 0.75), ("alpha", 0.25)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":0.75,"alpha":0.25}"#);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("dense".parse::<SolverStrategy>().unwrap(), SolverStrategy::Dense);
        assert_eq!(" Sparse ".parse::<SolverStrategy>().unwrap(), SolverStrategy::Sparse);

        let err = "native".parse::<SolverStrategy>().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_pagerank_config_validation() {
        assert!(PageRankConfig::default().validate().is_ok());
        assert!(PageRankConfig::default().with_damping(1.0).validate().is_ok());
        assert!(PageRankConfig::default().with_tolerance(0.0).validate().is_ok());

        assert!(PageRankConfig::default().with_damping(0.0).validate().is_err());
        assert!(PageRankConfig::default().with_damping(1.01).validate().is_err());
        assert!(PageRankConfig::default().with_damping(f64::NAN).validate().is_err());
        assert!(PageRankConfig::default().with_tolerance(1.0).validate().is_err());
        assert!(PageRankConfig::default().with_tolerance(-0.1).validate().is_err());
    }

    #[test]
    fn test_pagerank_config_from_json() {
        let config = PageRankConfig::from_json(r#"{"damping": 0.8, "strategy": "dense"}"#).unwrap();
        assert_eq!(config.damping, 0.8);
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.strategy, SolverStrategy::Dense);

        let err = PageRankConfig::from_json(r#"{"damping": 2.0}"#).unwrap_err();
        assert!(err.is_config_error());

        let err = PageRankConfig::from_json(r#"{"strategy": "native"}"#).unwrap_err();
        assert!(matches!(err, TextRankError::Serialization { .. }));
    }

    #[test]
    fn test_collapse_config() {
        let config = CollapseConfig::default();
        assert_eq!(config.ranks_to_collapse, 10);
        assert_eq!(config.max_tokens_to_combine, 2);
        assert!(config.ignore_case);
        assert!(config.validate().is_ok());

        assert!(config.clone().with_ranks_to_collapse(0).validate().is_err());
        assert!(config.clone().with_max_tokens_to_combine(0).validate().is_err());
        assert_eq!(config.with_delimiter("").effective_delimiter(), " ");
    }
}
