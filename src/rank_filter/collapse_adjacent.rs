//! Collapse adjacent top-ranked tokens into phrases
//!
//! Single-token keys from the top of the ranking are merged into one
//! combined key when they occur next to each other in the original text
//! often enough. Work proceeds in passes:
//!
//! 1. Take the current top-N window of keys (widened by tokens already slated
//!    for removal, narrowed by combinations already decided) and keep those
//!    that are safe to match literally and not yet removed.
//! 2. Enumerate every ordering of 1..=`max_tokens_to_combine` candidates that
//!    is not in the [`ScanCache`] yet, and count all of them with one scan of
//!    the text. Longer sequences come first in the pattern, so they consume
//!    text before their parts can.
//! 3. Rank every sequence with a positive count by count, then by length,
//!    and decide what to collapse and what to remove.
//!
//! Passes repeat until one adds nothing new to the cache. Collapsing frees
//! slots in the window, which can pull in tokens that were just outside it.
//!
//! Unsafe tokens are never proposed, and a combination whose tokens cannot be
//! found among the keys at the end is dropped silently.

use super::RankFilter;
use crate::errors::Result;
use crate::types::{CollapseConfig, RankMap};
use regex::{Regex, RegexBuilder};
use rustc_hash::{FxHashMap, FxHashSet};

/// A combination that occurs less often than its tokens still collapses when
/// its count exceeds this fraction of the tokens' mean count.
const SIGNIFICANCE_THRESHOLD: f64 = 0.3;

/// Compiled size limit for the combined scan pattern
const SCAN_SIZE_LIMIT: usize = 64 * (1 << 20);

// ============================================================================
// Scan cache
// ============================================================================

/// Occurrence counts of every token sequence scanned so far.
///
/// A sequence is cached the moment it is scheduled for a scan, with count
/// zero, so it is never scanned twice even if it never occurs.
#[derive(Debug, Clone, Default)]
pub struct ScanCache {
    entries: Vec<(Vec<String>, usize)>,
    index: FxHashMap<Vec<String>, usize>,
}

impl ScanCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sequence has already been scheduled or seen
    pub fn is_scanned(&self, seq: &[String]) -> bool {
        self.index.contains_key(seq)
    }

    /// Schedule a sequence for scanning. Returns false if it was already known.
    pub fn mark_scanned(&mut self, seq: Vec<String>) -> bool {
        if self.is_scanned(&seq) {
            return false;
        }
        self.index.insert(seq.clone(), self.entries.len());
        self.entries.push((seq, 0));
        true
    }

    /// Count one occurrence of a sequence
    pub fn record(&mut self, seq: Vec<String>) {
        match self.index.get(seq.as_slice()) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(seq.clone(), self.entries.len());
                self.entries.push((seq, 1));
            }
        }
    }

    /// Occurrences of a sequence, zero if unknown
    pub fn count(&self, seq: &[String]) -> usize {
        self.index
            .get(seq)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of cached sequences
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequences that occurred at least once, by count then length (both
    /// descending). Ties keep cache insertion order.
    pub fn ranked(&self) -> Vec<(&[String], usize)> {
        let mut ranked: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(seq, count)| (seq.as_slice(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.len().cmp(&a.0.len())));
        ranked
    }
}

// ============================================================================
// Collapse plan
// ============================================================================

/// What the passes decided: sequences to add as combined keys, and single
/// tokens to delete.
#[derive(Debug, Clone, Default)]
pub struct CollapsePlan {
    to_collapse: Vec<Vec<String>>,
    collapse_set: FxHashSet<Vec<String>>,
    to_remove: FxHashSet<String>,
    passes: usize,
}

impl CollapsePlan {
    /// Sequences that will become combined keys, in decision order
    pub fn to_collapse(&self) -> &[Vec<String>] {
        &self.to_collapse
    }

    /// Whether a single token will be removed
    pub fn removes(&self, token: &str) -> bool {
        self.to_remove.contains(token)
    }

    /// Number of single tokens that will be removed
    pub fn removal_count(&self) -> usize {
        self.to_remove.len()
    }

    /// Number of passes that scanned something new
    pub fn passes(&self) -> usize {
        self.passes
    }

    fn decide(&mut self, cache: &ScanCache) {
        let mut claimed: FxHashSet<&str> = FxHashSet::default();

        for (seq, count) in cache.ranked() {
            if seq.len() > 1 {
                let unclaimed: Vec<&String> = seq
                    .iter()
                    .filter(|t| !claimed.contains(t.as_str()))
                    .collect();

                if !unclaimed.is_empty() || is_significant(seq, count, cache) {
                    if self.collapse_set.insert(seq.to_vec()) {
                        self.to_collapse.push(seq.to_vec());
                    }
                    self.to_remove.extend(unclaimed.into_iter().cloned());
                }
            }
            claimed.extend(seq.iter().map(String::as_str));
        }
    }

    /// Apply the plan. Combined keys score the mean of whichever of their
    /// tokens are present; a combination with none present is skipped.
    fn materialize(&self, mut ranks: RankMap<String>, delimiter: &str) -> RankMap<String> {
        for seq in &self.to_collapse {
            let found: Vec<f64> = seq.iter().filter_map(|t| ranks.get(t)).collect();
            if found.is_empty() {
                continue;
            }
            let score = found.iter().sum::<f64>() / found.len() as f64;
            ranks.insert(seq.join(delimiter), score);
        }

        ranks.retain(|k, _| !self.to_remove.contains(k));
        ranks.sort_descending();
        ranks
    }
}

fn is_significant(seq: &[String], count: usize, cache: &ScanCache) -> bool {
    let singles: usize = seq
        .iter()
        .map(|t| cache.count(std::slice::from_ref(t)))
        .sum();
    let mean = singles as f64 / seq.len() as f64;
    mean == 0.0 || count as f64 > SIGNIFICANCE_THRESHOLD * mean
}

/// A token can go into the scan pattern only if it is made of word
/// characters, so `\b` anchors it and escaping cannot change its meaning.
fn is_literal_safe(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// All orderings of `n` distinct items, in lexicographic index order
fn permutations(items: &[String], n: usize) -> Vec<Vec<String>> {
    fn extend(
        items: &[String],
        n: usize,
        used: &mut Vec<bool>,
        current: &mut Vec<String>,
        out: &mut Vec<Vec<String>>,
    ) {
        if current.len() == n {
            out.push(current.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            current.push(items[i].clone());
            extend(items, n, used, current, out);
            current.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    if n == 0 || n > items.len() {
        return out;
    }
    extend(items, n, &mut vec![false; items.len()], &mut Vec::with_capacity(n), &mut out);
    out
}

// ============================================================================
// Filter
// ============================================================================

/// Rank filter that merges adjacent top-ranked tokens into phrases.
///
/// ```
/// use textrank_core::{CollapseAdjacent, CollapseConfig, RankMap};
///
/// let ranks: RankMap<String> = [("town", 0.9), ("siege", 0.7), ("peace", 0.2)]
///     .iter()
///     .map(|(k, v)| (k.to_string(), *v))
///     .collect();
/// let filter = CollapseAdjacent::new(CollapseConfig::default()).unwrap();
/// let out = filter.collapse(ranks, "plagues town siege; peace").unwrap();
///
/// let keys: Vec<_> = out.keys().map(String::as_str).collect();
/// assert_eq!(keys, vec!["town siege", "peace"]);
/// ```
#[derive(Debug, Clone)]
pub struct CollapseAdjacent {
    config: CollapseConfig,
}

impl CollapseAdjacent {
    /// Create the filter. Fails if the config is invalid.
    pub fn new(config: CollapseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration
    pub fn config(&self) -> &CollapseConfig {
        &self.config
    }

    /// Collapse `ranks` against `original_text`, re-sorted by score
    pub fn collapse(&self, ranks: RankMap<String>, original_text: &str) -> Result<RankMap<String>> {
        let plan = self.plan(&ranks, original_text)?;

        trace_event!(
            debug,
            passes = plan.passes(),
            collapsed = plan.to_collapse().len(),
            removed = plan.removal_count(),
            "collapse plan ready"
        );

        Ok(plan.materialize(ranks, self.config.effective_delimiter()))
    }

    /// Run the passes to a fixed point without touching `ranks`
    pub fn plan(&self, ranks: &RankMap<String>, original_text: &str) -> Result<CollapsePlan> {
        let delimiter_re = Regex::new(&self.delimiter_pattern())?;
        let mut cache = ScanCache::new();
        let mut plan = CollapsePlan::default();

        loop {
            let candidates = self.candidates(ranks, &plan);
            let fresh = self.schedule(&candidates, &mut cache);

            trace_event!(
                debug,
                pass = plan.passes + 1,
                candidates = candidates.len(),
                fresh = fresh.len(),
                "collapse pass"
            );

            if fresh.is_empty() {
                break;
            }

            self.scan(original_text, &fresh, &delimiter_re, &mut cache)?;
            plan.decide(&cache);
            plan.passes += 1;
        }

        Ok(plan)
    }

    fn candidates(&self, ranks: &RankMap<String>, plan: &CollapsePlan) -> Vec<String> {
        let window = (self.config.ranks_to_collapse + plan.to_remove.len())
            .saturating_sub(plan.to_collapse.len());

        ranks
            .keys()
            .take(window)
            .filter(|k| !plan.to_remove.contains(k.as_str()))
            .filter(|k| {
                let safe = is_literal_safe(k);
                if !safe {
                    trace_event!(trace, token = k.as_str(), "skipping unsafe token");
                }
                safe
            })
            .cloned()
            .collect()
    }

    /// Cache and return every ordering not scanned before, longest first
    fn schedule(&self, candidates: &[String], cache: &mut ScanCache) -> Vec<Vec<String>> {
        let mut fresh = Vec::new();
        for n in (1..=self.config.max_tokens_to_combine).rev() {
            for seq in permutations(candidates, n) {
                if cache.mark_scanned(seq.clone()) {
                    fresh.push(seq);
                }
            }
        }
        fresh
    }

    fn delimiter_pattern(&self) -> String {
        format!("(?:{})+", regex::escape(self.config.effective_delimiter()))
    }

    fn normalize(&self, token: &str) -> String {
        if self.config.ignore_case {
            token.to_lowercase()
        } else {
            token.to_string()
        }
    }

    /// Count every sequence of `fresh` in one pass over the text
    fn scan(
        &self,
        text: &str,
        fresh: &[Vec<String>],
        delimiter_re: &Regex,
        cache: &mut ScanCache,
    ) -> Result<()> {
        let joiner = self.delimiter_pattern();
        let alternatives: Vec<String> = fresh
            .iter()
            .map(|seq| {
                seq.iter()
                    .map(|t| regex::escape(t))
                    .collect::<Vec<_>>()
                    .join(joiner.as_str())
            })
            .collect();
        let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(self.config.ignore_case)
            .size_limit(SCAN_SIZE_LIMIT)
            .build()?;

        // Matched text comes back in the text's casing; map it to the
        // sequence that was scheduled. Keys that only differ by case resolve
        // to the first one scheduled, which is the higher ranked.
        let mut lookup: FxHashMap<Vec<String>, &Vec<String>> = FxHashMap::default();
        for seq in fresh {
            let normalized = seq.iter().map(|t| self.normalize(t)).collect();
            lookup.entry(normalized).or_insert(seq);
        }

        for m in re.find_iter(text) {
            let parts: Vec<String> = delimiter_re
                .split(&self.normalize(m.as_str()))
                .map(str::to_string)
                .collect();
            let seq = match lookup.get(&parts) {
                Some(scheduled) => (*scheduled).clone(),
                None => parts,
            };
            cache.record(seq);
        }

        Ok(())
    }
}

impl RankFilter for CollapseAdjacent {
    fn name(&self) -> &'static str {
        "collapse_adjacent"
    }

    fn filter(&self, ranks: RankMap<String>, original_text: &str) -> Result<RankMap<String>> {
        self.collapse(ranks, original_text)
    }
}
