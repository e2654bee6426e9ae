//! Fingerprint similarity
//!
//! A fingerprint is the top-K keywords of one ranked document, most
//! significant first. Two fingerprints are compared by counting their overlap
//! at each of the K prefixes and weighting prefix `i` by `1 / ln(i + 2)`, so
//! agreement among the leading keywords counts for more than agreement that
//! only shows up in the full set. Weights are scaled so that the maximal
//! overlap vector `[1, 2, …, K]` scores exactly 1.0.
//!
//! ```
//! use textrank_core::Fingerprint;
//!
//! let a = Fingerprint::new(vec!["town", "man", "empty", "found"]);
//! let b = Fingerprint::new(vec!["general", "empty", "found", "jar"]);
//! let s = a.similarity(&b).unwrap();
//! assert!((s - 0.24821529740414025).abs() < 1e-12);
//! ```

pub mod overlap;

use crate::errors::{Result, TextRankError};
use std::hash::Hash;

/// An immutable, ordered top-K keyword sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint<T> {
    values: Vec<T>,
}

impl<T: Eq + Hash> Fingerprint<T> {
    /// Create a fingerprint from keywords ordered most significant first
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    /// The keywords, in order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of keywords (K)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the fingerprint is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Similarity in [0, 1]; 1.0 for identical fingerprints.
    ///
    /// Fails if the two fingerprints differ in size.
    pub fn similarity(&self, other: &Self) -> Result<f64> {
        similarity(&self.values, &other.values)
    }
}

impl<T: Eq + Hash> FromIterator<T> for Fingerprint<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Similarity of two equally sized ordered sequences, in [0, 1]
pub fn similarity<T: Eq + Hash>(left: &[T], right: &[T]) -> Result<f64> {
    if left.len() != right.len() {
        return Err(TextRankError::length_mismatch(left.len(), right.len()));
    }
    if left == right {
        return Ok(1.0);
    }

    let overlap = overlap::overlap(left, right)?;
    let weights = prefix_weights(left.len());
    let score = overlap
        .iter()
        .zip(&weights)
        .map(|(&o, w)| o as f64 * w)
        .sum::<f64>();

    // Rounding can push a near-perfect match a hair past 1.
    Ok(score.clamp(0.0, 1.0))
}

/// Normalized prefix weights for a fingerprint of size `k`.
///
/// `w[i] = (1 / ln(i + 2)) / Σ_j ((j + 1) / ln(j + 2))`, so that
/// `Σ_i (i + 1) · w[i] == 1`.
pub fn prefix_weights(k: usize) -> Vec<f64> {
    let raw: Vec<f64> = (0..k).map(|i| 1.0 / ((i + 2) as f64).ln()).collect();
    let norm: f64 = raw.iter().enumerate().map(|(i, w)| (i + 1) as f64 * w).sum();
    raw.into_iter().map(|w| w / norm).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_one() {
        let fp = Fingerprint::new(vec!["a", "b", "c"]);
        assert_eq!(fp.similarity(&fp.clone()).unwrap(), 1.0);

        let empty: Fingerprint<&str> = Fingerprint::new(vec![]);
        assert_eq!(empty.similarity(&empty).unwrap(), 1.0);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let a = ["town", "man", "empty", "found"];
        let b = ["general", "jar", "ocean", "sea"];
        assert_eq!(similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_same_set_different_order() {
        let a: Fingerprint<_> = ["a", "b", "c", "d"].into_iter().collect();
        let b: Fingerprint<_> = ["b", "e", "a", "c"].into_iter().collect();
        let s = a.similarity(&b).unwrap();
        assert!((s - 0.532942728131463).abs() < 1e-12);
        assert!((b.similarity(&a).unwrap() - s).abs() < 1e-12);
    }

    #[test]
    fn test_weights_normalize_max_overlap() {
        for k in 1..20 {
            let w = prefix_weights(k);
            let total: f64 = w.iter().enumerate().map(|(i, x)| (i + 1) as f64 * x).sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
        assert!(prefix_weights(0).is_empty());
    }

    #[test]
    fn test_earlier_agreement_scores_higher() {
        let base = [1, 2, 3, 4, 5];
        let early = [1, 9, 8, 7, 6];
        let late = [9, 8, 7, 6, 1];
        let s_early = similarity(&base, &early).unwrap();
        let s_late = similarity(&base, &late).unwrap();
        assert!(s_early > s_late);
    }

    #[test]
    fn test_size_mismatch() {
        let a = Fingerprint::new(vec![1, 2, 3]);
        let b = Fingerprint::new(vec![1, 2]);
        assert!(matches!(
            a.similarity(&b),
            Err(TextRankError::LengthMismatch { left: 3, right: 2 })
        ));
    }
}
