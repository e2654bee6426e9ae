//! Prefix overlap between two equally sized fingerprints
//!
//! `overlap[i]` counts the values shared by both sequences' first `i + 1`
//! elements. One synchronized pass with a pending set per side: a value seen
//! on one side waits in that side's set until the other side reaches it.

use crate::errors::{Result, TextRankError};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Compute the prefix overlap vector in O(K).
///
/// ```
/// use textrank_core::fingerprint::overlap::overlap;
///
/// let left = ["a", "b", "c", "d"];
/// let right = ["b", "e", "a", "c"];
/// assert_eq!(overlap(&left, &right).unwrap(), vec![0, 1, 2, 3]);
/// ```
pub fn overlap<T: Eq + Hash>(left: &[T], right: &[T]) -> Result<Vec<usize>> {
    if left.len() != right.len() {
        return Err(TextRankError::length_mismatch(left.len(), right.len()));
    }

    let mut pending_left: FxHashSet<&T> = FxHashSet::default();
    let mut pending_right: FxHashSet<&T> = FxHashSet::default();
    let mut count = 0;

    let overlap = left
        .iter()
        .zip(right)
        .map(|(l, r)| {
            if l == r {
                count += 1;
            } else {
                // A removed entry is matched at most once, even if the value
                // repeats later in the sequence.
                if pending_left.remove(r) {
                    count += 1;
                } else {
                    pending_right.insert(r);
                }
                if pending_right.remove(l) {
                    count += 1;
                } else {
                    pending_left.insert(l);
                }
            }
            count
        })
        .collect();

    Ok(overlap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_matches() {
        let left = ["town", "man", "empty", "found"];
        let right = ["general", "empty", "found", "jar"];
        assert_eq!(overlap(&left, &right).unwrap(), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_reversed() {
        let left = [1, 2, 3, 4];
        let right = [4, 3, 2, 1];
        assert_eq!(overlap(&left, &right).unwrap(), vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(overlap(&[1, 2, 3], &[1, 2, 3]).unwrap(), vec![1, 2, 3]);
        assert_eq!(overlap(&[1, 2, 3], &[4, 5, 6]).unwrap(), vec![0, 0, 0]);
        assert!(overlap::<u8>(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let err = overlap(&[1, 2], &[1]).unwrap_err();
        assert_eq!(err, TextRankError::length_mismatch(2, 1));
    }
}
