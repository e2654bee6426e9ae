//! Score normalization stages
//!
//! Empty maps, and maps whose total is zero, pass through unchanged.

use super::RankFilter;
use crate::errors::Result;
use crate::types::RankMap;

/// Scales scores so they sum to 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeProbability;

impl RankFilter for NormalizeProbability {
    fn name(&self) -> &'static str {
        "normalize_probability"
    }

    fn filter(&self, mut ranks: RankMap<String>, _original_text: &str) -> Result<RankMap<String>> {
        let total = ranks.total();
        if total > 0.0 {
            ranks.map_scores(|v| v / total);
        }
        Ok(ranks)
    }
}

/// Scales scores so the sum of their squares is 1.0 (a unit vector)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeUnitVector;

impl RankFilter for NormalizeUnitVector {
    fn name(&self) -> &'static str {
        "normalize_unit_vector"
    }

    fn filter(&self, mut ranks: RankMap<String>, _original_text: &str) -> Result<RankMap<String>> {
        let norm = ranks.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            ranks.map_scores(|v| v / norm);
        }
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> RankMap<String> {
        [
            ("candide", 0.3092173387079902),
            ("beautiful", 0.5766156537926637),
            ("little", 0.5563730204097321),
            ("horses", 0.029519461112416212),
            ("drag", 0.18104336291582246),
            ("country", 0.07470270548260227),
            ("mead", 0.8510949293418663),
            ("cries", 0.0013624894517173525),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
    }

    #[test]
    fn test_probability() {
        let out = NormalizeProbability.filter(ranks(), "").unwrap();
        assert!((out.total() - 1.0).abs() < 1e-12);
        // order is untouched
        assert_eq!(out.first().map(|(k, _)| k.as_str()), Some("candide"));
    }

    #[test]
    fn test_unit_vector() {
        let out = NormalizeUnitVector.filter(ranks(), "").unwrap();
        let sum_sq: f64 = out.values().map(|v| v * v).sum();
        assert!((sum_sq - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_and_zero_pass_through() {
        let empty = RankMap::new();
        assert!(NormalizeProbability.filter(empty.clone(), "").unwrap().is_empty());
        assert!(NormalizeUnitVector.filter(empty, "").unwrap().is_empty());

        let zeros: RankMap<String> = vec![("a".to_string(), 0.0)].into_iter().collect();
        let out = NormalizeProbability.filter(zeros, "").unwrap();
        assert_eq!(out.get(&"a".to_string()), Some(0.0));
    }
}
