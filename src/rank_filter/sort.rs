//! Terminal sort stage

use super::RankFilter;
use crate::errors::Result;
use crate::types::RankMap;

/// Sorts the ranks by score; equal scores keep their relative order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortByValue {
    pub descending: bool,
}

impl Default for SortByValue {
    fn default() -> Self {
        Self { descending: true }
    }
}

impl SortByValue {
    /// Highest score first
    pub fn descending() -> Self {
        Self { descending: true }
    }

    /// Lowest score first
    pub fn ascending() -> Self {
        Self { descending: false }
    }
}

impl RankFilter for SortByValue {
    fn name(&self) -> &'static str {
        "sort_by_value"
    }

    fn filter(&self, mut ranks: RankMap<String>, _original_text: &str) -> Result<RankMap<String>> {
        if self.descending {
            ranks.sort_descending();
        } else {
            ranks.sort_ascending();
        }
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks() -> RankMap<String> {
        [("b", 0.2), ("a", 0.7), ("c", 0.1)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_sort_descending() {
        let sorted = SortByValue::default().filter(ranks(), "").unwrap();
        let keys: Vec<_> = sorted.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_ascending() {
        let sorted = SortByValue::ascending().filter(ranks(), "").unwrap();
        let keys: Vec<_> = sorted.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }
}
