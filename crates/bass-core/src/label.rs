//! Category labels and group keys
//!
//! Grouping values are compared as text, but labels that look like numbers
//! (questionnaire ages, assessment years) order numerically so that `"9"`
//! sorts before `"10"`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The string form of one grouping value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl Ord for CategoryLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for CategoryLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CategoryLabel {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One combination of grouping values, in grouping-column order
///
/// Ordered lexicographically by component, so a sorted collection of keys
/// follows the first grouping column, then the second.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<CategoryLabel>);

impl GroupKey {
    pub fn new(labels: Vec<CategoryLabel>) -> Self {
        Self(labels)
    }

    /// Key for the ungrouped case
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn labels(&self) -> &[CategoryLabel] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&CategoryLabel> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(CategoryLabel::as_str).collect();
        write!(f, "({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<CategoryLabel> {
        values.iter().map(|&v| CategoryLabel::from(v)).collect()
    }

    #[test]
    fn test_numeric_labels_sort_by_value() {
        let mut l = labels(&["10", "9", "2.5", "30"]);
        l.sort();
        let sorted: Vec<&str> = l.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["2.5", "9", "10", "30"]);
    }

    #[test]
    fn test_text_labels_sort_lexically_after_numbers() {
        let mut l = labels(&["M", "F", "3", "Other"]);
        l.sort();
        let sorted: Vec<&str> = l.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["3", "F", "M", "Other"]);
    }

    #[test]
    fn test_equal_values_different_text_are_distinct() {
        let a = CategoryLabel::from("1");
        let b = CategoryLabel::from("1.0");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_group_key_ordering() {
        let k1 = GroupKey::new(labels(&["3", "F"]));
        let k2 = GroupKey::new(labels(&["3", "M"]));
        let k3 = GroupKey::new(labels(&["10", "F"]));
        let mut keys = vec![k3.clone(), k2.clone(), k1.clone()];
        keys.sort();
        assert_eq!(keys, vec![k1, k2, k3]);
    }

    #[test]
    fn test_group_key_display() {
        let key = GroupKey::new(labels(&["4", "M"]));
        assert_eq!(key.to_string(), "(4, M)");
        assert_eq!(GroupKey::empty().to_string(), "()");
    }
}
