//! Field values exposed by listable entities
//!
//! Every entity projects its columns into [`FieldValue`]s so the list engine can
//! search, filter and sort without knowing concrete entity types. A missing or
//! unset column is represented by `None` at the call site, never by a variant.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single column value of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    TextList(Vec<String>),
}

/// How text columns are ordered when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum TextCollation {
    /// Plain code point order ("Zed" < "apple").
    #[default]
    CaseSensitive,
    /// Folded order with a case-sensitive tie break, so the order stays total.
    CaseInsensitive,
}

impl TextCollation {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::CaseSensitive => a.cmp(b),
            Self::CaseInsensitive => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

impl FieldValue {
    /// Ordering of variants relative to each other. Only consulted when two
    /// entities disagree on the type of the same column.
    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Timestamp(_) => 2,
            Self::Text(_) => 3,
            Self::TextList(_) => 4,
        }
    }

    /// Total order over field values.
    pub fn compare(&self, other: &Self, collation: TextCollation) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => collation.compare(a, b),
            (Self::TextList(a), Self::TextList(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| collation.compare(x, y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Exact-match test of this (entity) value against an expected filter
    /// value. A text-list on either side is a set: a scalar text column must be
    /// one of the listed options, and a text-list column must share an item.
    pub fn matches(&self, expected: &Self) -> bool {
        match (self, expected) {
            (Self::TextList(items), Self::Text(wanted)) => items.iter().any(|item| item == wanted),
            (Self::Text(text), Self::TextList(options)) => options.iter().any(|option| option == text),
            (Self::TextList(items), Self::TextList(options)) => {
                items.iter().any(|item| options.contains(item))
            }
            (actual, wanted) => actual == wanted,
        }
    }

    /// Case-folded substring test used by free-text search. `needle` must
    /// already be folded. Non-text columns never match.
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Self::Text(text) => text.to_lowercase().contains(needle),
            Self::TextList(items) => items.iter().any(|item| item.to_lowercase().contains(needle)),
            Self::Number(_) | Self::Bool(_) | Self::Timestamp(_) => false,
        }
    }

    /// Blank values place no constraint when used as a filter.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::TextList(items) => items.is_empty(),
            Self::Number(_) | Self::Bool(_) | Self::Timestamp(_) => false,
        }
    }

}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_sensitive_text_uses_code_point_order() {
        let zed = FieldValue::from("Zed");
        let apple = FieldValue::from("apple");
        assert_eq!(zed.compare(&apple, TextCollation::CaseSensitive), Ordering::Less);
        assert_eq!(zed.compare(&apple, TextCollation::CaseInsensitive), Ordering::Greater);
    }

    #[test]
    fn case_insensitive_order_is_still_total() {
        let upper = FieldValue::from("Ali");
        let lower = FieldValue::from("ali");
        let ord = upper.compare(&lower, TextCollation::CaseInsensitive);
        assert_ne!(ord, Ordering::Equal);
        assert_eq!(ord, lower.compare(&upper, TextCollation::CaseInsensitive).reverse());
    }

    #[test]
    fn numbers_compare_numerically() {
        let small = FieldValue::from(9.5);
        let big = FieldValue::from(120_u32);
        assert_eq!(small.compare(&big, TextCollation::default()), Ordering::Less);
    }

    #[test]
    fn mixed_variants_order_by_rank() {
        let flag = FieldValue::from(true);
        let text = FieldValue::from("x");
        assert_eq!(flag.compare(&text, TextCollation::default()), Ordering::Less);
        assert_eq!(text.compare(&flag, TextCollation::default()), Ordering::Greater);
    }

    #[test]
    fn text_filter_matches_list_membership() {
        let tags = FieldValue::from(vec!["sale".to_string(), "new".to_string()]);
        assert!(tags.matches(&FieldValue::from("new")));
        assert!(!tags.matches(&FieldValue::from("ne")));
    }

    #[test]
    fn list_filter_value_is_a_set_of_options() {
        let options = FieldValue::from(vec!["active".to_string(), "draft".to_string()]);
        assert!(FieldValue::from("draft").matches(&options));
        assert!(!FieldValue::from("archived").matches(&options));
        assert!(!FieldValue::from(3.0).matches(&options));

        let tags = FieldValue::from(vec!["sale".to_string(), "draft".to_string()]);
        assert!(tags.matches(&options));
        let other = FieldValue::from(vec!["clearance".to_string()]);
        assert!(!other.matches(&options));
    }

    #[test]
    fn exact_match_does_not_cross_types() {
        let price = FieldValue::from(10.0);
        assert!(!price.matches(&FieldValue::from("10")));
        assert!(price.matches(&FieldValue::from(10_u32)));
    }

    #[test]
    fn search_folds_text_only() {
        assert!(FieldValue::from("Ali Rezaei").contains_folded("rez"));
        assert!(!FieldValue::from(42.0).contains_folded("42"));
    }

    #[test]
    fn serde_shape_is_tagged() {
        let json = serde_json::to_value(FieldValue::from("Ali")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "value": "Ali"}));
        let back: FieldValue =
            serde_json::from_value(serde_json::json!({"type": "number", "value": 3.5})).unwrap();
        assert_eq!(back, FieldValue::Number(3.5));
    }
}
