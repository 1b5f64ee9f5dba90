//! List query value objects
//!
//! A [`ListQuery`] is the immutable description of what one list screen wants
//! to show: which page, how large, which search text, which sort column and
//! which field filters. Queries are rebuilt per interaction; builder methods
//! consume and return `Self`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::errors::{EngineResult, ListError};
use crate::domain::field_value::FieldValue;
use crate::domain::profiles::ListProfile;

/// Page size used when a screen has no stored preference.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Orients an ascending comparison result.
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Expected value(s) for one filtered column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum FilterValue {
    /// Column must equal the value. List values on either side compare as
    /// sets, so a text-list value behaves like `AnyOf`.
    Exact(FieldValue),
    /// Column must equal one of the values.
    AnyOf(Vec<FieldValue>),
}

impl FilterValue {
    pub fn exact(value: impl Into<FieldValue>) -> Self {
        Self::Exact(value.into())
    }

    pub fn any_of<V: Into<FieldValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Empty strings and empty selections do not restrict the list.
    pub fn is_unconstrained(&self) -> bool {
        match self {
            Self::Exact(value) => value.is_blank(),
            Self::AnyOf(options) => options.iter().all(FieldValue::is_blank),
        }
    }

    /// Whether an entity whose column holds `actual` passes this filter.
    /// A missing column never passes an active filter.
    pub fn accepts(&self, actual: Option<&FieldValue>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            Self::Exact(expected) => actual.matches(expected),
            Self::AnyOf(options) => options.iter().any(|option| actual.matches(option)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListQuery {
    /// 1-based page index.
    pub page_index: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, FilterValue>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub const fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
            search_text: None,
            sort: None,
            filters: BTreeMap::new(),
        }
    }

    /// First page of a list with the profile's default sort applied.
    pub fn for_profile(profile: &ListProfile, page_size: u32) -> Self {
        Self {
            sort: profile.default_sort.clone(),
            ..Self::new(1, page_size)
        }
    }

    #[must_use]
    pub fn with_page(mut self, page_index: u32) -> Self {
        self.page_index = page_index;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search_text = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.filters.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn without_filter(mut self, key: &str) -> Self {
        self.filters.remove(key);
        self
    }

    #[must_use]
    pub fn without_filters(mut self) -> Self {
        self.filters.clear();
        self
    }

    /// Checks the paging invariants.
    pub fn validate(&self) -> EngineResult<()> {
        if self.page_index < 1 {
            return Err(ListError::invalid_query("page_index must be >= 1"));
        }
        if self.page_size < 1 {
            return Err(ListError::invalid_query("page_size must be >= 1"));
        }
        Ok(())
    }

    /// Checks the page size against the selector's allow-list.
    pub fn validate_page_size(&self, options: &[u32]) -> EngineResult<()> {
        if options.contains(&self.page_size) {
            Ok(())
        } else {
            Err(ListError::invalid_query(format!(
                "page_size {} is not one of {:?}",
                self.page_size, options
            )))
        }
    }

    /// Case-folded search text; `None` when it is empty or only whitespace.
    /// Inner and surrounding spaces are part of the needle.
    pub fn folded_search(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Filters that actually restrict the list.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_unconstrained())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Index of the first item on the requested page, `None` on overflow.
    pub fn offset(&self) -> Option<usize> {
        let page = usize::try_from(self.page_index.checked_sub(1)?).ok()?;
        let size = usize::try_from(self.page_size).ok()?;
        page.checked_mul(size)
    }
}

/// Number of pages needed for `total` items (`0` for an empty list).
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_index_is_rejected() {
        let err = ListQuery::new(0, 10).validate().unwrap_err();
        assert!(matches!(err, ListError::InvalidQuery { .. }));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = ListQuery::new(1, 0).validate().unwrap_err();
        assert!(matches!(err, ListError::InvalidQuery { .. }));
    }

    #[test]
    fn page_size_allow_list() {
        let query = ListQuery::new(1, 25);
        assert!(query.validate().is_ok());
        assert!(query.validate_page_size(&PAGE_SIZE_OPTIONS).is_err());
        assert!(ListQuery::new(1, 50).validate_page_size(&PAGE_SIZE_OPTIONS).is_ok());
    }

    #[test]
    fn whitespace_search_is_no_search() {
        let query = ListQuery::default().with_search("   ");
        assert_eq!(query.search_text, None);
        assert_eq!(query.folded_search(), None);

        let query = ListQuery::default().with_search("ALI ");
        assert_eq!(query.folded_search().as_deref(), Some("ali "));
    }

    #[test]
    fn blank_filters_are_inactive() {
        let query = ListQuery::default()
            .with_filter("status", FilterValue::exact(""))
            .with_filter("category", FilterValue::AnyOf(vec![]))
            .with_filter("city", FilterValue::exact("Tabriz"));
        let active: Vec<_> = query.active_filters().map(|(key, _)| key).collect();
        assert_eq!(active, vec!["city"]);
    }

    #[test]
    fn any_of_accepts_members_only() {
        let filter = FilterValue::any_of(["active", "pending"]);
        assert!(filter.accepts(Some(&FieldValue::from("pending"))));
        assert!(!filter.accepts(Some(&FieldValue::from("banned"))));
        assert!(!filter.accepts(None));
    }

    #[test]
    fn exact_list_value_accepts_any_listed_option() {
        let filter = FilterValue::exact(vec!["active".to_string(), "draft".to_string()]);
        assert!(filter.accepts(Some(&FieldValue::from("active"))));
        assert!(!filter.accepts(Some(&FieldValue::from("archived"))));

        let from_wire: FilterValue = serde_json::from_value(serde_json::json!({
            "mode": "exact",
            "value": {"type": "textList", "value": ["active", "draft"]}
        }))
        .unwrap();
        assert_eq!(from_wire, filter);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(ListQuery::new(1, 10).offset(), Some(0));
        assert_eq!(ListQuery::new(3, 10).offset(), Some(20));
        assert_eq!(ListQuery::new(0, 10).offset(), None);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let query = ListQuery::new(2, 20)
            .with_search("ali")
            .with_sort(Some(SortSpec::desc("price")));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["pageIndex"], 2);
        assert_eq!(json["searchText"], "ali");
        assert_eq!(json["sort"]["order"], "desc");
        assert!(json.get("filters").is_none());
    }
}
