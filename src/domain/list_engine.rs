//! Generic list query engine
//!
//! Turns a fetched collection plus a [`ListQuery`] into one page of results:
//!
//! 1. free-text search over the profile's searchable columns
//! 2. field filters (AND-ed, exact or set membership)
//! 3. stable single-column sort, missing values last in either direction
//! 4. total count of the filtered collection
//! 5. page slice, empty when the page lies past the end
//!
//! The engine never mutates its input and holds no state beyond its profile,
//! so identical inputs always produce identical results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{EntityKind, KindedEntity, Listable};
use crate::domain::errors::{EngineResult, ListError};
use crate::domain::field_value::{FieldValue, TextCollation};
use crate::domain::profiles::ListProfile;
use crate::domain::query::{ListQuery, SortOrder, SortSpec, total_pages};

/// One page of a list plus the size of the filtered list it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    /// Matching entities before pagination.
    pub total: usize,
}

impl<T> ListResult<T> {
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total, page_size)
    }

    pub fn has_next(&self, query: &ListQuery) -> bool {
        query.page_index < self.total_pages(query.page_size)
    }

    pub const fn has_prev(query: &ListQuery) -> bool {
        query.page_index > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

impl<T: Clone> ListResult<&T> {
    pub fn cloned(self) -> ListResult<T> {
        self.map(Clone::clone)
    }
}

#[derive(Debug, Clone)]
pub struct ListQueryEngine {
    profile: ListProfile,
    strict_sort_keys: bool,
}

impl ListQueryEngine {
    pub const fn new(profile: ListProfile) -> Self {
        Self {
            profile,
            strict_sort_keys: false,
        }
    }

    pub fn for_kind(kind: EntityKind) -> Self {
        Self::new(ListProfile::for_kind(kind))
    }

    pub fn for_entity<T: KindedEntity>() -> Self {
        Self::for_kind(T::KIND)
    }

    /// When enabled, sorting by a column outside the profile's sortable set
    /// fails with [`ListError::UnsupportedSortKey`] instead of being a no-op.
    #[must_use]
    pub const fn with_strict_sort_keys(mut self, strict: bool) -> Self {
        self.strict_sort_keys = strict;
        self
    }

    pub const fn profile(&self) -> &ListProfile {
        &self.profile
    }

    /// Runs the query and clones the selected page out of the collection.
    pub fn execute<T: Listable + Clone>(
        &self,
        collection: &[T],
        query: &ListQuery,
    ) -> EngineResult<ListResult<T>> {
        self.select(collection, query).map(ListResult::cloned)
    }

    /// Runs the query, returning references into the collection.
    pub fn select<'a, T: Listable>(
        &self,
        collection: &'a [T],
        query: &ListQuery,
    ) -> EngineResult<ListResult<&'a T>> {
        query.validate()?;
        if let Some(sort) = &query.sort {
            if self.strict_sort_keys && !self.profile.is_sortable(&sort.key) {
                return Err(ListError::unsupported_sort_key(&sort.key, self.profile.entity));
            }
        }

        let mut rows: Vec<&T> = collection.iter().collect();

        if let Some(needle) = query.folded_search() {
            rows.retain(|entity| self.matches_search(*entity, &needle));
        }

        let filters: Vec<_> = query.active_filters().collect();
        if !filters.is_empty() {
            rows.retain(|entity| {
                filters
                    .iter()
                    .all(|(key, filter)| filter.accepts(entity.field(key).as_ref()))
            });
        }

        if let Some(sort) = &query.sort {
            rows = sort_rows(rows, sort, self.profile.collation);
        }

        let total = rows.len();
        let items = page_slice(rows, query);

        debug!(
            entity = %self.profile.entity,
            total,
            page_index = query.page_index,
            page_size = query.page_size,
            returned = items.len(),
            "list query executed"
        );

        Ok(ListResult { items, total })
    }

    fn matches_search<T: Listable>(&self, entity: &T, needle: &str) -> bool {
        self.profile
            .searchable_fields
            .iter()
            .any(|key| entity.field(key).is_some_and(|value| value.contains_folded(needle)))
    }
}

/// Orders two optional column values. Missing values go last whatever the
/// direction; only the comparison of present values is reversed for `Desc`.
pub fn compare_keys(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    order: SortOrder,
    collation: TextCollation,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => order.apply(a.compare(b, collation)),
    }
}

fn sort_rows<'a, T: Listable>(rows: Vec<&'a T>, sort: &SortSpec, collation: TextCollation) -> Vec<&'a T> {
    // Each key is projected once; `sort_by` is stable so ties keep input order.
    let mut keyed: Vec<(Option<FieldValue>, &'a T)> = rows
        .into_iter()
        .map(|entity| (entity.field(&sort.key), entity))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), sort.order, collation));
    keyed.into_iter().map(|(_, entity)| entity).collect()
}

fn page_slice<'a, T>(rows: Vec<&'a T>, query: &ListQuery) -> Vec<&'a T> {
    let Some(start) = query.offset() else {
        return Vec::new();
    };
    if start >= rows.len() {
        return Vec::new();
    }
    let size = usize::try_from(query.page_size).unwrap_or(usize::MAX);
    let end = start.saturating_add(size).min(rows.len());
    rows[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::FilterValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: Option<String>,
        score: Option<f64>,
    }

    impl Listable for Row {
        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "name" => self.name.as_deref().map(Into::into),
                "score" => self.score.map(Into::into),
                _ => None,
            }
        }
    }

    fn row(id: &str, name: Option<&str>, score: Option<f64>) -> Row {
        Row {
            id: id.to_string(),
            name: name.map(str::to_string),
            score,
        }
    }

    fn engine() -> ListQueryEngine {
        ListQueryEngine::new(ListProfile {
            entity: EntityKind::Customer,
            searchable_fields: &["name"],
            sortable_fields: &["name", "score"],
            filterable_fields: &["name"],
            default_sort: None,
            collation: TextCollation::CaseSensitive,
        })
    }

    fn ids<T: Listable>(items: &[T]) -> Vec<&str> {
        items.iter().map(Listable::id).collect()
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let rows = vec![
            row("a", None, None),
            row("b", None, Some(2.0)),
            row("c", None, Some(1.0)),
        ];
        let asc = ListQuery::new(1, 10).with_sort(Some(SortSpec::asc("score")));
        let desc = ListQuery::new(1, 10).with_sort(Some(SortSpec::desc("score")));

        assert_eq!(ids(&engine().execute(&rows, &asc).unwrap().items), ["c", "b", "a"]);
        assert_eq!(ids(&engine().execute(&rows, &desc).unwrap().items), ["b", "c", "a"]);
    }

    #[test]
    fn unknown_sort_key_keeps_input_order() {
        let rows = vec![row("x", None, Some(3.0)), row("y", None, Some(1.0))];
        let query = ListQuery::new(1, 10).with_sort(Some(SortSpec::desc("weight")));
        let result = engine().execute(&rows, &query).unwrap();
        assert_eq!(ids(&result.items), ["x", "y"]);
    }

    #[test]
    fn strict_mode_rejects_unknown_sort_key() {
        let rows = vec![row("x", None, None)];
        let query = ListQuery::new(1, 10).with_sort(Some(SortSpec::asc("weight")));
        let err = engine()
            .with_strict_sort_keys(true)
            .execute(&rows, &query)
            .unwrap_err();
        assert_eq!(
            err,
            ListError::unsupported_sort_key("weight", EntityKind::Customer)
        );
    }

    #[test]
    fn search_skips_missing_fields_without_failing() {
        let rows = vec![row("1", None, None), row("2", Some("Ali"), None)];
        let query = ListQuery::new(1, 10).with_search("AL");
        let result = engine().execute(&rows, &query).unwrap();
        assert_eq!(ids(&result.items), ["2"]);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn active_filter_excludes_missing_fields() {
        let rows = vec![row("1", None, None), row("2", Some("Ali"), None)];
        let query = ListQuery::new(1, 10).with_filter("name", FilterValue::exact("Ali"));
        assert_eq!(ids(&engine().execute(&rows, &query).unwrap().items), ["2"]);

        let blank = ListQuery::new(1, 10).with_filter("name", FilterValue::exact(""));
        assert_eq!(engine().execute(&rows, &blank).unwrap().total, 2);
    }

    #[test]
    fn select_borrows_from_the_collection() {
        let rows = vec![row("1", Some("Ali"), None)];
        let result = engine().select(&rows, &ListQuery::default()).unwrap();
        assert!(std::ptr::eq(result.items[0], &rows[0]));
    }

    #[test]
    fn paging_helpers() {
        let rows: Vec<Row> = (0..25).map(|i| row(&i.to_string(), None, None)).collect();
        let query = ListQuery::new(2, 10);
        let result = engine().execute(&rows, &query).unwrap();
        assert_eq!(result.total_pages(10), 3);
        assert!(result.has_next(&query));
        assert!(ListResult::<Row>::has_prev(&query));
        assert!(!result.has_next(&query.clone().with_page(3)));
    }
}
