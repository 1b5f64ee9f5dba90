//! Per-entity list profiles
//!
//! The list screens only differ in which columns are searchable, sortable and
//! filterable and in their initial sort. That difference lives in this table;
//! the engine itself is the same for every entity.

use crate::domain::entities::EntityKind;
use crate::domain::field_value::TextCollation;
use crate::domain::query::SortSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProfile {
    pub entity: EntityKind,
    /// Columns matched by free-text search.
    pub searchable_fields: &'static [&'static str],
    /// Columns offered as sortable table headers.
    pub sortable_fields: &'static [&'static str],
    /// Columns exposed in the filter drawer. Strict list settings reject
    /// filter events on any other column.
    pub filterable_fields: &'static [&'static str],
    /// Sort seeded into a fresh query for this screen.
    pub default_sort: Option<SortSpec>,
    pub collation: TextCollation,
}

impl ListProfile {
    pub fn for_kind(entity: EntityKind) -> Self {
        match entity {
            EntityKind::Product => Self {
                entity,
                searchable_fields: &["title", "sku", "brand", "tags"],
                sortable_fields: &["title", "price", "stock", "category", "status", "createdAt"],
                filterable_fields: &["category", "status", "sellerId", "brand", "tags"],
                default_sort: Some(SortSpec::desc("createdAt")),
                collation: TextCollation::CaseSensitive,
            },
            EntityKind::Seller => Self {
                entity,
                searchable_fields: &["name", "email", "phone"],
                sortable_fields: &["name", "city", "rating", "createdAt"],
                filterable_fields: &["city", "verified"],
                default_sort: Some(SortSpec::asc("name")),
                collation: TextCollation::CaseInsensitive,
            },
            EntityKind::User => Self {
                entity,
                searchable_fields: &["fullName", "email", "phone"],
                sortable_fields: &["fullName", "email", "role", "createdAt", "lastLoginAt"],
                filterable_fields: &["role", "active"],
                default_sort: Some(SortSpec::desc("createdAt")),
                collation: TextCollation::CaseInsensitive,
            },
            EntityKind::Website => Self {
                entity,
                searchable_fields: &["title", "url", "ownerEmail"],
                sortable_fields: &["title", "domain", "status", "createdAt"],
                filterable_fields: &["status", "category"],
                default_sort: Some(SortSpec::asc("title")),
                collation: TextCollation::CaseInsensitive,
            },
            EntityKind::Customer => Self {
                entity,
                searchable_fields: &["fullName", "email", "phone"],
                sortable_fields: &["fullName", "ordersCount", "totalSpent", "createdAt"],
                filterable_fields: &["city"],
                default_sort: None,
                collation: TextCollation::CaseInsensitive,
            },
        }
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.sortable_fields.contains(&key)
    }

    pub fn is_filterable(&self, key: &str) -> bool {
        self.filterable_fields.contains(&key)
    }
}
