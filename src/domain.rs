//! Domain module - list engine core and admin entities
//!
//! Pure, synchronous code: entity projections, query values, the list query
//! engine and the pager window calculator. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod field_value;
pub mod list_engine;
pub mod pagination;
pub mod profiles;
pub mod query;
pub mod repositories;
pub mod value_objects;

// Re-export commonly used items
pub use entities::{
    Customer, EntityKind, KindedEntity, Listable, Product, ProductStatus, Seller, User, UserRole,
    Website, WebsiteStatus,
};
pub use errors::{EngineResult, ListError};
pub use field_value::{FieldValue, TextCollation};
pub use list_engine::{ListQueryEngine, ListResult};
pub use pagination::{DEFAULT_NEIGHBOR_RADIUS, PageLabel, PageWindow, PageWindowCalculator};
pub use profiles::ListProfile;
pub use query::{
    DEFAULT_PAGE_SIZE, FilterValue, ListQuery, PAGE_SIZE_OPTIONS, SortOrder, SortSpec,
    total_pages,
};
pub use repositories::EntitySource;
pub use value_objects::{UrlError, WebsiteUrl};
