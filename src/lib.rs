//! Storefront Admin - list engine for the admin panel's table screens
//!
//! Products, sellers, users, websites and customers are fetched whole and
//! searched, filtered, sorted and paginated on the client. The crate provides
//! the generic engine behind those screens, the pager window calculator, and
//! a controller that drives one screen from UI events.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the list engine surface for easier access
pub use application::{ListController, ListEvent, ListPageDto};
pub use domain::{
    EntityKind, FieldValue, FilterValue, ListError, ListQuery, ListQueryEngine, ListResult,
    PageLabel, PageWindow, PageWindowCalculator, SortOrder, SortSpec,
};
