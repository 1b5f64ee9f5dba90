//! Application layer module
//!
//! Contains the list screen controller and the data transfer objects it
//! hands to the frontend.

pub mod dto;
pub mod list_controller;

pub use dto::ListPageDto;
pub use list_controller::{ListController, ListEvent, ReduceContext, reduce};
