//! Views - full-page GPUI screens
//!
//! Pages that need more than a bare
//! [`TableView`](crate::components::composite::data_table::TableView).

pub mod business;
pub mod login;
