//! DataTable Component
//!
//! GPUI rendering of the headless [`crate::table`] controller.

pub mod pagination;
pub mod table_view;

pub use pagination::{PageStep, Pagination};
pub use table_view::{TableEvent, TableView};
