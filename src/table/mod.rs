//! Data Table
//!
//! Headless core of the generic record table: typed rows, column
//! definitions, client-side search and auxiliary filtering, pagination,
//! per-row delete tracking and the async controller that loads data.

pub mod column;
pub mod controller;
pub mod filter;
pub mod pagination;
pub mod row;
pub mod source;
pub mod state;

pub use column::{Align, Cell, CellRenderer, Column, ColumnWidth, Tone};
pub use controller::DataTable;
pub use pagination::PageInfo;
pub use row::{FieldValue, RowKey, TableRow};
pub use source::TableSource;
pub use state::{DataTableState, DeleteTicket, LoadTicket, Surface, TableBody, TableOptions};
