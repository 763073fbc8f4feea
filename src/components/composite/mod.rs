//! Composite Components
//!
//! Components assembled from primitives: the table view and dialogs.

pub mod data_table;
pub mod modal;
