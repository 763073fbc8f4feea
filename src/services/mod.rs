//! Service Layer
//!
//! Owns the tokio runtime that drives HTTP futures started from the UI
//! executor.

mod runtime;

pub use runtime::*;
