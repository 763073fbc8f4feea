//! Helper Utilities
//!
//! Common utilities used across the application.

mod fs;
mod secret;

pub use fs::*;
pub use secret::*;
