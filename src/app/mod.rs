//! Application Layer
//!
//! Page navigation, plus app initialization, global entities and the
//! workspace shell when built with the `gui` feature.

pub mod navigation;

#[cfg(feature = "gui")]
pub mod application;
#[cfg(feature = "gui")]
pub mod entities;
#[cfg(feature = "gui")]
pub mod workspace;
