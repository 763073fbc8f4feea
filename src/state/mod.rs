//! State - Application State Modules
//!
//! Plain state held in GPUI entities by the front end, split by update
//! frequency to avoid unnecessary re-renders.

pub mod i18n_state;
pub mod nav_state;
pub mod session_state;
