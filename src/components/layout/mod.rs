//! Layout Components
//!
//! Header and sidebar around the active page.

pub mod header;
pub mod sidebar;
