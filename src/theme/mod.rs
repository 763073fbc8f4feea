//! Theme - palette and type scale for the native front end

pub mod colors;
pub mod typography;
