//! Dynamic Option Select
//!
//! Headless select whose options are fetched from a remote collection. It
//! emits typed values, keeps the placeholder distinct from every value and
//! reports the matched option record on a separate channel.

pub mod controller;
pub mod state;
pub mod value;

pub use controller::DynamicSelect;
pub use state::{DynamicSelectState, FilterFn, SelectChange, SelectOption, SelectOptions, SortFn};
pub use value::{SelectValue, Selection};
