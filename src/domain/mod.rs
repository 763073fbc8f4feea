//! Domain - Records served by the quality backend
//!
//! Plain serde structs. The backend is not strict about nulls and missing
//! keys, so every struct is `#[serde(default)]` and text fields go through
//! [`nullable`].

pub mod business;
pub mod catalog;
pub mod rule;
pub mod scenario;
pub mod user;

pub use business::Business;
pub use catalog::{Dimension, Process, QualityScript, Requirement};
pub use rule::{Rule, RuleStatus};
pub use scenario::{Scenario, ScenarioStatus};
pub use user::User;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a backend timestamp in local time; unparseable input is returned as is
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
