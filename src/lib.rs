//! Quality Console Client Library
//!
//! Native admin client for data-quality rule management: business rules,
//! quality rules, scenarios and their catalogs, served by a REST backend.
//!
//! The headless core (`table`, `select`, `forms`, `api`, `features`) has no
//! windowing dependency; the GPUI front end is behind the `gui` feature.

rust_i18n::i18n!("locales", fallback = "en");

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod fetch;
pub mod forms;
pub mod helpers;
pub mod i18n;
pub mod logging;
pub mod select;
pub mod services;
pub mod state;
pub mod table;

#[cfg(feature = "gui")]
pub mod components;
#[cfg(feature = "gui")]
pub mod theme;
#[cfg(feature = "gui")]
pub mod views;
