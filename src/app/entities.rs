//! AppEntities - Global Entity Handles
//!
//! All global GPUI entities are collected here for easy access and management.

use gpui::{App, AppContext, Entity, Global};

use crate::config::AppConfig;
use crate::i18n::Locale;
use crate::state::{i18n_state::I18nState, nav_state::NavState, session_state::SessionState};

/// Collection of all global Entity handles
#[derive(Clone)]
pub struct AppEntities {
    pub i18n: Entity<I18nState>,
    pub nav: Entity<NavState>,
    /// Credential, API clients and the signed-in user
    pub session: Entity<SessionState>,
    /// Rows per page for every table
    pub page_size: usize,
}

impl Global for AppEntities {}

impl AppEntities {
    pub fn init(config: &AppConfig, session: SessionState, cx: &mut App) -> Self {
        let locale = Locale::resolve(config.locale.as_deref());
        Self {
            i18n: cx.new(|_| I18nState::new(locale)),
            nav: cx.new(|_| NavState::default()),
            session: cx.new(|_| session),
            page_size: config.table.page_size,
        }
    }

    pub fn locale(&self, cx: &App) -> Locale {
        self.i18n.read(cx).locale
    }
}
