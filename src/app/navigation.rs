//! Navigation - Active Page
//!
//! Pages reachable from the sidebar once signed in.

use serde::{Deserialize, Serialize};

/// Available pages in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivePage {
    /// Business rules, the landing page
    #[default]
    Business,
    Rules,
    Scenarios,
    Dimensions,
    Processes,
    Requirements,
    Scripts,
}

impl ActivePage {
    /// Get the icon name for the page
    pub fn icon(&self) -> &'static str {
        match self {
            ActivePage::Business => "briefcase",
            ActivePage::Rules => "check-square",
            ActivePage::Scenarios => "layers",
            ActivePage::Dimensions => "grid",
            ActivePage::Processes => "git-branch",
            ActivePage::Requirements => "clipboard",
            ActivePage::Scripts => "code",
        }
    }

    /// Get the translation key for the page title
    pub fn title_key(&self) -> &'static str {
        match self {
            ActivePage::Business => "nav.business",
            ActivePage::Rules => "nav.rules",
            ActivePage::Scenarios => "nav.scenarios",
            ActivePage::Dimensions => "nav.dimensions",
            ActivePage::Processes => "nav.processes",
            ActivePage::Requirements => "nav.requirements",
            ActivePage::Scripts => "nav.scripts",
        }
    }

    /// Get all available pages for sidebar
    pub fn all() -> &'static [ActivePage] {
        &[
            ActivePage::Business,
            ActivePage::Rules,
            ActivePage::Scenarios,
            ActivePage::Dimensions,
            ActivePage::Processes,
            ActivePage::Requirements,
            ActivePage::Scripts,
        ]
    }
}
