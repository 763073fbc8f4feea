//! i18n - Internationalization Module
//!
//! Thin wrapper over `rust-i18n`. Translations live in `locales/*.yml`.

use rust_i18n::t;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Spanish
    Es,
}

impl Locale {
    /// Language tag used by the translation files
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
        }
    }

    /// Parse a language tag such as "es", "es-PE" or "en_US"
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    /// Configured tag if recognised, otherwise the system locale, otherwise English
    pub fn resolve(configured: Option<&str>) -> Self {
        configured
            .and_then(Self::from_tag)
            .or_else(|| Self::from_tag(&locale_config::Locale::current().to_string()))
            .unwrap_or_default()
    }
}

/// Translate a key
pub fn tr(locale: Locale, key: &str) -> String {
    t!(key, locale = locale.as_str()).into_owned()
}

/// "N records found" line under a table
pub fn records_found(locale: Locale, count: usize) -> String {
    t!("table.found", locale = locale.as_str(), count = count).into_owned()
}

/// "Page X of Y" label
pub fn page_of(locale: Locale, page: usize, total: usize) -> String {
    t!("table.page", locale = locale.as_str(), page = page, total = total).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("es-PE"), Some(Locale::Es));
        assert_eq!(Locale::from_tag("en_US"), Some(Locale::En));
        assert_eq!(Locale::from_tag("EN"), Some(Locale::En));
        assert_eq!(Locale::from_tag("zh-CN"), None);
        assert_eq!(Locale::resolve(Some("es")), Locale::Es);
    }

    #[test]
    fn test_translations_exist_for_both_locales() {
        assert_eq!(tr(Locale::En, "table.empty"), "No records to display");
        assert_eq!(tr(Locale::Es, "table.empty"), "No hay registros para mostrar");
        assert_eq!(tr(Locale::Es, "select.load_error"), "No se pudo cargar opciones.");
    }

    #[test]
    fn test_interpolated_labels() {
        assert_eq!(page_of(Locale::En, 2, 3), "Page 2 of 3");
        assert_eq!(page_of(Locale::Es, 1, 1), "Página 1 de 1");
        assert_eq!(records_found(Locale::Es, 7), "7 registros encontrados");
    }
}
