//! Login and the bearer credential

use std::fmt;

use rust_i18n::t;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::http::ApiClient;
use crate::domain::User;
use crate::error::{Error, Result};
use crate::i18n::{Locale, tr};

const LOGIN_PATH: &str = "/api/auth/token/";
const CURRENT_USER_PATH: &str = "api/auth/token/users/me/";

/// Shortest username or password accepted before posting
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// Credentials posted to the token endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Field problems to show before anything is sent
    pub fn validate(&self, locale: Locale) -> LoginFieldErrors {
        LoginFieldErrors {
            username: check_credential(&self.username, "login.username_required", locale),
            password: check_credential(&self.password, "login.password_required", locale),
        }
    }
}

fn check_credential(value: &str, required_key: &str, locale: Locale) -> Option<String> {
    if value.trim().is_empty() {
        Some(tr(locale, required_key))
    } else if value.chars().count() < MIN_CREDENTIAL_LEN {
        let message = t!("login.min_length", locale = locale.as_str(), min = MIN_CREDENTIAL_LEN);
        Some(message.into_owned())
    } else {
        None
    }
}

/// Per-field messages from [`LoginRequest::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Token endpoint response. Backends disagree on the field name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub access: Option<String>,
    pub access_token: Option<String>,
    pub refresh: Option<String>,
    pub refresh_token: Option<String>,
}

fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| Option::as_ref(*c))
        .map(String::as_str)
        .find(|t| !t.trim().is_empty())
}

impl LoginResponse {
    /// Bearer token: `token`, then `access`, then `access_token`
    pub fn bearer(&self) -> Option<&str> {
        first_present(&[&self.token, &self.access, &self.access_token])
    }

    pub fn refresh(&self) -> Option<&str> {
        first_present(&[&self.refresh, &self.refresh_token])
    }
}

/// Credential attached to every authenticated request
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext").field("token", &"***").finish()
    }
}

/// Text shown on the login form for a failed attempt
pub fn login_error_message(err: &Error, locale: Locale) -> String {
    match err {
        Error::Api {
            status: 400 | 401,
            body,
        } => body
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| tr(locale, "login.invalid")),
        Error::Api { .. } | Error::Http { .. } => tr(locale, "login.server"),
        Error::Auth { message } => message.clone(),
        _ => tr(locale, "login.unexpected"),
    }
}

/// Exchange credentials for a bearer token.
///
/// Every failure comes back as [`Error::Auth`] carrying the localized text
/// for the login form.
pub async fn login(
    client: &ApiClient,
    request: &LoginRequest,
    locale: Locale,
) -> Result<AuthContext> {
    info!(username = %request.username, "Logging in");
    let result: Result<LoginResponse> = client.without_auth().post_json(LOGIN_PATH, request).await;

    let response = result.map_err(|e| {
        warn!(error = %e, "Login failed");
        Error::Auth {
            message: login_error_message(&e, locale),
        }
    })?;

    match response.bearer() {
        Some(token) => {
            info!(username = %request.username, "Login succeeded");
            Ok(AuthContext::new(token))
        }
        None => {
            warn!("Login response carried no token");
            Err(Error::Auth {
                message: tr(locale, "login.no_token"),
            })
        }
    }
}

/// The user behind the client's credential. The endpoint answers with
/// either an object or a one-element list.
pub async fn current_user(client: &ApiClient) -> Result<User> {
    let value: serde_json::Value = client.get_json(CURRENT_USER_PATH).await?;
    let value = match value {
        serde_json::Value::Array(items) => items.into_iter().next().ok_or_else(|| Error::Invalid {
            message: "current user list is empty".to_string(),
        })?,
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorBody;

    #[test]
    fn test_bearer_priority() {
        let r: LoginResponse =
            serde_json::from_str(r#"{"access":"a","access_token":"b","refresh":"r"}"#).unwrap();
        assert_eq!(r.bearer(), Some("a"));
        assert_eq!(r.refresh(), Some("r"));

        let r: LoginResponse = serde_json::from_str(r#"{"token":"t","access":"a"}"#).unwrap();
        assert_eq!(r.bearer(), Some("t"));

        let r: LoginResponse = serde_json::from_str(r#"{"token":"","access_token":"c"}"#).unwrap();
        assert_eq!(r.bearer(), Some("c"));

        let r: LoginResponse = serde_json::from_str(r#"{"refresh_token":"r"}"#).unwrap();
        assert_eq!(r.bearer(), None);
    }

    #[test]
    fn test_login_error_messages() {
        let invalid = Error::api(401, ApiErrorBody::default());
        assert_eq!(
            login_error_message(&invalid, Locale::En),
            "Incorrect username or password."
        );
        let detailed = Error::api(400, ApiErrorBody::detail("Cuenta bloqueada"));
        assert_eq!(login_error_message(&detailed, Locale::En), "Cuenta bloqueada");

        let server = Error::api(500, ApiErrorBody::detail("trace"));
        assert_eq!(
            login_error_message(&server, Locale::Es),
            "Error de servidor. Intenta nuevamente."
        );

        let other = Error::Invalid {
            message: "x".to_string(),
        };
        assert_eq!(login_error_message(&other, Locale::En), "Unexpected error.");
    }

    #[test]
    fn test_credentials_validated_before_posting() {
        let blank = LoginRequest::new("", "   ").validate(Locale::En);
        assert_eq!(blank.username.as_deref(), Some("Username is required"));
        assert_eq!(blank.password.as_deref(), Some("Password is required"));

        let short = LoginRequest::new("ab", "xy").validate(Locale::Es);
        assert_eq!(short.username.as_deref(), Some("Mínimo 3 caracteres"));
        assert_eq!(short.password.as_deref(), Some("Mínimo 3 caracteres"));

        let ok = LoginRequest::new("ana", "s3cret").validate(Locale::En);
        assert!(ok.is_empty());
        assert!(!short.is_empty());
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = AuthContext::new("secret-token");
        assert!(!format!("{auth:?}").contains("secret-token"));
    }
}
