//! Backend API
//!
//! `reqwest` client, login, the persisted session and typed resources.
//! Futures returned here need a tokio reactor; UI code wraps them in
//! [`run_in_tokio`](crate::services::run_in_tokio).

pub mod auth;
pub mod http;
pub mod resource;
pub mod session;

pub use auth::{
    AuthContext, LoginFieldErrors, LoginRequest, LoginResponse, current_user, login,
    login_error_message,
};
pub use http::ApiClient;
pub use resource::Resource;
pub use session::SessionStore;
