//! App Constants
//!
//! Centralized defaults for layout, networking and tables.

/// Sidebar navigation width in pixels
pub const SIDEBAR_WIDTH: f32 = 220.0;

/// Default window dimensions
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Identity field used when a table does not name one
pub const DEFAULT_ID_FIELD: &str = "id";

/// HTTP request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Backend used when neither config nor environment provide one
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL
pub const API_URL_ENV: &str = "QUALITY_API_URL";

/// Project identifiers for platform directories
pub const PROJECT_QUALIFIER: &str = "com";
pub const PROJECT_ORGANIZATION: &str = "quality";
pub const PROJECT_APPLICATION: &str = "quality-console";

/// Config and session file names
pub const CONFIG_FILE: &str = "quality-console.toml";
pub const SESSION_FILE: &str = "session.toml";
pub const LOG_FILE_PREFIX: &str = "quality-console.log";
