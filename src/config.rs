//! Application configuration.
//!
//! Compile-time constants live here directly. Deployment settings (backend
//! endpoints, session window, page size, log level) come from
//! `assets/config.toml`, embedded with `include_str!` and parsed at startup.

use serde::Deserialize;
use shareio_core::SessionPolicy;
use shareio_core::view::DEFAULT_PAGE_SIZE;

/// Embedded runtime configuration.
pub const CONFIG_TOML: &str = include_str!("../assets/config.toml");

// =============================================================================
// Application Metadata
// =============================================================================

/// Title shown in the header.
pub const APP_TITLE: &str = "Share IO - Admin";

/// Credits line in the footer.
pub const FOOTER_CREDITS: &str = "Share IO · Admin Console";

// =============================================================================
// Backend Endpoints
// =============================================================================

/// Password sign-in endpoint of the auth service.
pub const SIGN_IN_ENDPOINT: &str =
    "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";

/// Named events of the realtime store's streaming endpoint.
pub const STREAM_EVENTS: &[&str] = &["put", "patch", "keep-alive", "cancel", "auth_revoked"];

// =============================================================================
// UI Configuration
// =============================================================================

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 3000;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Settings read from `config.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub firebase: FirebaseConfig,
    pub session: SessionConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Web API key for the auth service.
    pub api_key: String,
    /// Realtime database root URL.
    pub database_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: 120 }
    }
}

impl SessionConfig {
    pub fn policy(&self) -> SessionPolicy {
        SessionPolicy::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AdminConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
