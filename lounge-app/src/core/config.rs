use crate::auth::AdminCredential;
use lounge_client::ClientConfig;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LOUNGE_BACKEND_URL | http://localhost:54321 | Backend base URL |
/// | LOUNGE_BACKEND_KEY | - | API key for the backend |
/// | LOUNGE_REQUEST_TIMEOUT_SECS | 30 | Request timeout (seconds) |
/// | LOUNGE_LOG_LEVEL | info | Log level |
/// | LOUNGE_LOG_DIR | - | Rolling log directory |
/// | LOUNGE_VENUE_NAME | THE POINT LOUNGE | Venue name in the order message |
/// | LOUNGE_WHATSAPP_NUMBER | 18293837441 | Order hand-off number |
/// | LOUNGE_ADMIN_NAME | Paul Valerio Naar | Bootstrap admin name |
/// | LOUNGE_ADMIN_PASSWORD | - | Bootstrap admin password (admin login disabled when unset) |
/// | LOUNGE_ADMIN_PHONE | 829-383-7441 | Bootstrap admin phone |
///
/// # Example
///
/// ```ignore
/// LOUNGE_BACKEND_URL=https://xyz.supabase.co LOUNGE_BACKEND_KEY=anon cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_key: Option<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub venue_name: String,
    /// Destination of the order hand-off chat link, digits only
    pub whatsapp_number: String,
    /// Bootstrap admin; `None` disables admin login
    pub admin: Option<AdminCredential>,
}

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
pub const DEFAULT_VENUE_NAME: &str = "THE POINT LOUNGE";
pub const DEFAULT_WHATSAPP_NUMBER: &str = "18293837441";
pub const DEFAULT_ADMIN_NAME: &str = "Paul Valerio Naar";
pub const DEFAULT_ADMIN_PHONE: &str = "829-383-7441";

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let admin = non_empty("LOUNGE_ADMIN_PASSWORD").map(|password| AdminCredential {
            full_name: non_empty("LOUNGE_ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.into()),
            password,
            phone: non_empty("LOUNGE_ADMIN_PHONE").unwrap_or_else(|| DEFAULT_ADMIN_PHONE.into()),
        });

        Self {
            backend_url: non_empty("LOUNGE_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.into()),
            backend_key: non_empty("LOUNGE_BACKEND_KEY"),
            request_timeout_secs: non_empty("LOUNGE_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_level: non_empty("LOUNGE_LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOUNGE_LOG_DIR"),
            venue_name: non_empty("LOUNGE_VENUE_NAME").unwrap_or_else(|| DEFAULT_VENUE_NAME.into()),
            whatsapp_number: non_empty("LOUNGE_WHATSAPP_NUMBER")
                .map(|n| n.chars().filter(char::is_ascii_digit).collect())
                .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.into()),
            admin,
        }
    }

    /// Enable the bootstrap admin with the given credentials
    ///
    /// Mostly used in tests.
    pub fn with_admin(mut self, full_name: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = Some(AdminCredential {
            full_name: full_name.into(),
            password: password.into(),
            phone: DEFAULT_ADMIN_PHONE.into(),
        });
        self
    }

    /// Record store client configuration
    pub fn client_config(&self) -> ClientConfig {
        let config =
            ClientConfig::new(self.backend_url.clone()).with_timeout(self.request_timeout_secs);
        match &self.backend_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }
}

impl Default for Config {
    /// Defaults only, ignoring the environment
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.venue_name, "THE POINT LOUNGE");
        assert_eq!(config.whatsapp_number, "18293837441");
        assert!(config.admin.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_admin_enabled_only_with_password() {
        let config = Config::from_lookup(lookup(&[("LOUNGE_ADMIN_NAME", "Someone")]));
        assert!(config.admin.is_none());

        let config = Config::from_lookup(lookup(&[("LOUNGE_ADMIN_PASSWORD", "secret")]));
        let admin = config.admin.unwrap();
        assert_eq!(admin.full_name, DEFAULT_ADMIN_NAME);
        assert_eq!(admin.phone, DEFAULT_ADMIN_PHONE);
        assert_eq!(admin.password, "secret");
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = Config::from_lookup(lookup(&[
            ("LOUNGE_BACKEND_URL", "https://xyz.example"),
            ("LOUNGE_BACKEND_KEY", "anon"),
            ("LOUNGE_REQUEST_TIMEOUT_SECS", "soon"),
            ("LOUNGE_WHATSAPP_NUMBER", "+1 (829) 383-7441"),
            ("LOUNGE_LOG_DIR", "  "),
        ]));
        assert_eq!(config.backend_url, "https://xyz.example");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.whatsapp_number, "18293837441");
        assert!(config.log_dir.is_none());

        let client = config.client_config();
        assert_eq!(client.api_key.as_deref(), Some("anon"));
        assert_eq!(client.table_url("users"), "https://xyz.example/rest/v1/users");
    }
}
