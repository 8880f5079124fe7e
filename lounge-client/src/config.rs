//! Client configuration

/// Client configuration for connecting to the backend store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://xyz.supabase.co")
    pub base_url: String,

    /// Path prefix of the REST endpoint
    pub rest_path: String,

    /// Project API key, sent as `apikey` and as bearer token
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rest_path: "rest/v1".to_string(),
            api_key: None,
            timeout: 30,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the REST path prefix
    pub fn with_rest_path(mut self, path: impl Into<String>) -> Self {
        self.rest_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Full URL of a table endpoint
    pub fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.rest_path.trim_matches('/'),
            table
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_slashes() {
        let config = ClientConfig::new("https://example.test/").with_rest_path("/rest/v1/");
        assert_eq!(config.table_url("orders"), "https://example.test/rest/v1/orders");
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::default().with_api_key("anon").with_timeout(5);
        assert_eq!(config.api_key.as_deref(), Some("anon"));
        assert_eq!(config.timeout, 5);
    }
}
