use std::env;

/// Default document API base when `CAREDOCS_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "https://api.careconnect.example";

/// Default cloud-storage base (host + fixed version segment) when
/// `CAREDOCS_CLOUD_BASE` is unset. Cloud-hosted stored paths are appended
/// to this verbatim.
pub const DEFAULT_CLOUD_BASE: &str = "https://storage.careconnect.example/v1";

/// Client configuration for the document API and cloud storage.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_base: String,
    cloud_base: String,
}

impl ApiConfig {
    /// Build a config from explicit bases. Trailing slashes are trimmed so
    /// URL assembly controls its own separators.
    pub fn new(api_base: &str, cloud_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_base: cloud_base.trim_end_matches('/').to_string(),
        }
    }

    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let api_base =
            env::var("CAREDOCS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let cloud_base =
            env::var("CAREDOCS_CLOUD_BASE").unwrap_or_else(|_| DEFAULT_CLOUD_BASE.to_string());
        Self::new(&api_base, &cloud_base)
    }

    /// Base URL of the document API.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Base prefix for cloud-hosted document paths.
    pub fn cloud_base(&self) -> &str {
        &self.cloud_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slashes() {
        let config = ApiConfig::new("https://api.example.com/", "https://res.example.com/up/v1/");
        assert_eq!(config.api_base(), "https://api.example.com");
        assert_eq!(config.cloud_base(), "https://res.example.com/up/v1");
    }

    #[test]
    fn new_keeps_clean_bases_unchanged() {
        let config = ApiConfig::new("https://api.example.com", "https://res.example.com/up/v1");
        assert_eq!(config.api_base(), "https://api.example.com");
        assert_eq!(config.cloud_base(), "https://res.example.com/up/v1");
    }

    #[test]
    fn defaults_are_https() {
        assert!(DEFAULT_API_BASE.starts_with("https://"));
        assert!(DEFAULT_CLOUD_BASE.starts_with("https://"));
    }
}
