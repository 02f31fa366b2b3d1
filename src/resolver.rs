//! Stored-path resolution.
//!
//! Stored document paths come in three syntactic forms: already-absolute
//! URLs, cloud-hosted paths (`/uploads/...`), and API-relative paths.
//! Classification is prefix matching only — nothing is probed for
//! reachability. The rule order is load-bearing: absolute URLs must win
//! before the cloud prefix check, and the cloud prefix before the
//! API-relative catch-all, or later rules become unreachable.

use crate::config::ApiConfig;

/// Prefix marking a cloud-hosted stored path.
const CLOUD_PATH_PREFIX: &str = "/uploads/";

/// The one resolution operation the open-document workflow depends on.
pub trait ResolveStoredPath {
    fn resolve(&self, stored_path: &str) -> String;
}

/// Resolves stored document paths to absolute URLs.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    api_base: String,
    cloud_base: String,
}

impl UrlResolver {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_base: config.api_base().to_string(),
            cloud_base: config.cloud_base().to_string(),
        }
    }

    /// Resolve a stored path to one absolute URL. Pure string transform,
    /// no I/O, no error conditions.
    ///
    /// An empty path resolves to the empty string; callers guard before use.
    pub fn resolve(&self, stored_path: &str) -> String {
        if stored_path.is_empty() {
            return String::new();
        }
        if stored_path.starts_with("http://") || stored_path.starts_with("https://") {
            return stored_path.to_string();
        }
        if stored_path.starts_with(CLOUD_PATH_PREFIX) {
            return format!("{}{}", self.cloud_base, stored_path);
        }
        // API-relative: exactly one separator between base and path.
        if stored_path.starts_with('/') {
            format!("{}{}", self.api_base, stored_path)
        } else {
            format!("{}/{}", self.api_base, stored_path)
        }
    }
}

impl ResolveStoredPath for UrlResolver {
    fn resolve(&self, stored_path: &str) -> String {
        UrlResolver::resolve(self, stored_path)
    }
}
