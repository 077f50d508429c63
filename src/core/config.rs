//! Account backend configuration.
//!
//! Only the browser bundle talks to the account backend, so settings are read
//! at compile time from `SNAPGRAM_*` variables via
//! [`BackendConfig::from_build_env`]. The server logs the baked-in values at
//! startup.

use std::time::Duration;

/// Default base URL of the account REST API
pub const DEFAULT_ENDPOINT: &str = "/v1";

/// Default upper bound for a single backend call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

pub const ENV_ENDPOINT: &str = "SNAPGRAM_APPWRITE_URL";
pub const ENV_PROJECT_ID: &str = "SNAPGRAM_APPWRITE_PROJECT_ID";
pub const ENV_DATABASE_ID: &str = "SNAPGRAM_APPWRITE_DATABASE_ID";
pub const ENV_USER_COLLECTION_ID: &str = "SNAPGRAM_APPWRITE_USER_COLLECTION_ID";
pub const ENV_CALL_TIMEOUT_MS: &str = "SNAPGRAM_CALL_TIMEOUT_MS";

/// Settings of the account backend the signup flow talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the account API, without trailing slash
    /// Example: https://cloud.appwrite.io/v1
    pub endpoint: String,

    /// Project the accounts belong to
    pub project_id: Option<String>,

    /// Database holding user profiles
    pub database_id: Option<String>,

    /// Collection of user profile documents
    pub user_collection_id: Option<String>,

    /// Upper bound for each backend call
    pub call_timeout: Duration,
}

impl BackendConfig {
    /// Build configuration from a variable lookup.
    ///
    /// Empty values count as unset. An unparsable timeout falls back to
    /// [`DEFAULT_CALL_TIMEOUT`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let call_timeout = match get(ENV_CALL_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(
                        "Ignoring invalid {}={:?}, using {:?}",
                        ENV_CALL_TIMEOUT_MS,
                        raw,
                        DEFAULT_CALL_TIMEOUT
                    );
                    DEFAULT_CALL_TIMEOUT
                }
            },
            None => DEFAULT_CALL_TIMEOUT,
        };

        Self {
            endpoint: get(ENV_ENDPOINT)
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            project_id: get(ENV_PROJECT_ID),
            database_id: get(ENV_DATABASE_ID),
            user_collection_id: get(ENV_USER_COLLECTION_ID),
            call_timeout,
        }
    }

    /// Configuration baked into the binary at compile time
    pub fn from_build_env() -> Self {
        Self::from_vars(|key| build_var(key).map(str::to_string))
    }

    /// Check if a project is configured
    pub fn has_project(&self) -> bool {
        self.project_id.is_some()
    }

    /// Check if profile storage is configured
    pub fn has_profile_store(&self) -> bool {
        self.database_id.is_some() && self.user_collection_id.is_some()
    }

    /// URL of an API path below the endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

fn build_var(key: &str) -> Option<&'static str> {
    match key {
        ENV_ENDPOINT => option_env!("SNAPGRAM_APPWRITE_URL"),
        ENV_PROJECT_ID => option_env!("SNAPGRAM_APPWRITE_PROJECT_ID"),
        ENV_DATABASE_ID => option_env!("SNAPGRAM_APPWRITE_DATABASE_ID"),
        ENV_USER_COLLECTION_ID => option_env!("SNAPGRAM_APPWRITE_USER_COLLECTION_ID"),
        ENV_CALL_TIMEOUT_MS => option_env!("SNAPGRAM_CALL_TIMEOUT_MS"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Lookups come from a map, never the process environment, so tests stay
    // independent of each other.
    fn config_from(pairs: &[(&str, &str)]) -> BackendConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BackendConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = BackendConfig::default();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.call_timeout, DEFAULT_CALL_TIMEOUT);
        assert!(!config.has_project());
        assert!(!config.has_profile_store());
    }

    #[test]
    fn test_all_fields() {
        let config = config_from(&[
            (ENV_ENDPOINT, "https://cloud.appwrite.io/v1/"),
            (ENV_PROJECT_ID, "snapgram"),
            (ENV_DATABASE_ID, "main"),
            (ENV_USER_COLLECTION_ID, "users"),
            (ENV_CALL_TIMEOUT_MS, "2500"),
        ]);

        assert_eq!(config.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.project_id.as_deref(), Some("snapgram"));
        assert!(config.has_profile_store());
        assert_eq!(config.call_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = config_from(&[(ENV_PROJECT_ID, "  "), (ENV_ENDPOINT, "")]);

        assert!(!config.has_project());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_profile_store_needs_both_ids() {
        let config = config_from(&[(ENV_DATABASE_ID, "main")]);
        assert!(!config.has_profile_store());
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        for raw in ["soon", "0", "-5"] {
            let config = config_from(&[(ENV_CALL_TIMEOUT_MS, raw)]);
            assert_eq!(config.call_timeout, DEFAULT_CALL_TIMEOUT, "{}", raw);
        }
    }

    #[test]
    fn test_url_joins_paths() {
        let config = config_from(&[(ENV_ENDPOINT, "https://api.example.com/v1")]);

        assert_eq!(
            config.url("/account/sessions/email"),
            "https://api.example.com/v1/account/sessions/email"
        );
        assert_eq!(config.url("account"), "https://api.example.com/v1/account");
    }
}
