//! Lookup configuration.

use std::time::Duration;

use tracing::warn;

/// NHTSA vPIC endpoint the VIN is path-appended to.
pub const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for [`VehicleService`](crate::service::VehicleService) and the
/// production transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Decoding endpoint, without trailing slash.
    pub base_url: String,
    /// Per-request timeout, enforced by the transport.
    pub timeout: Duration,
    /// `User-Agent` sent by the production transport.
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("vinscout/{}", crate::VERSION),
        }
    }
}

impl LookupConfig {
    /// Read `VINSCOUT_API_BASE` and `VINSCOUT_TIMEOUT_SECS`, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("VINSCOUT_API_BASE") {
            config = config.with_base_url(&base);
        }

        if let Ok(raw) = std::env::var("VINSCOUT_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid VINSCOUT_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Use a different endpoint. A trailing `/` is stripped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Use a different request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/{vin}?format=json`
    pub fn decode_url(&self, vin: &str) -> String {
        format!("{}/{}?format=json", self.base_url, vin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LookupConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("vinscout/"));
    }

    #[test]
    fn test_decode_url_appends_vin() {
        let config = LookupConfig::default().with_base_url("http://localhost:8080/decode/");
        assert_eq!(
            config.decode_url("1HGCM82633A004352"),
            "http://localhost:8080/decode/1HGCM82633A004352?format=json"
        );
    }

    #[test]
    fn test_with_timeout() {
        let config = LookupConfig::default().with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    // Only test in this crate that touches these variables.
    #[test]
    fn test_from_env_overrides_and_fallbacks() {
        std::env::set_var("VINSCOUT_API_BASE", "http://127.0.0.1:9000/decode/");
        std::env::set_var("VINSCOUT_TIMEOUT_SECS", " 7 ");
        let config = LookupConfig::from_env();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/decode");
        assert_eq!(config.timeout, Duration::from_secs(7));

        std::env::remove_var("VINSCOUT_API_BASE");
        for invalid in ["0", "abc"] {
            std::env::set_var("VINSCOUT_TIMEOUT_SECS", invalid);
            let config = LookupConfig::from_env();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.timeout, Duration::from_secs(15), "{invalid}");
        }

        std::env::remove_var("VINSCOUT_TIMEOUT_SECS");
        assert_eq!(LookupConfig::from_env(), LookupConfig::default());
    }
}
