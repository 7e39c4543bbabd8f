use crate::info;
use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const BASE_URL: &str = "https://base.zenkit.com/api/v1";
pub const DEFAULT_CONFIG_FILE: &str = "zenkit";
const DEFAULT_TIMEOUT_S: u64 = 30;

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

#[derive(Deserialize, Clone)]
pub struct ZenkitConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(rename = "timeout_s", deserialize_with = "duration_from_secs")]
    pub timeout: Duration,
}

// keeps the api key out of logs
impl fmt::Debug for ZenkitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZenkitConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ZenkitConfig {
    /// Loads `path` (any format the `config` crate understands, optional) and overlays `ZENKIT_*` variables.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        // a missing .env is fine, the variables may come from the real environment
        let _ = dotenv();
        let builder = Config::builder()
            .set_default("base_url", BASE_URL)?
            .set_default("timeout_s", DEFAULT_TIMEOUT_S)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ZENKIT").prefix_separator("_").try_parsing(true).separator("__"));
        let config = builder.build()?.try_deserialize::<ZenkitConfig>()?;
        info!("{:?}", config);
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_CONFIG_FILE)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        ZenkitConfig {
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_S),
        }
    }

    /// Joins a relative endpoint path onto the base url.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_duplicate_slashes() {
        let mut cfg = ZenkitConfig::with_api_key("secret");
        assert_eq!(cfg.url("lists/1/elements"), "https://base.zenkit.com/api/v1/lists/1/elements");
        cfg.base_url = "http://localhost:8080/api/".into();
        assert_eq!(cfg.url("/auth/currentuser"), "http://localhost:8080/api/auth/currentuser");
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let cfg = ZenkitConfig::with_api_key("very-secret-key");
        let printed = format!("{:?}", cfg);
        assert!(!printed.contains("very-secret-key"));
        assert!(printed.contains("base.zenkit.com"));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        std::env::set_var("ZENKIT_API_KEY", "k-123");
        std::env::set_var("ZENKIT_TIMEOUT_S", "5");
        let cfg = ZenkitConfig::new("no-such-zenkit-config").unwrap();
        std::env::remove_var("ZENKIT_API_KEY");
        std::env::remove_var("ZENKIT_TIMEOUT_S");
        assert_eq!(cfg.api_key, "k-123");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.base_url, BASE_URL);
    }
}
