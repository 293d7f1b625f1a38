use std::env;
use std::time::Duration;

use url::Url;

use crate::auth::password::{DEFAULT_PASSWORD_COST, MAX_PASSWORD_COST, MIN_PASSWORD_COST};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COHERE_MODEL: &str = "command-a-03-2025";
pub const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_HF_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
pub const DEFAULT_HF_PROVIDER: &str = "hf-inference";
pub const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cohere_api_key: String,
    pub cohere_model: String,
    pub cohere_base_url: Url,
    pub hf_token: String,
    pub hf_model: String,
    pub hf_provider: String,
    pub hf_base_url: Url,
    pub provider_timeout: Duration,
    pub session_secret: String,
    pub cors_origin: Option<String>,
    pub cookie_secure: bool,
    pub password_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| format!("{key}: environment variable not found"))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("PORT: {e}"))?,
            None => DEFAULT_PORT,
        };

        let provider_timeout_secs = match get("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("PROVIDER_TIMEOUT_SECS: {e}"))?,
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };
        if provider_timeout_secs == 0 {
            return Err("PROVIDER_TIMEOUT_SECS: must be greater than zero".to_string());
        }

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|e| format!("COOKIE_SECURE: {e}"))?,
            None => true,
        };

        let password_cost = match get("BCRYPT_SALT_ROUNDS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("BCRYPT_SALT_ROUNDS: {e}"))?,
            None => DEFAULT_PASSWORD_COST,
        };
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&password_cost) {
            return Err(format!(
                "BCRYPT_SALT_ROUNDS: must be between {MIN_PASSWORD_COST} and {MAX_PASSWORD_COST}"
            ));
        }

        Ok(Self {
            port,
            cohere_api_key: required("CO_API_KEY")?,
            cohere_model: get("COHERE_MODEL").unwrap_or_else(|| DEFAULT_COHERE_MODEL.to_string()),
            cohere_base_url: parse_url(
                "COHERE_BASE_URL",
                get("COHERE_BASE_URL").as_deref().unwrap_or(DEFAULT_COHERE_BASE_URL),
            )?,
            hf_token: required("HF_TOKEN")?,
            hf_model: get("HF_MODEL").unwrap_or_else(|| DEFAULT_HF_MODEL.to_string()),
            hf_provider: get("HF_PROVIDER").unwrap_or_else(|| DEFAULT_HF_PROVIDER.to_string()),
            hf_base_url: parse_url(
                "HF_BASE_URL",
                get("HF_BASE_URL").as_deref().unwrap_or(DEFAULT_HF_BASE_URL),
            )?,
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            session_secret: required("SESSION_SECRET")?,
            cors_origin: get("CORS_ORIGIN"),
            cookie_secure,
            password_cost,
        })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, String> {
    Url::parse(raw.trim()).map_err(|e| format!("{key}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("CO_API_KEY", "co-key"),
        ("HF_TOKEN", "hf-token"),
        ("SESSION_SECRET", "secret"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cohere_model, DEFAULT_COHERE_MODEL);
        assert_eq!(config.hf_model, DEFAULT_HF_MODEL);
        assert_eq!(config.hf_provider, DEFAULT_HF_PROVIDER);
        assert_eq!(config.provider_timeout, Duration::from_secs(60));
        assert!(config.cookie_secure);
        assert!(config.cors_origin.is_none());
        assert_eq!(config.password_cost, DEFAULT_PASSWORD_COST);
    }

    #[test]
    fn test_missing_required_key_is_named() {
        let err = AppConfig::from_lookup(lookup_from(&[("CO_API_KEY", "k")])).unwrap_err();
        assert!(err.contains("HF_TOKEN"), "unexpected error: {err}");
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "8080"));
        pairs.push(("PROVIDER_TIMEOUT_SECS", "5"));
        pairs.push(("COOKIE_SECURE", "false"));
        pairs.push(("BCRYPT_SALT_ROUNDS", "10"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.password_cost, 10);
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert!(!config.cookie_secure);

        let mut bad = REQUIRED.to_vec();
        bad.push(("PORT", "not-a-port"));
        assert!(AppConfig::from_lookup(lookup_from(&bad)).unwrap_err().starts_with("PORT"));

        let mut zero = REQUIRED.to_vec();
        zero.push(("PROVIDER_TIMEOUT_SECS", "0"));
        assert!(AppConfig::from_lookup(lookup_from(&zero)).is_err());

        let mut expensive = REQUIRED.to_vec();
        expensive.push(("BCRYPT_SALT_ROUNDS", "31"));
        let err = AppConfig::from_lookup(lookup_from(&expensive)).unwrap_err();
        assert!(err.starts_with("BCRYPT_SALT_ROUNDS"), "unexpected error: {err}");
    }
}
