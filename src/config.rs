// src/config.rs
use std::{fmt, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5005";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not found in environment or .env file")]
    MissingApiKey(&'static str),

    #[error("unknown provider '{0}', expected 'gemini' or 'mistral'")]
    UnknownProvider(String),

    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Mistral,
}

impl Provider {
    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::Gemini => "GENAI_API_KEY",
            Provider::Mistral => "MISTRAL_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-1.5-flash",
            Provider::Mistral => "mistral-small-latest",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::Mistral => "https://api.mistral.ai",
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "mistral" => Ok(Provider::Mistral),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => f.write_str("Gemini"),
            Provider::Mistral => f.write_str("Mistral"),
        }
    }
}

/// Settings the outbound provider client is built from.
#[derive(Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

// Keep the key out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = match get("CHAT_PROVIDER") {
            Some(name) => name.parse()?,
            None => Provider::Gemini,
        };

        let api_key = get(provider.api_key_var())
            .ok_or(ConfigError::MissingApiKey(provider.api_key_var()))?;

        let model = get("CHAT_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        let base_url = get("CHAT_API_BASE")
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout = match get("CHAT_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "CHAT_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        Ok(Self {
            provider: ProviderConfig {
                provider,
                api_key,
                model,
                base_url,
                timeout,
            },
            bind_addr,
        })
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
    fn defaults_to_gemini() {
        let cfg = Config::from_lookup(lookup(&[("GENAI_API_KEY", "abc")])).unwrap();
        assert_eq!(cfg.provider.provider, Provider::Gemini);
        assert_eq!(cfg.provider.api_key, "abc");
        assert_eq!(cfg.provider.model, "gemini-1.5-flash");
        assert_eq!(cfg.provider.timeout, Duration::from_secs(15));
        assert_eq!(cfg.bind_addr.port(), 5005);
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey("GENAI_API_KEY"));

        let err = Config::from_lookup(lookup(&[("GENAI_API_KEY", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey("GENAI_API_KEY"));
    }

    #[test]
    fn mistral_needs_its_own_key() {
        let err = Config::from_lookup(lookup(&[
            ("CHAT_PROVIDER", "Mistral"),
            ("GENAI_API_KEY", "abc"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey("MISTRAL_API_KEY"));
    }

    #[test]
    fn overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("CHAT_PROVIDER", "mistral"),
            ("MISTRAL_API_KEY", "k"),
            ("CHAT_MODEL", "mistral-large-latest"),
            ("CHAT_API_BASE", "http://127.0.0.1:9000/"),
            ("CHAT_TIMEOUT_SECS", "3"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider.provider, Provider::Mistral);
        assert_eq!(cfg.provider.model, "mistral-large-latest");
        assert_eq!(cfg.provider.base_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.provider.timeout, Duration::from_secs(3));
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[
            ("GENAI_API_KEY", "k"),
            ("CHAT_PROVIDER", "openai"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::UnknownProvider("openai".to_string()));

        let err = Config::from_lookup(lookup(&[
            ("GENAI_API_KEY", "k"),
            ("CHAT_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "CHAT_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn debug_hides_api_key() {
        let cfg = Config::from_lookup(lookup(&[("GENAI_API_KEY", "super-secret")])).unwrap();
        assert!(!format!("{:?}", cfg).contains("super-secret"));
    }
}
