// Configuration read once at startup from the environment and then passed
// by reference to the client, the poster and the deleter.

use std::fmt;
use std::time::Duration;

use crate::error::{XpostError, XpostResult};

pub const CONSUMER_KEY_VAR: &str = "X_CONSUMER_KEY";
pub const CONSUMER_SECRET_VAR: &str = "X_CONSUMER_SECRET";
pub const ACCESS_TOKEN_VAR: &str = "X_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "X_ACCESS_TOKEN_SECRET";

pub const DEFAULT_API_URL: &str = "https://api.twitter.com";
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.twitter.com";
pub const DEFAULT_CHAR_LIMIT: usize = 280;
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth 1.0a user-context credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Base URL of the v2 API (posts, deletes).
    pub api_url: String,
    /// Base URL of the v1.1 media upload API.
    pub upload_url: String,
    /// Maximum characters per post.
    pub char_limit: usize,
    /// Bound on downloading the image to attach.
    pub image_timeout: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> XpostResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable lookup. Every missing
    /// credential is reported at once; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> XpostResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut require = |name: &'static str| {
            read(name).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };
        let credentials = Credentials {
            consumer_key: require(CONSUMER_KEY_VAR),
            consumer_secret: require(CONSUMER_SECRET_VAR),
            access_token: require(ACCESS_TOKEN_VAR),
            access_token_secret: require(ACCESS_TOKEN_SECRET_VAR),
        };
        if !missing.is_empty() {
            return Err(XpostError::Configuration(format!(
                "missing X API credentials: {}. Export them in your shell profile or environment.",
                missing.join(", ")
            )));
        }

        let api_url = read("X_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let upload_url = read("X_UPLOAD_URL").unwrap_or_else(|| DEFAULT_UPLOAD_URL.into());
        let char_limit = match read("X_CHAR_LIMIT") {
            Some(raw) => parse_positive("X_CHAR_LIMIT", &raw)? as usize,
            None => DEFAULT_CHAR_LIMIT,
        };
        let image_timeout = match read("X_IMAGE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive("X_IMAGE_TIMEOUT_SECS", &raw)?),
            None => DEFAULT_IMAGE_TIMEOUT,
        };

        Ok(Config {
            credentials,
            api_url: api_url.trim_end_matches('/').to_string(),
            upload_url: upload_url.trim_end_matches('/').to_string(),
            char_limit,
            image_timeout,
        })
    }
}

fn parse_positive(name: &str, raw: &str) -> XpostResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(XpostError::Configuration(format!(
            "{name} must be a positive integer, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            (CONSUMER_KEY_VAR, "ck"),
            (CONSUMER_SECRET_VAR, "cs"),
            (ACCESS_TOKEN_VAR, "at"),
            (ACCESS_TOKEN_SECRET_VAR, "ats"),
        ])
    }

    #[test]
    fn loads_credentials_with_defaults() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.credentials.consumer_key, "ck");
        assert_eq!(config.credentials.access_token_secret, "ats");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.upload_url, DEFAULT_UPLOAD_URL);
        assert_eq!(config.char_limit, 280);
        assert_eq!(config.image_timeout, Duration::from_secs(10));
    }

    #[test]
    fn each_missing_credential_is_fatal() {
        for var in [
            CONSUMER_KEY_VAR,
            CONSUMER_SECRET_VAR,
            ACCESS_TOKEN_VAR,
            ACCESS_TOKEN_SECRET_VAR,
        ] {
            let mut vars = full_env();
            vars.remove(var);
            let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
            match err {
                XpostError::Configuration(msg) => assert!(msg.contains(var), "{msg}"),
                other => panic!("expected configuration error, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut vars = full_env();
        vars.insert(ACCESS_TOKEN_VAR.into(), "  ".into());
        assert!(matches!(
            Config::from_lookup(|k| vars.get(k).cloned()),
            Err(XpostError::Configuration(_))
        ));
    }

    #[test]
    fn lists_all_missing_names() {
        let err = Config::from_lookup(|_| None).unwrap_err().to_string();
        assert!(err.contains("X_CONSUMER_KEY, X_CONSUMER_SECRET, X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET"));
    }

    #[test]
    fn overrides_are_applied_and_trimmed() {
        let mut vars = full_env();
        vars.insert("X_API_URL".into(), "http://127.0.0.1:9000/".into());
        vars.insert("X_UPLOAD_URL".into(), "http://127.0.0.1:9001".into());
        vars.insert("X_CHAR_LIMIT".into(), "500".into());
        vars.insert("X_IMAGE_TIMEOUT_SECS".into(), "3".into());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.upload_url, "http://127.0.0.1:9001");
        assert_eq!(config.char_limit, 500);
        assert_eq!(config.image_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_zero_limit() {
        let mut vars = full_env();
        vars.insert("X_CHAR_LIMIT".into(), "0".into());
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("X_CHAR_LIMIT"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("\"ats\""));
        assert!(printed.contains("<redacted>"));
    }
}
