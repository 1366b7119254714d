use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_JWT_SECRET: &str = "demo-secret-do-not-use-in-production";
pub const DEFAULT_RESOLVER_DELAY_MS: u64 = 50;

/// How `login` compares the submitted email with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailMatch {
    /// Byte-for-byte comparison. `John@Example.com` does not find `john@example.com`.
    Exact,
    CaseInsensitive,
}

/// How nested `comments`, `commentCount` and `author` fields reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverMode {
    /// One store access (plus delay) per parent row.
    PerRow,
    /// One store access (plus delay) per batch, through request-scoped loaders.
    Batched,
}

/// Switches between the seeded, buggy behaviour and the intended one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    pub email_match: EmailMatch,
    pub resolver_mode: ResolverMode,
    pub resolver_delay: Duration,
    pub explain_auth_errors: bool,
    pub trim_comment_text: bool,
}

impl Behavior {
    pub fn as_is() -> Self {
        Self {
            email_match: EmailMatch::Exact,
            resolver_mode: ResolverMode::PerRow,
            resolver_delay: Duration::from_millis(DEFAULT_RESOLVER_DELAY_MS),
            explain_auth_errors: false,
            trim_comment_text: false,
        }
    }

    pub fn fixed() -> Self {
        Self {
            email_match: EmailMatch::CaseInsensitive,
            resolver_mode: ResolverMode::Batched,
            resolver_delay: Duration::from_millis(DEFAULT_RESOLVER_DELAY_MS),
            explain_auth_errors: true,
            trim_comment_text: true,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.resolver_delay = delay;
        self
    }

    pub fn with_resolver_mode(mut self, mode: ResolverMode) -> Self {
        self.resolver_mode = mode;
        self
    }

    pub fn with_email_match(mut self, email_match: EmailMatch) -> Self {
        self.email_match = email_match;
        self
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self::as_is()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    pub behavior: Behavior,
}

impl AppConfig {
    /// Reads configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT);
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut behavior = match lookup("BEHAVIOR_PROFILE").as_deref() {
            None | Some("as_is") => Behavior::as_is(),
            Some("fixed") => Behavior::fixed(),
            Some(other) => {
                log::warn!("⚠️  Unknown BEHAVIOR_PROFILE '{}', using as_is", other);
                Behavior::as_is()
            }
        };

        if let Some(value) = lookup("EMAIL_MATCH") {
            match value.as_str() {
                "exact" => behavior.email_match = EmailMatch::Exact,
                "case_insensitive" => behavior.email_match = EmailMatch::CaseInsensitive,
                other => log::warn!("⚠️  Unknown EMAIL_MATCH '{}', keeping profile value", other),
            }
        }

        if let Some(value) = lookup("RESOLVER_MODE") {
            match value.as_str() {
                "per_row" => behavior.resolver_mode = ResolverMode::PerRow,
                "batched" => behavior.resolver_mode = ResolverMode::Batched,
                other => log::warn!("⚠️  Unknown RESOLVER_MODE '{}', keeping profile value", other),
            }
        }

        let delay_ms = parse_or(
            "RESOLVER_DELAY_MS",
            lookup("RESOLVER_DELAY_MS"),
            DEFAULT_RESOLVER_DELAY_MS,
        );
        behavior.resolver_delay = Duration::from_millis(delay_ms);
        behavior.explain_auth_errors = parse_or(
            "EXPLAIN_AUTH_ERRORS",
            lookup("EXPLAIN_AUTH_ERRORS"),
            behavior.explain_auth_errors,
        );
        behavior.trim_comment_text = parse_or(
            "TRIM_COMMENT_TEXT",
            lookup("TRIM_COMMENT_TEXT"),
            behavior.trim_comment_text,
        );

        Self {
            host,
            port,
            jwt_secret,
            cors_origins,
            behavior,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("⚠️  Invalid value for {}: '{}', using default", key, value);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_the_seeded_behavior() {
        let config = AppConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.behavior, Behavior::as_is());
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_string()]);
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
    }

    #[test]
    fn test_fixed_profile_with_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BEHAVIOR_PROFILE", "fixed"),
            ("RESOLVER_MODE", "per_row"),
            ("RESOLVER_DELAY_MS", "0"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ]));

        assert_eq!(config.behavior.email_match, EmailMatch::CaseInsensitive);
        assert_eq!(config.behavior.resolver_mode, ResolverMode::PerRow);
        assert_eq!(config.behavior.resolver_delay, Duration::ZERO);
        assert!(config.behavior.explain_auth_errors);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("EMAIL_MATCH", "fuzzy"),
            ("TRIM_COMMENT_TEXT", "maybe"),
        ]));

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.behavior.email_match, EmailMatch::Exact);
        assert!(!config.behavior.trim_comment_text);
    }
}
