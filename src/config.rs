use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// One year. Longer lifetimes are rejected at startup.
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 86_400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{name} must be between 1 and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        max: u64,
    },
}

/// Runtime settings, read from `BOOKSHELF_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// `None` means a random secret is generated at startup, so sessions
    /// do not survive a restart.
    pub session_secret: Option<String>,
    pub session_ttl_secs: u64,
    pub cookie_secure: bool,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_secret: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            cookie_secure: false,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Missing variables
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            database_url: lookup("BOOKSHELF_DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BOOKSHELF_BIND_ADDR").unwrap_or(defaults.bind_addr),
            session_secret: lookup("BOOKSHELF_SESSION_SECRET").filter(|s| !s.is_empty()),
            session_ttl_secs: session_ttl(&lookup, defaults.session_ttl_secs)?,
            cookie_secure: parse_var(&lookup, "BOOKSHELF_COOKIE_SECURE", defaults.cookie_secure)?,
            max_connections: parse_var(
                &lookup,
                "BOOKSHELF_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
        })
    }
}

fn session_ttl<F>(lookup: &F, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let name = "BOOKSHELF_SESSION_TTL_SECS";
    let value = parse_var(lookup, name, default)?;
    if value == 0 || value > MAX_SESSION_TTL_SECS {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            max: MAX_SESSION_TTL_SECS,
        });
    }
    Ok(value)
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert!(config.session_secret.is_none());
        assert_eq!(config.session_ttl_secs, 86_400);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOOKSHELF_BIND_ADDR", "127.0.0.1:8080"),
            ("BOOKSHELF_SESSION_SECRET", "s3cret"),
            ("BOOKSHELF_SESSION_TTL_SECS", "60"),
            ("BOOKSHELF_COOKIE_SECURE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.session_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.session_ttl_secs, 60);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_empty_secret_is_ignored() {
        let config =
            Config::from_lookup(lookup_from(&[("BOOKSHELF_SESSION_SECRET", "")])).unwrap();
        assert!(config.session_secret.is_none());
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let err = Config::from_lookup(lookup_from(&[("BOOKSHELF_SESSION_TTL_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("BOOKSHELF_SESSION_TTL_SECS"));
    }

    #[test]
    fn test_session_ttl_bounds() {
        let huge = u64::MAX.to_string();
        let err = Config::from_lookup(lookup_from(&[("BOOKSHELF_SESSION_TTL_SECS", &huge)]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: u64::MAX, .. }));

        let err = Config::from_lookup(lookup_from(&[("BOOKSHELF_SESSION_TTL_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 0, .. }));

        let max = MAX_SESSION_TTL_SECS.to_string();
        let config =
            Config::from_lookup(lookup_from(&[("BOOKSHELF_SESSION_TTL_SECS", &max)])).unwrap();
        assert_eq!(config.session_ttl_secs, MAX_SESSION_TTL_SECS);
    }
}
