//! Runtime configuration
//!
//! Read from the environment once at startup. The server binary can
//! override values from CLI flags before anything consults the global.

use std::path::PathBuf;

use once_cell::sync::OnceCell;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Book root directory (where book.toml lives)
    pub book_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            book_dir: PathBuf::from("."),
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl AppConfig {
    /// Build from `BOOK_DIR`, `HOST` and `PORT`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            book_dir: lookup("BOOK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.book_dir),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Install the global configuration. Only the first call takes effect.
pub fn init(config: AppConfig) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already initialized, keeping existing values");
    }
}

/// Global configuration, initialized from the environment on first use.
pub fn get() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.book_dir, PathBuf::from("."));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = AppConfig::from_lookup(|key| match key {
            "BOOK_DIR" => Some("/books/guide".to_string()),
            "HOST" => Some("0.0.0.0".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        });
        assert_eq!(config.book_dir, PathBuf::from("/books/guide"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = AppConfig::from_lookup(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 3001);
    }
}
