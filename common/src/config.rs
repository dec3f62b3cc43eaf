//! Application configuration.
//!
//! All configuration is sourced from environment variables at startup and
//! held in immutable values for the lifetime of the process.

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8001;

const DEFAULT_MYSQL_HOST: &str = "localhost";
const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_MYSQL_USER: &str = "root";
const DEFAULT_MYSQL_DATABASE: &str = "mysql";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
}

impl AppConfig {
    /// Loads the listener configuration from `SERVER_HOST` / `SERVER_PORT`.
    pub fn load() -> Self {
        Self {
            host: env_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            port: parse_port(std::env::var("SERVER_PORT").ok(), DEFAULT_SERVER_PORT),
        }
    }
}

/// MySQL connection parameters.
///
/// Built once at startup and passed into request-scoped providers;
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// MySQL server host.
    pub host: String,
    /// MySQL server port.
    pub port: u16,
    /// MySQL username.
    pub user: String,
    /// MySQL password.
    pub password: String,
    /// Default database when a request does not select one.
    pub database: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl DbConfig {
    /// Loads MySQL connection parameters from `MYSQL_*` environment variables.
    ///
    /// Every variable is optional; an unparsable `MYSQL_PORT` logs a warning
    /// and falls back to 3306.
    pub fn from_env() -> Self {
        Self {
            host: env_or("MYSQL_HOST", DEFAULT_MYSQL_HOST),
            port: parse_port(std::env::var("MYSQL_PORT").ok(), DEFAULT_MYSQL_PORT),
            user: env_or("MYSQL_USER", DEFAULT_MYSQL_USER),
            password: std::env::var("MYSQL_PASSWORD").unwrap_or_default(),
            database: env_or("MYSQL_DATABASE", DEFAULT_MYSQL_DATABASE),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses a port value, warning and falling back to `default` on garbage.
fn parse_port(raw: Option<String>, default: u16) -> u16 {
    match raw {
        None => default,
        Some(value) => match value.trim().parse() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!(value = %value, default, "invalid port value, using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_port_uses_default() {
        assert_eq!(parse_port(None, 3306), 3306);
    }

    #[test]
    fn valid_port_is_parsed() {
        assert_eq!(parse_port(Some("3307".to_string()), 3306), 3307);
        assert_eq!(parse_port(Some(" 3308 ".to_string()), 3306), 3308);
    }

    #[test]
    fn garbage_port_falls_back() {
        assert_eq!(parse_port(Some("not-a-port".to_string()), 3306), 3306);
        assert_eq!(parse_port(Some("".to_string()), 3306), 3306);
        assert_eq!(parse_port(Some("70000".to_string()), 3306), 3306);
    }
}
