//! Environment-based configuration

use std::env;

/// Connection and serving parameters, read once at startup.
/// Unrecognized or unparsable values fall back to the defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub bind_address: String,
    pub seed_demo_data: bool,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_host: env_or("DB_HOST", "localhost"),
            db_port: env_parse_or("DB_PORT", 5432),
            db_name: env_or("DB_NAME", "bookfeed"),
            db_user: env_or("DB_USER", "postgres"),
            db_password: env_or("DB_PASSWORD", "postgres"),
            db_min_conn: env_parse_or("DB_MINCONN", 1),
            db_max_conn: env_parse_or("DB_MAXCONN", 10),
            bind_address: env_or("BIND_ADDRESS", "0.0.0.0:8000"),
            seed_demo_data: matches!(
                env_or("SEED_DEMO_DATA", "false").as_str(),
                "1" | "true" | "yes"
            ),
        }
    }
}
