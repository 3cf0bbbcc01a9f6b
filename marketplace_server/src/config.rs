use std::{env, str::FromStr};

use log::*;

const DEFAULT_MKT_HOST: &str = "127.0.0.1";
const DEFAULT_MKT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/marketplace.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The size of the database connection pool.
    pub max_connections: u32,
    /// If true, the database is created if it does not exist, and pending migrations are applied at start-up.
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MKT_HOST.to_string(),
            port: DEFAULT_MKT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MKT_HOST").ok().unwrap_or_else(|| DEFAULT_MKT_HOST.into());
        let port = parse_env_or("MKT_PORT", DEFAULT_MKT_PORT);
        let database_url = env::var("MKT_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ MKT_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = match parse_env_or("MKT_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS) {
            0 => {
                warn!("🪛️ MKT_DB_MAX_CONNECTIONS must be at least 1. Using the default, {DEFAULT_MAX_CONNECTIONS}.");
                DEFAULT_MAX_CONNECTIONS
            },
            n => n,
        };
        let run_migrations = env::var("MKT_RUN_MIGRATIONS").map(|s| s != "0" && s != "false").unwrap_or(true);
        Self { host, port, database_url, max_connections, run_migrations }
    }
}

fn parse_env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(s) => s.parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            info!("🪛️ {name} is not set. Using the default value of {default}.");
            default
        },
    }
}
