use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub production: bool,
}

/// Session settings handed to the request path; copied out of [`Config`]
/// so handlers and middleware never touch the process-wide holder.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub jwt_secret: String,
    pub secure_cookie: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            port: get_env_parse_or("PORT", 3000)?,
            database: DatabaseConfig {
                host: get_env("DB_HOST")?,
                user: get_env("DB_USER")?,
                password: get_env("DB_PASS")?,
                name: get_env("DB_NAME")?,
                port: get_env_parse_or("DB_PORT", 3306)?,
            },
            jwt_secret: get_env("JWT_SECRET")?,
            production: env::var("APP_ENV")
                .map(|value| value.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        })
    }

    pub fn server_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn session(&self) -> SessionSettings {
        SessionSettings {
            jwt_secret: self.jwt_secret.clone(),
            secure_cookie: self.production,
        }
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
