use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

/// Opens the single shared database handle. The pool is capped at one
/// connection so every request's statements go over the same session.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}
