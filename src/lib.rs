use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

pub mod app;
pub mod domain;
pub mod services;
pub mod utils;

use utils::constants::prod;

pub async fn get_mysql_pool(
    options: MySqlConnectOptions,
) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(prod::MAX_CONNECTIONS)
        .acquire_timeout(prod::ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}

/// A pool that opens no connection until first used. Connection failures
/// surface from the first query instead of from pool construction.
pub fn get_lazy_mysql_pool(
    options: MySqlConnectOptions,
    acquire_timeout: std::time::Duration,
) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(prod::MAX_CONNECTIONS)
        .acquire_timeout(acquire_timeout)
        .connect_lazy_with(options)
}
