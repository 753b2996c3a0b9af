use std::sync::Arc;

use thiserror::Error;
use tracing::Level;

use crate::{
    domain::{ConfigError, Member, MemberStoreError, SchemaError},
    get_mysql_pool,
    services::{
        data_stores::MySqlMemberStore,
        member_service::MemberService,
        schema::{drop_schema, prepare_schema},
    },
    utils::{config::DatabaseSettings, tracing::log_error_chain},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error")]
    ConfigError(#[from] ConfigError),
    #[error("Failed to connect to the database")]
    ConnectionError(#[from] sqlx::Error),
    #[error("Failed to prepare schema")]
    SchemaError(#[from] SchemaError),
    #[error("Failed to save member")]
    SaveError(#[from] MemberStoreError),
    #[error("Failed to drop schema")]
    DropSchemaError(#[source] SchemaError),
}

/// Connects, prepares the schema, saves one member and, in `create-drop`
/// mode, drops the schema again.
#[tracing::instrument(name = "Running member persistence", skip_all)]
pub async fn run(settings: &DatabaseSettings) -> Result<Member, AppError> {
    let pool = get_mysql_pool(settings.connect_options()?).await?;
    prepare_schema(&pool, settings.schema_mode).await?;

    let member_service =
        MemberService::new(Arc::new(MySqlMemberStore::new(pool.clone())));
    let saved = member_service.save().await;

    let dropped = if settings.schema_mode.drops_on_exit() {
        drop_schema(&pool).await
    } else {
        Ok(())
    };
    pool.close().await;

    settle(saved, dropped)
}

/// A failed save outranks a failed schema drop; the drop error is only
/// logged in that case.
fn settle(
    saved: Result<Member, MemberStoreError>,
    dropped: Result<(), SchemaError>,
) -> Result<Member, AppError> {
    match (saved, dropped) {
        (Ok(member), Ok(())) => Ok(member),
        (Ok(_), Err(e)) => Err(AppError::DropSchemaError(e)),
        (Err(e), Ok(())) => Err(AppError::SaveError(e)),
        (Err(e), Err(drop_error)) => {
            log_error_chain(&drop_error, Level::WARN);
            Err(AppError::SaveError(e))
        }
    }
}
