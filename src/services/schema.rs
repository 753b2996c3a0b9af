//! DDL for the `member` table, selected by [`SchemaMode`].

use color_eyre::eyre::Report;
use sqlx::MySqlPool;

use crate::{
    domain::{SchemaError, SchemaMode},
    utils::constants::{MEMBER_COLUMNS, MEMBER_TABLE},
};

const CREATE_MEMBER_TABLE: &str = r#"
    CREATE TABLE member (
        id BIGINT NOT NULL AUTO_INCREMENT,
        name VARCHAR(255) NOT NULL,
        PRIMARY KEY (id)
    ) ENGINE=InnoDB
"#;

const CREATE_MEMBER_TABLE_IF_MISSING: &str = r#"
    CREATE TABLE IF NOT EXISTS member (
        id BIGINT NOT NULL AUTO_INCREMENT,
        name VARCHAR(255) NOT NULL,
        PRIMARY KEY (id)
    ) ENGINE=InnoDB
"#;

const DROP_MEMBER_TABLE: &str = "DROP TABLE IF EXISTS member";

const COUNT_MEMBER_TABLES: &str = r#"
    SELECT COUNT(*)
    FROM information_schema.tables
    WHERE table_schema = DATABASE() AND table_name = ?
"#;

const COUNT_MEMBER_COLUMNS: &str = r#"
    SELECT COUNT(*)
    FROM information_schema.columns
    WHERE table_schema = DATABASE() AND table_name = ? AND column_name = ?
"#;

#[tracing::instrument(name = "Preparing schema", skip(pool))]
pub async fn prepare_schema(
    pool: &MySqlPool,
    mode: SchemaMode,
) -> Result<(), SchemaError> {
    match mode {
        SchemaMode::None => Ok(()),
        SchemaMode::Validate => validate_schema(pool).await,
        SchemaMode::Update => {
            execute(pool, CREATE_MEMBER_TABLE_IF_MISSING).await
        }
        SchemaMode::Create | SchemaMode::CreateDrop => {
            execute(pool, DROP_MEMBER_TABLE).await?;
            execute(pool, CREATE_MEMBER_TABLE).await
        }
    }
}

#[tracing::instrument(name = "Dropping schema", skip_all)]
pub async fn drop_schema(pool: &MySqlPool) -> Result<(), SchemaError> {
    execute(pool, DROP_MEMBER_TABLE).await
}

async fn validate_schema(pool: &MySqlPool) -> Result<(), SchemaError> {
    let tables = sqlx::query_scalar::<_, i64>(COUNT_MEMBER_TABLES)
        .bind(MEMBER_TABLE)
        .fetch_one(pool)
        .await
        .map_err(|e| SchemaError::UnexpectedError(Report::new(e)))?;

    if tables == 0 {
        return Err(SchemaError::MissingTable(MEMBER_TABLE));
    }

    for column in MEMBER_COLUMNS {
        let found = sqlx::query_scalar::<_, i64>(COUNT_MEMBER_COLUMNS)
            .bind(MEMBER_TABLE)
            .bind(column)
            .fetch_one(pool)
            .await
            .map_err(|e| SchemaError::UnexpectedError(Report::new(e)))?;

        if found == 0 {
            return Err(SchemaError::MissingColumn(MEMBER_TABLE, column));
        }
    }
    Ok(())
}

async fn execute(pool: &MySqlPool, statement: &str) -> Result<(), SchemaError> {
    sqlx::query(statement)
        .execute(pool)
        .await
        .map_err(|e| SchemaError::UnexpectedError(Report::new(e)))?;
    Ok(())
}
