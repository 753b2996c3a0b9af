use crate::helpers::ContainerTestApp;
use member_persistence::{
    domain::{MemberId, MemberStore, SchemaError, SchemaMode},
    services::schema::{drop_schema, prepare_schema},
};
use sqlx::Executor;
use test_context::test_context;

#[test_context(ContainerTestApp)]
#[tokio::test]
async fn should_reject_missing_table_in_validate_mode(
    ctx: &mut ContainerTestApp,
) {
    let pool = &ctx.app.pool;
    assert_eq!(prepare_schema(pool, SchemaMode::Validate).await, Ok(()));

    drop_schema(pool).await.expect("Failed to drop schema");

    assert_eq!(
        prepare_schema(pool, SchemaMode::Validate).await,
        Err(SchemaError::MissingTable("member"))
    );
}

#[test_context(ContainerTestApp)]
#[tokio::test]
async fn should_reject_missing_column_in_validate_mode(
    ctx: &mut ContainerTestApp,
) {
    let pool = &ctx.app.pool;
    pool.execute("ALTER TABLE member DROP COLUMN name")
        .await
        .expect("Failed to drop column");

    assert_eq!(
        prepare_schema(pool, SchemaMode::Validate).await,
        Err(SchemaError::MissingColumn("member", "name"))
    );
}

#[test_context(ContainerTestApp)]
#[tokio::test]
async fn should_keep_rows_in_update_mode(ctx: &mut ContainerTestApp) {
    ctx.app.member_service.save().await.expect("Failed to save");

    prepare_schema(&ctx.app.pool, SchemaMode::Update)
        .await
        .expect("Failed to update schema");

    assert_eq!(ctx.app.member_store.count().await, Ok(1));
}

#[test_context(ContainerTestApp)]
#[tokio::test]
async fn should_restart_identities_in_create_mode(
    ctx: &mut ContainerTestApp,
) {
    ctx.app.member_service.save().await.expect("Failed to save");
    ctx.app.member_service.save().await.expect("Failed to save");

    prepare_schema(&ctx.app.pool, SchemaMode::Create)
        .await
        .expect("Failed to recreate schema");
    assert_eq!(ctx.app.member_store.count().await, Ok(0));

    let member =
        ctx.app.member_service.save().await.expect("Failed to save");
    assert_eq!(member.id(), Some(MemberId::new(1)));
}

#[test_context(ContainerTestApp)]
#[tokio::test]
async fn should_leave_schema_alone_in_none_mode(ctx: &mut ContainerTestApp) {
    let pool = &ctx.app.pool;
    drop_schema(pool).await.expect("Failed to drop schema");

    assert_eq!(prepare_schema(pool, SchemaMode::None).await, Ok(()));
    assert_eq!(
        prepare_schema(pool, SchemaMode::Validate).await,
        Err(SchemaError::MissingTable("member"))
    );
}
