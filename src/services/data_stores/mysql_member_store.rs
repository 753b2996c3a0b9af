use color_eyre::eyre::eyre;
use sqlx::{error::ErrorKind, mysql::MySqlRow, MySql, MySqlPool, Row};

use crate::domain::{
    Member, MemberId, MemberStore, MemberStoreError, MemberTransaction,
};

pub struct MySqlMemberStore {
    pool: MySqlPool,
}

impl MySqlMemberStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

pub struct MySqlMemberTransaction {
    transaction: sqlx::Transaction<'static, MySql>,
}

#[async_trait::async_trait]
impl MemberStore for MySqlMemberStore {
    #[tracing::instrument(name = "Beginning MySQL transaction", skip_all)]
    async fn begin(
        &self,
    ) -> Result<Box<dyn MemberTransaction + Send>, MemberStoreError> {
        let transaction = self.pool.begin().await.map_err(classify)?;
        Ok(Box::new(MySqlMemberTransaction { transaction }))
    }

    #[tracing::instrument(name = "Retrieving member from MySQL", skip_all)]
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        sqlx::query(
            r#"
                SELECT id, name
                FROM member
                WHERE id = ?
            "#,
        )
        .bind(*id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => MemberStoreError::MemberNotFound,
            err => classify(err),
        })
        .and_then(|row| member_from_row(&row))
    }

    #[tracing::instrument(name = "Counting members in MySQL", skip_all)]
    async fn count(&self) -> Result<i64, MemberStoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM member")
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }
}

#[async_trait::async_trait]
impl MemberTransaction for MySqlMemberTransaction {
    #[tracing::instrument(name = "Inserting member into MySQL", skip_all)]
    async fn insert(
        &mut self,
        member: Member,
    ) -> Result<Member, MemberStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO member (name) VALUES (?)
            "#,
        )
        .bind(member.name())
        .execute(&mut *self.transaction)
        .await
        .map_err(classify)?;

        let id = MemberId::try_from(result.last_insert_id())
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
        Ok(member.with_generated_id(id))
    }

    #[tracing::instrument(name = "Committing MySQL transaction", skip_all)]
    async fn commit(self: Box<Self>) -> Result<(), MemberStoreError> {
        self.transaction
            .commit()
            .await
            .map_err(|e| MemberStoreError::CommitError(e.into()))
    }

    #[tracing::instrument(name = "Rolling back MySQL transaction", skip_all)]
    async fn rollback(self: Box<Self>) -> Result<(), MemberStoreError> {
        self.transaction.rollback().await.map_err(classify)
    }
}

fn member_from_row(row: &MySqlRow) -> Result<Member, MemberStoreError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;
    Ok(Member::new(Some(MemberId::new(id)), name))
}

/// Sorts a driver error into the store's failure categories.
fn classify(e: sqlx::Error) -> MemberStoreError {
    let constraint_violation = e.as_database_error().is_some_and(|db_err| {
        matches!(
            db_err.kind(),
            ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
        )
    });
    if constraint_violation {
        return MemberStoreError::ConstraintViolation(e.into());
    }

    let connection_failure = matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    );
    if connection_failure {
        MemberStoreError::ConnectionError(e.into())
    } else {
        MemberStoreError::UnexpectedError(e.into())
    }
}
