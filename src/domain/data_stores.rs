use super::{Member, MemberId};
use color_eyre::eyre::Report;
use thiserror::Error;

/// Storage for members. Writes go through a [`MemberTransaction`].
#[async_trait::async_trait]
pub trait MemberStore {
    async fn begin(
        &self,
    ) -> Result<Box<dyn MemberTransaction + Send>, MemberStoreError>;
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError>;
    async fn count(&self) -> Result<i64, MemberStoreError>;
}

/// An open write scope. Dropping it without calling `commit` discards every
/// insert made through it.
#[async_trait::async_trait]
pub trait MemberTransaction {
    async fn insert(&mut self, member: Member)
        -> Result<Member, MemberStoreError>;
    async fn commit(self: Box<Self>) -> Result<(), MemberStoreError>;
    async fn rollback(self: Box<Self>) -> Result<(), MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Storage unreachable")]
    ConnectionError(#[source] Report),
    #[error("Constraint violation")]
    ConstraintViolation(#[source] Report),
    #[error("Transaction commit failed")]
    CommitError(#[source] Report),
    #[error("Member not found")]
    MemberNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ConnectionError(_), Self::ConnectionError(_))
                | (Self::ConstraintViolation(_), Self::ConstraintViolation(_))
                | (Self::CommitError(_), Self::CommitError(_))
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Table `{0}` does not exist")]
    MissingTable(&'static str),
    #[error("Column `{1}` is missing from table `{0}`")]
    MissingColumn(&'static str, &'static str),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for SchemaError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingTable(a), Self::MissingTable(b)) => a == b,
            (Self::MissingColumn(a, x), Self::MissingColumn(b, y)) => {
                a == b && x == y
            }
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}
