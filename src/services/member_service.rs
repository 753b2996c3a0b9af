use std::sync::Arc;

use color_eyre::eyre::eyre;

use crate::{
    domain::{Member, MemberStore, MemberStoreError},
    utils::constants::DEFAULT_MEMBER_NAME,
};

pub type MemberStoreType = Arc<dyn MemberStore + Send + Sync>;

#[derive(Clone)]
pub struct MemberService {
    member_store: MemberStoreType,
}

impl MemberService {
    pub fn new(member_store: MemberStoreType) -> Self {
        Self { member_store }
    }

    /// Persists a new member named `"name"` in its own transaction and
    /// returns it with the identity the store generated.
    ///
    /// Nothing is committed unless the returned result is `Ok`.
    #[tracing::instrument(name = "Saving member", skip_all)]
    pub async fn save(&self) -> Result<Member, MemberStoreError> {
        let member = Member::new(None, DEFAULT_MEMBER_NAME);

        let mut transaction = self.member_store.begin().await?;
        let inserted = transaction.insert(member).await.and_then(|member| {
            if member.is_persisted() {
                Ok(member)
            } else {
                Err(MemberStoreError::UnexpectedError(eyre!(
                    "store returned a member without an id"
                )))
            }
        });

        match inserted {
            Ok(member) => {
                transaction.commit().await?;
                tracing::debug!(id = ?member.id(), "Member saved");
                Ok(member)
            }
            Err(e) => {
                if let Err(rollback_error) = transaction.rollback().await {
                    tracing::warn!(
                        error = %rollback_error,
                        "Failed to roll back after insert error"
                    );
                }
                Err(e)
            }
        }
    }
}
