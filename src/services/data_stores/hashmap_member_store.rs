use std::{collections::HashMap, sync::Arc};

use color_eyre::eyre::eyre;
use tokio::sync::RwLock;

use crate::domain::{
    Member, MemberId, MemberStore, MemberStoreError, MemberTransaction,
};

#[derive(Default)]
struct MemberTable {
    members: HashMap<MemberId, Member>,
    last_id: i64,
}

impl MemberTable {
    fn next_id(&mut self) -> MemberId {
        self.last_id += 1;
        MemberId::new(self.last_id)
    }
}

/// In-memory member store. Identities start at 1 and, like an
/// `AUTO_INCREMENT` column, are never handed out twice even when the
/// transaction that took one is rolled back.
#[derive(Default, Clone)]
pub struct HashmapMemberStore {
    table: Arc<RwLock<MemberTable>>,
}

pub struct HashmapMemberTransaction {
    table: Arc<RwLock<MemberTable>>,
    staged: Vec<Member>,
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn begin(
        &self,
    ) -> Result<Box<dyn MemberTransaction + Send>, MemberStoreError> {
        Ok(Box::new(HashmapMemberTransaction {
            table: self.table.clone(),
            staged: Vec::new(),
        }))
    }

    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        match self.table.read().await.members.get(id) {
            Some(member) => Ok(member.clone()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn count(&self) -> Result<i64, MemberStoreError> {
        let count = self.table.read().await.members.len();
        i64::try_from(count)
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }
}

#[async_trait::async_trait]
impl MemberTransaction for HashmapMemberTransaction {
    async fn insert(
        &mut self,
        member: Member,
    ) -> Result<Member, MemberStoreError> {
        let id = self.table.write().await.next_id();
        let member = member.with_generated_id(id);
        self.staged.push(member.clone());
        Ok(member)
    }

    async fn commit(self: Box<Self>) -> Result<(), MemberStoreError> {
        let HashmapMemberTransaction { table, staged } = *self;
        let mut table = table.write().await;
        for member in staged {
            let id = member.id().ok_or_else(|| {
                MemberStoreError::UnexpectedError(eyre!(
                    "staged member has no id"
                ))
            })?;
            table.members.insert(id, member);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), MemberStoreError> {
        Ok(())
    }
}
