use serde::Serialize;

use super::MemberId;

/// A member row. `id` stays `None` until a store assigns one on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Member {
    id: Option<MemberId>,
    name: String,
}

impl Member {
    pub fn new(id: Option<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the same member carrying the identity generated by a store.
    pub(crate) fn with_generated_id(self, id: MemberId) -> Self {
        Self {
            id: Some(id),
            name: self.name,
        }
    }
}

#[test]
fn test_default_member_is_transient() {
    let member = Member::default();
    assert_eq!(member.id(), None);
    assert_eq!(member.name(), "");
    assert!(!member.is_persisted());
}

#[test]
fn test_full_constructor() {
    let member = Member::new(Some(MemberId::new(7)), "Ted");
    assert_eq!(member.id(), Some(MemberId::new(7)));
    assert_eq!(member.name(), "Ted");
    assert!(member.is_persisted());
}

#[test]
fn test_generated_id_keeps_name() {
    let member =
        Member::new(None, "Dougal").with_generated_id(MemberId::new(3));
    assert_eq!(member, Member::new(Some(MemberId::new(3)), "Dougal"));
}

#[test]
fn test_serializes_id_as_number() {
    let member = Member::new(Some(MemberId::new(1)), "name");
    let json =
        serde_json::to_value(&member).expect("Failed to serialize member");
    assert_eq!(json, serde_json::json!({ "id": 1, "name": "name" }));

    let transient = serde_json::to_value(Member::new(None, "name"))
        .expect("Failed to serialize member");
    assert_eq!(transient, serde_json::json!({ "id": null, "name": "name" }));
}
