use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl TryFrom<u64> for MemberId {
    type Error = std::num::TryFromIntError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Ok(Self(i64::try_from(id)?))
    }
}

impl AsRef<i64> for MemberId {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_generated_ids() {
    let id = MemberId::try_from(42u64).expect("42 fits in an i64");
    assert_eq!(id.as_ref(), &42, "ID does not match expected value");
    assert_eq!(id.to_string(), "42");
}

#[test]
fn test_out_of_range_ids() {
    let result = MemberId::try_from(u64::MAX);
    assert!(result.is_err(), "u64::MAX should not fit in a member ID");
}

#[test]
fn test_ids_are_ordered() {
    assert!(MemberId::new(1) < MemberId::new(2));
}
