use uuid::Uuid;

use crate::STUB_UUID;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID)
    }
}

/// Public channel profile, as served by `/api/v1/users/{id}`
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub banner: String,
    #[serde(default)]
    pub subscribers: i64,
}
