use uuid::Uuid;

use crate::STUB_UUID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LivestreamId(pub Uuid);

impl LivestreamId {
    pub fn stub() -> LivestreamId {
        LivestreamId(STUB_UUID)
    }
}

/// Stream states as they appear on the wire (`"OFFLINE"`, `"LIVE"`,
/// `"LOADING"`)
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamStatus {
    Offline,
    Live,
    Loading,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Livestream {
    pub id: LivestreamId,
    pub title: String,
    pub status: StreamStatus,
    pub created_at: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewLivestream {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_status_wire_strings_are_uppercase() {
        assert_eq!(
            serde_json::to_string(&StreamStatus::Offline).expect("encoding status"),
            "\"OFFLINE\""
        );
        let s: StreamStatus = serde_json::from_str("\"LIVE\"").expect("decoding status");
        assert_eq!(s, StreamStatus::Live);
    }
}
