use uuid::Uuid;

use crate::{Error, UserId, VideoId, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

/// One comment as served by `/api/v1/comments/video/{videoId}`.
///
/// `timestamp` is a display-ready string minted by the server; clients never
/// parse it. `parent_id` being `None` means a top-level comment; a dangling
/// `parent_id` is tolerated by the thread builder, not rejected here.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub text: String,
    pub timestamp: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

/// Body of `POST /api/v1/comments/create` (snake_case on the wire, unlike
/// the camelCase responses)
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub video_id: VideoId,
    pub text: String,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

/// Body of `PATCH /api/v1/comments/{commentId}`
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentPatch {
    pub text: String,
}

impl CommentPatch {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_text(&self.text)
    }
}

impl NewComment {
    pub fn new(video_id: VideoId, text: String) -> NewComment {
        NewComment {
            video_id,
            text,
            parent_id: None,
        }
    }

    pub fn reply(video_id: VideoId, parent_id: CommentId, text: String) -> NewComment {
        NewComment {
            video_id,
            text,
            parent_id: Some(parent_id),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_text(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shape of the payloads emitted by the v1 backend
    const WIRE_COMMENT: &str = r#"{
        "id": "7ad01c79-6049-4b24-8c06-1e167153f5a0",
        "userId": "c85d8e17-3746-40c4-8b80-7963a313aab3",
        "username": "ada",
        "text": "first",
        "timestamp": "2024-05-01T12:00:00+00:00",
        "likes": 3,
        "parentId": null
    }"#;

    #[test]
    fn comment_decodes_from_v1_payload() {
        let c: Comment = serde_json::from_str(WIRE_COMMENT).expect("decoding v1 comment");
        assert_eq!(c.username, "ada");
        assert_eq!(c.likes, 3);
        assert_eq!(c.parent_id, None);
        assert_eq!(c.avatar, None);
    }

    #[test]
    fn comment_reencodes_with_camel_case_fields() {
        let c: Comment = serde_json::from_str(WIRE_COMMENT).expect("decoding v1 comment");
        let v = serde_json::to_value(&c).expect("encoding comment");
        assert!(v.get("userId").is_some());
        assert!(v.get("user_id").is_none());
        // unset avatar must not reappear as an explicit null
        assert!(v.get("avatar").is_none());
    }

    #[test]
    fn new_comment_body_is_snake_case() {
        let b = NewComment::reply(VideoId(crate::STUB_UUID), CommentId::stub(), "hi".into());
        let v = serde_json::to_value(&b).expect("encoding body");
        assert!(v.get("video_id").is_some());
        assert!(v.get("parent_id").is_some());
    }

    #[test]
    fn new_comment_validation() {
        let mut b = NewComment::new(VideoId(crate::STUB_UUID), "  ".into());
        assert_eq!(b.validate(), Err(Error::EmptyText));
        b.text = String::from("fine");
        assert_eq!(b.validate(), Ok(()));
    }
}
