use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Video not found {0}")]
    VideoNotFound(Uuid),

    #[error("Comment not found {0}")]
    CommentNotFound(Uuid),

    #[error("Uuid already used {0}")]
    UuidAlreadyUsed(Uuid),

    #[error("Email already used {0}")]
    EmailAlreadyUsed(String),

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Invalid character in user name {0:?}")]
    InvalidUsername(String),

    #[error("Empty body text")]
    EmptyText,
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::VideoNotFound(_) => StatusCode::NOT_FOUND,
            Error::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Error::UuidAlreadyUsed(_) => StatusCode::CONFLICT,
            Error::EmailAlreadyUsed(_) => StatusCode::CONFLICT,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
            Error::InvalidUsername(_) => StatusCode::BAD_REQUEST,
            Error::EmptyText => StatusCode::BAD_REQUEST,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::VideoNotFound(v) => json!({
                "message": "video not found",
                "type": "video-not-found",
                "video": v,
            }),
            Error::CommentNotFound(c) => json!({
                "message": "comment not found",
                "type": "comment-not-found",
                "comment": c,
            }),
            Error::UuidAlreadyUsed(u) => json!({
                "message": "uuid conflict",
                "type": "conflict-uuid",
                "uuid": u,
            }),
            Error::EmailAlreadyUsed(e) => json!({
                "message": "email already used",
                "type": "conflict-email",
                "email": e,
            }),
            Error::NullByteInString(s) => json!({
                "message": "there was a null byte in argument string",
                "type": "null-byte",
                "string": s,
            }),
            Error::InvalidUsername(n) => json!({
                "message": "there was an invalid character in a user name",
                "type": "invalid-username",
                "name": n,
            }),
            Error::EmptyText => json!({
                "message": "body text cannot be empty",
                "type": "empty-text",
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let get_str = |field: &str| -> Option<&str> { data.get(field).and_then(|f| f.as_str()) };
        let get_uuid = |field: &str| -> anyhow::Result<Uuid> {
            get_str(field)
                .and_then(|u| Uuid::from_str(u).ok())
                .ok_or_else(|| anyhow!("error field {field:?} is not a proper uuid"))
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(get_str("message").unwrap_or(""))),
                "permission-denied" => Error::PermissionDenied,
                "video-not-found" => Error::VideoNotFound(get_uuid("video")?),
                "comment-not-found" => Error::CommentNotFound(get_uuid("comment")?),
                "conflict-uuid" => Error::UuidAlreadyUsed(get_uuid("uuid")?),
                "conflict-email" => Error::EmailAlreadyUsed(String::from(
                    get_str("email")
                        .ok_or_else(|| anyhow!("error is an email conflict without an email"))?,
                )),
                "null-byte" => Error::NullByteInString(String::from(get_str("string").ok_or_else(
                    || anyhow!("error is a null-byte-in-string without a string"),
                )?)),
                "invalid-username" => Error::InvalidUsername(String::from(
                    get_str("name")
                        .ok_or_else(|| anyhow!("error is about an invalid name without a name"))?,
                )),
                "empty-text" => Error::EmptyText,
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_round_trip_through_json() {
        let all = vec![
            Error::Unknown(String::from("boom")),
            Error::PermissionDenied,
            Error::VideoNotFound(crate::STUB_UUID),
            Error::CommentNotFound(crate::STUB_UUID),
            Error::UuidAlreadyUsed(crate::STUB_UUID),
            Error::EmailAlreadyUsed(String::from("a@example.org")),
            Error::NullByteInString(String::from("a\0b")),
            Error::InvalidUsername(String::from("a b")),
            Error::EmptyText,
        ];
        for e in all {
            let parsed = Error::parse(&e.contents()).expect("parsing error contents");
            assert_eq!(parsed, e);
        }
    }

    #[test]
    fn status_codes_match_backend() {
        assert_eq!(Error::PermissionDenied.status_code(), http::StatusCode::FORBIDDEN);
        assert_eq!(
            Error::CommentNotFound(crate::STUB_UUID).status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(Error::EmptyText.status_code(), http::StatusCode::BAD_REQUEST);
    }
}
