mod api;
mod auth;
mod comment;
mod error;
mod livestream;
mod subscription;
mod user;
mod video;

pub use api::{CommentApi, FeedMessage};
pub use auth::{AuthToken, NewSession, NewUser};
pub use comment::{Comment, CommentId, CommentPatch, NewComment};
pub use error::Error;
pub use livestream::{Livestream, LivestreamId, NewLivestream, StreamStatus};
pub use subscription::Subscription;
pub use user::{User, UserId};
pub use video::{NewVideo, Video, VideoId};

pub use uuid::{uuid, Uuid};

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

/// The default `skip`/`limit` window used by all the paginated list endpoints
pub const DEFAULT_PAGE_LIMIT: usize = 100;

pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

/// Validates user-submitted body text: no null bytes, and not
/// whitespace-only (the UI disables submission of empty text, the
/// server rejects it anyway)
pub fn validate_text(s: &str) -> Result<(), Error> {
    validate_string(s)?;
    match s.trim().is_empty() {
        true => Err(Error::EmptyText),
        false => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_null_bytes() {
        assert_eq!(
            validate_string("foo\0bar"),
            Err(Error::NullByteInString(String::from("foo\0bar")))
        );
        assert_eq!(validate_string("foo bar"), Ok(()));
    }

    #[test]
    fn validate_text_rejects_whitespace_only() {
        assert_eq!(validate_text("   \n\t"), Err(Error::EmptyText));
        assert_eq!(validate_text(""), Err(Error::EmptyText));
        assert_eq!(validate_text(" hi "), Ok(()));
    }
}
