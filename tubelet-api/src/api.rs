use async_trait::async_trait;

use crate::{AuthToken, Comment, CommentId, Error, NewComment, VideoId};

/// The four comment operations the watch page needs from its backend.
///
/// Implementations are expected to be best-effort single attempts: callers
/// patch their local state only after `Ok`, and a failed call leaves the
/// local state untouched.
#[async_trait]
pub trait CommentApi {
    /// Full flat list for a video, newest first
    async fn list_comments(&mut self, video: VideoId) -> Result<Vec<Comment>, Error>;

    async fn create_comment(
        &mut self,
        token: AuthToken,
        comment: NewComment,
    ) -> Result<Comment, Error>;

    /// Returns the updated record; the caller merges (at least) `text` into
    /// its local copy
    async fn update_comment(
        &mut self,
        token: AuthToken,
        comment: CommentId,
        text: String,
    ) -> Result<Comment, Error>;

    /// Deleting a comment also deletes all its transitive replies
    /// server-side; the caller mirrors that locally on success
    async fn delete_comment(&mut self, token: AuthToken, comment: CommentId) -> Result<(), Error>;
}

/// Messages pushed over a per-video live feed
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub enum FeedMessage {
    Pong,
    NewComment(Comment),
}
