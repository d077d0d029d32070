use uuid::Uuid;

use crate::{Error, User, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VideoId(pub Uuid);

impl VideoId {
    pub fn stub() -> VideoId {
        VideoId(STUB_UUID)
    }
}

/// One video as served by `/api/v1/videos/{id}`.
///
/// `uploaded_at` and `duration` are display-ready strings, like
/// `Comment::timestamp`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub url: String,
    #[serde(default)]
    pub views: i64,
    pub uploaded_at: String,
    pub duration: String,
    pub uploader: User,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Metadata for a new upload. The file transport itself (multipart upload)
/// is outside this crate; by the time this body exists the media URLs are
/// already known.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub url: String,
    pub duration: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewVideo {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_text(&self.title)?;
        crate::validate_string(&self.description)?;
        crate::validate_string(&self.url)?;
        for t in &self.tags {
            crate::validate_string(t)?;
        }
        Ok(())
    }
}
