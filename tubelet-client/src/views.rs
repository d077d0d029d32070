use std::collections::HashSet;

use crate::api::{UserId, VideoId};

/// Session-scoped "already counted a view" bookkeeping. The view endpoint
/// should be hit once per video per session, whether or not someone is
/// logged in; anonymous viewers all share the guest slot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewTracker(HashSet<(VideoId, Option<UserId>)>);

impl ViewTracker {
    pub fn new() -> ViewTracker {
        ViewTracker(HashSet::new())
    }

    /// True exactly once per (video, viewer) for the life of this tracker;
    /// the caller reports the view iff this returns true
    pub fn first_view(&mut self, video: VideoId, viewer: Option<UserId>) -> bool {
        self.0.insert((video, viewer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Uuid;

    #[test]
    fn counts_once_per_video_and_viewer() {
        let mut t = ViewTracker::new();
        let v1 = VideoId(Uuid::from_u128(1));
        let v2 = VideoId(Uuid::from_u128(2));
        let ada = Some(UserId(Uuid::from_u128(10)));

        assert!(t.first_view(v1, ada));
        assert!(!t.first_view(v1, ada));
        // other videos and other viewers are tracked separately
        assert!(t.first_view(v2, ada));
        assert!(t.first_view(v1, None));
        assert!(!t.first_view(v1, None));
    }
}
